use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    PlayPause,
    Next,
    Prev,
    CursorDown,
    CursorUp,
    CursorTop,
    CursorBottom,
    SelectUnderCursor,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    ToggleMetadata,
}

/// Maps key presses to commands. Tracks the `gg` prefix across presses.
#[derive(Debug, Default)]
pub struct KeyMap {
    pending_g: bool,
}

impl KeyMap {
    pub fn command(&mut self, key: KeyEvent) -> Option<Command> {
        // Any key other than the second `g` cancels the prefix.
        let pending_g = std::mem::take(&mut self.pending_g);

        let cmd = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
            KeyCode::Char('q') => Command::Quit,
            KeyCode::Char(' ') | KeyCode::Char('p') => Command::PlayPause,
            KeyCode::Char('l') => Command::Next,
            KeyCode::Char('h') => Command::Prev,
            KeyCode::Char('j') | KeyCode::Down => Command::CursorDown,
            KeyCode::Char('k') | KeyCode::Up => Command::CursorUp,
            KeyCode::Char('g') if pending_g => Command::CursorTop,
            KeyCode::Char('g') => {
                self.pending_g = true;
                return None;
            }
            KeyCode::Char('G') => Command::CursorBottom,
            KeyCode::Enter => Command::SelectUnderCursor,
            KeyCode::Char('+') | KeyCode::Char('=') => Command::VolumeUp,
            KeyCode::Char('-') => Command::VolumeDown,
            KeyCode::Char('m') => Command::ToggleMute,
            KeyCode::Char('K') => Command::ToggleMetadata,
            _ => return None,
        };
        Some(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn transport_keys() {
        let mut keys = KeyMap::default();
        assert_eq!(keys.command(press(KeyCode::Char(' '))), Some(Command::PlayPause));
        assert_eq!(keys.command(press(KeyCode::Char('p'))), Some(Command::PlayPause));
        assert_eq!(keys.command(press(KeyCode::Char('l'))), Some(Command::Next));
        assert_eq!(keys.command(press(KeyCode::Char('h'))), Some(Command::Prev));
        assert_eq!(keys.command(press(KeyCode::Char('m'))), Some(Command::ToggleMute));
        assert_eq!(keys.command(press(KeyCode::Char('+'))), Some(Command::VolumeUp));
        assert_eq!(keys.command(press(KeyCode::Char('-'))), Some(Command::VolumeDown));
        assert_eq!(keys.command(press(KeyCode::Enter)), Some(Command::SelectUnderCursor));
        assert_eq!(keys.command(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut keys = KeyMap::default();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(keys.command(key), Some(Command::Quit));
        assert_eq!(keys.command(press(KeyCode::Char('q'))), Some(Command::Quit));
    }

    #[test]
    fn double_g_jumps_to_top() {
        let mut keys = KeyMap::default();
        assert_eq!(keys.command(press(KeyCode::Char('g'))), None);
        assert_eq!(keys.command(press(KeyCode::Char('g'))), Some(Command::CursorTop));
    }

    #[test]
    fn other_key_cancels_g_prefix() {
        let mut keys = KeyMap::default();
        assert_eq!(keys.command(press(KeyCode::Char('g'))), None);
        assert_eq!(keys.command(press(KeyCode::Char('j'))), Some(Command::CursorDown));
        assert_eq!(keys.command(press(KeyCode::Char('g'))), None);
    }
}
