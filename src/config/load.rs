use std::collections::HashSet;
use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `BACKDROP__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("BACKDROP")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.audio.progress_poll_ms == 0 {
            return Err("audio.progress_poll_ms must be >= 1".to_string());
        }
        if self.audio.end_watch_ms == 0 {
            return Err("audio.end_watch_ms must be >= 1".to_string());
        }
        if self.controls.volume_step.is_nan() || self.controls.volume_step <= 0.0 {
            return Err("controls.volume_step must be > 0".to_string());
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for entry in &self.playlist {
            let id = entry.id.trim();
            if id.is_empty() {
                return Err(format!("playlist entry \"{}\" has an empty id", entry.title));
            }
            if !seen.insert(id) {
                return Err(format!("playlist id `{id}` is used more than once"));
            }
        }
        Ok(())
    }
}

/// Resolve the config path from `BACKDROP_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("BACKDROP_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/backdrop/config.toml`
/// or `~/.config/backdrop/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("backdrop").join("config.toml"))
}

/// Compute the default log file under `$XDG_STATE_HOME/backdrop/backdrop.log`
/// or `~/.local/state/backdrop/backdrop.log`.
pub fn default_log_path() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".local").join("state"))
    } else {
        None
    };

    state_home.map(|d| d.join("backdrop").join("backdrop.log"))
}

/// Library root used when `library.root` is unset: `$XDG_DATA_HOME/backdrop`
/// or `~/.local/share/backdrop`. The built-in playlist's `/music/...` sources
/// resolve under it.
pub fn default_library_root() -> Option<PathBuf> {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".local").join("share"))
    } else {
        None
    };

    data_home.map(|d| d.join("backdrop"))
}
