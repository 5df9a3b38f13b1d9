use std::fs::{self, File, OpenOptions};
use std::path::Path;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

use crate::config::{LogSettings, default_log_path};

/// Install the global logger.
///
/// `RUST_LOG` wins over `log.level`. Records go to the log file; when no file
/// can be opened logging is switched off, since stderr belongs to the TUI.
pub fn init(settings: &LogSettings) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(settings.level.as_str()));
    builder.format_timestamp_millis();

    match settings.file.clone().or_else(default_log_path) {
        Some(path) => match open_log_file(&path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(_) => {
                builder.filter_level(LevelFilter::Off);
            }
        },
        None => {
            builder.filter_level(LevelFilter::Off);
        }
    }

    // A logger may already be installed (tests); keep it.
    let _ = builder.try_init();
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
