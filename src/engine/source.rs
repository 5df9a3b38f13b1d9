use std::path::{Path, PathBuf};

use super::error::EngineError;

/// Turn a track source locator into a local file path.
///
/// `file://` prefixes are stripped, relative paths are joined onto `root`, and
/// web-root style paths (`/music/a.mp3`) fall back to `root` when they do not
/// exist as absolute paths. Other URI schemes are rejected.
pub fn resolve_source(src: &str, root: Option<&Path>) -> Result<PathBuf, EngineError> {
    let trimmed = src.trim();
    if trimmed.is_empty() {
        return Err(EngineError::UnsupportedSource(src.to_string()));
    }

    let raw = match trimmed.split_once("://") {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("file") => rest,
        Some(_) => return Err(EngineError::UnsupportedSource(src.to_string())),
        None => trimmed,
    };

    let path = PathBuf::from(raw);
    if path.is_relative() {
        return Ok(match root {
            Some(root) => root.join(path),
            None => path,
        });
    }

    if let Some(root) = root {
        if !path.exists() {
            let rooted = root.join(raw.trim_start_matches('/'));
            if rooted.exists() {
                return Ok(rooted);
            }
        }
    }
    Ok(path)
}
