use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::model::settings::Settings;

/// Error type for settings I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse settings: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not serialize settings: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// The settings file location under the given data directory.
pub fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.toml")
}

/// Load settings, falling back to defaults when no file exists yet. A
/// malformed file is reported but does not abort startup; the defaults
/// take over, matching first-run behavior.
pub fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("could not read settings file {}: {e}", path.display());
            return Settings::default();
        }
    };
    match toml::from_str(&text) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("malformed settings file {}: {e}", path.display());
            Settings::default()
        }
    }
}

/// Write settings atomically: serialize to a temp file in the same
/// directory, then rename over the target.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let text = toml::to_string_pretty(settings)?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| ConfigError::WriteError {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tmp.write_all(text.as_bytes())
        .map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    tmp.persist(path).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = settings_path(tmp.path());
        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    fn test_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = settings_path(tmp.path());

        let mut settings = Settings::default();
        settings.notify_due_soon = false;
        settings.default_category_id = Some("cat-9".to_string());

        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path), settings);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = settings_path(tmp.path());
        fs::write(&path, "this is { not toml").unwrap();
        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let path = settings_path(tmp.path());
        fs::write(&path, "enable_notifications = false\nfuture_option = 3\n").unwrap();
        let settings = load_settings(&path);
        assert!(!settings.enable_notifications);
    }
}
