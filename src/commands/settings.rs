//! Settings file
//!
//! `settings.json` lives in the application's data directory. A missing
//! file means defaults; a broken one is reported and replaced by defaults
//! at startup without being overwritten.

use crate::error::SettingsError;
use crate::models::AppSettings;
use crate::APP_NAME;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn settings_path() -> Result<PathBuf, SettingsError> {
    let app_support = dirs::data_dir()
        .ok_or(SettingsError::NoDataDir)?
        .join(APP_NAME);

    Ok(app_support.join("settings.json"))
}

pub fn load_settings(path: &Path) -> Result<AppSettings, SettingsError> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }

    let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let settings: AppSettings =
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(settings.normalized())
}

pub fn save_settings(path: &Path, settings: &AppSettings) -> Result<(), SettingsError> {
    let io_err = |source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let content = serde_json::to_string_pretty(settings).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, content).map_err(io_err)?;

    Ok(())
}

/// Load settings for startup, writing a default file on first run.
pub fn load_or_init_settings() -> AppSettings {
    let path = match settings_path() {
        Ok(path) => path,
        Err(e) => {
            warn!("Using default settings: {}", e);
            return AppSettings::default();
        }
    };

    if !path.exists() {
        let settings = AppSettings::default();
        match save_settings(&path, &settings) {
            Ok(()) => info!("Wrote default settings to {:?}", path),
            Err(e) => warn!("Could not write default settings: {}", e),
        }
        return settings;
    }

    match load_settings(&path) {
        Ok(settings) => {
            info!("Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!("Using default settings: {}", e);
            AppSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RenderStyle;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "{}-settings-{}-{}",
            APP_NAME,
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = scratch_dir("missing");
        let settings = load_settings(&dir.join("settings.json")).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = scratch_dir("roundtrip");
        let path = dir.join("nested").join("settings.json");
        let settings = AppSettings {
            default_style: RenderStyle::Minimal,
            cache_ttl_secs: 60,
            ..AppSettings::default()
        };

        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_loaded_values_are_normalized() {
        let dir = scratch_dir("normalize");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        fs::write(&path, r#"{"search_timeout_secs": 0, "temperature": 9.5}"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.search_timeout_secs, 1);
        assert_eq!(settings.temperature, 2.0);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_a_parse_error() {
        let dir = scratch_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_settings(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().contains("settings.json"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
