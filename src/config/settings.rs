//! User preference management with XDG Base Directory compliance.
//!
//! This module provides user settings management with proper XDG directory
//! usage for the config file, and the default location of the scanner's
//! library cache.

use std::{
    env::var,
    fs::{create_dir_all, read_to_string, write},
    io::Error as StdError,
    path::PathBuf,
};

use {
    parking_lot::{RwLock, RwLockReadGuard},
    serde::{Deserialize, Serialize},
    serde_json::{Error as SerdeJsonError, from_str, to_string_pretty},
    thiserror::Error,
    tracing::debug,
};

use crate::{
    error::CatalogError,
    library::{GroupingKey, TruncationLimits},
};

/// Error type for settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read or write settings file.
    #[error("IO error: {0}")]
    IoError(#[from] StdError),
    /// Failed to serialize or deserialize settings.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] SerdeJsonError),
    /// Invalid settings value.
    #[error("Invalid settings value: {reason}")]
    InvalidValue { reason: String },
}

/// Serializable user settings structure with default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Field the library view groups by on startup.
    pub default_grouping_key: String,
    /// Characters kept from titles before the ellipsis.
    pub title_max_chars: usize,
    /// Characters kept from artist, album and genre before the ellipsis.
    pub field_max_chars: usize,
    /// Tab selected on startup.
    pub initial_tab: usize,
    /// Scanner library cache; `None` uses `~/.library_cache.json`.
    pub library_cache_path: Option<String>,
    /// Whether unusable records are skipped instead of failing the load.
    pub skip_invalid_records: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        let limits = TruncationLimits::default();
        Self {
            default_grouping_key: GroupingKey::default().to_string(),
            title_max_chars: limits.title,
            field_max_chars: limits.field,
            initial_tab: 0,
            library_cache_path: None,
            skip_invalid_records: false,
        }
    }
}

impl UserSettings {
    /// Parsed grouping key.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownGroupingKey` for names that match no field.
    pub fn grouping_key(&self) -> Result<GroupingKey, CatalogError> {
        self.default_grouping_key.parse()
    }

    /// Truncation limits for the normalizer.
    #[must_use]
    pub fn limits(&self) -> TruncationLimits {
        TruncationLimits {
            title: self.title_max_chars,
            field: self.field_max_chars,
        }
    }

    /// Library cache location, falling back to the scanner's default.
    #[must_use]
    pub fn library_cache_path(&self) -> PathBuf {
        self.library_cache_path
            .as_ref()
            .map_or_else(get_default_library_cache_path, PathBuf::from)
    }

    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidValue` for zero truncation limits or an
    /// unknown grouping key.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.title_max_chars == 0 || self.field_max_chars == 0 {
            return Err(SettingsError::InvalidValue {
                reason: "truncation limits must be at least 1".to_string(),
            });
        }
        self.grouping_key()
            .map_err(|e| SettingsError::InvalidValue {
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

/// Handles loading, saving, and validation of user preferences.
#[derive(Debug)]
pub struct SettingsManager {
    /// Thread-safe user settings storage.
    settings: RwLock<UserSettings>,
    /// Path to the configuration file on disk.
    config_path: PathBuf,
}

impl SettingsManager {
    /// Creates a new settings manager with default config path.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if settings cannot be loaded from disk.
    pub fn new() -> Result<Self, SettingsError> {
        Self::with_config_path(get_config_path())
    }

    /// Creates a new settings manager with a custom config path.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Path of the settings file
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if settings cannot be loaded from disk.
    pub fn with_config_path(config_path: PathBuf) -> Result<Self, SettingsError> {
        if let Some(parent) = config_path.parent() {
            create_dir_all(parent)?;
        }

        let settings = if config_path.exists() {
            debug!("Loading settings from existing file: {:?}", config_path);
            let contents = read_to_string(&config_path)?;
            from_str(&contents)?
        } else {
            debug!("Using default settings, no file at {:?}", config_path);
            UserSettings::default()
        };

        Ok(SettingsManager {
            settings: RwLock::new(settings),
            config_path,
        })
    }

    /// Gets the current settings.
    pub fn get_settings(&self) -> RwLockReadGuard<'_, UserSettings> {
        self.settings.read()
    }

    /// Gets the configuration file path.
    pub fn get_config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Validates, applies and saves new settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the settings are invalid or cannot be
    /// saved to disk. Invalid settings are not applied.
    pub fn update_settings(&self, new_settings: UserSettings) -> Result<(), SettingsError> {
        new_settings.validate()?;
        *self.settings.write() = new_settings;
        self.save_settings()
    }

    fn save_settings(&self) -> Result<(), SettingsError> {
        debug!("Saving settings to file: {:?}", self.config_path);
        let contents = to_string_pretty(&*self.settings.read())?;
        write(&self.config_path, contents)?;
        Ok(())
    }
}

/// Location of the settings file.
#[must_use]
pub fn get_config_path() -> PathBuf {
    let mut config_dir = get_xdg_config_home();
    config_dir.push("oxcatalog");
    config_dir.push("settings.json");
    config_dir
}

/// Location where the library scanner writes its cache.
#[must_use]
pub fn get_default_library_cache_path() -> PathBuf {
    let mut path = get_home_dir();
    path.push(".library_cache.json");
    path
}

/// Gets the XDG config home directory following XDG Base Directory specification.
///
/// Uses `XDG_CONFIG_HOME` environment variable if set, otherwise defaults to $HOME/.config
fn get_xdg_config_home() -> PathBuf {
    if let Ok(config_home) = var("XDG_CONFIG_HOME")
        && !config_home.is_empty()
    {
        return PathBuf::from(config_home);
    }

    let mut path = get_home_dir();
    path.push(".config");
    path
}

fn get_home_dir() -> PathBuf {
    // Current directory when HOME is unset.
    var("HOME").map_or_else(|_| PathBuf::from("."), PathBuf::from)
}

#[cfg(test)]
mod tests {
    use std::{
        fs::write,
        io::{Error, ErrorKind::NotFound},
        path::PathBuf,
    };

    use {
        serde_json::{from_str, to_string},
        tempfile::TempDir,
    };

    use crate::{
        config::settings::{SettingsError, SettingsManager, UserSettings},
        library::{GroupingKey, TruncationLimits},
    };

    #[test]
    fn test_user_settings_default() {
        let settings = UserSettings::default();
        assert_eq!(settings.default_grouping_key, "title");
        assert_eq!(settings.limits(), TruncationLimits::default());
        assert_eq!(settings.initial_tab, 0);
        assert!(!settings.skip_invalid_records);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_user_settings_serialization() {
        let settings = UserSettings {
            default_grouping_key: "genre".to_string(),
            title_max_chars: 40,
            field_max_chars: 20,
            initial_tab: 2,
            library_cache_path: Some("/music/cache.json".to_string()),
            skip_invalid_records: true,
        };

        let serialized = to_string(&settings).unwrap();
        let deserialized: UserSettings = from_str(&serialized).unwrap();
        assert_eq!(settings, deserialized);
        assert_eq!(deserialized.grouping_key(), Ok(GroupingKey::Genre));
        assert_eq!(
            deserialized.library_cache_path(),
            PathBuf::from("/music/cache.json")
        );
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: UserSettings = from_str(r#"{"default_grouping_key": "artist"}"#).unwrap();
        assert_eq!(settings.grouping_key(), Ok(GroupingKey::Artist));
        assert_eq!(settings.title_max_chars, 30);
        assert_eq!(settings.field_max_chars, 17);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero = UserSettings {
            field_max_chars: 0,
            ..UserSettings::default()
        };
        assert!(matches!(
            zero.validate(),
            Err(SettingsError::InvalidValue { .. })
        ));

        let unknown = UserSettings {
            default_grouping_key: "bpm".to_string(),
            ..UserSettings::default()
        };
        let error = unknown.validate().unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid settings value: Unknown grouping key: bpm"
        );
    }

    #[test]
    fn test_settings_manager_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.json");

        let manager = SettingsManager::with_config_path(path.clone()).unwrap();
        assert_eq!(*manager.get_settings(), UserSettings::default());
        assert!(!path.exists());

        let mut updated = manager.get_settings().clone();
        updated.default_grouping_key = "album".to_string();
        manager.update_settings(updated.clone()).unwrap();
        assert!(path.exists());

        let reloaded = SettingsManager::with_config_path(path).unwrap();
        assert_eq!(*reloaded.get_settings(), updated);
    }

    #[test]
    fn test_settings_manager_rejects_invalid_update() {
        let temp_dir = TempDir::new().unwrap();
        let manager =
            SettingsManager::with_config_path(temp_dir.path().join("settings.json")).unwrap();

        let invalid = UserSettings {
            title_max_chars: 0,
            ..UserSettings::default()
        };
        assert!(manager.update_settings(invalid).is_err());
        assert_eq!(manager.get_settings().title_max_chars, 30);
    }

    #[test]
    fn test_settings_manager_reports_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        write(&path, "{ not json").unwrap();

        let error = SettingsManager::with_config_path(path).unwrap_err();
        assert!(matches!(error, SettingsError::SerializationError(_)));
    }

    #[test]
    fn test_settings_error_display() {
        let io_error = Error::new(NotFound, "File not found");
        let settings_error = SettingsError::IoError(io_error);
        assert!(settings_error.to_string().contains("IO error"));

        let invalid_value_error = SettingsError::InvalidValue {
            reason: "test reason".to_string(),
        };
        assert_eq!(
            invalid_value_error.to_string(),
            "Invalid settings value: test reason"
        );
    }
}
