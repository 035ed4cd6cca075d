//! Settings persistence.
//!
//! A single flat JSON blob holds the plugin settings. The store boundary is
//! the [`SettingsStore`] trait: [`JsonFileStore`] persists to disk the way the
//! host keeps per-plugin config files, [`MemoryStore`] backs tests.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Persisted screenshare-audio settings.
///
/// The blob is a flat JSON object. Missing fields take their defaults and
/// unknown fields are ignored, so a partial blob from an older version still
/// loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Use the host's built-in soundshare path instead of the virtual mic.
    ///
    /// The JSON key keeps the spelling of existing persisted blobs.
    #[serde(rename = "useBuildInSoundshare")]
    pub use_built_in_soundshare: bool,
}

impl Settings {
    /// Loads settings from the store, applying the corruption recovery policy.
    ///
    /// A missing blob yields defaults. A corrupted blob is deleted (not
    /// repaired) and defaults are used, so the next save starts from a clean
    /// file. I/O errors are fatal and propagate.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails with anything other than
    /// [`SettingsError::Corrupted`].
    pub fn load_or_reset(store: &dyn SettingsStore) -> Result<Self, SettingsError> {
        match store.load() {
            Ok(Some(settings)) => Ok(settings),
            Ok(None) => Ok(Self::default()),
            Err(SettingsError::Corrupted { reason }) => {
                tracing::warn!(%reason, "settings blob corrupted, resetting to defaults");
                store.reset()?;
                Ok(Self::default())
            }
            Err(err) => Err(err),
        }
    }
}

/// Boundary to the host's keyed settings persistence.
pub trait SettingsStore: Send + Sync {
    /// Loads the persisted settings, or `None` when nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Corrupted`] when a blob exists but does not
    /// parse, or an I/O error when it cannot be read.
    fn load(&self) -> Result<Option<Settings>, SettingsError>;

    /// Persists the settings, replacing any existing blob.
    fn save(&self, settings: &Settings) -> Result<(), SettingsError>;

    /// Deletes the persisted blob. Deleting a missing blob is a no-op.
    fn reset(&self) -> Result<(), SettingsError>;
}

/// Settings store backed by a JSON file.
///
/// # Example
///
/// ```
/// use screenshare_audio::{JsonFileStore, Settings, SettingsStore};
///
/// let dir = std::env::temp_dir();
/// let store = JsonFileStore::new(dir.join("screenshare-audio.config.json"));
/// store.save(&Settings::default()).unwrap();
/// ```
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store persisting to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the settings blob.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Result<Option<Settings>, SettingsError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(SettingsError::io(&self.path, err)),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| SettingsError::corrupted(err.to_string()))
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let raw = serde_json::to_string_pretty(settings)
            .map_err(|err| SettingsError::corrupted(err.to_string()))?;
        fs::write(&self.path, raw).map_err(|err| SettingsError::io(&self.path, err))
    }

    fn reset(&self) -> Result<(), SettingsError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SettingsError::io(&self.path, err)),
        }
    }
}

/// In-memory settings store for tests.
///
/// Holds the raw JSON blob rather than parsed settings, so tests can inject
/// corrupted content without touching the filesystem.
#[derive(Default)]
pub struct MemoryStore {
    blob: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with a raw JSON blob.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    /// Returns the raw persisted blob, if any.
    pub fn blob(&self) -> Option<String> {
        self.blob.lock().clone()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Option<Settings>, SettingsError> {
        match self.blob.lock().as_deref() {
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|err| SettingsError::corrupted(err.to_string())),
            None => Ok(None),
        }
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let raw = serde_json::to_string(settings)
            .map_err(|err| SettingsError::corrupted(err.to_string()))?;
        *self.blob.lock() = Some(raw);
        Ok(())
    }

    fn reset(&self) -> Result<(), SettingsError> {
        *self.blob.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_blob_shape() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "useBuildInSoundshare": false }));
    }

    #[test]
    fn test_partial_blob_takes_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let settings: Settings =
            serde_json::from_str(r#"{"useBuildInSoundshare": true, "stale": 1}"#).unwrap();
        assert!(settings.use_built_in_soundshare);
    }

    #[test]
    fn test_load_or_reset_missing_blob() {
        let store = MemoryStore::new();
        let settings = Settings::load_or_reset(&store).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_or_reset_corrupted_blob_resets_store() {
        let store = MemoryStore::with_blob("not json at all");
        let settings = Settings::load_or_reset(&store).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(store.blob(), None);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        let settings = Settings {
            use_built_in_soundshare: true,
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), Some(settings));
    }

    #[test]
    fn test_file_store_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("settings.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("settings.json"));
        let settings = Settings {
            use_built_in_soundshare: true,
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), Some(settings));
    }

    #[test]
    fn test_file_store_garbage_is_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{{{{").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.load(),
            Err(SettingsError::Corrupted { .. })
        ));

        // Recovery deletes the file and falls back to defaults.
        let settings = Settings::load_or_reset(&store).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!path.exists());
    }

    #[test]
    fn test_file_store_reset_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("settings.json"));
        store.reset().unwrap();
        store.reset().unwrap();
    }
}
