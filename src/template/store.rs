//! Single-slot template persistence.
//!
//! A store holds at most one [`TemplateConfig`]. `save` replaces the whole
//! record in one write; there is no field-level patching.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::OverprintError;

use super::TemplateConfig;

/// Durable home of the active template.
pub trait TemplateStore: Send + Sync {
    /// Read the stored template, `None` if nothing has been saved.
    fn load(&self) -> Result<Option<TemplateConfig>, OverprintError>;

    /// Replace the stored template.
    fn save(&self, config: &TemplateConfig) -> Result<(), OverprintError>;

    /// Erase the stored template. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), OverprintError>;
}

/// Template stored as one JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl TemplateStore for JsonFileStore {
    fn load(&self) -> Result<Option<TemplateConfig>, OverprintError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(OverprintError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        TemplateConfig::from_json(&json).map(Some).map_err(|e| {
            OverprintError::Storage(format!(
                "Stored template at {} is unreadable: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn save(&self, config: &TemplateConfig) -> Result<(), OverprintError> {
        let json = config.to_json()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write beside the record, then rename over it.
        let tmp = self.temp_path();
        let write = || -> std::io::Result<()> {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        };
        write().map_err(|e| {
            let _ = fs::remove_file(&tmp);
            OverprintError::Storage(format!(
                "Failed to save template to {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %self.path.display(),
            fields = config.fields.len(),
            "template saved"
        );
        Ok(())
    }

    fn clear(&self) -> Result<(), OverprintError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "template cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(OverprintError::Storage(format!(
                "Failed to clear {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// In-process store, for tests and servers started without a store path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<TemplateConfig>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `config`.
    pub fn with(config: TemplateConfig) -> Self {
        Self {
            slot: Mutex::new(Some(config)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<TemplateConfig>>, OverprintError> {
        self.slot
            .lock()
            .map_err(|_| OverprintError::Storage("template slot poisoned".to_string()))
    }
}

impl TemplateStore for MemoryStore {
    fn load(&self) -> Result<Option<TemplateConfig>, OverprintError> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, config: &TemplateConfig) -> Result<(), OverprintError> {
        *self.lock()? = Some(config.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), OverprintError> {
        *self.lock()? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{Align, FieldPlacement};
    use tempfile::tempdir;

    fn sample_config() -> TemplateConfig {
        let mut config = TemplateConfig::default();
        config.fields.push(FieldPlacement::new("bookNumber", 12.5, 8.25));
        let mut net = FieldPlacement::new("netAmount", 80.0, 90.0);
        net.align = Align::Right;
        config.fields.push(net);
        config
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("template.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/template.json"));
        let config = sample_config();
        store.save(&config).unwrap();
        assert_eq!(store.load().unwrap(), Some(config));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_save_of_load_is_noop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("template.json");
        let store = JsonFileStore::new(&path);
        store.save(&sample_config()).unwrap();
        let before = fs::read(&path).unwrap();

        let loaded = store.load().unwrap().unwrap();
        store.save(&loaded).unwrap();
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_save_replaces_whole_record() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("template.json"));
        store.save(&sample_config()).unwrap();

        let replacement = TemplateConfig::default();
        store.save(&replacement).unwrap();
        assert_eq!(store.load().unwrap(), Some(replacement));
    }

    #[test]
    fn test_clear() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("template.json"));
        store.clear().unwrap();
        store.save(&sample_config()).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("template.json");
        fs::write(&path, "{ not json").unwrap();
        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, OverprintError::Storage(_)));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        store.save(&sample_config()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample_config()));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
