//! Persisted form store
//!
//! `FormStore` is the single source of truth for the verification form. It is a
//! plain key/value container: every mutation is written through to a
//! [`FormStorage`] backend and the store hydrates from that backend on
//! construction. No validation happens here.

use super::form_data::{FormData, FormField, QuestionAnswer};
use crate::config::project_dirs;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fixed name of the persisted store entry
pub const STORE_KEY: &str = "form-store";

/// Envelope version written alongside the form data
const STORE_VERSION: u32 = 0;

/// Errors raised by the persistence backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no data directory available for the form store")]
    NoDataDir,
    #[error("failed to access form store at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("form store at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistence boundary for the form store
#[cfg_attr(test, mockall::automock)]
pub trait FormStorage: Send {
    /// Read the persisted form, `None` when nothing has been stored yet
    fn load(&self) -> Result<Option<FormData>>;

    /// Overwrite the persisted form
    fn save(&mut self, data: &FormData) -> Result<()>;
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    form_data: FormData,
}

/// On-disk layout: `{ "state": { "formData": ... }, "version": 0 }`
#[derive(Serialize, Deserialize)]
struct PersistedEnvelope {
    state: PersistedState,
    version: u32,
}

/// Stores the form as a JSON file in the platform data directory
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at the default location (`<data dir>/form-store.json`)
    pub fn default_location() -> Result<Self, StoreError> {
        Self::default_path()
            .map(Self::new)
            .ok_or(StoreError::NoDataDir)
    }

    fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_dir().join(format!("{STORE_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FormStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<FormData>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let envelope: PersistedEnvelope =
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        Ok(Some(envelope.state.form_data))
    }

    fn save(&mut self, data: &FormData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let envelope = PersistedEnvelope {
            state: PersistedState {
                form_data: data.clone(),
            },
            version: STORE_VERSION,
        };
        let content = serde_json::to_string(&envelope)?;
        fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

/// Keeps everything in memory. Used when no data directory is available.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: Option<FormData>,
}

impl FormStorage for MemoryStorage {
    fn load(&self) -> Result<Option<FormData>> {
        Ok(self.data.clone())
    }

    fn save(&mut self, data: &FormData) -> Result<()> {
        self.data = Some(data.clone());
        Ok(())
    }
}

/// Single source of truth for the form
pub struct FormStore {
    form_data: FormData,
    storage: Box<dyn FormStorage>,
}

impl FormStore {
    /// Create a store, hydrating from storage when an entry exists
    pub fn new(storage: Box<dyn FormStorage>) -> Self {
        let form_data = match storage.load() {
            Ok(Some(data)) => {
                tracing::debug!("hydrated form store from storage");
                data
            }
            Ok(None) => FormData::default(),
            Err(err) => {
                tracing::warn!("ignoring unreadable form store: {err:#}");
                FormData::default()
            }
        };
        Self { form_data, storage }
    }

    pub fn form_data(&self) -> &FormData {
        &self.form_data
    }

    pub fn set_field(&mut self, field: FormField) {
        field.apply(&mut self.form_data);
        self.persist();
    }

    pub fn set_question_answer(&mut self, question_id: &str, answer: Option<QuestionAnswer>) {
        self.form_data
            .question_answers
            .insert(question_id.to_string(), answer);
        self.persist();
    }

    /// Replace the form wholesale with its initial value
    pub fn reset(&mut self) {
        self.form_data = FormData::default();
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(err) = self.storage.save(&self.form_data) {
            tracing::warn!("failed to persist form store: {err:#}");
        }
    }
}

impl std::fmt::Debug for FormStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormStore")
            .field("form_data", &self.form_data)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::form_data::TabType;
    use anyhow::anyhow;
    use mockall::predicate::always;
    use pretty_assertions::assert_eq;

    fn temp_store_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("biometricos-tui-test-{}", uuid::Uuid::new_v4()))
            .join(format!("{name}.json"))
    }

    mod form_store {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_uses_initial_values_when_storage_empty() {
            let store = FormStore::new(Box::new(MemoryStorage::default()));
            assert_eq!(store.form_data(), &FormData::default());
        }

        #[test]
        fn test_hydrates_from_storage() {
            let mut saved = FormData::default();
            saved.respuesta = "aprobada".into();
            let mut storage = MockFormStorage::new();
            let loaded = saved.clone();
            storage
                .expect_load()
                .times(1)
                .returning(move || Ok(Some(loaded.clone())));

            let store = FormStore::new(Box::new(storage));
            assert_eq!(store.form_data(), &saved);
        }

        #[test]
        fn test_falls_back_to_defaults_on_load_error() {
            let mut storage = MockFormStorage::new();
            storage
                .expect_load()
                .returning(|| Err(anyhow!("disk on fire")));

            let store = FormStore::new(Box::new(storage));
            assert_eq!(store.form_data(), &FormData::default());
        }

        #[test]
        fn test_every_mutation_is_persisted() {
            let mut storage = MockFormStorage::new();
            storage.expect_load().returning(|| Ok(None));
            storage.expect_save().with(always()).times(3).returning(|_| Ok(()));

            let mut store = FormStore::new(Box::new(storage));
            store.set_field(FormField::Motivo("documento-vencido".into()));
            store.set_question_answer("color", Some(QuestionAnswer::Si));
            store.reset();
        }

        #[test]
        fn test_save_failure_keeps_in_memory_value() {
            let mut storage = MockFormStorage::new();
            storage.expect_load().returning(|| Ok(None));
            storage
                .expect_save()
                .returning(|_| Err(anyhow!("read-only filesystem")));

            let mut store = FormStore::new(Box::new(storage));
            store.set_field(FormField::Observaciones("nota".into()));
            assert_eq!(store.form_data().observaciones, "nota");
        }

        #[test]
        fn test_reset_restores_initial_values() {
            let mut store = FormStore::new(Box::new(MemoryStorage::default()));
            store.set_field(FormField::ActiveTab(TabType::Fotografia));
            store.set_field(FormField::Respuesta("rechazada".into()));
            store.set_question_answer("match", Some(QuestionAnswer::No));

            store.reset();
            assert_eq!(store.form_data(), &FormData::default());
        }
    }

    mod json_file_storage {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_load_missing_file_returns_none() {
            let storage = JsonFileStorage::new(temp_store_path("missing"));
            assert!(storage.load().unwrap().is_none());
        }

        #[test]
        fn test_save_then_load() {
            let path = temp_store_path(STORE_KEY);
            let mut storage = JsonFileStorage::new(&path);
            let mut data = FormData::default();
            data.active_tab = TabType::Propiedad;
            data.question_answers
                .insert("vigente".into(), Some(QuestionAnswer::NoAplica));

            storage.save(&data).unwrap();
            let loaded = storage.load().unwrap();
            assert_eq!(loaded, Some(data));

            let raw = fs::read_to_string(&path).unwrap();
            assert!(raw.contains("\"formData\""));
            assert!(raw.contains("\"version\":0"));
        }

        #[test]
        fn test_corrupt_file_is_an_error() {
            let path = temp_store_path("corrupt");
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "{not json").unwrap();

            let storage = JsonFileStorage::new(&path);
            assert!(storage.load().is_err());
        }

        #[test]
        fn test_store_survives_restart() {
            let path = temp_store_path(STORE_KEY);
            {
                let mut store = FormStore::new(Box::new(JsonFileStorage::new(&path)));
                store.set_field(FormField::Respuesta("aprobada".into()));
            }
            let store = FormStore::new(Box::new(JsonFileStorage::new(&path)));
            assert_eq!(store.form_data().respuesta, "aprobada");
        }
    }
}
