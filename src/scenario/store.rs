//! Named scenario persistence
//!
//! One JSON file per scenario in a store directory. The store owns the
//! persisted parameter sets; the engine never writes here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::params::PlanParameters;

/// A named, persisted parameter set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub params: PlanParameters,
}

/// Scenario store failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("scenario '{0}' not found")]
    NotFound(String),

    #[error("invalid scenario name '{0}'")]
    InvalidName(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Directory-backed key-value store for scenarios
#[derive(Debug, Clone)]
pub struct ScenarioStore {
    dir: PathBuf,
}

impl ScenarioStore {
    /// Open a store at the given directory, creating it if needed
    pub fn open<P: Into<PathBuf>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a parameter set under a name, overwriting any previous
    /// scenario with that name
    pub fn save(&self, name: &str, params: &PlanParameters) -> Result<Scenario, StoreError> {
        let path = self.path_for(name)?;
        let scenario = Scenario {
            name: name.to_string(),
            saved_at: Utc::now(),
            params: params.clone(),
        };
        let json = serde_json::to_string_pretty(&scenario)?;
        fs::write(&path, json)?;
        log::info!("saved scenario '{}' to {}", name, path.display());
        Ok(scenario)
    }

    /// Load a scenario by name
    pub fn load(&self, name: &str) -> Result<Scenario, StoreError> {
        let path = self.path_for(name)?;
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }

    /// Delete a scenario by name
    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("deleted scenario '{}'", name);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Names of all stored scenarios, sorted
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// File path for a scenario name; names map directly to file names,
    /// so path separators are rejected
    fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        if name.is_empty() || name.contains('/') || name.contains('\\') {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, ScenarioStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ScenarioStore::open(dir.path()).expect("open store");
        (dir, store)
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (_dir, store) = store();
        let params = PlanParameters::example();

        store.save("baseline", &params).expect("save");
        let loaded = store.load("baseline").expect("load");

        assert_eq!(loaded.name, "baseline");
        assert_eq!(loaded.params, params);
    }

    #[test]
    fn test_save_overwrites_existing() {
        let (_dir, store) = store();
        let mut params = PlanParameters::example();

        store.save("plan", &params).unwrap();
        params.mortgage.principal = 400_000.0;
        store.save("plan", &params).unwrap();

        let loaded = store.load("plan").unwrap();
        assert_eq!(loaded.params.mortgage.principal, 400_000.0);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_list_is_sorted() {
        let (_dir, store) = store();
        let params = PlanParameters::example();

        store.save("zeta", &params).unwrap();
        store.save("alpha", &params).unwrap();
        store.save("mid", &params).unwrap();

        assert_eq!(store.list().unwrap(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_delete_removes_scenario() {
        let (_dir, store) = store();
        let params = PlanParameters::example();

        store.save("gone", &params).unwrap();
        store.delete("gone").unwrap();

        assert!(store.list().unwrap().is_empty());
        assert!(matches!(store.load("gone"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_missing_scenario_is_not_found() {
        let (_dir, store) = store();
        assert!(matches!(store.load("nope"), Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete("nope"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_invalid_names_rejected() {
        let (_dir, store) = store();
        let params = PlanParameters::example();

        assert!(matches!(
            store.save("", &params),
            Err(StoreError::InvalidName(_))
        ));
        assert!(matches!(
            store.save("a/b", &params),
            Err(StoreError::InvalidName(_))
        ));
    }
}
