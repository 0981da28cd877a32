use crate::error::{PersistenceError, PersistenceResult};
use crate::project::Project;
use crate::task::Task;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub mod file;

pub use file::{
    ScheduleCsvRecord, load_project_from_json, read_schedule_csv, save_project_to_json,
    save_schedule_to_csv,
};

pub trait ProjectStore {
    fn save_project(&self, project: &Project) -> PersistenceResult<()>;
    fn load_project(&self) -> PersistenceResult<Option<Project>>;
}

/// Single-file JSON store.
#[derive(Debug, Clone)]
pub struct JsonProjectStore {
    path: PathBuf,
}

impl JsonProjectStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProjectStore for JsonProjectStore {
    fn save_project(&self, project: &Project) -> PersistenceResult<()> {
        save_project_to_json(project, &self.path)
    }

    fn load_project(&self) -> PersistenceResult<Option<Project>> {
        if !self.path.exists() {
            return Ok(None);
        }
        load_project_from_json(&self.path).map(Some)
    }
}

/// Task-level checks a stored project must pass. Graph problems are left to
/// the validator so that broken networks can still be loaded and inspected.
pub fn validate_tasks(tasks: &[Task]) -> PersistenceResult<()> {
    let mut seen_ids = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if task.id.trim().is_empty() {
            return Err(PersistenceError::InvalidData("task with empty id".into()));
        }
        if task.duration_days < 0 {
            return Err(PersistenceError::InvalidData(format!(
                "task {} has negative duration {}",
                task.id, task.duration_days
            )));
        }
        if !seen_ids.insert(task.id.as_str()) {
            return Err(PersistenceError::InvalidData(format!(
                "duplicate task id {}",
                task.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_ids() {
        let tasks = vec![Task::new("A", "one", 1), Task::new("A", "two", 1)];
        let err = validate_tasks(&tasks).unwrap_err();
        assert!(err.to_string().contains("duplicate task id A"));
    }

    #[test]
    fn missing_store_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonProjectStore::new(dir.path().join("absent.json"));
        assert!(store.load_project().unwrap().is_none());
    }
}
