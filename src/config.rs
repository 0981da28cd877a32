use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::error::PersistenceResult;

/// Engine switches. Defaults follow the standard PDM semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Clamp both passes with task date constraints.
    pub apply_constraints: bool,
    /// Treat a project with no tasks as a valid, zero-length schedule.
    pub allow_empty_project: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            apply_constraints: true,
            allow_empty_project: true,
        }
    }
}

impl EngineOptions {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> PersistenceResult<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let options: EngineOptions =
            serde_json::from_str(r#"{"apply_constraints": false}"#).unwrap();
        assert!(!options.apply_constraints);
        assert!(options.allow_empty_project);
    }
}
