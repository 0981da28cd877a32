use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived per-task values, in day offsets from the project start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub early_start: i64,
    pub early_finish: i64,
    pub late_start: i64,
    pub late_finish: i64,
    pub total_float: i64,
    pub free_float: i64,
    pub is_critical: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Output of one engine invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkResult {
    pub schedule_data: BTreeMap<String, ScheduleRecord>,
    pub critical_path: Vec<String>,
    pub project_duration: i64,
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl NetworkResult {
    /// Rejected graph: no schedule, no critical path.
    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            schedule_data: BTreeMap::new(),
            critical_path: Vec::new(),
            project_duration: 0,
            is_valid: false,
            errors,
        }
    }

    pub fn record(&self, task_id: &str) -> Option<&ScheduleRecord> {
        self.schedule_data.get(task_id)
    }

    pub fn critical_count(&self) -> usize {
        self.schedule_data.values().filter(|r| r.is_critical).count()
    }

    /// One-line summary for logs and the CLI.
    pub fn to_cli_summary(&self) -> String {
        if !self.is_valid {
            return format!("invalid: {}", self.errors.join("; "));
        }
        let mut parts = Vec::new();
        parts.push(format!("tasks={}", self.schedule_data.len()));
        parts.push(format!("duration={}", self.project_duration));
        parts.push(format!("critical={}", self.critical_count()));
        if !self.critical_path.is_empty() {
            parts.push(format!("crit_path={}", self.critical_path.join("->")));
        }
        parts.join(", ")
    }
}
