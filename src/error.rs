use crate::validation::MAX_SPAN_DAYS;
use polars::prelude::PolarsError;
use serde_json::Error as SerdeJsonError;
use std::io;

/// Structural problems that stop the engine before any pass runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Duplicate task id {task_id}")]
    DuplicateTaskId { task_id: String },

    #[error("Task {task_id} has negative duration {duration_days}")]
    NegativeDuration { task_id: String, duration_days: i64 },

    #[error(
        "Task {task_id} duration {duration_days} exceeds the limit of {} days",
        MAX_SPAN_DAYS
    )]
    DurationOutOfRange { task_id: String, duration_days: i64 },

    #[error(
        "Dependency {dependency_id} lag {lag_days} exceeds the limit of {} days",
        MAX_SPAN_DAYS
    )]
    LagOutOfRange { dependency_id: String, lag_days: i64 },

    #[error("Dependency {dependency_id} references non-existent task {task_id}")]
    UnknownTask {
        dependency_id: String,
        task_id: String,
    },

    #[error("Task {task_id} references non-existent predecessor {predecessor_id}")]
    UnknownPredecessor {
        task_id: String,
        predecessor_id: String,
    },

    #[error("Task {task_id} cannot depend on itself")]
    SelfDependency { task_id: String },

    #[error("Circular dependency detected: {}", .path.join(" -> "))]
    CircularDependency { path: Vec<String> },

    #[error("No start tasks found (every task has at least one predecessor)")]
    NoStartTasks,

    #[error("schedule ordering failed: {0}")]
    Internal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] SerdeJsonError),
    #[error("dataframe conversion error: {0}")]
    DataFrame(#[from] PolarsError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;
