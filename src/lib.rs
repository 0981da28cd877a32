pub mod apply;
pub mod calculations;
pub mod config;
pub mod consistency;
pub mod dependency;
pub mod engine;
pub mod error;
pub mod graph;
pub mod persistence;
pub mod project;
pub mod report;
pub mod schedule;
pub mod task;
pub mod validation;

pub use apply::apply_schedule;
pub use config::EngineOptions;
pub use consistency::{ConsistencyWarning, check_consistency};
pub use dependency::{Dependency, DependencyType};
pub use engine::{
    calculate_critical_path, calculate_critical_path_with, calculate_critical_paths,
    calculate_critical_paths_with, update_task_dates, update_task_dates_with,
};
pub use error::{PersistenceError, ScheduleError};
pub use graph::{get_dependency, get_predecessors, get_successors};
pub use project::Project;
pub use schedule::{NetworkResult, ScheduleRecord, ValidationResult};
pub use task::{ConstraintKind, Task, TaskConstraint};
pub use validation::validate_dependencies;
