pub mod backward_pass;
pub mod critical_path;
pub mod float;
pub mod forward_pass;

use crate::config::EngineOptions;
use crate::project::Project;
use crate::task::ConstraintKind;

/// A task's date constraint expressed as a day offset from the project start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedConstraint {
    pub kind: ConstraintKind,
    pub offset: i64,
}

/// One slot per task, `None` when the task is unconstrained or constraints
/// are switched off.
pub fn resolve_constraints(
    project: &Project,
    options: &EngineOptions,
) -> Vec<Option<ResolvedConstraint>> {
    project
        .tasks
        .iter()
        .map(|task| {
            if !options.apply_constraints {
                return None;
            }
            task.constraint.map(|constraint| ResolvedConstraint {
                kind: constraint.kind,
                offset: constraint.offset_from(project.start_date),
            })
        })
        .collect()
}
