//! Graph Builder: merges inline predecessor lists with explicit dependency
//! records into one deduplicated precedence relation.

pub mod schedule_dag;

use crate::dependency::Dependency;
use crate::project::Project;
use std::collections::HashSet;

pub use schedule_dag::{Edge, Link, ScheduleDag};

/// Deduplicated predecessor ids of `task_id`: the task's inline list first,
/// then explicit records pointing at it.
pub fn get_predecessors(task_id: &str, project: &Project) -> Vec<String> {
    let inline = project
        .task(task_id)
        .map(|task| task.predecessors.as_slice())
        .unwrap_or_default();
    let explicit = project
        .dependencies
        .iter()
        .filter(|dep| dep.to_task_id == task_id)
        .map(|dep| &dep.from_task_id);
    dedup_ids(inline.iter().chain(explicit))
}

/// Deduplicated successor ids of `task_id`: tasks listing it inline (in task
/// order), then explicit records leaving it. Scans every task's inline list
/// and every record, so each call is linear in the size of the project.
pub fn get_successors(task_id: &str, project: &Project) -> Vec<String> {
    let inline = project
        .tasks
        .iter()
        .filter(|task| task.predecessors.iter().any(|pred| pred == task_id))
        .map(|task| &task.id);
    let explicit = project
        .dependencies
        .iter()
        .filter(|dep| dep.from_task_id == task_id)
        .map(|dep| &dep.to_task_id);
    dedup_ids(inline.chain(explicit))
}

/// First explicit record linking `from_id` to `to_id`. Inline-only links
/// have no record.
pub fn get_dependency<'a>(
    from_id: &str,
    to_id: &str,
    project: &'a Project,
) -> Option<&'a Dependency> {
    project
        .dependencies
        .iter()
        .find(|dep| dep.from_task_id == from_id && dep.to_task_id == to_id)
}

fn dedup_ids<'a, I>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}
