//! Dependency Validator: reference checks, self-links and cycle detection.

use crate::error::ScheduleError;
use crate::graph::ScheduleDag;
use crate::project::Project;
use crate::schedule::ValidationResult;
use std::collections::HashSet;

/// Largest task duration or absolute lag, in days, the engine accepts. Keeps
/// every pass sum far from `i64` overflow.
pub const MAX_SPAN_DAYS: i64 = 1_000_000;

/// Standalone validation, independent of scheduling.
pub fn validate_dependencies(project: &Project) -> ValidationResult {
    let errors = find_structural_errors(project)
        .iter()
        .map(ToString::to_string)
        .collect();
    ValidationResult::from_errors(errors)
}

pub fn find_structural_errors(project: &Project) -> Vec<ScheduleError> {
    let dag = ScheduleDag::build(project);
    structural_errors(project, &dag)
}

pub(crate) fn structural_errors(project: &Project, dag: &ScheduleDag<'_>) -> Vec<ScheduleError> {
    let mut errors = Vec::new();
    let mut push = |err: ScheduleError| {
        if !errors.contains(&err) {
            errors.push(err);
        }
    };

    let mut seen_ids = HashSet::with_capacity(project.tasks.len());
    for task in &project.tasks {
        if !seen_ids.insert(task.id.as_str()) {
            push(ScheduleError::DuplicateTaskId {
                task_id: task.id.clone(),
            });
        }
        if task.duration_days < 0 {
            push(ScheduleError::NegativeDuration {
                task_id: task.id.clone(),
                duration_days: task.duration_days,
            });
        } else if task.duration_days > MAX_SPAN_DAYS {
            push(ScheduleError::DurationOutOfRange {
                task_id: task.id.clone(),
                duration_days: task.duration_days,
            });
        }
        for pred_id in &task.predecessors {
            if *pred_id == task.id {
                push(ScheduleError::SelfDependency {
                    task_id: task.id.clone(),
                });
            } else if dag.index_of(pred_id).is_none() {
                push(ScheduleError::UnknownPredecessor {
                    task_id: task.id.clone(),
                    predecessor_id: pred_id.clone(),
                });
            }
        }
    }

    for dep in &project.dependencies {
        if !(-MAX_SPAN_DAYS..=MAX_SPAN_DAYS).contains(&dep.lag_days) {
            push(ScheduleError::LagOutOfRange {
                dependency_id: dep.id.clone(),
                lag_days: dep.lag_days,
            });
        }
        for endpoint in [&dep.from_task_id, &dep.to_task_id] {
            if dag.index_of(endpoint).is_none() {
                push(ScheduleError::UnknownTask {
                    dependency_id: dep.id.clone(),
                    task_id: endpoint.clone(),
                });
            }
        }
        if dep.from_task_id == dep.to_task_id {
            push(ScheduleError::SelfDependency {
                task_id: dep.from_task_id.clone(),
            });
        }
    }

    if let Some(cycle) = find_cycle(dag) {
        let path = cycle
            .into_iter()
            .rev()
            .map(|idx| project.tasks[idx].id.clone())
            .collect();
        push(ScheduleError::CircularDependency { path });
    }

    if !errors.is_empty() {
        log::warn!(
            "project {} failed validation with {} error(s)",
            project.id,
            errors.len()
        );
    }
    errors
}

/// Depth-first search over the predecessor relation with an explicit
/// recursion stack. Returns the first cycle found, walked along
/// predecessor links and closed on its first node.
fn find_cycle(dag: &ScheduleDag<'_>) -> Option<Vec<usize>> {
    let task_count = dag.task_count();
    let mut visited = vec![false; task_count];
    let mut on_stack = vec![false; task_count];

    for root in 0..task_count {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        on_stack[root] = true;
        // (task, next predecessor slot to explore)
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let Some(edge) = dag.predecessors[node].get(frame.1) else {
                on_stack[node] = false;
                stack.pop();
                continue;
            };
            frame.1 += 1;
            let next = edge.task;
            if on_stack[next] {
                let start = stack.iter().position(|&(idx, _)| idx == next).unwrap_or(0);
                let mut cycle: Vec<usize> = stack[start..].iter().map(|&(idx, _)| idx).collect();
                cycle.push(next);
                return Some(cycle);
            }
            if !visited[next] {
                visited[next] = true;
                on_stack[next] = true;
                stack.push((next, 0));
            }
        }
    }
    None
}
