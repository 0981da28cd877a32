//! Entry points: validate, run both passes, derive float and the critical set.

use crate::apply::apply_schedule;
use crate::calculations::backward_pass::BackwardPass;
use crate::calculations::critical_path::extract_critical_path;
use crate::calculations::float::schedule_records;
use crate::calculations::forward_pass::ForwardPass;
use crate::calculations::resolve_constraints;
use crate::config::EngineOptions;
use crate::error::ScheduleError;
use crate::graph::ScheduleDag;
use crate::project::Project;
use crate::schedule::NetworkResult;
use crate::validation::structural_errors;
use rayon::prelude::*;

pub fn calculate_critical_path(project: &Project) -> NetworkResult {
    calculate_critical_path_with(project, &EngineOptions::default())
}

pub fn calculate_critical_path_with(project: &Project, options: &EngineOptions) -> NetworkResult {
    let dag = ScheduleDag::build(project);

    let errors = structural_errors(project, &dag);
    if !errors.is_empty() {
        return invalid(errors);
    }

    if project.tasks.is_empty() {
        if options.allow_empty_project {
            return NetworkResult {
                is_valid: true,
                ..NetworkResult::default()
            };
        }
        return invalid(vec![ScheduleError::NoStartTasks]);
    }
    if dag.start_tasks().is_empty() {
        return invalid(vec![ScheduleError::NoStartTasks]);
    }

    let order = match dag.topological_order() {
        Ok(order) => order,
        Err(err) => return invalid(vec![err]),
    };

    let constraints = resolve_constraints(project, options);
    let early = ForwardPass::new(&dag, &constraints).execute(&order);
    let project_duration = early.iter().map(|w| w.finish).max().unwrap_or(0);
    let late = BackwardPass::new(&dag, &constraints).execute(&order, project_duration);
    let records = schedule_records(&dag, &early, &late);

    let task_ids: Vec<&str> = project.tasks.iter().map(|task| task.id.as_str()).collect();
    let critical_path = extract_critical_path(&task_ids, &records);

    log::debug!(
        "project {}: {} tasks, {} edges, duration {}, {} critical",
        project.id,
        dag.task_count(),
        dag.edge_count(),
        project_duration,
        critical_path.len()
    );

    NetworkResult {
        schedule_data: task_ids
            .iter()
            .map(|id| id.to_string())
            .zip(records)
            .collect(),
        critical_path,
        project_duration,
        is_valid: true,
        errors: Vec::new(),
    }
}

/// Evaluate independent projects in parallel. Results keep input order.
pub fn calculate_critical_paths(projects: &[Project]) -> Vec<NetworkResult> {
    calculate_critical_paths_with(projects, &EngineOptions::default())
}

pub fn calculate_critical_paths_with(
    projects: &[Project],
    options: &EngineOptions,
) -> Vec<NetworkResult> {
    projects
        .par_iter()
        .map(|project| calculate_critical_path_with(project, options))
        .collect()
}

/// Full pipeline plus the schedule applier. An invalid graph returns the
/// input unchanged.
pub fn update_task_dates(project: &Project) -> Project {
    update_task_dates_with(project, &EngineOptions::default())
}

pub fn update_task_dates_with(project: &Project, options: &EngineOptions) -> Project {
    let result = calculate_critical_path_with(project, options);
    if !result.is_valid {
        return project.clone();
    }
    apply_schedule(project, &result)
}

fn invalid(errors: Vec<ScheduleError>) -> NetworkResult {
    NetworkResult::invalid(errors.iter().map(ToString::to_string).collect())
}
