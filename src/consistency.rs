//! Invariant checker run after the engine. Findings are warnings: they are
//! reported to the caller but never block use of the schedule.

use crate::graph::ScheduleDag;
use crate::project::Project;
use crate::schedule::NetworkResult;
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyWarning {
    MissingRecord {
        task_id: String,
    },
    CriticalWithFloat {
        task_id: String,
        total_float: i64,
    },
    ZeroFloatNotCritical {
        task_id: String,
    },
    EarlyWindowMismatch {
        task_id: String,
        early_start: i64,
        early_finish: i64,
        duration_days: i64,
    },
    LateWindowMismatch {
        task_id: String,
        late_start: i64,
        late_finish: i64,
        duration_days: i64,
    },
    FloatMismatch {
        task_id: String,
        start_float: i64,
        finish_float: i64,
        total_float: i64,
    },
    NegativeFloat {
        task_id: String,
        total_float: i64,
    },
    DurationMismatch {
        reported: i64,
        latest_finish: i64,
    },
    CriticalPathGap {
        task_id: String,
    },
    ConstraintBeforeProjectStart {
        task_id: String,
        date: NaiveDate,
        project_start: NaiveDate,
    },
    MilestoneWithDuration {
        task_id: String,
        duration_days: i64,
    },
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyWarning::MissingRecord { task_id } => {
                write!(f, "task {task_id} has no schedule record")
            }
            ConsistencyWarning::CriticalWithFloat {
                task_id,
                total_float,
            } => write!(
                f,
                "task {task_id} is marked critical but has total float {total_float}"
            ),
            ConsistencyWarning::ZeroFloatNotCritical { task_id } => {
                write!(f, "task {task_id} has zero total float but is not marked critical")
            }
            ConsistencyWarning::EarlyWindowMismatch {
                task_id,
                early_start,
                early_finish,
                duration_days,
            } => write!(
                f,
                "task {task_id} early finish {early_finish} != \
                 early start {early_start} + duration {duration_days}"
            ),
            ConsistencyWarning::LateWindowMismatch {
                task_id,
                late_start,
                late_finish,
                duration_days,
            } => write!(
                f,
                "task {task_id} late finish {late_finish} != \
                 late start {late_start} + duration {duration_days}"
            ),
            ConsistencyWarning::FloatMismatch {
                task_id,
                start_float,
                finish_float,
                total_float,
            } => write!(
                f,
                "task {task_id} float mismatch: LS-ES={start_float}, \
                 LF-EF={finish_float}, recorded {total_float}"
            ),
            ConsistencyWarning::NegativeFloat {
                task_id,
                total_float,
            } => write!(f, "task {task_id} has negative total float {total_float}"),
            ConsistencyWarning::DurationMismatch {
                reported,
                latest_finish,
            } => write!(
                f,
                "project duration {reported} does not match latest early finish {latest_finish}"
            ),
            ConsistencyWarning::CriticalPathGap { task_id } => write!(
                f,
                "critical task {task_id} starts after day 0 with no critical predecessor"
            ),
            ConsistencyWarning::ConstraintBeforeProjectStart {
                task_id,
                date,
                project_start,
            } => write!(
                f,
                "task {task_id} constraint date {date} precedes project start {project_start}"
            ),
            ConsistencyWarning::MilestoneWithDuration {
                task_id,
                duration_days,
            } => write!(f, "milestone {task_id} has non-zero duration {duration_days}"),
        }
    }
}

/// Check a computed result against the project it came from. Invalid
/// results carry no schedule and yield no warnings.
pub fn check_consistency(project: &Project, result: &NetworkResult) -> Vec<ConsistencyWarning> {
    let mut warnings = Vec::new();
    if !result.is_valid {
        return warnings;
    }

    for task in &project.tasks {
        if task.is_milestone && task.duration_days != 0 {
            warnings.push(ConsistencyWarning::MilestoneWithDuration {
                task_id: task.id.clone(),
                duration_days: task.duration_days,
            });
        }
        if let Some(constraint) = task.constraint {
            if constraint.date < project.start_date {
                warnings.push(ConsistencyWarning::ConstraintBeforeProjectStart {
                    task_id: task.id.clone(),
                    date: constraint.date,
                    project_start: project.start_date,
                });
            }
        }

        let Some(record) = result.record(&task.id) else {
            warnings.push(ConsistencyWarning::MissingRecord {
                task_id: task.id.clone(),
            });
            continue;
        };
        let task_id = || task.id.clone();

        if record.early_start.checked_add(task.duration_days) != Some(record.early_finish) {
            warnings.push(ConsistencyWarning::EarlyWindowMismatch {
                task_id: task_id(),
                early_start: record.early_start,
                early_finish: record.early_finish,
                duration_days: task.duration_days,
            });
        }
        if record.late_start.checked_add(task.duration_days) != Some(record.late_finish) {
            warnings.push(ConsistencyWarning::LateWindowMismatch {
                task_id: task_id(),
                late_start: record.late_start,
                late_finish: record.late_finish,
                duration_days: task.duration_days,
            });
        }
        let start_float = record.late_start.saturating_sub(record.early_start);
        let finish_float = record.late_finish.saturating_sub(record.early_finish);
        if start_float != finish_float || start_float != record.total_float {
            warnings.push(ConsistencyWarning::FloatMismatch {
                task_id: task_id(),
                start_float,
                finish_float,
                total_float: record.total_float,
            });
        }
        if record.is_critical && record.total_float != 0 {
            warnings.push(ConsistencyWarning::CriticalWithFloat {
                task_id: task_id(),
                total_float: record.total_float,
            });
        }
        if !record.is_critical && record.total_float == 0 {
            warnings.push(ConsistencyWarning::ZeroFloatNotCritical { task_id: task_id() });
        }
        if record.total_float < 0 {
            warnings.push(ConsistencyWarning::NegativeFloat {
                task_id: task_id(),
                total_float: record.total_float,
            });
        }
    }

    let latest_finish = result
        .schedule_data
        .values()
        .map(|record| record.early_finish)
        .max()
        .unwrap_or(0);
    if latest_finish != result.project_duration {
        warnings.push(ConsistencyWarning::DurationMismatch {
            reported: result.project_duration,
            latest_finish,
        });
    }

    warnings.extend(critical_path_gaps(project, result));
    warnings
}

fn critical_path_gaps(project: &Project, result: &NetworkResult) -> Vec<ConsistencyWarning> {
    let dag = ScheduleDag::build(project);
    let is_critical = |idx: usize| {
        result
            .record(&project.tasks[idx].id)
            .is_some_and(|record| record.is_critical)
    };

    result
        .critical_path
        .iter()
        .filter_map(|task_id| {
            let idx = dag.index_of(task_id)?;
            let record = result.record(task_id)?;
            let anchored = record.early_start <= 0 || project.tasks[idx].constraint.is_some();
            let fed = dag.predecessors[idx].iter().any(|edge| is_critical(edge.task));
            (!anchored && !fed).then(|| ConsistencyWarning::CriticalPathGap {
                task_id: task_id.clone(),
            })
        })
        .collect()
}
