//! Schedule Applier: projects day offsets onto calendar dates.

use crate::project::Project;
use crate::schedule::NetworkResult;

/// Return a copy of `project` with every task's derived fields filled from
/// `result` and the project duration set. Tasks missing from the result are
/// copied with their derived fields cleared; offsets past the calendar range
/// leave their date fields empty.
pub fn apply_schedule(project: &Project, result: &NetworkResult) -> Project {
    let mut updated = project.clone();
    updated.duration_days = Some(result.project_duration);

    for task in &mut updated.tasks {
        task.clear_schedule();
        let Some(record) = result.record(&task.id) else {
            continue;
        };
        task.early_start = project.date_at(record.early_start);
        task.early_finish = project.date_at(record.early_finish);
        task.late_start = project.date_at(record.late_start);
        task.late_finish = project.date_at(record.late_finish);
        task.start_date = task.early_start;
        task.finish_date = task.early_finish;
        task.total_float = Some(record.total_float);
        task.free_float = Some(record.free_float);
        task.is_critical = Some(record.is_critical);
    }

    updated
}
