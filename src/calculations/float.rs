use crate::dependency::Window;
use crate::graph::ScheduleDag;
use crate::schedule::ScheduleRecord;

/// Combine early and late windows into per-task records.
pub fn schedule_records(
    dag: &ScheduleDag<'_>,
    early: &[Window],
    late: &[Window],
) -> Vec<ScheduleRecord> {
    (0..dag.task_count())
        .map(|idx| {
            let total_float = late[idx].start - early[idx].start;
            ScheduleRecord {
                early_start: early[idx].start,
                early_finish: early[idx].finish,
                late_start: late[idx].start,
                late_finish: late[idx].finish,
                total_float,
                free_float: free_float(dag, idx, early, total_float),
                is_critical: total_float == 0,
            }
        })
        .collect()
}

/// Smallest slack to any immediate successor, floored at zero. A task
/// without successors keeps its total float.
fn free_float(dag: &ScheduleDag<'_>, idx: usize, early: &[Window], total_float: i64) -> i64 {
    dag.successors[idx]
        .iter()
        .map(|edge| {
            edge.link
                .dependency_type
                .free_slack(edge.link.lag_days, early[idx], early[edge.task])
        })
        .min()
        .map_or(total_float, |slack| slack.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Project;
    use crate::task::Task;
    use chrono::NaiveDate;

    #[test]
    fn free_float_measures_gap_to_successor() {
        let mut p = Project::new("p", NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        p.add_task(Task::new("A", "A", 5));
        p.add_task(Task::new("B", "B", 2));
        p.add_task(Task::new("C", "C", 1).with_predecessors(["A", "B"]));
        let dag = ScheduleDag::build(&p);

        let early = vec![Window::new(0, 5), Window::new(0, 2), Window::new(5, 6)];
        let late = vec![Window::new(0, 5), Window::new(3, 5), Window::new(5, 6)];
        let records = schedule_records(&dag, &early, &late);

        assert_eq!(records[1].total_float, 3);
        assert_eq!(records[1].free_float, 3);
        assert!(!records[1].is_critical);
        assert_eq!(records[0].free_float, 0);
        assert!(records[0].is_critical);
        assert_eq!(records[2].free_float, records[2].total_float);
    }
}
