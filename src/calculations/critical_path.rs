use crate::schedule::ScheduleRecord;

/// Ids of critical tasks ordered by early start. `records` is aligned with
/// `task_ids`; ties keep input order. Disjoint critical chains are kept as
/// they are.
pub fn extract_critical_path(task_ids: &[&str], records: &[ScheduleRecord]) -> Vec<String> {
    let mut critical: Vec<(i64, &str)> = task_ids
        .iter()
        .zip(records)
        .filter(|(_, record)| record.is_critical)
        .map(|(id, record)| (record.early_start, *id))
        .collect();
    critical.sort_by_key(|&(early_start, _)| early_start);
    critical.into_iter().map(|(_, id)| id.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(early_start: i64, is_critical: bool) -> ScheduleRecord {
        ScheduleRecord {
            early_start,
            is_critical,
            ..Default::default()
        }
    }

    #[test]
    fn orders_by_early_start_with_stable_ties() {
        let ids = ["late", "tie-b", "tie-a", "slack", "first"];
        let records = [rec(9, true), rec(3, true), rec(3, true), rec(0, false), rec(0, true)];
        assert_eq!(
            extract_critical_path(&ids, &records),
            vec!["first", "tie-b", "tie-a", "late"]
        );
    }
}
