use chrono::NaiveDate;
use cpm_schedule::{
    ConstraintKind, Dependency, DependencyType, NetworkResult, Project, Task,
    calculate_critical_path,
};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

fn es_ef(result: &NetworkResult, id: &str) -> (i64, i64) {
    let record = result.record(id).unwrap();
    (record.early_start, record.early_finish)
}

fn two_tasks(dependency_type: DependencyType, lag_days: i64) -> Project {
    let mut p = Project::new("pair", start());
    p.add_task(Task::new("A", "A", 5));
    p.add_task(Task::new("B", "B", 3));
    p.add_dependency(Dependency::new("d1", "A", "B", dependency_type).with_lag(lag_days));
    p
}

#[test]
fn chain_is_fully_critical() {
    let mut p = Project::new("chain", start());
    p.add_task(Task::new("A", "A", 5));
    p.add_task(Task::new("B", "B", 3).with_predecessors(["A"]));
    p.add_task(Task::new("C", "C", 2).with_predecessors(["B"]));

    let result = calculate_critical_path(&p);
    assert!(result.is_valid, "{:?}", result.errors);
    assert_eq!(result.project_duration, 10);
    assert_eq!(result.critical_path, vec!["A", "B", "C"]);
    assert_eq!(es_ef(&result, "A"), (0, 5));
    assert_eq!(es_ef(&result, "B"), (5, 8));
    assert_eq!(es_ef(&result, "C"), (8, 10));
    assert!(result.schedule_data.values().all(|r| r.total_float == 0));
}

#[test]
fn diamond_takes_longer_branch() {
    let mut p = Project::new("diamond", start());
    p.add_task(Task::new("A", "A", 5));
    p.add_task(Task::new("B", "B", 3).with_predecessors(["A"]));
    p.add_task(Task::new("C", "C", 7).with_predecessors(["A"]));
    p.add_task(Task::new("D", "D", 2).with_predecessors(["B", "C"]));

    let result = calculate_critical_path(&p);
    assert_eq!(result.project_duration, 14);
    assert_eq!(result.critical_path, vec!["A", "C", "D"]);

    // B: ES=5, LF=12 (D's late start), so LS=9.
    let b = result.record("B").unwrap();
    assert!(!b.is_critical);
    assert_eq!(b.total_float, 4);
    assert_eq!(b.free_float, 4);
}

#[test]
fn start_to_start_with_lag() {
    let result = calculate_critical_path(&two_tasks(DependencyType::StartToStart, 2));
    assert_eq!(es_ef(&result, "A").0, 0);
    assert_eq!(es_ef(&result, "B"), (2, 5));
}

#[test]
fn finish_to_finish_aligns_finishes() {
    let result = calculate_critical_path(&two_tasks(DependencyType::FinishToFinish, 0));
    assert_eq!(es_ef(&result, "A").1, 5);
    assert_eq!(es_ef(&result, "B"), (2, 5));
}

#[test]
fn finish_to_start_with_lag() {
    let result = calculate_critical_path(&two_tasks(DependencyType::FinishToStart, 3));
    assert_eq!(es_ef(&result, "B"), (8, 11));
    assert_eq!(result.project_duration, 11);
}

#[test]
fn finish_to_start_with_lead() {
    let result = calculate_critical_path(&two_tasks(DependencyType::FinishToStart, -2));
    assert_eq!(es_ef(&result, "B"), (3, 6));
}

#[test]
fn must_start_on_forces_early_start() {
    let mut p = Project::new("constrained", start());
    p.add_task(
        Task::new("A", "A", 4)
            .with_constraint(ConstraintKind::MustStartOn, start() + chrono::Duration::days(10)),
    );
    let result = calculate_critical_path(&p);
    assert_eq!(es_ef(&result, "A"), (10, 14));
    assert_eq!(result.project_duration, 14);
}

#[test]
fn start_to_finish_never_pulls_before_day_zero() {
    let result = calculate_critical_path(&two_tasks(DependencyType::StartToFinish, 0));
    // SF: EF(B) >= ES(A) = 0, and ES(B) is floored at 0.
    assert_eq!(es_ef(&result, "B"), (0, 3));
    assert_eq!(result.project_duration, 5);
}

#[test]
fn cycle_is_rejected_without_schedule() {
    let mut p = Project::new("cycle", start());
    p.add_task(Task::new("A", "A", 1).with_predecessors(["B"]));
    p.add_task(Task::new("B", "B", 1).with_predecessors(["A"]));
    p.add_task(Task::new("C", "C", 1));

    let result = calculate_critical_path(&p);
    assert!(!result.is_valid);
    assert!(result.errors.iter().any(|e| e.contains("Circular")));
    assert!(result.schedule_data.is_empty());
    assert!(result.critical_path.is_empty());
}
