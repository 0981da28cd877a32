use chrono::NaiveDate;
use cpm_schedule::graph::{Link, ScheduleDag};
use cpm_schedule::{
    Dependency, DependencyType, Project, Task, get_dependency, get_predecessors, get_successors,
};

fn project() -> Project {
    // 1 -> {2, 3} -> 4, with 1 -> 3 duplicated as an explicit SS record
    let mut p = Project::new("graph", NaiveDate::from_ymd_opt(2025, 2, 3).unwrap());
    p.add_task(Task::new("1", "one", 2));
    p.add_task(Task::new("2", "two", 3).with_predecessors(["1"]));
    p.add_task(Task::new("3", "three", 1).with_predecessors(["1"]));
    p.add_task(Task::new("4", "four", 1).with_predecessors(["2"]));
    p.add_dependency(Dependency::new("d1", "1", "3", DependencyType::StartToStart).with_lag(1));
    p.add_dependency(Dependency::new("d2", "3", "4", DependencyType::FinishToStart));
    p
}

#[test]
fn schedule_dag_merges_both_sources_once() {
    let p = project();
    let dag = ScheduleDag::build(&p);
    assert_eq!(dag.task_count(), 4);
    assert_eq!(dag.edge_count(), 4);
    assert_eq!(dag.start_tasks(), vec![0]);
}

#[test]
fn explicit_record_sets_link_attributes() {
    let p = project();
    let dag = ScheduleDag::build(&p);
    let three = dag.index_of("3").unwrap();
    assert_eq!(dag.predecessors[three].len(), 1);
    assert_eq!(
        dag.predecessors[three][0].link,
        Link {
            dependency_type: DependencyType::StartToStart,
            lag_days: 1
        }
    );
    let two = dag.index_of("2").unwrap();
    assert_eq!(dag.predecessors[two][0].link, Link::default());
}

#[test]
fn topological_order_puts_predecessors_first() {
    let p = project();
    let dag = ScheduleDag::build(&p);
    let order = dag.topological_order().unwrap();
    let pos = |id: &str| order.iter().position(|&i| i == dag.index_of(id).unwrap()).unwrap();
    assert!(pos("1") < pos("2"));
    assert!(pos("1") < pos("3"));
    assert!(pos("2") < pos("4"));
    assert!(pos("3") < pos("4"));
}

#[test]
fn accessors_deduplicate_and_keep_source_order() {
    let p = project();
    assert_eq!(get_predecessors("3", &p), vec!["1"]);
    assert_eq!(get_predecessors("4", &p), vec!["2", "3"]);
    assert_eq!(get_successors("1", &p), vec!["2", "3"]);
    assert!(get_successors("4", &p).is_empty());
    assert!(get_predecessors("missing", &p).is_empty());
}

#[test]
fn get_dependency_only_returns_explicit_records() {
    let p = project();
    let record = get_dependency("1", "3", &p).unwrap();
    assert_eq!(record.id, "d1");
    assert!(get_dependency("1", "2", &p).is_none());
    assert!(get_dependency("3", "1", &p).is_none());
}

#[test]
fn dangling_and_self_links_are_left_out_of_the_dag() {
    let mut p = project();
    p.add_task(Task::new("5", "five", 1).with_predecessors(["5", "ghost"]));
    p.add_dependency(Dependency::new("d3", "ghost", "4", DependencyType::FinishToStart));
    let dag = ScheduleDag::build(&p);
    assert_eq!(dag.edge_count(), 4);
    assert!(dag.predecessors[dag.index_of("5").unwrap()].is_empty());
}
