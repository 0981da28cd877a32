use super::ResolvedConstraint;
use crate::dependency::Window;
use crate::graph::ScheduleDag;

/// Late Start / Late Finish propagation, seeded from the project duration.
pub struct BackwardPass<'a> {
    dag: &'a ScheduleDag<'a>,
    constraints: &'a [Option<ResolvedConstraint>],
}

impl<'a> BackwardPass<'a> {
    pub fn new(dag: &'a ScheduleDag<'a>, constraints: &'a [Option<ResolvedConstraint>]) -> Self {
        Self { dag, constraints }
    }

    /// `order` is the same predecessors-first ordering the forward pass used;
    /// it is walked in reverse.
    pub fn execute(&self, order: &[usize], project_duration: i64) -> Vec<Window> {
        let mut late = vec![Window::default(); self.dag.task_count()];

        for &idx in order.iter().rev() {
            let duration = self.dag.durations[idx];

            let mut late_finish = self.dag.successors[idx]
                .iter()
                .map(|edge| {
                    edge.link.dependency_type.predecessor_late_finish(
                        edge.link.lag_days,
                        late[edge.task],
                        duration,
                    )
                })
                .min()
                .map_or(project_duration, |lf| lf.min(project_duration));

            if let Some(constraint) = self.constraints.get(idx).copied().flatten() {
                late_finish = constraint
                    .kind
                    .clamp_late_finish(late_finish, constraint.offset, duration);
            }

            late[idx] = Window::new(late_finish - duration, late_finish);
            log::trace!("backward idx={idx} ls={} lf={}", late[idx].start, late[idx].finish);
        }

        late
    }
}
