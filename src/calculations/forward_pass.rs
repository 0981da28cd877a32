use super::ResolvedConstraint;
use crate::dependency::Window;
use crate::graph::ScheduleDag;

/// Early Start / Early Finish propagation.
pub struct ForwardPass<'a> {
    dag: &'a ScheduleDag<'a>,
    constraints: &'a [Option<ResolvedConstraint>],
}

impl<'a> ForwardPass<'a> {
    pub fn new(dag: &'a ScheduleDag<'a>, constraints: &'a [Option<ResolvedConstraint>]) -> Self {
        Self { dag, constraints }
    }

    /// `order` must list every predecessor before its successors.
    pub fn execute(&self, order: &[usize]) -> Vec<Window> {
        let mut early = vec![Window::default(); self.dag.task_count()];

        for &idx in order {
            let duration = self.dag.durations[idx];

            let driven = self.dag.predecessors[idx]
                .iter()
                .map(|edge| {
                    edge.link.dependency_type.successor_early_start(
                        edge.link.lag_days,
                        early[edge.task],
                        duration,
                    )
                })
                .max()
                .unwrap_or(0);
            let mut early_start = driven.max(0);

            if let Some(constraint) = self.constraints.get(idx).copied().flatten() {
                early_start = constraint
                    .kind
                    .clamp_early_start(early_start, constraint.offset, duration);
            }

            early[idx] = Window::new(early_start, early_start + duration);
            log::trace!("forward idx={idx} es={} ef={}", early[idx].start, early[idx].finish);
        }

        early
    }
}
