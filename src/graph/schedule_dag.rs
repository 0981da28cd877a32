use crate::dependency::DependencyType;
use crate::error::ScheduleError;
use crate::project::Project;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

/// Relation attributes carried on an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Link {
    pub dependency_type: DependencyType,
    pub lag_days: i64,
}

/// Adjacency entry: the task at the other end of the edge plus its link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub task: usize,
    pub link: Link,
}

/// Task arena for one engine call. Node `i` is `project.tasks[i]`.
pub struct ScheduleDag<'a> {
    pub graph: DiGraph<usize, Link>,
    pub id_to_index: HashMap<&'a str, usize>,
    pub predecessors: Vec<Vec<Edge>>,
    pub successors: Vec<Vec<Edge>>,
    pub durations: Vec<i64>,
}

impl<'a> ScheduleDag<'a> {
    /// Merge inline predecessor lists and explicit records into one edge set.
    /// References to unknown tasks and self-links are skipped; the validator
    /// reports them. The first explicit record for a pair sets its type and
    /// lag, inline-only pairs are finish-to-start with no lag.
    pub fn build(project: &'a Project) -> Self {
        let task_count = project.tasks.len();
        let mut graph: DiGraph<usize, Link> =
            DiGraph::with_capacity(task_count, project.dependencies.len());
        let mut id_to_index: HashMap<&'a str, usize> = HashMap::with_capacity(task_count);
        let mut durations = Vec::with_capacity(task_count);

        for (idx, task) in project.tasks.iter().enumerate() {
            graph.add_node(idx);
            id_to_index.entry(task.id.as_str()).or_insert(idx);
            durations.push(task.duration_days);
        }

        let mut explicit: HashMap<(usize, usize), Link> = HashMap::new();
        let mut explicit_by_target: Vec<Vec<usize>> = vec![Vec::new(); task_count];
        for dep in &project.dependencies {
            let (Some(&from), Some(&to)) = (
                id_to_index.get(dep.from_task_id.as_str()),
                id_to_index.get(dep.to_task_id.as_str()),
            ) else {
                continue;
            };
            if explicit.contains_key(&(from, to)) {
                continue;
            }
            explicit.insert(
                (from, to),
                Link {
                    dependency_type: dep.dependency_type,
                    lag_days: dep.lag_days,
                },
            );
            explicit_by_target[to].push(from);
        }

        let mut dag = Self {
            graph,
            id_to_index,
            predecessors: vec![Vec::new(); task_count],
            successors: vec![Vec::new(); task_count],
            durations,
        };

        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        for (to, task) in project.tasks.iter().enumerate() {
            let inline = task
                .predecessors
                .iter()
                .filter_map(|pred_id| dag.id_to_index.get(pred_id.as_str()).copied())
                .collect::<Vec<_>>();
            for from in inline.into_iter().chain(explicit_by_target[to].iter().copied()) {
                if from == to || !seen.insert((from, to)) {
                    continue;
                }
                let link = explicit.get(&(from, to)).copied().unwrap_or_default();
                dag.add_edge(from, to, link);
            }
        }

        dag
    }

    fn add_edge(&mut self, from: usize, to: usize, link: Link) {
        self.graph
            .add_edge(NodeIndex::new(from), NodeIndex::new(to), link);
        self.predecessors[to].push(Edge { task: from, link });
        self.successors[from].push(Edge { task: to, link });
    }

    pub fn task_count(&self) -> usize {
        self.durations.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn index_of(&self, task_id: &str) -> Option<usize> {
        self.id_to_index.get(task_id).copied()
    }

    /// Tasks with no predecessors, in input order.
    pub fn start_tasks(&self) -> Vec<usize> {
        (0..self.task_count())
            .filter(|&idx| self.predecessors[idx].is_empty())
            .collect()
    }

    /// Predecessors-first ordering of every task.
    pub fn topological_order(&self) -> Result<Vec<usize>, ScheduleError> {
        toposort(&self.graph, None)
            .map(|order| order.into_iter().map(|node_ix| self.graph[node_ix]).collect())
            .map_err(|cycle| {
                let idx = self.graph[cycle.node_id()];
                ScheduleError::Internal(format!("cycle through task index {idx}"))
            })
    }
}
