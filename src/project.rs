use crate::dependency::Dependency;
use crate::task::Task;
use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    /// Set by the schedule applier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<i64>,
}

impl Project {
    pub fn new(id: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            start_date,
            tasks: Vec::new(),
            dependencies: Vec::new(),
            duration_days: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn add_task(&mut self, task: Task) -> &mut Self {
        self.tasks.push(task);
        self
    }

    pub fn add_dependency(&mut self, dependency: Dependency) -> &mut Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn task_position(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == task_id)
    }

    /// Calendar date `offset_days` after the project start, or `None` when it
    /// falls outside the representable date range.
    pub fn date_at(&self, offset_days: i64) -> Option<NaiveDate> {
        let delta = TimeDelta::try_days(offset_days)?;
        self.start_date.checked_add_signed(delta)
    }
}
