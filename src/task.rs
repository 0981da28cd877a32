use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    AsSoonAsPossible,
    AsLateAsPossible,
    MustStartOn,
    MustFinishOn,
    StartNoEarlierThan,
    StartNoLaterThan,
    FinishNoEarlierThan,
    FinishNoLaterThan,
}

impl ConstraintKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::AsSoonAsPossible => "as_soon_as_possible",
            ConstraintKind::AsLateAsPossible => "as_late_as_possible",
            ConstraintKind::MustStartOn => "must_start_on",
            ConstraintKind::MustFinishOn => "must_finish_on",
            ConstraintKind::StartNoEarlierThan => "start_no_earlier_than",
            ConstraintKind::StartNoLaterThan => "start_no_later_than",
            ConstraintKind::FinishNoEarlierThan => "finish_no_earlier_than",
            ConstraintKind::FinishNoLaterThan => "finish_no_later_than",
        }
    }

    /// Clamp a dependency-driven early start. `offset` is the constraint
    /// date in days from the project start.
    pub fn clamp_early_start(&self, early_start: i64, offset: i64, duration: i64) -> i64 {
        match self {
            ConstraintKind::MustStartOn | ConstraintKind::StartNoEarlierThan => {
                early_start.max(offset)
            }
            ConstraintKind::StartNoLaterThan => early_start.min(offset),
            ConstraintKind::MustFinishOn | ConstraintKind::FinishNoEarlierThan => {
                early_start.max(offset - duration)
            }
            ConstraintKind::FinishNoLaterThan => early_start.min(offset - duration),
            ConstraintKind::AsSoonAsPossible | ConstraintKind::AsLateAsPossible => early_start,
        }
    }

    /// Clamp a successor-driven late finish.
    pub fn clamp_late_finish(&self, late_finish: i64, offset: i64, duration: i64) -> i64 {
        match self {
            ConstraintKind::MustStartOn | ConstraintKind::StartNoLaterThan => {
                late_finish.min(offset + duration)
            }
            ConstraintKind::MustFinishOn | ConstraintKind::FinishNoLaterThan => {
                late_finish.min(offset)
            }
            ConstraintKind::StartNoEarlierThan
            | ConstraintKind::FinishNoEarlierThan
            | ConstraintKind::AsSoonAsPossible
            | ConstraintKind::AsLateAsPossible => late_finish,
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstraintKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        let kind = match normalized.as_str() {
            "asap" | "assoonaspossible" => ConstraintKind::AsSoonAsPossible,
            "alap" | "aslateaspossible" => ConstraintKind::AsLateAsPossible,
            "mso" | "muststarton" => ConstraintKind::MustStartOn,
            "mfo" | "mustfinishon" => ConstraintKind::MustFinishOn,
            "snet" | "startnoearlierthan" => ConstraintKind::StartNoEarlierThan,
            "snlt" | "startnolaterthan" => ConstraintKind::StartNoLaterThan,
            "fnet" | "finishnoearlierthan" => ConstraintKind::FinishNoEarlierThan,
            "fnlt" | "finishnolaterthan" => ConstraintKind::FinishNoLaterThan,
            _ => return Err(format!("unknown constraint kind '{value}'")),
        };
        Ok(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskConstraint {
    pub kind: ConstraintKind,
    pub date: NaiveDate,
}

impl TaskConstraint {
    pub fn new(kind: ConstraintKind, date: NaiveDate) -> Self {
        Self { kind, date }
    }

    /// Whole days between `project_start` and the constraint date.
    pub fn offset_from(&self, project_start: NaiveDate) -> i64 {
        (self.date - project_start).num_days()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub duration_days: i64,
    /// Inline predecessor ids; each is a finish-to-start link with no lag
    /// unless an explicit dependency record covers the same pair.
    #[serde(default)]
    pub predecessors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<TaskConstraint>,
    #[serde(default)]
    pub is_milestone: bool,

    // Derived by the schedule applier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_finish: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_finish: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_float: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_float: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_critical: Option<bool>,
}

impl Task {
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration_days: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration_days,
            predecessors: Vec::new(),
            constraint: None,
            is_milestone: false,
            start_date: None,
            finish_date: None,
            early_start: None,
            early_finish: None,
            late_start: None,
            late_finish: None,
            total_float: None,
            free_float: None,
            is_critical: None,
        }
    }

    pub fn milestone(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut task = Self::new(id, name, 0);
        task.is_milestone = true;
        task
    }

    pub fn with_predecessors<I, S>(mut self, predecessors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predecessors = predecessors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_constraint(mut self, kind: ConstraintKind, date: NaiveDate) -> Self {
        self.constraint = Some(TaskConstraint::new(kind, date));
        self
    }

    /// Forget every derived field.
    pub fn clear_schedule(&mut self) {
        self.start_date = None;
        self.finish_date = None;
        self.early_start = None;
        self.early_finish = None;
        self.late_start = None;
        self.late_finish = None;
        self.total_float = None;
        self.free_float = None;
        self.is_critical = None;
    }
}
