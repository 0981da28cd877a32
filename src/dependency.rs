use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Precedence relation between a predecessor and a successor task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyType {
    #[default]
    #[serde(alias = "FS", alias = "FinishToStart")]
    FinishToStart,
    #[serde(alias = "SS", alias = "StartToStart")]
    StartToStart,
    #[serde(alias = "FF", alias = "FinishToFinish")]
    FinishToFinish,
    #[serde(alias = "SF", alias = "StartToFinish")]
    StartToFinish,
}

/// Start/finish pair in day offsets from the project start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    pub start: i64,
    pub finish: i64,
}

impl Window {
    pub fn new(start: i64, finish: i64) -> Self {
        Self { start, finish }
    }
}

impl DependencyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyType::FinishToStart => "FS",
            DependencyType::StartToStart => "SS",
            DependencyType::FinishToFinish => "FF",
            DependencyType::StartToFinish => "SF",
        }
    }

    /// Earliest start this relation allows the successor, given the
    /// predecessor's early window.
    pub fn successor_early_start(
        &self,
        lag_days: i64,
        predecessor: Window,
        successor_duration: i64,
    ) -> i64 {
        match self {
            DependencyType::FinishToStart => predecessor.finish + lag_days,
            DependencyType::StartToStart => predecessor.start + lag_days,
            DependencyType::FinishToFinish => {
                (predecessor.finish + lag_days - successor_duration).max(0)
            }
            DependencyType::StartToFinish => {
                (predecessor.start + lag_days - successor_duration).max(0)
            }
        }
    }

    /// Latest finish this relation allows the predecessor, given the
    /// successor's late window.
    pub fn predecessor_late_finish(
        &self,
        lag_days: i64,
        successor: Window,
        predecessor_duration: i64,
    ) -> i64 {
        match self {
            DependencyType::FinishToStart => successor.start - lag_days,
            DependencyType::StartToStart => (successor.start - lag_days) + predecessor_duration,
            DependencyType::FinishToFinish => successor.finish - lag_days,
            DependencyType::StartToFinish => (successor.finish - lag_days) + predecessor_duration,
        }
    }

    /// Slack between two early windows across this relation. Not floored.
    pub fn free_slack(&self, lag_days: i64, predecessor: Window, successor: Window) -> i64 {
        match self {
            DependencyType::FinishToStart => successor.start - predecessor.finish - lag_days,
            DependencyType::StartToStart => successor.start - predecessor.start - lag_days,
            DependencyType::FinishToFinish => successor.finish - predecessor.finish - lag_days,
            DependencyType::StartToFinish => successor.finish - predecessor.start - lag_days,
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "fs" | "finishtostart" => Ok(DependencyType::FinishToStart),
            "ss" | "starttostart" => Ok(DependencyType::StartToStart),
            "ff" | "finishtofinish" => Ok(DependencyType::FinishToFinish),
            "sf" | "starttofinish" => Ok(DependencyType::StartToFinish),
            _ => Err(format!("unknown dependency type '{value}'")),
        }
    }
}

/// Explicit relation record, directed from predecessor to successor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub id: String,
    pub from_task_id: String,
    pub to_task_id: String,
    #[serde(default, rename = "type")]
    pub dependency_type: DependencyType,
    /// Negative values are leads.
    #[serde(default)]
    pub lag_days: i64,
}

impl Dependency {
    pub fn new(
        id: impl Into<String>,
        from_task_id: impl Into<String>,
        to_task_id: impl Into<String>,
        dependency_type: DependencyType,
    ) -> Self {
        Self {
            id: id.into(),
            from_task_id: from_task_id.into(),
            to_task_id: to_task_id.into(),
            dependency_type,
            lag_days: 0,
        }
    }

    pub fn with_lag(mut self, lag_days: i64) -> Self {
        self.lag_days = lag_days;
        self
    }
}
