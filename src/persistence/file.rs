use super::validate_tasks;
use crate::error::{PersistenceError, PersistenceResult};
use crate::project::Project;
use crate::schedule::NetworkResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

pub fn save_project_to_json<P: AsRef<Path>>(project: &Project, path: P) -> PersistenceResult<()> {
    validate_tasks(&project.tasks)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, project)?;
    Ok(())
}

pub fn load_project_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Project> {
    let file = File::open(path)?;
    let project: Project = serde_json::from_reader(file)?;
    validate_tasks(&project.tasks)?;
    Ok(project)
}

/// One exported schedule row. Offsets are days from the project start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleCsvRecord {
    pub id: String,
    pub name: String,
    pub duration_days: i64,
    pub early_start: i64,
    pub early_finish: i64,
    pub late_start: i64,
    pub late_finish: i64,
    pub total_float: i64,
    pub free_float: i64,
    pub is_critical: bool,
    pub start_date: String,
    pub finish_date: String,
}

/// Write the computed schedule, one row per task in project order. Dates past
/// the calendar range are written as empty cells.
pub fn save_schedule_to_csv<P: AsRef<Path>>(
    project: &Project,
    result: &NetworkResult,
    path: P,
) -> PersistenceResult<()> {
    if !result.is_valid {
        return Err(PersistenceError::InvalidData(format!(
            "cannot export an invalid schedule: {}",
            result.errors.join("; ")
        )));
    }
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for task in &project.tasks {
        let record = result.record(&task.id).ok_or_else(|| {
            PersistenceError::InvalidData(format!("task {} missing from schedule", task.id))
        })?;
        writer.serialize(ScheduleCsvRecord {
            id: task.id.clone(),
            name: task.name.clone(),
            duration_days: task.duration_days,
            early_start: record.early_start,
            early_finish: record.early_finish,
            late_start: record.late_start,
            late_finish: record.late_finish,
            total_float: record.total_float,
            free_float: record.free_float,
            is_critical: record.is_critical,
            start_date: format_date(project.date_at(record.early_start)),
            finish_date: format_date(project.date_at(record.early_finish)),
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_schedule_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<ScheduleCsvRecord>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut rows = Vec::new();
    for record in reader.deserialize::<ScheduleCsvRecord>() {
        let row = record?;
        parse_date(&row.start_date)?;
        parse_date(&row.finish_date)?;
        rows.push(row);
    }
    Ok(rows)
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn parse_date(input: &str) -> PersistenceResult<Option<NaiveDate>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map(Some)
        .map_err(|e| PersistenceError::InvalidData(format!("invalid date '{input}': {e}")))
}
