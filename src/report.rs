//! Tabular view of a computed schedule, built as a polars frame so it can be
//! rendered as text or handed to downstream analysis.

use crate::project::Project;
use crate::schedule::NetworkResult;
use chrono::NaiveDate;
use polars::prelude::*;

fn date_column(name: &'static str, dates: Vec<Option<NaiveDate>>) -> PolarsResult<Column> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
        .ok_or_else(|| PolarsError::ComputeError("epoch out of range".into()))?;
    let days: Vec<Option<i32>> = dates
        .into_iter()
        .map(|d| d.map(|d| (d - epoch).num_days() as i32))
        .collect();
    Ok(Series::new(PlSmallStr::from_static(name), days)
        .cast(&DataType::Date)?
        .into_column())
}

/// One row per task in project order. Tasks without a record (invalid
/// results) get null schedule columns.
pub fn schedule_frame(project: &Project, result: &NetworkResult) -> PolarsResult<DataFrame> {
    let records: Vec<_> = project
        .tasks
        .iter()
        .map(|task| result.record(&task.id))
        .collect();
    let offsets = |f: fn(&crate::schedule::ScheduleRecord) -> i64| -> Vec<Option<i64>> {
        records.iter().map(|r| r.map(f)).collect()
    };
    let dates = |f: fn(&crate::schedule::ScheduleRecord) -> i64| -> Vec<Option<NaiveDate>> {
        records
            .iter()
            .map(|r| r.and_then(|r| project.date_at(f(r))))
            .collect()
    };

    let ids: Vec<&str> = project.tasks.iter().map(|t| t.id.as_str()).collect();
    let names: Vec<&str> = project.tasks.iter().map(|t| t.name.as_str()).collect();
    let durations: Vec<i64> = project.tasks.iter().map(|t| t.duration_days).collect();
    let critical: Vec<Option<bool>> = records.iter().map(|r| r.map(|r| r.is_critical)).collect();

    let columns = vec![
        Series::new(PlSmallStr::from_static("id"), ids).into_column(),
        Series::new(PlSmallStr::from_static("name"), names).into_column(),
        Series::new(PlSmallStr::from_static("duration_days"), durations).into_column(),
        Series::new(PlSmallStr::from_static("es"), offsets(|r| r.early_start)).into_column(),
        Series::new(PlSmallStr::from_static("ef"), offsets(|r| r.early_finish)).into_column(),
        Series::new(PlSmallStr::from_static("ls"), offsets(|r| r.late_start)).into_column(),
        Series::new(PlSmallStr::from_static("lf"), offsets(|r| r.late_finish)).into_column(),
        Series::new(PlSmallStr::from_static("total_float"), offsets(|r| r.total_float))
            .into_column(),
        Series::new(PlSmallStr::from_static("free_float"), offsets(|r| r.free_float))
            .into_column(),
        Series::new(PlSmallStr::from_static("is_critical"), critical).into_column(),
        date_column("early_start", dates(|r| r.early_start))?,
        date_column("early_finish", dates(|r| r.early_finish))?,
    ];
    DataFrame::new(columns)
}

fn cell_text(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::Boolean(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Boxed plain-text table, one line per row.
pub fn render_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let headers: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();
    let cells: Vec<Vec<String>> = (0..df.height())
        .map(|row| {
            columns
                .iter()
                .map(|col| col.get(row).map(|v| cell_text(&v)).unwrap_or_default())
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
    for row in &cells {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.len());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(w + 2));
        sep.push('+');
    }

    let line = |values: &[String]| {
        let mut out = String::from("|");
        for (value, width) in values.iter().zip(&widths) {
            out.push(' ');
            out.push_str(value);
            out.push_str(&" ".repeat(width - value.len()));
            out.push_str(" |");
        }
        out
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&line(&headers));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        out.push_str(&line(row));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}
