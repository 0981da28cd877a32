use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use cpm_schedule::persistence::{load_project_from_json, save_project_to_json, save_schedule_to_csv};
use cpm_schedule::report::{render_text_table, schedule_frame};
use cpm_schedule::{
    EngineOptions, NetworkResult, Project, apply_schedule, calculate_critical_paths_with,
    check_consistency,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Compute critical-path schedules for one or more project files.
#[derive(Parser)]
#[command(name = "cli", version, about, long_about = None)]
struct Args {
    /// Project JSON files
    #[arg(required = true, value_name = "PROJECT.json")]
    inputs: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write output here instead of stdout (a directory when several projects are given)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Write the project with computed dates back out as JSON
    #[arg(long, value_name = "PATH")]
    apply: Option<PathBuf>,

    /// Report consistency warnings for each computed schedule
    #[arg(long)]
    check: bool,

    /// Engine options file
    #[arg(long, value_name = "FILE", env = "CPM_OPTIONS")]
    options: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Args with defaults resolved and the options file loaded.
#[derive(Debug)]
struct Settings {
    inputs: Vec<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
    apply: Option<PathBuf>,
    check: bool,
    options: EngineOptions,
    verbose: u8,
}

impl Settings {
    fn multiple(&self) -> bool {
        self.inputs.len() > 1
    }
}

impl TryFrom<Args> for Settings {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        if args.format == OutputFormat::Csv && args.output.is_none() {
            bail!("--format csv requires --output");
        }
        let options = match &args.options {
            Some(path) => EngineOptions::from_json_file(path)
                .with_context(|| format!("reading options from {}", path.display()))?,
            None => EngineOptions::default(),
        };
        Ok(Self {
            inputs: args.inputs,
            format: args.format,
            output: args.output,
            apply: args.apply,
            check: args.check,
            options,
            verbose: args.verbose,
        })
    }
}

#[derive(Serialize)]
struct ProjectReport<'a> {
    project_id: &'a str,
    #[serde(flatten)]
    result: &'a NetworkResult,
}

/// File for one project: the path itself for a single project, or
/// `<dir>/<project id>.<ext>` when several are processed.
fn target_path(base: &Path, project_id: &str, multiple: bool, ext: &str) -> Result<PathBuf> {
    if !multiple {
        return Ok(base.to_path_buf());
    }
    fs::create_dir_all(base).with_context(|| format!("creating {}", base.display()))?;
    Ok(base.join(format!("{project_id}.{ext}")))
}

fn render_table(projects: &[Project], results: &[NetworkResult]) -> Result<String> {
    let mut out = String::new();
    for (project, result) in projects.iter().zip(results) {
        out.push_str(&format!("project {}: {}\n", project.id, result.to_cli_summary()));
        if result.is_valid {
            let df = schedule_frame(project, result)?;
            out.push_str(&render_text_table(&df));
        }
    }
    Ok(out)
}

fn render_json(projects: &[Project], results: &[NetworkResult]) -> Result<String> {
    let reports: Vec<ProjectReport<'_>> = projects
        .iter()
        .zip(results)
        .map(|(project, result)| ProjectReport {
            project_id: &project.id,
            result,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&reports)?)
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text).with_context(|| format!("writing {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Returns whether every project produced a valid schedule.
fn run() -> Result<bool> {
    let args = Args::parse();
    let settings: Settings = args.try_into()?;

    let log_level = match settings.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    simple_logging::log_to_stderr(log_level);

    let projects = settings
        .inputs
        .iter()
        .map(|path| {
            load_project_from_json(path).with_context(|| format!("loading {}", path.display()))
        })
        .collect::<Result<Vec<Project>>>()?;
    log::info!("loaded {} project(s)", projects.len());

    let results = calculate_critical_paths_with(&projects, &settings.options);

    let output = settings.output.as_deref();
    match settings.format {
        OutputFormat::Table => emit(&render_table(&projects, &results)?, output)?,
        OutputFormat::Json => emit(&render_json(&projects, &results)?, output)?,
        OutputFormat::Csv => {
            let base = output.context("--format csv requires --output")?;
            for (project, result) in projects.iter().zip(&results) {
                if !result.is_valid {
                    continue;
                }
                let path = target_path(base, &project.id, settings.multiple(), "csv")?;
                save_schedule_to_csv(project, result, &path)
                    .with_context(|| format!("writing {}", path.display()))?;
            }
        }
    }

    if let Some(base) = settings.apply.as_deref() {
        for (project, result) in projects.iter().zip(&results) {
            if !result.is_valid {
                continue;
            }
            let path = target_path(base, &project.id, settings.multiple(), "json")?;
            save_project_to_json(&apply_schedule(project, result), &path)
                .with_context(|| format!("writing {}", path.display()))?;
        }
    }

    let mut all_valid = true;
    for (project, result) in projects.iter().zip(&results) {
        if !result.is_valid {
            all_valid = false;
            for error in &result.errors {
                eprintln!("{}: {error}", project.id);
            }
            continue;
        }
        if settings.check {
            for warning in check_consistency(project, result) {
                eprintln!("{}: warning: {warning}", project.id);
            }
        }
    }
    Ok(all_valid)
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}
