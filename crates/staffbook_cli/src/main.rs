//! Command-line front end over `staffbook_core` services.
//!
//! # Responsibility
//! - Resolve configuration, open the store once and pass it to the services.
//! - Render report envelopes; exit with status 1 when a report failed.

mod cli;
mod output;

use anyhow::{anyhow, Context};
use clap::Parser;
use cli::{Cli, Command};
use log::info;
use output::Output;
use staffbook_core::db::open_db;
use staffbook_core::{
    init_logging, init_stderr_logging, AppConfig, EmployeeListQuery, EmployeeService, FieldValue,
    SqliteEmployeeRepository,
};
use std::process::ExitCode;

/// Quiet stderr default so command output stays readable.
const STDERR_DEFAULT_LEVEL: &str = "warn";

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config =
        AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(level) = cli.log_level {
        config.log_level = Some(level);
    }
    if let Some(dir) = cli.log_dir {
        config.log_dir = Some(dir);
    }
    start_logging(&config)?;

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open store {}", config.db_path.display()))?;
    let repo = SqliteEmployeeRepository::try_new(&conn)?;
    let service = EmployeeService::with_normalizer(repo, config.normalizer()?);
    let output = Output { json: cli.json };

    info!(
        "event=cli_command module=cli status=start command={:?}",
        cli.command
    );

    match cli.command {
        Command::Import { file } => {
            let report = service.import_file(&file);
            let mut message = report.message.clone();
            if let Some(format) = &report.format_label {
                message.push_str(&format!(" (format: {format})"));
            }
            output.report(&report, &message)?;
            Ok(report.success)
        }
        Command::Validate { file } => {
            let report = service.validate_file(&file);
            let mut message = format!("format: {}", report.format_label);
            for issue in &report.issues {
                message.push_str(&format!("\n- {issue}"));
            }
            output.report(&report, &message)?;
            Ok(report.ok)
        }
        Command::List {
            sort,
            limit,
            offset,
            all,
        } => {
            let query = EmployeeListQuery {
                sort,
                limit: (!all).then_some(limit),
                offset,
                ..EmployeeListQuery::default()
            };
            output.employees(&service.search(&query)?)?;
            Ok(true)
        }
        Command::Search {
            text,
            departement,
            poste,
            sort,
        } => {
            let query = EmployeeListQuery {
                text: Some(text),
                departement,
                poste,
                sort,
                ..EmployeeListQuery::default()
            };
            output.employees(&service.search(&query)?)?;
            Ok(true)
        }
        Command::Update { id, field, value } => {
            let report = service.update(id, field, FieldValue::for_field(field, &value));
            output.report(&report, &report.message)?;
            Ok(report.success)
        }
        Command::Delete { id } => {
            let report = service.delete(id);
            output.report(&report, &report.message)?;
            Ok(report.success)
        }
        Command::Clear { yes } => {
            if !yes {
                eprintln!("refusing to delete every employee without --yes");
                return Ok(false);
            }
            let report = service.clear_all();
            output.report(&report, &report.message)?;
            Ok(report.success)
        }
        Command::Stats { by_department } => {
            let stats = service.statistics()?;
            let breakdown = if by_department {
                Some(service.department_breakdown()?)
            } else {
                None
            };
            output.statistics(&stats, breakdown.as_deref())?;
            Ok(true)
        }
        Command::Count => {
            let count = service.count()?;
            output.report(&count, &count.to_string())?;
            Ok(true)
        }
        Command::Export { file } => {
            let path = file.unwrap_or_else(|| config.export_path.clone());
            let report = service.export_to_file(&path);
            output.report(&report, &report.message)?;
            Ok(report.success)
        }
    }
}

fn start_logging(config: &AppConfig) -> anyhow::Result<()> {
    let result = match &config.log_dir {
        Some(dir) => {
            let dir = dir
                .to_str()
                .ok_or_else(|| anyhow!("log directory must be valid UTF-8"))?;
            init_logging(config.effective_log_level(), dir)
        }
        None => init_stderr_logging(config.log_level.as_deref().unwrap_or(STDERR_DEFAULT_LEVEL)),
    };
    result.map_err(|message| anyhow!(message))
}
