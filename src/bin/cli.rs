//! Employees CLI.
//!
//! Usage:
//!   employees                           # Interactive menu
//!   employees list                      # One-shot commands
//!   employees search --department eng
//!   employees update 3 --phone 555-0199
//!   employees delete 3 --yes
//!   employees init [--force]            # Create and seed the database
//!   employees verify                    # Check table layout

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, warn};

use employees::cli::{Cli, Commands};
use employees::config::{AppConfig, CONFIG_FILE, DATABASE_ENV};
use employees::storage::{create_database, verify_database};
use employees::view::{render, ConsoleView};
use employees::{logging, EmployeeController};

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether the requested operation succeeded.
fn run(cli: Cli) -> Result<bool> {
    let config_path = cli.config.clone().unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let (config, problem) = AppConfig::load(&config_path);
    let config = config.with_overrides(std::env::var(DATABASE_ENV).ok(), cli.database.clone());
    logging::init(config.log_filter("warn"));
    if let Some(e) = problem {
        warn!(path = %config_path.display(), error = %e, "ignoring invalid config");
    }

    let db_path = config.database.path;
    debug!(db = %db_path.display(), "using database");

    let Some(command) = cli.command else {
        let controller = EmployeeController::open(&db_path)
            .with_context(|| format!("cannot open {}", db_path.display()))?;
        let stdin = io::stdin();
        let mut view = ConsoleView::new(stdin.lock(), io::stdout());
        view.run(&controller)?;
        return Ok(true);
    };

    let mut stdout = io::stdout().lock();

    match &command {
        Commands::Init { force } => {
            let rows = create_database(&db_path, *force)?;
            if cli.json {
                writeln!(
                    stdout,
                    "{}",
                    serde_json::json!({ "path": db_path, "rows": rows })
                )?;
            } else {
                writeln!(stdout, "Created {} with {} employees.", db_path.display(), rows)?;
            }
            return Ok(true);
        }
        Commands::Verify => {
            let report = verify_database(&db_path)?;
            if cli.json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                writeln!(stdout, "Columns: {}", report.columns.join(", "))?;
                writeln!(
                    stdout,
                    "Layout:  {}",
                    if report.layout_ok { "ok" } else { "unexpected" }
                )?;
                writeln!(stdout, "Rows:    {}", report.row_count)?;
            }
            return Ok(report.layout_ok);
        }
        Commands::Delete { id, yes: false } => {
            bail!("refusing to delete employee {} without --yes", id);
        }
        _ => {}
    }

    let Some(command) = command.to_command() else {
        return Ok(false);
    };

    let controller = EmployeeController::open(&db_path)
        .with_context(|| format!("cannot open {}", db_path.display()))?;
    let response = controller.dispatch(command);

    if cli.json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(&response)?)?;
    } else {
        render(&response, &mut stdout)?;
    }
    stdout.flush()?;

    Ok(response.is_success())
}
