//! Employees MCP server: raw SQL tools over the employee database.
//!
//! Runs a JSON-RPC 2.0 server over STDIO exposing `sqlite_query`,
//! `sqlite_execute`, `sqlite_schema` and `sqlite_tables`.
//!
//! Usage:
//!   employees-mcp [--config employees.toml] [--database employees.db]
//!
//! The database path comes from `--database`, then `EMPLOYEES_DB`, then the
//! config file.

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use employees::config::{AppConfig, CONFIG_FILE, DATABASE_ENV};
use employees::mcp::{server, SqliteTools};

#[derive(Parser)]
#[command(name = "employees-mcp")]
#[command(about = "MCP server exposing raw SQLite tools", version)]
struct Args {
    /// Config file (default: ./employees.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database file
    #[arg(short, long)]
    database: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let config_path = args.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let (config, problem) = AppConfig::load(&config_path);
    let config = config.with_overrides(std::env::var(DATABASE_ENV).ok(), args.database);

    // Stdout carries the protocol; logs go to stderr.
    employees::logging::init(config.log_filter("info"));
    if let Some(e) = problem {
        warn!(path = %config_path.display(), error = %e, "ignoring invalid config");
    }

    let db_path = config.database.path;
    if !db_path.is_file() {
        warn!(db = %db_path.display(), "database file not found; tool calls will fail until it exists");
    }

    let tools = SqliteTools::new(db_path);
    info!("MCP server ready, waiting for JSON-RPC requests on stdin");

    if let Err(e) = server::run(&tools) {
        tracing::error!(error = %e, "MCP server stopped");
        std::process::exit(1);
    }
}
