//! Command-line surface for the `employees` binary.
//!
//! With no subcommand the interactive menu runs. Each subcommand maps to one
//! controller operation, except `init` and `verify` which manage the file.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::controller::Command;
use crate::model::{EmployeeInput, SearchCriteria, UpdateInput};

#[derive(Parser, Debug)]
#[command(name = "employees")]
#[command(about = "Employee records over SQLite", version)]
pub struct Cli {
    /// Config file (default: ./employees.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overriding config and EMPLOYEES_DB
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    // ─── Records ────────────────────────────────────────────────────
    /// Add an employee
    Add {
        first_name: String,
        last_name: String,
        department: String,
        phone: String,
    },

    /// List every employee
    List,

    /// Show one employee
    Show { id: i64 },

    /// Search by name and/or department
    Search {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        department: Option<String>,

        /// Match the department exactly (case-insensitive)
        #[arg(long)]
        exact: bool,
    },

    /// Change some fields of an employee
    Update {
        id: i64,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        department: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Delete an employee (requires --yes)
    Delete {
        id: i64,

        #[arg(short, long)]
        yes: bool,
    },

    // ─── Reports ────────────────────────────────────────────────────
    /// Headcount per department
    Stats,

    /// Distinct departments
    Departments,

    // ─── Database ───────────────────────────────────────────────────
    /// Create the database and load sample rows
    Init {
        /// Replace an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Check the table layout and row count
    Verify,
}

impl Commands {
    /// The controller command for record and report subcommands. `None` for
    /// `init` and `verify`, and for `delete` without confirmation.
    pub fn to_command(&self) -> Option<Command> {
        let command = match self.clone() {
            Commands::Add {
                first_name,
                last_name,
                department,
                phone,
            } => Command::Add(EmployeeInput::new(first_name, last_name, department, phone)),
            Commands::List => Command::ViewAll,
            Commands::Show { id } => Command::Get(id),
            Commands::Search {
                name,
                department,
                exact,
            } => {
                let criteria = SearchCriteria::new(name.as_deref(), department.as_deref());
                Command::Search(if exact {
                    criteria.exact_department()
                } else {
                    criteria
                })
            }
            Commands::Update {
                id,
                first_name,
                last_name,
                department,
                phone,
            } => Command::Update {
                id,
                changes: UpdateInput {
                    first_name,
                    last_name,
                    department,
                    phone_number: phone,
                },
            },
            Commands::Delete { id, yes: true } => Command::Delete(id),
            Commands::Stats => Command::Statistics,
            Commands::Departments => Command::Departments,
            Commands::Delete { yes: false, .. } | Commands::Init { .. } | Commands::Verify => {
                return None
            }
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DepartmentMatch;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("employees").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_subcommand_means_menu() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["list", "--database", "staff.db", "--json"]);
        assert_eq!(cli.database, Some(PathBuf::from("staff.db")));
        assert!(cli.json);
        assert_eq!(cli.command.and_then(|c| c.to_command()), Some(Command::ViewAll));
    }

    #[test]
    fn test_search_exact() {
        let cli = parse(&["search", "-d", "Engineering", "--exact"]);
        match cli.command.and_then(|c| c.to_command()) {
            Some(Command::Search(criteria)) => {
                assert_eq!(criteria.department.as_deref(), Some("Engineering"));
                assert_eq!(criteria.department_match, DepartmentMatch::Exact);
                assert!(criteria.name.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_update_maps_phone() {
        let cli = parse(&["update", "3", "--phone", "555-0199"]);
        match cli.command.and_then(|c| c.to_command()) {
            Some(Command::Update { id, changes }) => {
                assert_eq!(id, 3);
                assert_eq!(changes.phone_number.as_deref(), Some("555-0199"));
                assert!(changes.first_name.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_delete_needs_confirmation() {
        assert_eq!(parse(&["delete", "4"]).command.unwrap().to_command(), None);
        assert_eq!(
            parse(&["delete", "4", "--yes"]).command.unwrap().to_command(),
            Some(Command::Delete(4))
        );
    }

    #[test]
    fn test_database_subcommands_have_no_controller_command() {
        assert_eq!(parse(&["init", "--force"]).command.unwrap().to_command(), None);
        assert_eq!(parse(&["verify"]).command.unwrap().to_command(), None);
    }
}
