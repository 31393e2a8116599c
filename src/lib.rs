//! # Employees
//!
//! Employee records kept in a single SQLite table, with two front ends:
//!
//! - **Application path**: model validation, a data access layer that keeps
//!   phone numbers unique, and a controller returning [`Outcome`]s to a
//!   console menu or one-shot CLI.
//! - **MCP path**: a JSON-RPC server exposing raw SQL tools that bypass the
//!   application rules entirely.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use employees::{EmployeeController, EmployeeInput, SearchCriteria};
//! use std::path::Path;
//!
//! employees::storage::create_database(Path::new("employees.db"), false)?;
//! let controller = EmployeeController::open(Path::new("employees.db"))?;
//!
//! let added = controller.add_employee(&EmployeeInput::new("Ada", "Lovelace", "R&D", "555-0200"));
//! assert!(added.is_success());
//!
//! let _engineers = controller.search_employees(SearchCriteria::by_department("engineering"));
//! # Ok::<(), employees::EmployeeError>(())
//! ```

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod model;
pub mod storage;
pub mod view;

pub use error::{EmployeeError, Field, FieldError, Result};

pub use controller::{Command, EmployeeController, Outcome, Response};
pub use model::{
    DepartmentMatch, Employee, EmployeeInput, NewEmployee, SearchCriteria, Statistics, UpdateData,
    UpdateInput,
};
pub use storage::EmployeeDal;
