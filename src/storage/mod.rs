//! SQLite storage for employee records.
//!
//! The [`EmployeeDal`] is the only application-side path to the table;
//! [`bootstrap`] creates and seeds a fresh database file.

pub mod bootstrap;
pub mod dal;
pub mod schema;

pub use bootstrap::{create_database, verify_database, Verification};
pub use dal::EmployeeDal;
