//! Discrete commands in, discrete responses out.
//!
//! A front end (console menu, one-shot CLI) builds a [`Command`] and renders
//! the [`Response`]; each command maps to exactly one controller operation.

use serde::Serialize;

use super::{EmployeeController, Outcome};
use crate::model::{Employee, EmployeeInput, SearchCriteria, Statistics, UpdateInput};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(EmployeeInput),
    ViewAll,
    Get(i64),
    Search(SearchCriteria),
    Update { id: i64, changes: UpdateInput },
    Delete(i64),
    Statistics,
    Departments,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Employee(Outcome<Employee>),
    Employees(Outcome<Vec<Employee>>),
    Statistics(Outcome<Statistics>),
    Departments(Outcome<Vec<String>>),
    Exit,
}

impl Response {
    /// False when the operation failed for any reason.
    pub fn is_success(&self) -> bool {
        match self {
            Response::Employee(o) => o.is_success(),
            Response::Employees(o) => o.is_success(),
            Response::Statistics(o) => o.is_success(),
            Response::Departments(o) => o.is_success(),
            Response::Exit => true,
        }
    }
}

impl EmployeeController {
    pub fn dispatch(&self, command: Command) -> Response {
        match command {
            Command::Add(input) => Response::Employee(self.add_employee(&input)),
            Command::ViewAll => Response::Employees(self.list_employees()),
            Command::Get(id) => Response::Employee(self.get_employee(id)),
            Command::Search(criteria) => Response::Employees(self.search_employees(criteria)),
            Command::Update { id, changes } => {
                Response::Employee(self.update_employee(id, &changes))
            }
            Command::Delete(id) => Response::Employee(self.delete_employee(id)),
            Command::Statistics => Response::Statistics(self.get_statistics()),
            Command::Departments => Response::Departments(self.get_departments()),
            Command::Exit => Response::Exit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::EmployeeDal;

    #[test]
    fn test_dispatch_round() {
        let ctl = EmployeeController::new(EmployeeDal::open_in_memory().unwrap());

        let response = ctl.dispatch(Command::Add(EmployeeInput::new(
            "Alice",
            "Johnson",
            "Engineering",
            "555-0001",
        )));
        assert!(response.is_success());

        match ctl.dispatch(Command::Search(SearchCriteria::by_department("Engineering"))) {
            Response::Employees(Outcome::Success(list)) => assert_eq!(list.len(), 1),
            other => panic!("unexpected response: {:?}", other),
        }

        assert!(!ctl.dispatch(Command::Delete(77)).is_success());
        assert_eq!(ctl.dispatch(Command::Exit), Response::Exit);
    }
}
