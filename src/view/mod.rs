//! Console front end: a numbered menu loop over any reader/writer pair.
//!
//! Each menu selection becomes one [`Command`]; the controller's
//! [`Response`] is rendered back as plain text.

pub mod render;

pub use render::render;

use std::io::{self, BufRead, Write};

use crate::controller::{Command, EmployeeController, Outcome, Response};
use crate::model::{EmployeeInput, SearchCriteria, UpdateInput};

const RULE: &str = "------------------------------------------------------------";

/// Top-level menu entries, numbered as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    ViewAll,
    Search,
    Update,
    Delete,
    Statistics,
    Departments,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::Add,
        MenuChoice::ViewAll,
        MenuChoice::Search,
        MenuChoice::Update,
        MenuChoice::Delete,
        MenuChoice::Statistics,
        MenuChoice::Departments,
        MenuChoice::Exit,
    ];

    pub fn parse(input: &str) -> Option<Self> {
        let n: usize = input.trim().parse().ok()?;
        Self::ALL.get(n.checked_sub(1)?).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Add => "Add New Employee",
            MenuChoice::ViewAll => "View All Employees",
            MenuChoice::Search => "Search Employees",
            MenuChoice::Update => "Update Employee",
            MenuChoice::Delete => "Delete Employee",
            MenuChoice::Statistics => "View Employee Statistics",
            MenuChoice::Departments => "View Departments",
            MenuChoice::Exit => "Exit",
        }
    }
}

pub struct ConsoleView<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleView<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until the user picks Exit or input ends.
    pub fn run(&mut self, controller: &EmployeeController) -> io::Result<()> {
        writeln!(self.output, "EMPLOYEE MANAGEMENT SYSTEM")?;

        loop {
            self.print_menu()?;
            let Some(choice) = self.read_choice()? else {
                break;
            };
            if choice == MenuChoice::Exit {
                break;
            }
            if !self.handle(choice, controller)? {
                break;
            }
        }

        writeln!(self.output, "Goodbye!")?;
        self.output.flush()
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Main Menu:")?;
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, choice.label())?;
        }
        writeln!(self.output, "{}", RULE)
    }

    fn read_choice(&mut self) -> io::Result<Option<MenuChoice>> {
        loop {
            let Some(line) = self.prompt("Enter your choice (1-8): ")? else {
                return Ok(None);
            };
            match MenuChoice::parse(&line) {
                Some(choice) => return Ok(Some(choice)),
                None => writeln!(
                    self.output,
                    "Invalid choice. Please enter a number between 1 and 8."
                )?,
            }
        }
    }

    /// `Ok(false)` means input ended mid-dialog.
    fn handle(&mut self, choice: MenuChoice, controller: &EmployeeController) -> io::Result<bool> {
        let command = match choice {
            MenuChoice::Add => match self.read_new_employee()? {
                Some(input) => Command::Add(input),
                None => return Ok(false),
            },
            MenuChoice::ViewAll => Command::ViewAll,
            MenuChoice::Search => match self.read_search()? {
                Some(criteria) => Command::Search(criteria),
                None => return Ok(false),
            },
            MenuChoice::Update => match self.read_update(controller)? {
                Dialog::Done(command) => command,
                Dialog::Cancelled => return Ok(true),
                Dialog::Eof => return Ok(false),
            },
            MenuChoice::Delete => match self.read_delete(controller)? {
                Dialog::Done(command) => command,
                Dialog::Cancelled => return Ok(true),
                Dialog::Eof => return Ok(false),
            },
            MenuChoice::Statistics => Command::Statistics,
            MenuChoice::Departments => Command::Departments,
            MenuChoice::Exit => return Ok(true),
        };

        let response = controller.dispatch(command);
        if response.is_success() {
            if let Some(header) = success_header(choice) {
                writeln!(self.output, "{}", header)?;
            }
        }
        render(&response, &mut self.output)?;
        Ok(true)
    }

    fn read_new_employee(&mut self) -> io::Result<Option<EmployeeInput>> {
        writeln!(self.output, "Enter Employee Information:")?;
        let Some(first) = self.prompt("First Name: ")? else {
            return Ok(None);
        };
        let Some(last) = self.prompt("Last Name: ")? else {
            return Ok(None);
        };
        let Some(department) = self.prompt("Department: ")? else {
            return Ok(None);
        };
        let Some(phone) = self.prompt("Phone Number: ")? else {
            return Ok(None);
        };
        Ok(Some(EmployeeInput::new(first, last, department, phone)))
    }

    fn read_search(&mut self) -> io::Result<Option<SearchCriteria>> {
        writeln!(self.output, "Search Options:")?;
        writeln!(self.output, "1. Search by name")?;
        writeln!(self.output, "2. Filter by department")?;
        writeln!(self.output, "3. Search by name and filter by department")?;
        writeln!(self.output, "4. Show all employees")?;

        loop {
            let Some(choice) = self.prompt("Enter your search choice (1-4): ")? else {
                return Ok(None);
            };
            let (ask_name, ask_department) = match choice.trim() {
                "1" => (true, false),
                "2" => (false, true),
                "3" => (true, true),
                "4" => return Ok(Some(SearchCriteria::default())),
                _ => {
                    writeln!(self.output, "Invalid choice. Please enter 1, 2, 3, or 4.")?;
                    continue;
                }
            };

            let mut name = None;
            if ask_name {
                match self.prompt("Enter name to search: ")? {
                    Some(value) => name = Some(value),
                    None => return Ok(None),
                }
            }
            let mut department = None;
            if ask_department {
                match self.prompt("Enter department: ")? {
                    Some(value) => department = Some(value),
                    None => return Ok(None),
                }
            }
            return Ok(Some(SearchCriteria::new(
                name.as_deref(),
                department.as_deref(),
            )));
        }
    }

    fn read_update(&mut self, controller: &EmployeeController) -> io::Result<Dialog> {
        let id = match self.read_id()? {
            Dialog::Done(id) => id,
            Dialog::Cancelled => return Ok(Dialog::Cancelled),
            Dialog::Eof => return Ok(Dialog::Eof),
        };

        let current = match controller.get_employee(id) {
            Outcome::Success(employee) => employee,
            other => {
                render(&Response::Employee(other), &mut self.output)?;
                return Ok(Dialog::Cancelled);
            }
        };
        writeln!(self.output, "Current information:")?;
        render(&Response::Employee(Outcome::Success(current)), &mut self.output)?;
        writeln!(self.output, "Enter new values (press Enter to keep current value):")?;

        let mut values: [Option<String>; 4] = Default::default();
        let labels = ["First Name", "Last Name", "Department", "Phone Number"];
        for (slot, label) in values.iter_mut().zip(labels) {
            match self.prompt(&format!("{}: ", label))? {
                Some(value) if value.trim().is_empty() => {}
                Some(value) => *slot = Some(value),
                None => return Ok(Dialog::Eof),
            }
        }
        let [first_name, last_name, department, phone_number] = values;
        let changes = UpdateInput {
            first_name,
            last_name,
            department,
            phone_number,
        };
        Ok(Dialog::Done(Command::Update { id, changes }))
    }

    fn read_delete(&mut self, controller: &EmployeeController) -> io::Result<Dialog> {
        let id = match self.read_id()? {
            Dialog::Done(id) => id,
            Dialog::Cancelled => return Ok(Dialog::Cancelled),
            Dialog::Eof => return Ok(Dialog::Eof),
        };

        match controller.get_employee(id) {
            Outcome::Success(employee) => {
                writeln!(self.output, "Employee to be deleted:")?;
                render(&Response::Employee(Outcome::Success(employee)), &mut self.output)?;
            }
            other => {
                render(&Response::Employee(other), &mut self.output)?;
                return Ok(Dialog::Cancelled);
            }
        }

        let Some(answer) = self.prompt("Are you sure you want to delete this employee? (yes/no): ")?
        else {
            return Ok(Dialog::Eof);
        };
        if matches!(answer.trim().to_lowercase().as_str(), "yes" | "y") {
            Ok(Dialog::Done(Command::Delete(id)))
        } else {
            writeln!(self.output, "Deletion cancelled.")?;
            Ok(Dialog::Cancelled)
        }
    }

    /// Blank input cancels; non-numeric input re-prompts.
    fn read_id(&mut self) -> io::Result<Dialog<i64>> {
        loop {
            let Some(line) = self.prompt("Enter Employee ID: ")? else {
                return Ok(Dialog::Eof);
            };
            let line = line.trim();
            if line.is_empty() {
                return Ok(Dialog::Cancelled);
            }
            match line.parse() {
                Ok(id) => return Ok(Dialog::Done(id)),
                Err(_) => writeln!(self.output, "Invalid input. Please enter a valid number.")?,
            }
        }
    }

    /// Print `label` and read one line without its terminator. `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// State of a multi-step prompt.
enum Dialog<T = Command> {
    Done(T),
    Cancelled,
    Eof,
}

fn success_header(choice: MenuChoice) -> Option<&'static str> {
    match choice {
        MenuChoice::Add => Some("Employee created successfully:"),
        MenuChoice::Update => Some("Employee updated successfully:"),
        MenuChoice::Delete => Some("Employee deleted:"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::EmployeeDal;
    use std::io::Cursor;

    fn run_script(controller: &EmployeeController, script: &str) -> String {
        let mut view = ConsoleView::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        view.run(controller).unwrap();
        String::from_utf8(view.into_output()).unwrap()
    }

    fn controller() -> EmployeeController {
        EmployeeController::new(EmployeeDal::open_in_memory().unwrap())
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::parse(" 8 "), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("9"), None);
        assert_eq!(MenuChoice::parse("add"), None);
    }

    #[test]
    fn test_add_then_list() {
        let ctl = controller();
        let out = run_script(&ctl, "1\nAlice\nJohnson\nEngineering\n555-0001\n2\n8\n");
        assert!(out.contains("Employee created successfully:"));
        assert!(out.contains("Found 1 employee(s):"));
        assert!(out.contains("Name: Alice Johnson"));
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_invalid_choice_reprompts() {
        let ctl = controller();
        let out = run_script(&ctl, "42\n8\n");
        assert!(out.contains("Invalid choice. Please enter a number between 1 and 8."));
    }

    #[test]
    fn test_eof_ends_loop() {
        let ctl = controller();
        let out = run_script(&ctl, "1\nAlice\n");
        assert!(out.ends_with("Goodbye!\n"));
        assert_eq!(ctl.list_employees(), Outcome::Success(vec![]));
    }

    #[test]
    fn test_validation_errors_are_rendered() {
        let ctl = controller();
        let out = run_script(&ctl, "1\n \nJohnson\nEngineering\n555-0001\n8\n");
        assert!(out.contains("Validation failed:"));
        assert!(out.contains("first name must not be empty"));
    }

    #[test]
    fn test_update_keeps_blank_fields() {
        let ctl = controller();
        ctl.add_employee(&EmployeeInput::new("Alice", "Johnson", "Engineering", "555-0001"));

        let out = run_script(&ctl, "4\n1\n\n\nResearch\n\n8\n");
        assert!(out.contains("Employee updated successfully:"));

        let emp = ctl.get_employee(1).success().unwrap();
        assert_eq!(emp.first_name, "Alice");
        assert_eq!(emp.department, "Research");
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let ctl = controller();
        ctl.add_employee(&EmployeeInput::new("Alice", "Johnson", "Engineering", "555-0001"));

        let out = run_script(&ctl, "5\n1\nno\n8\n");
        assert!(out.contains("Deletion cancelled."));
        assert!(ctl.get_employee(1).is_success());

        let out = run_script(&ctl, "5\n1\nyes\n8\n");
        assert!(out.contains("Employee deleted:"));
        assert_eq!(ctl.get_employee(1), Outcome::NotFound(1));
    }

    #[test]
    fn test_delete_unknown_id() {
        let ctl = controller();
        let out = run_script(&ctl, "5\nabc\n3\n8\n");
        assert!(out.contains("Invalid input. Please enter a valid number."));
        assert!(out.contains("Employee with ID 3 not found"));
    }

    #[test]
    fn test_search_by_department() {
        let ctl = controller();
        ctl.add_employee(&EmployeeInput::new("Alice", "Johnson", "Engineering", "555-0001"));
        ctl.add_employee(&EmployeeInput::new("Bob", "Lee", "Marketing", "555-0002"));

        let out = run_script(&ctl, "3\n2\nmarketing\n8\n");
        assert!(out.contains("Found 1 employee(s):"));
        assert!(out.contains("Name: Bob Lee"));
        assert!(!out.contains("Name: Alice Johnson"));
    }
}
