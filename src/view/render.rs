//! Plain-text rendering of controller responses.

use std::io::{self, Write};

use crate::controller::{Outcome, Response};
use crate::model::{Employee, Statistics};

pub fn render(response: &Response, out: &mut impl Write) -> io::Result<()> {
    match response {
        Response::Employee(outcome) => render_outcome(outcome, out, |e, out| employee(e, out)),
        Response::Employees(outcome) => render_outcome(outcome, out, |list, out| employees(list, out)),
        Response::Statistics(outcome) => render_outcome(outcome, out, |s, out| statistics(s, out)),
        Response::Departments(outcome) => {
            render_outcome(outcome, out, |list, out| departments(list, out))
        }
        Response::Exit => Ok(()),
    }
}

fn render_outcome<T, W: Write>(
    outcome: &Outcome<T>,
    out: &mut W,
    on_success: impl FnOnce(&T, &mut W) -> io::Result<()>,
) -> io::Result<()> {
    match outcome {
        Outcome::Success(value) => on_success(value, out),
        Outcome::ValidationFailed(errors) => {
            writeln!(out, "Validation failed:")?;
            for error in errors {
                writeln!(out, "  - {}", error)?;
            }
            Ok(())
        }
        Outcome::Conflict(reason) => writeln!(out, "Conflict: {}", reason),
        Outcome::NotFound(id) => writeln!(out, "Employee with ID {} not found", id),
        Outcome::StorageError(message) => writeln!(out, "Storage error: {}", message),
    }
}

fn employee(e: &Employee, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Employee ID: {}", e.id)?;
    writeln!(out, "Name: {}", e.full_name())?;
    writeln!(out, "Department: {}", e.department)?;
    writeln!(out, "Phone Number: {}", e.phone_number)?;
    writeln!(out, "----------------------------------------")
}

fn employees(list: &[Employee], out: &mut impl Write) -> io::Result<()> {
    if list.is_empty() {
        return writeln!(out, "No employees found.");
    }
    writeln!(out, "Found {} employee(s):", list.len())?;
    for e in list {
        employee(e, out)?;
    }
    Ok(())
}

fn statistics(stats: &Statistics, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Employee Statistics:")?;
    writeln!(out, "Total Employees: {}", stats.total)?;
    writeln!(out, "Total Departments: {}", stats.departments)?;
    if !stats.by_department.is_empty() {
        writeln!(out, "Employees per Department:")?;
        for (department, count) in &stats.by_department {
            writeln!(out, "  {:<20} {}", department, count)?;
        }
    }
    Ok(())
}

fn departments(list: &[String], out: &mut impl Write) -> io::Result<()> {
    if list.is_empty() {
        return writeln!(out, "No departments found.");
    }
    writeln!(out, "Departments ({}):", list.len())?;
    for (i, department) in list.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, department)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Field, FieldError};

    fn rendered(response: &Response) -> String {
        let mut out = Vec::new();
        render(response, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_statistics() {
        let mut stats = Statistics {
            total: 3,
            departments: 2,
            ..Default::default()
        };
        stats.by_department.insert("Engineering".to_string(), 2);
        stats.by_department.insert("HR".to_string(), 1);

        let text = rendered(&Response::Statistics(Outcome::Success(stats)));
        assert!(text.contains("Total Employees: 3"));
        assert!(text.contains("Total Departments: 2"));
        assert!(text.contains("  Engineering          2"));
    }

    #[test]
    fn test_render_failures() {
        let text = rendered(&Response::Employee(Outcome::ValidationFailed(vec![
            FieldError::required(Field::PhoneNumber),
        ])));
        assert_eq!(text, "Validation failed:\n  - phone number must not be empty\n");

        let text = rendered(&Response::Employees(Outcome::StorageError("locked".into())));
        assert_eq!(text, "Storage error: locked\n");
    }

    #[test]
    fn test_render_empty_lists() {
        assert_eq!(
            rendered(&Response::Employees(Outcome::Success(vec![]))),
            "No employees found.\n"
        );
        assert_eq!(
            rendered(&Response::Departments(Outcome::Success(vec![]))),
            "No departments found.\n"
        );
    }
}
