//! Command handlers for the database-backed variant.
//!
//! Every handler returns the text to print and whether the command
//! succeeded. Config and database-open failures never reach here; `main`
//! treats them as fatal before dispatch.

use crate::cli::{DepartmentArgs, EmployeeArgs, ViewFormat};
use crate::render::{no_data_message, render_json, render_table};
use rusqlite::Connection;
use staffdesk_core::{
    import_employees_file, load_join_view, submit_department, submit_employee, FormOutcome,
    JoinView, RawRecord, SqliteDepartmentTable, SqliteEmployeeTable,
};
use std::path::Path;

/// Printed result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub ok: bool,
    pub text: String,
}

impl Report {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            ok: true,
            text: text.into(),
        }
    }

    fn failed(text: impl Into<String>) -> Self {
        Self {
            ok: false,
            text: text.into(),
        }
    }
}

impl From<FormOutcome> for Report {
    fn from(outcome: FormOutcome) -> Self {
        Self {
            ok: outcome.is_success(),
            text: outcome.message().to_string(),
        }
    }
}

pub fn employee(conn: &Connection, args: &EmployeeArgs) -> Report {
    let raw = form_fields([
        ("Empno", &args.empno),
        ("Empname", &args.empname),
        ("Job", &args.job),
        ("Deptno", &args.deptno),
    ]);
    submit_employee(&mut SqliteEmployeeTable::new(conn), &raw).into()
}

pub fn department(conn: &Connection, args: &DepartmentArgs) -> Report {
    let raw = form_fields([
        ("Deptno", &args.deptno),
        ("Dname", &args.dname),
        ("Loc", &args.loc),
    ]);
    submit_department(&mut SqliteDepartmentTable::new(conn), &raw).into()
}

pub fn view(conn: &Connection, format: ViewFormat) -> Report {
    let employees = SqliteEmployeeTable::new(conn);
    let departments = SqliteDepartmentTable::new(conn);
    let view = match load_join_view(&employees, &departments) {
        Ok(view) => view,
        Err(err) => return Report::failed(format!("An error occurred: {err}")),
    };

    match format {
        ViewFormat::Table => Report::ok(render_table(&view)),
        ViewFormat::Json => match &view {
            JoinView::NoData(side) => Report::failed(no_data_message(*side)),
            JoinView::Rows(rows) => match render_json(rows) {
                Ok(json) => Report::ok(json),
                Err(err) => Report::failed(format!("An error occurred: {err}")),
            },
        },
    }
}

pub fn import(conn: &Connection, file: &Path) -> Report {
    match import_employees_file(file, &mut SqliteEmployeeTable::new(conn)) {
        Ok(report) => Report::ok(format!(
            "Data uploaded to the database successfully! ({} added, {} updated)",
            report.inserted, report.updated
        )),
        Err(err) => Report::failed(format!("Failed to upload data: {err}")),
    }
}

/// Collects supplied flags; absent flags stay absent so validation can
/// report them as missing.
fn form_fields<const N: usize>(fields: [(&str, &Option<String>); N]) -> RawRecord {
    fields
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|value| (name, value)))
        .collect()
}
