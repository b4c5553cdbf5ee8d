//! Form submission controller.
//!
//! # Responsibility
//! - Accept raw field maps from an input surface.
//! - Run validation and the upsert engine.
//! - Reduce every result to exactly one user-facing message.
//!
//! # Invariants
//! - Nothing raised during a submission escapes as an error; failures come
//!   back as `FormOutcome::Failure`.
//! - A validation failure reports only the first failing field.

use crate::model::department::Department;
use crate::model::employee::Employee;
use crate::model::validation::RawRecord;
use crate::repo::table::{TableStore, UpsertOutcome};
use crate::service::upsert::{insert_department, upsert_employee, EntryError};
use log::debug;

/// What the input surface should display after one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Success(String),
    Failure(String),
}

impl FormOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Failure(message) => message,
        }
    }
}

/// Validates and upserts one employee submission.
pub fn submit_employee<S>(store: &mut S, raw: &RawRecord) -> FormOutcome
where
    S: TableStore<Employee> + ?Sized,
{
    let result = Employee::from_raw(raw)
        .map_err(EntryError::from)
        .and_then(|employee| {
            let outcome = upsert_employee(store, &employee)?;
            Ok((employee, outcome))
        });

    match result {
        Ok((_, UpsertOutcome::Inserted)) => {
            FormOutcome::Success("Employee data added successfully!".to_string())
        }
        Ok((employee, UpsertOutcome::Updated)) => FormOutcome::Success(format!(
            "Employee data updated successfully for Empno {}!",
            employee.empno
        )),
        Err(err) => failure("employee", &err),
    }
}

/// Validates and appends one department submission.
pub fn submit_department<S>(store: &mut S, raw: &RawRecord) -> FormOutcome
where
    S: TableStore<Department> + ?Sized,
{
    let result = Department::from_raw(raw)
        .map_err(EntryError::from)
        .and_then(|department| insert_department(store, &department));

    match result {
        Ok(()) => FormOutcome::Success("Department data added successfully!".to_string()),
        Err(err) => failure("department", &err),
    }
}

/// Renders an entry error as the single message shown to the user.
pub fn failure_message(err: &EntryError) -> String {
    match err {
        EntryError::Validation(errors) => format!("Validation Error: {}", errors.first()),
        other => format!("An error occurred: {other}"),
    }
}

fn failure(form: &str, err: &EntryError) -> FormOutcome {
    debug!("event=form_submit module=service status=rejected form={form} error={err}");
    FormOutcome::Failure(failure_message(err))
}

#[cfg(test)]
mod tests {
    use super::{submit_department, submit_employee, FormOutcome};
    use crate::model::department::Department;
    use crate::model::employee::Employee;
    use crate::model::validation::RawRecord;
    use crate::repo::memory_table::MemoryTable;
    use crate::repo::table::{RepoError, RepoResult, TableStore, UpsertOutcome};

    struct ContendedStore;

    impl TableStore<Employee> for ContendedStore {
        fn lookup(&self, _key: i64) -> RepoResult<Option<Employee>> {
            Ok(None)
        }
        fn insert(&mut self, row: &Employee) -> RepoResult<()> {
            Err(RepoError::duplicate_key::<Employee>(row.empno))
        }
        fn update(&mut self, key: i64, _row: &Employee) -> RepoResult<()> {
            Err(RepoError::not_found::<Employee>(key))
        }
        fn upsert(&mut self, row: &Employee) -> RepoResult<UpsertOutcome> {
            Err(RepoError::duplicate_key::<Employee>(row.empno))
        }
        fn scan(&self) -> RepoResult<Vec<Employee>> {
            Ok(Vec::new())
        }
    }

    fn employee_form(empno: &str, name: &str, job: &str, deptno: &str) -> RawRecord {
        RawRecord::new()
            .with("Empno", empno)
            .with("Empname", name)
            .with("Job", job)
            .with("Deptno", deptno)
    }

    #[test]
    fn insert_then_update_messages() {
        let mut store = MemoryTable::<Employee>::new();

        let added = submit_employee(&mut store, &employee_form("1", "A", "HR", "10"));
        assert_eq!(
            added,
            FormOutcome::Success("Employee data added successfully!".to_string())
        );

        let updated = submit_employee(&mut store, &employee_form("1", "A", "IT", "10"));
        assert_eq!(
            updated.message(),
            "Employee data updated successfully for Empno 1!"
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn validation_failure_shows_first_field_and_writes_nothing() {
        let mut store = MemoryTable::<Employee>::new();
        let outcome = submit_employee(&mut store, &employee_form("0", " ", "HR", "x"));

        assert!(!outcome.is_success());
        assert_eq!(
            outcome.message(),
            "Validation Error: Empno: value must be greater than 0"
        );
        assert!(store.is_empty());
    }

    #[test]
    fn department_submission_appends() {
        let mut store = MemoryTable::<Department>::new();
        let form = RawRecord::new()
            .with("Deptno", "10")
            .with("Dname", "Sales")
            .with("Loc", "NY");

        assert!(submit_department(&mut store, &form).is_success());
        assert!(submit_department(&mut store, &form).is_success());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn missing_department_field_is_reported() {
        let mut store = MemoryTable::<Department>::new();
        let form = RawRecord::new().with("Deptno", "10").with("Dname", "Sales");

        let outcome = submit_department(&mut store, &form);
        assert_eq!(outcome.message(), "Validation Error: Loc: field is required");
    }

    #[test]
    fn duplicate_key_is_reported_as_an_error_message() {
        let outcome = submit_employee(&mut ContendedStore, &employee_form("7", "A", "HR", "10"));
        assert_eq!(
            outcome,
            FormOutcome::Failure("An error occurred: duplicate employee key: 7".to_string())
        );
    }
}
