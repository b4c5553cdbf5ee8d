//! Upsert engine for validated records.
//!
//! # Responsibility
//! - Decide insert vs. update for employees, keyed by `empno`.
//! - Append departments unconditionally.
//! - Collapse store failures into the user-facing error taxonomy.
//!
//! # Invariants
//! - The employee path issues exactly one store `upsert`; it never splits
//!   into a lookup followed by a write.
//! - The department path never deduplicates; an existing `deptno` gains
//!   another row.

use crate::model::department::Department;
use crate::model::employee::Employee;
use crate::model::validation::ValidationErrors;
use crate::model::Record;
use crate::repo::table::{RepoError, TableStore, UpsertOutcome};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error returned by submission and import use-cases.
#[derive(Debug)]
pub enum EntryError {
    /// Input failed field validation; the user corrects and resubmits.
    Validation(ValidationErrors),
    /// Backend failed; the user may retry.
    StoreUnavailable(String),
    /// Key collided with an existing row; the user may retry.
    DuplicateKey { kind: &'static str, key: String },
}

impl Display for EntryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::StoreUnavailable(message) => write!(f, "store unavailable: {message}"),
            Self::DuplicateKey { kind, key } => write!(f, "duplicate {kind} key: {key}"),
        }
    }
}

impl Error for EntryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::StoreUnavailable(_) | Self::DuplicateKey { .. } => None,
        }
    }
}

impl From<ValidationErrors> for EntryError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for EntryError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(errors) => Self::Validation(errors),
            RepoError::DuplicateKey { kind, key } => Self::DuplicateKey { kind, key },
            other => Self::StoreUnavailable(other.to_string()),
        }
    }
}

/// Inserts a new employee or replaces the one stored under its `empno`.
pub fn upsert_employee<S>(store: &mut S, employee: &Employee) -> Result<UpsertOutcome, EntryError>
where
    S: TableStore<Employee> + ?Sized,
{
    match store.upsert(employee) {
        Ok(outcome) => {
            info!(
                "event=employee_upsert module=service status=ok outcome={} empno={}",
                outcome_label(outcome),
                employee.key()
            );
            Ok(outcome)
        }
        Err(err) => {
            warn!(
                "event=employee_upsert module=service status=error empno={} error={}",
                employee.key(),
                err
            );
            Err(err.into())
        }
    }
}

/// Appends a department row, even when its `deptno` already exists.
pub fn insert_department<S>(store: &mut S, department: &Department) -> Result<(), EntryError>
where
    S: TableStore<Department> + ?Sized,
{
    match store.insert(department) {
        Ok(()) => {
            info!(
                "event=department_insert module=service status=ok deptno={}",
                department.key()
            );
            Ok(())
        }
        Err(err) => {
            warn!(
                "event=department_insert module=service status=error deptno={} error={}",
                department.key(),
                err
            );
            Err(err.into())
        }
    }
}

fn outcome_label(outcome: UpsertOutcome) -> &'static str {
    match outcome {
        UpsertOutcome::Inserted => "inserted",
        UpsertOutcome::Updated => "updated",
    }
}

#[cfg(test)]
mod tests {
    use super::{insert_department, upsert_employee, EntryError};
    use crate::model::department::Department;
    use crate::model::employee::Employee;
    use crate::model::DeptNo;
    use crate::repo::memory_table::MemoryTable;
    use crate::repo::table::{RepoError, RepoResult, TableStore, UpsertOutcome};

    struct OfflineStore;

    impl TableStore<Employee> for OfflineStore {
        fn lookup(&self, _key: i64) -> RepoResult<Option<Employee>> {
            Err(RepoError::InvalidData("offline".to_string()))
        }
        fn insert(&mut self, _row: &Employee) -> RepoResult<()> {
            Err(RepoError::InvalidData("offline".to_string()))
        }
        fn update(&mut self, _key: i64, _row: &Employee) -> RepoResult<()> {
            Err(RepoError::InvalidData("offline".to_string()))
        }
        fn upsert(&mut self, _row: &Employee) -> RepoResult<UpsertOutcome> {
            Err(RepoError::InvalidData("connection refused".to_string()))
        }
        fn scan(&self) -> RepoResult<Vec<Employee>> {
            Err(RepoError::InvalidData("offline".to_string()))
        }
    }

    /// Reports every upsert as losing a race on the unique key.
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

    fn department(deptno: DeptNo, dname: &str) -> Department {
        Department {
            deptno,
            dname: dname.to_string(),
            loc: "NY".to_string(),
        }
    }

    #[test]
    fn employee_path_inserts_then_updates_same_key() {
        let mut store = MemoryTable::<Employee>::new();
        let first = Employee {
            empno: 7,
            empname: "Ada".to_string(),
            job: "Engineer".to_string(),
            deptno: 10,
        };
        let moved = Employee {
            deptno: 20,
            job: "Manager".to_string(),
            ..first.clone()
        };

        assert_eq!(upsert_employee(&mut store, &first).unwrap(), UpsertOutcome::Inserted);
        assert_eq!(upsert_employee(&mut store, &moved).unwrap(), UpsertOutcome::Updated);
        assert_eq!(store.rows(), [moved]);
    }

    #[test]
    fn department_path_keeps_duplicates() {
        let mut store = MemoryTable::<Department>::new();
        insert_department(&mut store, &department(10, "Sales")).unwrap();
        insert_department(&mut store, &department(10, "Support")).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn store_failure_maps_to_store_unavailable() {
        let employee = Employee {
            empno: 1,
            empname: "A".to_string(),
            job: "HR".to_string(),
            deptno: 10,
        };
        let err = upsert_employee(&mut OfflineStore, &employee).unwrap_err();
        match err {
            EntryError::StoreUnavailable(message) => assert!(message.contains("connection refused")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn key_collision_maps_to_duplicate_key() {
        let employee = Employee {
            empno: 42,
            empname: "A".to_string(),
            job: "HR".to_string(),
            deptno: 10,
        };
        let err = upsert_employee(&mut ContendedStore, &employee).unwrap_err();
        match &err {
            EntryError::DuplicateKey { kind, key } => {
                assert_eq!(*kind, "employee");
                assert_eq!(key, "42");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.to_string(), "duplicate employee key: 42");
    }
}
