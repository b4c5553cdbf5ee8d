//! SQLite employee table.
//!
//! # Invariants
//! - `empno` is unique; plain inserts of an existing key fail with
//!   `DuplicateKey`.
//! - `upsert` is a single `INSERT ... ON CONFLICT` statement, so a
//!   concurrent writer can never slip between the existence check and the
//!   write.

use crate::model::employee::Employee;
use crate::model::{EmpNo, Record};
use crate::repo::table::{RepoError, RepoResult, TableStore, UpsertOutcome};
use rusqlite::{params, Connection, Row};

const EMPLOYEE_SELECT_SQL: &str = "SELECT empno, empname, job, deptno FROM employees";

/// SQLite-backed employee table.
pub struct SqliteEmployeeTable<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeTable<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TableStore<Employee> for SqliteEmployeeTable<'_> {
    fn lookup(&self, key: EmpNo) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE empno = ?1;"))?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }
        Ok(None)
    }

    fn insert(&mut self, row: &Employee) -> RepoResult<()> {
        row.validate()?;
        self.conn
            .execute(
                "INSERT INTO employees (empno, empname, job, deptno)
                 VALUES (?1, ?2, ?3, ?4);",
                params![row.empno, row.empname, row.job, row.deptno],
            )
            .map_err(|err| map_unique_violation(err, row.empno))?;
        Ok(())
    }

    fn update(&mut self, key: EmpNo, row: &Employee) -> RepoResult<()> {
        row.validate()?;
        if row.empno != key {
            return Err(RepoError::key_mismatch::<Employee>(key, row.empno));
        }

        let changed = self.conn.execute(
            "UPDATE employees
             SET empname = ?1, job = ?2, deptno = ?3, revision = revision + 1
             WHERE empno = ?4;",
            params![row.empname, row.job, row.deptno, key],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found::<Employee>(key));
        }
        Ok(())
    }

    fn upsert(&mut self, row: &Employee) -> RepoResult<UpsertOutcome> {
        row.validate()?;

        // `revision` is 0 only for a row this statement just created.
        let revision: i64 = self.conn.query_row(
            "INSERT INTO employees (empno, empname, job, deptno)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (empno) DO UPDATE SET
                empname = excluded.empname,
                job = excluded.job,
                deptno = excluded.deptno,
                revision = employees.revision + 1
             RETURNING revision;",
            params![row.empno, row.empname, row.job, row.deptno],
            |result| result.get(0),
        )?;

        Ok(if revision == 0 {
            UpsertOutcome::Inserted
        } else {
            UpsertOutcome::Updated
        })
    }

    fn scan(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY row_id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }
        Ok(employees)
    }

    fn count(&self) -> RepoResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM employees;", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative employee count {count}")))
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let employee = Employee {
        empno: row.get("empno")?,
        empname: row.get("empname")?,
        job: row.get("job")?,
        deptno: row.get("deptno")?,
    };
    employee.validate().map_err(|err| {
        RepoError::InvalidData(format!(
            "employees row {} failed validation: {err}",
            employee.empno
        ))
    })?;
    Ok(employee)
}

fn map_unique_violation(err: rusqlite::Error, key: EmpNo) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
            return RepoError::duplicate_key::<Employee>(key);
        }
    }
    err.into()
}
