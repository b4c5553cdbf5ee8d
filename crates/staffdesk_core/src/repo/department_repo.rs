//! SQLite department table.
//!
//! # Invariants
//! - The table is append-only by key: `insert` accepts an existing
//!   `deptno` and stores another row.
//! - `update` and `upsert` touch every row sharing the key.

use crate::model::department::Department;
use crate::model::{DeptNo, Record};
use crate::repo::table::{RepoError, RepoResult, TableStore, UpsertOutcome};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const DEPARTMENT_SELECT_SQL: &str = "SELECT deptno, dname, loc FROM departments";

/// SQLite-backed department table.
pub struct SqliteDepartmentTable<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentTable<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TableStore<Department> for SqliteDepartmentTable<'_> {
    fn lookup(&self, key: DeptNo) -> RepoResult<Option<Department>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DEPARTMENT_SELECT_SQL} WHERE deptno = ?1 ORDER BY row_id ASC LIMIT 1;"
        ))?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_department_row(row)?));
        }
        Ok(None)
    }

    fn insert(&mut self, row: &Department) -> RepoResult<()> {
        row.validate()?;
        insert_row(self.conn, row)?;
        Ok(())
    }

    fn update(&mut self, key: DeptNo, row: &Department) -> RepoResult<()> {
        row.validate()?;
        if row.deptno != key {
            return Err(RepoError::key_mismatch::<Department>(key, row.deptno));
        }
        if update_rows(self.conn, row)? == 0 {
            return Err(RepoError::not_found::<Department>(key));
        }
        Ok(())
    }

    fn upsert(&mut self, row: &Department) -> RepoResult<UpsertOutcome> {
        row.validate()?;

        // No unique index to conflict on, so take the write lock up front.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let outcome = if update_rows(&tx, row)? > 0 {
            UpsertOutcome::Updated
        } else {
            insert_row(&tx, row)?;
            UpsertOutcome::Inserted
        };
        tx.commit()?;
        Ok(outcome)
    }

    fn scan(&self) -> RepoResult<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} ORDER BY row_id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut departments = Vec::new();
        while let Some(row) = rows.next()? {
            departments.push(parse_department_row(row)?);
        }
        Ok(departments)
    }

    fn count(&self) -> RepoResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM departments;", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative department count {count}")))
    }
}

fn insert_row(conn: &Connection, row: &Department) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO departments (deptno, dname, loc) VALUES (?1, ?2, ?3);",
        params![row.deptno, row.dname, row.loc],
    )
}

fn update_rows(conn: &Connection, row: &Department) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE departments SET dname = ?1, loc = ?2 WHERE deptno = ?3;",
        params![row.dname, row.loc, row.deptno],
    )
}

fn parse_department_row(row: &Row<'_>) -> RepoResult<Department> {
    let department = Department {
        deptno: row.get("deptno")?,
        dname: row.get("dname")?,
        loc: row.get("loc")?,
    };
    department.validate().map_err(|err| {
        RepoError::InvalidData(format!(
            "departments row {} failed validation: {err}",
            department.deptno
        ))
    })?;
    Ok(department)
}
