//! Employee/department join projection.
//!
//! # Responsibility
//! - Produce the inner equality join on `Deptno` for display.
//! - Tell callers when a side is empty instead of handing back a silent
//!   empty table.
//!
//! # Invariants
//! - Employees without a matching department are dropped, and so are
//!   departments without a matching employee.
//! - Output follows employee insertion order; one employee matching several
//!   department rows yields them in department insertion order.

use crate::model::department::Department;
use crate::model::employee::Employee;
use crate::model::{DeptNo, EmpNo};
use crate::repo::table::{RepoResult, TableStore};
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

/// One employee paired with one department sharing its `deptno`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct JoinedRow {
    pub empno: EmpNo,
    pub empname: String,
    pub job: String,
    pub deptno: DeptNo,
    pub dname: String,
    pub loc: String,
}

impl JoinedRow {
    pub const COLUMNS: [&'static str; 6] = ["Empno", "Empname", "Job", "Deptno", "Dname", "Loc"];

    fn pair(employee: &Employee, department: &Department) -> Self {
        Self {
            empno: employee.empno,
            empname: employee.empname.clone(),
            job: employee.job.clone(),
            deptno: employee.deptno,
            dname: department.dname.clone(),
            loc: department.loc.clone(),
        }
    }

    /// Cell values in `COLUMNS` order, for tabular renderers.
    pub fn cells(&self) -> [String; 6] {
        [
            self.empno.to_string(),
            self.empname.clone(),
            self.job.clone(),
            self.deptno.to_string(),
            self.dname.clone(),
            self.loc.clone(),
        ]
    }
}

/// Which input table had no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptySide {
    Employees,
    Departments,
    Both,
}

/// Result of the join view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinView {
    /// At least one input table is empty; there is nothing to show.
    NoData(EmptySide),
    /// Joined rows; may still be empty when no `deptno` matches.
    Rows(Vec<JoinedRow>),
}

impl JoinView {
    /// Returns joined rows, treating `NoData` as no rows.
    pub fn rows(&self) -> &[JoinedRow] {
        match self {
            Self::NoData(_) => &[],
            Self::Rows(rows) => rows,
        }
    }
}

/// Joins already-loaded employee and department rows on `deptno`.
pub fn join_records(employees: &[Employee], departments: &[Department]) -> JoinView {
    match (employees.is_empty(), departments.is_empty()) {
        (true, true) => return JoinView::NoData(EmptySide::Both),
        (true, false) => return JoinView::NoData(EmptySide::Employees),
        (false, true) => return JoinView::NoData(EmptySide::Departments),
        (false, false) => {}
    }

    let mut by_deptno: HashMap<DeptNo, Vec<&Department>> = HashMap::new();
    for department in departments {
        by_deptno.entry(department.deptno).or_default().push(department);
    }

    let rows: Vec<JoinedRow> = employees
        .iter()
        .flat_map(|employee| {
            by_deptno
                .get(&employee.deptno)
                .into_iter()
                .flatten()
                .map(move |department| JoinedRow::pair(employee, department))
        })
        .collect();

    debug!(
        "event=join_view module=service employees={} departments={} rows={}",
        employees.len(),
        departments.len(),
        rows.len()
    );
    JoinView::Rows(rows)
}

/// Scans both stores and joins them.
pub fn load_join_view<E, D>(employees: &E, departments: &D) -> RepoResult<JoinView>
where
    E: TableStore<Employee> + ?Sized,
    D: TableStore<Department> + ?Sized,
{
    let employees = employees.scan()?;
    let departments = departments.scan()?;
    Ok(join_records(&employees, &departments))
}

#[cfg(test)]
mod tests {
    use super::{join_records, EmptySide, JoinView, JoinedRow};
    use crate::model::department::Department;
    use crate::model::employee::Employee;

    fn employee(empno: i64, name: &str, job: &str, deptno: i64) -> Employee {
        Employee {
            empno,
            empname: name.to_string(),
            job: job.to_string(),
            deptno,
        }
    }

    fn department(deptno: i64, dname: &str, loc: &str) -> Department {
        Department {
            deptno,
            dname: dname.to_string(),
            loc: loc.to_string(),
        }
    }

    #[test]
    fn drops_employees_without_department() {
        let employees = [employee(1, "A", "HR", 10), employee(2, "B", "IT", 20)];
        let departments = [department(10, "Sales", "NY")];

        let view = join_records(&employees, &departments);
        assert_eq!(
            view,
            JoinView::Rows(vec![JoinedRow {
                empno: 1,
                empname: "A".to_string(),
                job: "HR".to_string(),
                deptno: 10,
                dname: "Sales".to_string(),
                loc: "NY".to_string(),
            }])
        );
    }

    #[test]
    fn empty_department_store_yields_no_data() {
        let employees = [employee(1, "A", "HR", 10)];
        assert_eq!(
            join_records(&employees, &[]),
            JoinView::NoData(EmptySide::Departments)
        );
        assert_eq!(join_records(&[], &[]), JoinView::NoData(EmptySide::Both));
        assert!(join_records(&[], &[department(1, "X", "Y")]).rows().is_empty());
    }

    #[test]
    fn duplicate_department_rows_each_join_in_order() {
        let employees = [employee(1, "A", "HR", 10), employee(2, "B", "IT", 10)];
        let departments = [department(10, "Sales", "NY"), department(10, "Sales", "LA")];

        let pairs: Vec<(i64, String)> = join_records(&employees, &departments)
            .rows()
            .iter()
            .map(|row| (row.empno, row.loc.clone()))
            .collect();
        assert_eq!(
            pairs,
            [
                (1, "NY".to_string()),
                (1, "LA".to_string()),
                (2, "NY".to_string()),
                (2, "LA".to_string()),
            ]
        );
    }

    #[test]
    fn no_matching_keys_yields_empty_rows_not_no_data() {
        let view = join_records(&[employee(1, "A", "HR", 5)], &[department(6, "Ops", "SF")]);
        assert_eq!(view, JoinView::Rows(Vec::new()));
    }
}
