//! In-memory session store variant.
//!
//! A `Session` owns one employee table and one department table. Whoever
//! creates it holds the data; dropping it discards everything.

use crate::model::department::Department;
use crate::model::employee::Employee;
use crate::model::validation::RawRecord;
use crate::repo::memory_table::MemoryTable;
use crate::service::form::{submit_department, submit_employee, FormOutcome};
use crate::service::import::{
    import_employees_csv, import_employees_file, ImportError, ImportReport,
};
use crate::service::join::{join_records, JoinView};
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Session {
    employees: MemoryTable<Employee>,
    departments: MemoryTable<Department>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit_employee(&mut self, raw: &RawRecord) -> FormOutcome {
        submit_employee(&mut self.employees, raw)
    }

    pub fn submit_department(&mut self, raw: &RawRecord) -> FormOutcome {
        submit_department(&mut self.departments, raw)
    }

    pub fn import_employees<R: Read>(&mut self, input: R) -> Result<ImportReport, ImportError> {
        import_employees_csv(input, &mut self.employees)
    }

    pub fn import_employees_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<ImportReport, ImportError> {
        import_employees_file(path, &mut self.employees)
    }

    pub fn join_view(&self) -> JoinView {
        join_records(self.employees.rows(), self.departments.rows())
    }

    pub fn employees(&self) -> &[Employee] {
        self.employees.rows()
    }

    pub fn departments(&self) -> &[Department] {
        self.departments.rows()
    }
}
