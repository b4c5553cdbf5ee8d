//! Bulk employee import from CSV.
//!
//! # Responsibility
//! - Check the header for the required employee columns.
//! - Hold every data row to the same validation contract as form entry.
//! - Write accepted rows through the employee upsert path.
//!
//! # Invariants
//! - No row is written unless every row validated.
//! - Extra columns are ignored; column order does not matter.
//! - Rows are numbered from 1, counting data rows only.

use crate::model::employee::{self, Employee};
use crate::model::validation::{RawRecord, ValidationErrors};
use crate::repo::table::{TableStore, UpsertOutcome};
use crate::service::upsert::{upsert_employee, EntryError};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{Read, Write};
use std::path::Path;

/// Counts of rows written by one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: usize,
    pub updated: usize,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.inserted + self.updated
    }
}

#[derive(Debug)]
pub enum ImportError {
    Csv(csv::Error),
    MissingColumns(Vec<&'static str>),
    InvalidRow { row: usize, errors: ValidationErrors },
    Store { row: usize, source: EntryError },
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv(err) => write!(f, "failed to read CSV: {err}"),
            Self::MissingColumns(columns) => write!(
                f,
                "CSV file must contain the following columns: {}",
                columns.join(", ")
            ),
            Self::InvalidRow { row, errors } => write!(f, "row {row}: {errors}"),
            Self::Store { row, source } => write!(f, "row {row}: {source}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv(err) => Some(err),
            Self::InvalidRow { errors, .. } => Some(errors),
            Self::Store { source, .. } => Some(source),
            Self::MissingColumns(_) => None,
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// Reads and validates every employee row without writing anything.
pub fn parse_employees_csv<R: Read>(input: R) -> Result<Vec<Employee>, ImportError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let mut column_index = Vec::with_capacity(employee::FIELDS.len());
    let mut missing = Vec::new();
    for field in employee::FIELDS {
        match headers.iter().position(|header| header == field) {
            Some(index) => column_index.push((field, index)),
            None => missing.push(field),
        }
    }
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns(missing));
    }

    let mut employees = Vec::new();
    for (offset, record) in reader.records().enumerate() {
        let record = record?;
        let raw: RawRecord = column_index
            .iter()
            .filter_map(|(field, index)| record.get(*index).map(|value| (*field, value)))
            .collect();

        let employee = Employee::from_raw(&raw).map_err(|errors| ImportError::InvalidRow {
            row: offset + 1,
            errors,
        })?;
        employees.push(employee);
    }
    Ok(employees)
}

/// Imports employees from CSV into `store`.
///
/// Rows go through the employee upsert path, so an `Empno` already in the
/// store is updated in place rather than duplicated.
///
/// # Errors
/// - `MissingColumns` / `InvalidRow` / `Csv` before anything is written.
/// - `Store` when a write fails; rows before it stay written.
pub fn import_employees_csv<R, S>(input: R, store: &mut S) -> Result<ImportReport, ImportError>
where
    R: Read,
    S: TableStore<Employee> + ?Sized,
{
    let employees = match parse_employees_csv(input) {
        Ok(employees) => employees,
        Err(err) => {
            warn!("event=employee_import module=service status=rejected error={err}");
            return Err(err);
        }
    };

    let mut report = ImportReport::default();
    for (offset, employee) in employees.iter().enumerate() {
        match upsert_employee(store, employee) {
            Ok(UpsertOutcome::Inserted) => report.inserted += 1,
            Ok(UpsertOutcome::Updated) => report.updated += 1,
            Err(source) => {
                return Err(ImportError::Store {
                    row: offset + 1,
                    source,
                })
            }
        }
    }

    info!(
        "event=employee_import module=service status=ok rows={} inserted={} updated={}",
        report.total(),
        report.inserted,
        report.updated
    );
    Ok(report)
}

/// Opens `path` and imports it with [`import_employees_csv`].
pub fn import_employees_file<S>(
    path: impl AsRef<Path>,
    store: &mut S,
) -> Result<ImportReport, ImportError>
where
    S: TableStore<Employee> + ?Sized,
{
    let file = std::fs::File::open(path).map_err(|err| ImportError::Csv(err.into()))?;
    import_employees_csv(file, store)
}

/// Writes an import template: the header row plus one sample employee.
pub fn write_employee_template<W: Write>(output: W) -> Result<(), csv::Error> {
    let mut writer = WriterBuilder::new().from_writer(output);
    writer.serialize(Employee {
        empno: 2,
        empname: "Ankit".to_string(),
        job: "HR".to_string(),
        deptno: 2,
    })?;
    writer.flush()?;
    Ok(())
}
