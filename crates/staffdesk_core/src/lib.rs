//! Core domain logic for staffdesk.
//! This crate is the single source of truth for record validation, the
//! upsert policy and the join view.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, DatabaseLocation, StoreConfig, DATABASE_URL_ENV};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::department::Department;
pub use model::employee::Employee;
pub use model::validation::{
    FieldError, RawRecord, RawValue, ValidationErrorKind, ValidationErrors,
};
pub use model::{DeptNo, EmpNo, Record};
pub use repo::department_repo::SqliteDepartmentTable;
pub use repo::employee_repo::SqliteEmployeeTable;
pub use repo::memory_table::MemoryTable;
pub use repo::table::{RepoError, RepoResult, TableStore, UpsertOutcome};
pub use service::form::{failure_message, submit_department, submit_employee, FormOutcome};
pub use service::import::{
    import_employees_csv, import_employees_file, parse_employees_csv, write_employee_template,
    ImportError, ImportReport,
};
pub use service::join::{join_records, load_join_view, EmptySide, JoinView, JoinedRow};
pub use service::session::Session;
pub use service::upsert::{insert_department, upsert_employee, EntryError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
