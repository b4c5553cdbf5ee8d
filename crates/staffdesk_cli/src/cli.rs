//! Command-line definition.

use clap::{Parser, Subcommand, ValueEnum};
use staffdesk_core::DATABASE_URL_ENV;
use std::path::PathBuf;

/// Employee and department data entry with a joined view.
#[derive(Debug, Parser)]
#[command(name = "staffdesk", version)]
pub struct Cli {
    /// Database connection string: a path, sqlite://<path> or :memory:
    #[arg(long = "database-url", env = DATABASE_URL_ENV, global = true)]
    pub database_url: Option<String>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logs go to stderr when unset
    #[arg(long = "log-dir", global = true)]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add an employee, or update it when the Empno already exists
    Employee(EmployeeArgs),

    /// Add a department row
    Department(DepartmentArgs),

    /// Show employees joined with their departments
    View {
        #[arg(long, value_enum, default_value_t = ViewFormat::Table)]
        format: ViewFormat,
    },

    /// Import employees from a CSV file with Empno, Empname, Job, Deptno columns
    Import {
        /// CSV file to import
        file: PathBuf,
    },

    /// Write a sample employee CSV for import
    Template {
        /// Output path
        #[arg(default_value = "employee_data.csv")]
        file: PathBuf,
    },

    /// Interactive session backed by in-memory tables
    Session,
}

/// Employee form fields. Missing flags are reported by validation.
#[derive(Debug, clap::Args)]
pub struct EmployeeArgs {
    #[arg(long)]
    pub empno: Option<String>,
    #[arg(long)]
    pub empname: Option<String>,
    #[arg(long)]
    pub job: Option<String>,
    #[arg(long)]
    pub deptno: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct DepartmentArgs {
    #[arg(long)]
    pub deptno: Option<String>,
    #[arg(long)]
    pub dname: Option<String>,
    #[arg(long)]
    pub loc: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewFormat {
    Table,
    Json,
}
