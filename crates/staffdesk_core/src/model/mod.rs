//! Record model for employee and department tables.
//!
//! # Responsibility
//! - Define the typed records held by every store backend.
//! - Own the field-level validation contract shared by all write paths.
//!
//! # Invariants
//! - A typed record that passed `validate()` has positive numeric keys and
//!   non-empty trimmed text fields.
//! - `Employee.deptno` is a soft reference; it is never checked on write.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use validation::ValidationErrors;

pub mod department;
pub mod employee;
pub mod validation;

/// Employee number, the employee table key.
pub type EmpNo = i64;
/// Department number, the department table key and join column.
pub type DeptNo = i64;

/// A row type that can live in a keyed table store.
pub trait Record: Clone {
    type Key: Copy + Eq + Hash + Display + Debug;

    /// Lowercase table label used in logs and error text.
    const KIND: &'static str;

    fn key(&self) -> Self::Key;

    fn validate(&self) -> Result<(), ValidationErrors>;
}
