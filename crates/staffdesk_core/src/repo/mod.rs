//! Store backends for employee and department tables.
//!
//! # Responsibility
//! - Define the keyed table contract every backend implements.
//! - Keep SQL details behind the SQLite implementations.
//!
//! # Invariants
//! - Writes call the record's `validate()` before mutating storage.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `scan` returns rows in insertion order.

pub mod department_repo;
pub mod employee_repo;
pub mod memory_table;
pub mod table;
