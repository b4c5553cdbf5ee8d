//! Core use-case services.
//!
//! # Responsibility
//! - Turn raw submissions into validated store writes.
//! - Build the employee/department join projection for display.
//! - Keep input surfaces decoupled from store backends.

pub mod form;
pub mod import;
pub mod join;
pub mod session;
pub mod upsert;
