//! Department record.
//!
//! # Invariants
//! - `deptno` is strictly positive.
//! - `dname` and `loc` are stored trimmed and are never empty.
//! - The department table is append-only; a `deptno` may appear on more
//!   than one row.

use super::validation::{
    check_non_empty, check_positive, into_result, FieldReader, RawRecord, ValidationErrors,
};
use super::{DeptNo, Record};
use serde::{Deserialize, Serialize};

pub const DEPTNO: &str = "Deptno";
pub const DNAME: &str = "Dname";
pub const LOC: &str = "Loc";

pub const FIELDS: [&str; 3] = [DEPTNO, DNAME, LOC];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Department {
    pub deptno: DeptNo,
    pub dname: String,
    pub loc: String,
}

impl Department {
    /// Builds a validated department from raw field input.
    pub fn from_raw(raw: &RawRecord) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(raw);
        let fields = (
            reader.positive_int(DEPTNO),
            reader.non_empty_text(DNAME),
            reader.non_empty_text(LOC),
        );

        match fields {
            (Some(deptno), Some(dname), Some(loc)) => Ok(Self { deptno, dname, loc }),
            _ => Err(reader.into_errors()),
        }
    }
}

impl Record for Department {
    type Key = DeptNo;

    const KIND: &'static str = "department";

    fn key(&self) -> DeptNo {
        self.deptno
    }

    /// Re-checks invariants on an already-typed record.
    ///
    /// Stores call this before writes and after reads, since the fields are
    /// public and can be set without going through `from_raw`.
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        check_positive(&mut errors, DEPTNO, self.deptno);
        check_non_empty(&mut errors, DNAME, &self.dname);
        check_non_empty(&mut errors, LOC, &self.loc);
        into_result(errors)
    }
}
