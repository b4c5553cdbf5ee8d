//! Employee record.
//!
//! # Invariants
//! - `empno` is the table key and is strictly positive.
//! - `empname` and `job` are stored trimmed and are never empty.
//! - `deptno` is strictly positive but need not name an existing department.

use super::validation::{
    check_non_empty, check_positive, into_result, FieldReader, RawRecord, ValidationErrors,
};
use super::{DeptNo, EmpNo, Record};
use serde::{Deserialize, Serialize};

pub const EMPNO: &str = "Empno";
pub const EMPNAME: &str = "Empname";
pub const JOB: &str = "Job";
pub const DEPTNO: &str = "Deptno";

/// Field names in declaration order; also the required import columns.
pub const FIELDS: [&str; 4] = [EMPNO, EMPNAME, JOB, DEPTNO];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Employee {
    pub empno: EmpNo,
    pub empname: String,
    pub job: String,
    pub deptno: DeptNo,
}

impl Employee {
    /// Builds a validated employee from raw field input.
    ///
    /// Text fields are trimmed; numeric text is parsed after trimming.
    pub fn from_raw(raw: &RawRecord) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(raw);
        let fields = (
            reader.positive_int(EMPNO),
            reader.non_empty_text(EMPNAME),
            reader.non_empty_text(JOB),
            reader.positive_int(DEPTNO),
        );

        match fields {
            (Some(empno), Some(empname), Some(job), Some(deptno)) => Ok(Self {
                empno,
                empname,
                job,
                deptno,
            }),
            _ => Err(reader.into_errors()),
        }
    }
}

impl Record for Employee {
    type Key = EmpNo;

    const KIND: &'static str = "employee";

    fn key(&self) -> EmpNo {
        self.empno
    }

    /// Re-checks invariants on an already-typed record.
    ///
    /// Stores call this before writes and after reads, since the fields are
    /// public and can be set without going through `from_raw`.
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        check_positive(&mut errors, EMPNO, self.empno);
        check_non_empty(&mut errors, EMPNAME, &self.empname);
        check_non_empty(&mut errors, JOB, &self.job);
        check_positive(&mut errors, DEPTNO, self.deptno);
        into_result(errors)
    }
}
