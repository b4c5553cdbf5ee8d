//! Keyed table contract and repository errors.

use crate::db::DbError;
use crate::model::validation::ValidationErrors;
use crate::model::Record;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by all table backends.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationErrors),
    Db(DbError),
    NotFound {
        kind: &'static str,
        key: String,
    },
    DuplicateKey {
        kind: &'static str,
        key: String,
    },
    /// `update` was handed a row whose own key differs from the target key.
    KeyMismatch {
        kind: &'static str,
        expected: String,
        actual: String,
    },
    InvalidData(String),
}

impl RepoError {
    pub(crate) fn not_found<R: Record>(key: R::Key) -> Self {
        Self::NotFound {
            kind: R::KIND,
            key: key.to_string(),
        }
    }

    pub(crate) fn duplicate_key<R: Record>(key: R::Key) -> Self {
        Self::DuplicateKey {
            kind: R::KIND,
            key: key.to_string(),
        }
    }

    pub(crate) fn key_mismatch<R: Record>(expected: R::Key, actual: R::Key) -> Self {
        Self::KeyMismatch {
            kind: R::KIND,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, key } => write!(f, "{kind} not found: {key}"),
            Self::DuplicateKey { kind, key } => write!(f, "duplicate {kind} key: {key}"),
            Self::KeyMismatch {
                kind,
                expected,
                actual,
            } => write!(
                f,
                "{kind} row key {actual} does not match update target {expected}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. }
            | Self::DuplicateKey { .. }
            | Self::KeyMismatch { .. }
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationErrors> for RepoError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Which branch a keyed upsert took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Keyed table operations consumed by the upsert engine and join viewer.
pub trait TableStore<R: Record> {
    /// Returns the first row stored under `key`.
    fn lookup(&self, key: R::Key) -> RepoResult<Option<R>>;

    /// Appends one row. Backends with a unique key report `DuplicateKey`.
    fn insert(&mut self, row: &R) -> RepoResult<()>;

    /// Replaces every row stored under `key`. Fails with `NotFound` when
    /// no row matches.
    fn update(&mut self, key: R::Key, row: &R) -> RepoResult<()>;

    /// Inserts or replaces by key as one indivisible operation.
    fn upsert(&mut self, row: &R) -> RepoResult<UpsertOutcome>;

    /// Returns all rows in insertion order.
    fn scan(&self) -> RepoResult<Vec<R>>;

    fn count(&self) -> RepoResult<usize> {
        Ok(self.scan()?.len())
    }
}
