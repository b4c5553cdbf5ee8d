//! In-memory table backend for the session store variant.
//!
//! # Invariants
//! - Rows keep insertion order; `update` and `upsert` replace every row
//!   sharing the key, in place.
//! - `insert` never checks key uniqueness. Uniqueness of employee keys is
//!   the upsert engine's job in this variant.

use crate::model::Record;
use crate::repo::table::{RepoError, RepoResult, TableStore, UpsertOutcome};

/// Vector-backed table owned by one session.
#[derive(Debug, Clone)]
pub struct MemoryTable<R: Record> {
    rows: Vec<R>,
}

impl<R: Record> Default for MemoryTable<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<R: Record> MemoryTable<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R: Record> TableStore<R> for MemoryTable<R> {
    fn lookup(&self, key: R::Key) -> RepoResult<Option<R>> {
        Ok(self.rows.iter().find(|row| row.key() == key).cloned())
    }

    fn insert(&mut self, row: &R) -> RepoResult<()> {
        row.validate()?;
        self.rows.push(row.clone());
        Ok(())
    }

    fn update(&mut self, key: R::Key, row: &R) -> RepoResult<()> {
        row.validate()?;
        if row.key() != key {
            return Err(RepoError::key_mismatch::<R>(key, row.key()));
        }

        let mut changed = 0usize;
        for slot in self.rows.iter_mut().filter(|slot| slot.key() == key) {
            *slot = row.clone();
            changed += 1;
        }

        if changed == 0 {
            return Err(RepoError::not_found::<R>(key));
        }
        Ok(())
    }

    fn upsert(&mut self, row: &R) -> RepoResult<UpsertOutcome> {
        row.validate()?;
        let key = row.key();
        let mut changed = 0usize;
        for slot in self.rows.iter_mut().filter(|slot| slot.key() == key) {
            *slot = row.clone();
            changed += 1;
        }

        if changed > 0 {
            return Ok(UpsertOutcome::Updated);
        }
        self.rows.push(row.clone());
        Ok(UpsertOutcome::Inserted)
    }

    fn scan(&self) -> RepoResult<Vec<R>> {
        Ok(self.rows.clone())
    }

    fn count(&self) -> RepoResult<usize> {
        Ok(self.rows.len())
    }
}
