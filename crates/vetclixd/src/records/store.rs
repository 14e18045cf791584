//! Record storage.
//!
//! Records live in memory for the lifetime of the daemon. The dispatcher only
//! sees the [`RecordStore`] trait so tests can substitute failing stores.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use super::model::{Record, RecordKind};

/// Failures reported by a record store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store was used after [`RecordStore::close`].
    #[error("record store is closed")]
    Closed,
    /// A previous writer panicked while holding the store lock.
    #[error("record store lock is poisoned")]
    Poisoned,
    /// Backend-specific failure.
    #[error("record store failure: {message}")]
    Backend {
        /// Human-readable description.
        message: String,
    },
}

impl StoreError {
    /// Creates a backend failure.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Storage for client and patient records.
pub trait RecordStore: Send + Sync {
    /// Fetches a record by family and identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    fn get(&self, kind: RecordKind, id: &str) -> Result<Option<Record>, StoreError>;

    /// Inserts or replaces a record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be written.
    fn set(&self, record: Record) -> Result<(), StoreError>;

    /// Releases the store. Later calls fail with [`StoreError::Closed`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be released cleanly.
    fn close(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
struct StoreState {
    closed: bool,
    records: HashMap<(RecordKind, String), Record>,
}

/// Mutex-guarded in-memory store.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    state: Mutex<StoreState>,
}

impl InMemoryRecordStore {
    /// Creates an empty, open store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn open_state(&self) -> Result<MutexGuard<'_, StoreState>, StoreError> {
        let state = self.state.lock().map_err(|_| StoreError::Poisoned)?;
        if state.closed {
            return Err(StoreError::Closed);
        }
        Ok(state)
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get(&self, kind: RecordKind, id: &str) -> Result<Option<Record>, StoreError> {
        let state = self.open_state()?;
        Ok(state.records.get(&(kind, id.to_owned())).cloned())
    }

    fn set(&self, record: Record) -> Result<(), StoreError> {
        let mut state = self.open_state()?;
        state
            .records
            .insert((record.kind(), record.id().to_owned()), record);
        Ok(())
    }

    fn close(&self) -> Result<(), StoreError> {
        let mut state = self.open_state()?;
        state.closed = true;
        state.records.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::records::{ClientRecord, PatientRecord};

    #[fixture]
    fn store() -> InMemoryRecordStore {
        InMemoryRecordStore::new()
    }

    fn client(id: &str, name: &str) -> Record {
        Record::Client(ClientRecord {
            id: id.to_owned(),
            name: name.to_owned(),
            contact: vec![],
        })
    }

    #[rstest]
    fn get_misses_on_empty_store(store: InMemoryRecordStore) {
        assert_eq!(store.get(RecordKind::Client, "c-1"), Ok(None));
    }

    #[rstest]
    fn set_replaces_existing_records(store: InMemoryRecordStore) {
        store.set(client("c-1", "Bob")).expect("first set");
        store.set(client("c-1", "Robert")).expect("second set");

        assert_eq!(
            store.get(RecordKind::Client, "c-1"),
            Ok(Some(client("c-1", "Robert")))
        );
    }

    #[rstest]
    fn families_do_not_share_identifiers(store: InMemoryRecordStore) {
        store.set(client("x", "Bob")).expect("set client");
        let patient = Record::Patient(PatientRecord {
            id: "x".to_owned(),
            name: "Rex".to_owned(),
            species: "dog".to_owned(),
            owners: vec!["x".to_owned()],
        });
        store.set(patient.clone()).expect("set patient");

        assert_eq!(store.get(RecordKind::Patient, "x"), Ok(Some(patient)));
        assert_eq!(
            store.get(RecordKind::Client, "x"),
            Ok(Some(client("x", "Bob")))
        );
    }

    #[rstest]
    fn closed_store_rejects_access(store: InMemoryRecordStore) {
        store.set(client("c-1", "Bob")).expect("set");
        store.close().expect("close");

        assert_eq!(store.get(RecordKind::Client, "c-1"), Err(StoreError::Closed));
        assert_eq!(store.set(client("c-2", "Al")), Err(StoreError::Closed));
        assert_eq!(store.close(), Err(StoreError::Closed));
    }
}
