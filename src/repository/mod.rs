/// Typed collection access over the key/value store
///
/// Every operation loads the full collection document for a key, applies the
/// change in memory and writes the full collection back. A missing key reads
/// as an empty collection.
///
/// Storage failures never propagate out of this layer. They are logged and
/// recorded in a failure journal that the caller drains with
/// [`Repository::take_failures`]. A failed read looks like an empty
/// collection to queries; a mutation whose read failed skips its write so an
/// unreadable document is never overwritten.

pub mod records;

pub use records::Record;

use std::cell::RefCell;
use std::convert::Infallible;
use std::fmt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::storage::{CollectionKey, KeyValueStore, StorageError};

/// Which store call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Read,
    Write,
    Remove,
}

/// A storage failure absorbed at the repository boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceFailure {
    pub key: CollectionKey,
    pub operation: StoreOperation,
    pub message: String,
}

impl fmt::Display for PersistenceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} of '{}' failed: {}", self.operation, self.key, self.message)
    }
}

/// The in-memory result of an operation plus any persistence failures
///
/// A value is returned even when it could not be written; check
/// [`Saved::is_durable`] before assuming it was persisted.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct Saved<T> {
    pub value: T,
    pub failures: Vec<PersistenceFailure>,
}

impl<T> Saved<T> {
    pub fn new(value: T, failures: Vec<PersistenceFailure>) -> Self {
        Self { value, failures }
    }

    /// True when every store call made by the operation succeeded
    pub fn is_durable(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Saved<U> {
        Saved {
            value: f(self.value),
            failures: self.failures,
        }
    }
}

/// Owner of the store and of every persisted entity
pub struct Repository<S: KeyValueStore> {
    store: S,
    failures: RefCell<Vec<PersistenceFailure>>,
}

impl<S: KeyValueStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            failures: RefCell::new(Vec::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Drain the failures recorded since the last call
    pub fn take_failures(&self) -> Vec<PersistenceFailure> {
        self.failures.take()
    }

    /// Whether a document exists under `key`; None if the store can't tell
    pub fn has_document(&self, key: CollectionKey) -> Option<bool> {
        match self.store.get(key.as_str()) {
            Ok(value) => Some(value.is_some()),
            Err(e) => {
                self.record_failure(key, StoreOperation::Read, &e);
                None
            }
        }
    }

    /// All records of a collection (empty if missing or unreadable)
    pub fn load<T: Record>(&self) -> Vec<T> {
        self.load_checked().unwrap_or_default()
    }

    /// Records matching `predicate`, in stored order
    pub fn list<T: Record>(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.load::<T>().into_iter().filter(|record| predicate(record)).collect()
    }

    /// First record matching `predicate`
    pub fn find_one<T: Record>(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.load::<T>().into_iter().find(|record| predicate(record))
    }

    /// Append a record to its collection
    pub fn append<T: Record>(&mut self, record: T) -> T {
        if let Some(mut records) = self.load_checked::<T>() {
            records.push(record.clone());
            self.persist(&records);
        }
        record
    }

    /// Replace the record with the same id, or append it
    pub fn upsert<T: Record>(&mut self, record: T) -> T {
        if let Some(mut records) = self.load_checked::<T>() {
            match records.iter_mut().find(|r| r.record_id() == record.record_id()) {
                Some(existing) => *existing = record.clone(),
                None => records.push(record.clone()),
            }
            self.persist(&records);
        }
        record
    }

    /// Modify the first record matching `predicate` and write the collection
    ///
    /// Returns the modified record, or None if nothing matched.
    pub fn update_where<T: Record>(
        &mut self,
        predicate: impl Fn(&T) -> bool,
        update: impl FnOnce(&mut T),
    ) -> Option<T> {
        let result: Result<Option<T>, Infallible> = self.try_update_where(predicate, |record| {
            update(record);
            Ok(())
        });
        match result {
            Ok(updated) => updated,
            Err(never) => match never {},
        }
    }

    /// Like [`Repository::update_where`], but the update may refuse
    ///
    /// Nothing is written when the update returns an error.
    pub fn try_update_where<T: Record, E>(
        &mut self,
        predicate: impl Fn(&T) -> bool,
        update: impl FnOnce(&mut T) -> Result<(), E>,
    ) -> Result<Option<T>, E> {
        let mut records = match self.load_checked::<T>() {
            Some(records) => records,
            None => return Ok(None),
        };

        let Some(index) = records.iter().position(|record| predicate(record)) else {
            return Ok(None);
        };

        update(&mut records[index])?;
        let updated = records[index].clone();
        self.persist(&records);

        Ok(Some(updated))
    }

    /// Overwrite a whole collection
    pub fn replace_all<T: Record>(&mut self, records: &[T]) -> bool {
        self.persist(records)
    }

    /// Read a single-object document such as `current_user`
    pub fn load_document<T: DeserializeOwned>(&self, key: CollectionKey) -> Option<T> {
        match self.read(key) {
            Ok(value) => value,
            Err(e) => {
                self.record_failure(key, StoreOperation::Read, &e);
                None
            }
        }
    }

    /// Write a single-object document
    pub fn save_document<T: Serialize>(&mut self, key: CollectionKey, value: &T) -> bool {
        let result = serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set(key.as_str(), &json));

        match result {
            Ok(()) => {
                debug!("Saved document '{}'", key);
                true
            }
            Err(e) => {
                self.record_failure(key, StoreOperation::Write, &e);
                false
            }
        }
    }

    /// Delete a document
    pub fn remove_document(&mut self, key: CollectionKey) -> bool {
        match self.store.remove(key.as_str()) {
            Ok(()) => true,
            Err(e) => {
                self.record_failure(key, StoreOperation::Remove, &e);
                false
            }
        }
    }

    fn read<T: DeserializeOwned>(&self, key: CollectionKey) -> Result<Option<T>, StorageError> {
        match self.store.get(key.as_str())? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Load for a mutation: None means the document exists but can't be used
    fn load_checked<T: Record>(&self) -> Option<Vec<T>> {
        match self.read::<Vec<T>>(T::KEY) {
            Ok(records) => Some(records.unwrap_or_default()),
            Err(e) => {
                self.record_failure(T::KEY, StoreOperation::Read, &e);
                None
            }
        }
    }

    fn persist<T: Record>(&mut self, records: &[T]) -> bool {
        let result = serde_json::to_string(records)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set(T::KEY.as_str(), &json));

        match result {
            Ok(()) => {
                debug!("Wrote {} records to '{}'", records.len(), T::KEY);
                true
            }
            Err(e) => {
                self.record_failure(T::KEY, StoreOperation::Write, &e);
                false
            }
        }
    }

    fn record_failure(&self, key: CollectionKey, operation: StoreOperation, error: &StorageError) {
        warn!("{:?} of '{}' failed: {}", operation, key, error);
        self.failures.borrow_mut().push(PersistenceFailure {
            key,
            operation,
            message: error.to_string(),
        });
    }
}
