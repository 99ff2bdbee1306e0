//! Call-counting, fault-injecting store wrapper for unit tests.

use crate::domain::{Row, Values};
use crate::store::{
    Filter, Operation, OperationResult, Query, RecordStore, SqliteStore, StoreError, StoreResult,
    Table,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// How the next batch should misbehave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BatchFault {
    None,
    /// Return an error without touching the database.
    Fail,
    /// Report success with an empty result list, without touching the database.
    Empty,
}

/// How inserts should misbehave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InsertFault {
    None,
    /// Return an error without touching the database.
    Fail,
    /// Report success with this id, without touching the database.
    BadId(i64),
}

/// Wraps an in-memory [`SqliteStore`] and records every write.
pub(crate) struct RecordingStore {
    inner: SqliteStore,
    writes: AtomicUsize,
    reads: AtomicUsize,
    batches: Mutex<Vec<Vec<Operation>>>,
    fault: Mutex<BatchFault>,
    insert_fault: Mutex<InsertFault>,
    unreadable: Mutex<Option<Table>>,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            inner: SqliteStore::open_in_memory().expect("in-memory store"),
            writes: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
            batches: Mutex::new(Vec::new()),
            fault: Mutex::new(BatchFault::None),
            insert_fault: Mutex::new(InsertFault::None),
            unreadable: Mutex::new(None),
        }
    }

    pub(crate) fn inner(&self) -> &SqliteStore {
        &self.inner
    }

    /// Number of insert/update/delete/batch calls seen so far.
    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Total calls of any kind seen so far.
    pub(crate) fn calls(&self) -> usize {
        self.writes() + self.reads.load(Ordering::SeqCst)
    }

    pub(crate) fn batches(&self) -> Vec<Vec<Operation>> {
        self.batches.lock().unwrap().clone()
    }

    pub(crate) fn set_batch_fault(&self, fault: BatchFault) {
        *self.fault.lock().unwrap() = fault;
    }

    pub(crate) fn set_insert_fault(&self, fault: InsertFault) {
        *self.insert_fault.lock().unwrap() = fault;
    }

    /// Makes every query against `table` fail.
    pub(crate) fn set_unreadable(&self, table: Option<Table>) {
        *self.unreadable.lock().unwrap() = table;
    }

    pub(crate) fn reset_counts(&self) {
        self.writes.store(0, Ordering::SeqCst);
        self.reads.store(0, Ordering::SeqCst);
        self.batches.lock().unwrap().clear();
    }
}

impl RecordStore for RecordingStore {
    fn insert(&self, table: Table, values: &Values) -> StoreResult<i64> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        match *self.insert_fault.lock().unwrap() {
            InsertFault::None => self.inner.insert(table, values),
            InsertFault::Fail => Err(StoreError::InvalidQuery("injected insert failure".into())),
            InsertFault::BadId(id) => Ok(id),
        }
    }

    fn update(&self, table: Table, id: i64, values: &Values) -> StoreResult<usize> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.update(table, id, values)
    }

    fn delete(&self, table: Table, id: i64) -> StoreResult<usize> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(table, id)
    }

    fn query(&self, table: Table, query: &Query) -> StoreResult<Vec<Row>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if *self.unreadable.lock().unwrap() == Some(table) {
            return Err(StoreError::InvalidQuery(format!("{table} unreadable")));
        }
        self.inner.query(table, query)
    }

    fn apply_batch(&self, operations: &[Operation]) -> StoreResult<Vec<OperationResult>> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.batches.lock().unwrap().push(operations.to_vec());
        match *self.fault.lock().unwrap() {
            BatchFault::None => self.inner.apply_batch(operations),
            BatchFault::Fail => Err(StoreError::InvalidQuery("injected batch failure".into())),
            BatchFault::Empty => Ok(Vec::new()),
        }
    }

    fn count(&self, table: Table, filter: &Filter) -> StoreResult<usize> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.count(table, filter)
    }
}
