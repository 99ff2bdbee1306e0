//! RecordStore trait, query and batch types, and store errors.

use crate::domain::{Row, Value, Values};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ===========================================
// StoreError Type
// ===========================================

/// Errors that can occur while talking to the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The query or operation is malformed.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A batch ran but produced no results.
    #[error("batch returned no results")]
    EmptyBatchResult,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ===========================================
// Tables
// ===========================================

/// The two tables the note model is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// Notes and folders.
    Note,
    /// Content records (text bodies, call metadata).
    Data,
}

impl Table {
    /// Returns the SQL table name.
    pub fn name(self) -> &'static str {
        match self {
            Table::Note => "note",
            Table::Data => "data",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ===========================================
// Filters and Queries
// ===========================================

/// A single predicate on one column.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `column = value` (`IS NULL` for a null value).
    Eq(String, Value),
    /// `column <> value`.
    Ne(String, Value),
    /// Phone-number equality that ignores formatting and trunk prefixes.
    PhoneEq(String, String),
}

impl Condition {
    pub fn column(&self) -> &str {
        match self {
            Condition::Eq(c, _) | Condition::Ne(c, _) | Condition::PhoneEq(c, _) => c,
        }
    }
}

/// A conjunction of conditions. An empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter matching the row with the given primary key.
    pub fn by_id(id: i64) -> Self {
        Self::new().eq("id", id)
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.conditions
            .push(Condition::Eq(column.to_string(), value.into()));
        self
    }

    pub fn ne(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.conditions
            .push(Condition::Ne(column.to_string(), value.into()));
        self
    }

    pub fn phone_eq(mut self, column: &str, number: impl Into<String>) -> Self {
        self.conditions
            .push(Condition::PhoneEq(column.to_string(), number.into()));
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

/// A read against one table: projection, filter, and optional ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    columns: Vec<String>,
    filter: Filter,
    order_by: Option<(String, Order)>,
}

impl Query {
    /// Selects every column.
    pub fn all() -> Self {
        Self::default()
    }

    /// Selects only the given columns.
    pub fn select(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn order_by(mut self, column: &str, order: Order) -> Self {
        self.order_by = Some((column.to_string(), order));
        self
    }

    /// Projected columns; empty means all columns.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn get_filter(&self) -> &Filter {
        &self.filter
    }

    pub fn get_order(&self) -> Option<(&str, Order)> {
        self.order_by.as_ref().map(|(c, o)| (c.as_str(), *o))
    }
}

// ===========================================
// Batch Operations
// ===========================================

/// One write inside an atomic batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Insert { table: Table, values: Values },
    Update { table: Table, id: i64, values: Values },
    Delete { table: Table, id: i64 },
}

impl Operation {
    pub fn insert(table: Table, values: Values) -> Self {
        Operation::Insert { table, values }
    }

    pub fn update(table: Table, id: i64, values: Values) -> Self {
        Operation::Update { table, id, values }
    }

    pub fn delete(table: Table, id: i64) -> Self {
        Operation::Delete { table, id }
    }

    pub fn table(&self) -> Table {
        match self {
            Operation::Insert { table, .. }
            | Operation::Update { table, .. }
            | Operation::Delete { table, .. } => *table,
        }
    }

    /// The id of the targeted row, if the operation addresses one.
    pub fn target_id(&self) -> Option<i64> {
        match self {
            Operation::Insert { .. } => None,
            Operation::Update { id, .. } | Operation::Delete { id, .. } => Some(*id),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Insert { table, .. } => write!(f, "insert into {table}"),
            Operation::Update { table, id, .. } => write!(f, "update {table}#{id}"),
            Operation::Delete { table, id } => write!(f, "delete {table}#{id}"),
        }
    }
}

/// Outcome of one operation in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationResult {
    /// Row id produced by an insert.
    pub id: Option<i64>,
    /// Rows touched by an update or delete.
    pub rows_affected: usize,
}

// ===========================================
// RecordStore Trait
// ===========================================

/// Generic transactional row store the note model persists through.
///
/// Implementations own their concurrency and durability; every method is
/// synchronous and either completes or fails. `apply_batch` is all or
/// nothing: when it returns `Err`, no operation in the batch took effect.
pub trait RecordStore: Send + Sync {
    /// Inserts a row and returns its new id.
    fn insert(&self, table: Table, values: &Values) -> StoreResult<i64>;

    /// Updates the row with the given id, returning the rows affected.
    fn update(&self, table: Table, id: i64, values: &Values) -> StoreResult<usize>;

    /// Deletes the row with the given id, returning the rows affected.
    fn delete(&self, table: Table, id: i64) -> StoreResult<usize>;

    /// Reads rows matching the query.
    fn query(&self, table: Table, query: &Query) -> StoreResult<Vec<Row>>;

    /// Applies every operation atomically, returning one result per operation.
    fn apply_batch(&self, operations: &[Operation]) -> StoreResult<Vec<OperationResult>>;

    /// Counts rows matching the filter.
    fn count(&self, table: Table, filter: &Filter) -> StoreResult<usize> {
        let query = Query::select(&["id"]).filter(filter.clone());
        Ok(self.query(table, &query)?.len())
    }

    /// Reads the first row matching the query, if any.
    fn query_one(&self, table: Table, query: &Query) -> StoreResult<Option<Row>> {
        Ok(self.query(table, query)?.into_iter().next())
    }
}
