//! Record store abstraction and its SQLite implementation

mod repository;
pub mod sqlite;

#[cfg(test)]
pub(crate) mod testing;

pub use repository::{
    Condition, Filter, Operation, OperationResult, Order, Query, RecordStore, StoreError,
    StoreResult, Table,
};
pub use sqlite::{SqliteStore, create_schema, get_schema_version};
