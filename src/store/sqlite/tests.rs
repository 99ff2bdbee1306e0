use super::*;
use crate::domain::{ContentKind, ID_TRASH_FOLDER, Value, Values, columns};
use crate::store::{Filter, Operation, Order, Query, RecordStore, StoreError, Table};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn values(pairs: &[(&str, Value)]) -> Values {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn insert_note(store: &SqliteStore, parent: i64) -> i64 {
    store
        .insert(
            Table::Note,
            &values(&[(columns::note::PARENT_ID, Value::from(parent))]),
        )
        .unwrap()
}

// ===========================================
// Connection
// ===========================================

#[test]
fn open_in_memory_succeeds() {
    assert!(SqliteStore::open_in_memory().is_ok());
}

#[test]
fn open_in_memory_enables_foreign_keys() {
    let store = SqliteStore::open_in_memory().unwrap();
    let fk: i32 = store.with_connection(|c| c.query_row("PRAGMA foreign_keys", [], |r| r.get(0)).unwrap());
    assert_eq!(fk, 1, "foreign keys should be enabled");
}

#[test]
fn open_creates_parent_directory() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("nested").join("notes.db");

    let _store = SqliteStore::open(&db_path).unwrap();

    assert!(db_path.exists(), "database file should be created");
}

#[test]
fn open_existing_preserves_data() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("notes.db");

    let id = {
        let store = SqliteStore::open(&db_path).unwrap();
        insert_note(&store, 0)
    };

    let store = SqliteStore::open(&db_path).unwrap();
    let row = store
        .query_one(Table::Note, &Query::all().filter(Filter::by_id(id)))
        .unwrap();
    assert!(row.is_some(), "data should survive reopen");
}

// ===========================================
// Single-Row Operations
// ===========================================

#[test]
fn insert_returns_increasing_positive_ids() {
    let store = SqliteStore::open_in_memory().unwrap();
    let first = insert_note(&store, 0);
    let second = insert_note(&store, 0);
    assert!(first > 0);
    assert!(second > first);
}

#[test]
fn update_reports_rows_affected() {
    let store = SqliteStore::open_in_memory().unwrap();
    let id = insert_note(&store, 0);

    let change = values(&[(columns::note::BG_COLOR_ID, Value::from(3i64))]);
    assert_eq!(store.update(Table::Note, id, &change).unwrap(), 1);
    assert_eq!(store.update(Table::Note, 9999, &change).unwrap(), 0);
}

#[test]
fn update_without_values_is_rejected() {
    let store = SqliteStore::open_in_memory().unwrap();
    let id = insert_note(&store, 0);
    let err = store.update(Table::Note, id, &Values::new()).unwrap_err();
    assert!(matches!(err, StoreError::InvalidQuery(_)));
}

#[test]
fn delete_reports_rows_affected() {
    let store = SqliteStore::open_in_memory().unwrap();
    let id = insert_note(&store, 0);
    assert_eq!(store.delete(Table::Note, id).unwrap(), 1);
    assert_eq!(store.delete(Table::Note, id).unwrap(), 0);
}

#[test]
fn unsafe_column_name_is_rejected() {
    let store = SqliteStore::open_in_memory().unwrap();
    let bad = values(&[("parent_id; DROP TABLE note", Value::from(1i64))]);
    let err = store.insert(Table::Note, &bad).unwrap_err();
    assert!(matches!(err, StoreError::InvalidQuery(_)));
}

// ===========================================
// Queries
// ===========================================

#[test]
fn query_filters_with_eq_and_ne() {
    let store = SqliteStore::open_in_memory().unwrap();
    let kept = insert_note(&store, 0);
    insert_note(&store, ID_TRASH_FOLDER);

    let rows = store
        .query(
            Table::Note,
            &Query::select(&["id"]).filter(
                Filter::new()
                    .eq(columns::note::TYPE, 0i64)
                    .ne(columns::note::PARENT_ID, ID_TRASH_FOLDER),
            ),
        )
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_i64("id"), Some(kept));
    assert_eq!(rows[0].len(), 1, "projection should limit columns");
}

#[test]
fn query_orders_rows() {
    let store = SqliteStore::open_in_memory().unwrap();
    for modified in [20i64, 10, 30] {
        store
            .insert(
                Table::Note,
                &values(&[(columns::note::MODIFIED_DATE, Value::from(modified))]),
            )
            .unwrap();
    }

    let rows = store
        .query(
            Table::Note,
            &Query::select(&[columns::note::MODIFIED_DATE])
                .filter(Filter::new().eq(columns::note::TYPE, 0i64))
                .order_by(columns::note::MODIFIED_DATE, Order::Desc),
        )
        .unwrap();
    let dates: Vec<i64> = rows
        .iter()
        .filter_map(|r| r.get_i64(columns::note::MODIFIED_DATE))
        .collect();
    assert_eq!(dates, vec![30, 20, 10]);
}

#[test]
fn query_phone_eq_ignores_formatting() {
    let store = SqliteStore::open_in_memory().unwrap();
    let note = insert_note(&store, 0);
    store
        .insert(
            Table::Data,
            &values(&[
                (columns::data::MIME_TYPE, Value::from(ContentKind::Call.mime_type())),
                (columns::data::NOTE_ID, Value::from(note)),
                (columns::call::PHONE_NUMBER, Value::from("+1 (555) 123-4567")),
            ]),
        )
        .unwrap();

    let rows = store
        .query(
            Table::Data,
            &Query::select(&[columns::data::NOTE_ID])
                .filter(Filter::new().phone_eq(columns::call::PHONE_NUMBER, "5551234567")),
        )
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn count_matches_query_length() {
    let store = SqliteStore::open_in_memory().unwrap();
    insert_note(&store, 0);
    insert_note(&store, 0);
    let filter = Filter::new().eq(columns::note::TYPE, 0i64);
    assert_eq!(store.count(Table::Note, &filter).unwrap(), 2);
}

// ===========================================
// Batches
// ===========================================

#[test]
fn apply_batch_returns_one_result_per_operation() {
    let store = SqliteStore::open_in_memory().unwrap();
    let a = insert_note(&store, 0);
    let b = insert_note(&store, 0);

    let ops = vec![
        Operation::update(
            Table::Note,
            a,
            values(&[(columns::note::PARENT_ID, Value::from(5i64))]),
        ),
        Operation::delete(Table::Note, b),
        Operation::insert(Table::Note, Values::new()),
    ];
    let results = store.apply_batch(&ops).unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].rows_affected, 1);
    assert_eq!(results[1].rows_affected, 1);
    assert!(results[2].id.is_some());
}

#[test]
fn apply_batch_is_all_or_nothing() {
    let store = SqliteStore::open_in_memory().unwrap();
    let a = insert_note(&store, 0);

    let ops = vec![
        Operation::update(
            Table::Note,
            a,
            values(&[(columns::note::PARENT_ID, Value::from(7i64))]),
        ),
        // violates the data.note_id foreign key
        Operation::insert(
            Table::Data,
            values(&[
                (columns::data::MIME_TYPE, Value::from(ContentKind::Text.mime_type())),
                (columns::data::NOTE_ID, Value::from(4242i64)),
            ]),
        ),
    ];
    assert!(store.apply_batch(&ops).is_err());

    let row = store
        .query_one(Table::Note, &Query::all().filter(Filter::by_id(a)))
        .unwrap()
        .unwrap();
    assert_eq!(row.get_i64(columns::note::PARENT_ID), Some(0), "update should roll back");
}

#[test]
fn uncommitted_transaction_rolls_back_on_drop() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.with_connection(|conn| {
        let tx = Transaction::begin(conn).unwrap();
        tx.conn()
            .execute("INSERT INTO note (parent_id) VALUES (?1)", [0i64])
            .unwrap();
    });
    let count = store
        .count(Table::Note, &Filter::new().eq(columns::note::TYPE, 0i64))
        .unwrap();
    assert_eq!(count, 0);
}
