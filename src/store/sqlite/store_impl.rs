//! RecordStore trait implementation for SqliteStore.

use super::SqliteStore;
use super::transaction::Transaction;
use crate::domain::{Row, Value, Values};
use crate::store::{
    Condition, Filter, Operation, OperationResult, Order, Query, RecordStore, StoreError,
    StoreResult, Table,
};
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{Connection, ToSql, params_from_iter};

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Value::Integer(n) => ToSqlOutput::from(*n),
            Value::Text(s) => ToSqlOutput::from(s.as_str()),
        })
    }
}

fn value_from_ref(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(n) => Value::Integer(n),
        ValueRef::Real(f) => Value::Integer(f as i64),
        ValueRef::Text(t) | ValueRef::Blob(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
    }
}

// ===========================================
// SQL Building
// ===========================================

/// Rejects anything that is not a plain lowercase identifier.
///
/// Column names are spliced into SQL text, so they must never carry
/// user input; values always go through bound parameters.
fn checked_column(name: &str) -> StoreResult<&str> {
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
    if valid {
        Ok(name)
    } else {
        Err(StoreError::InvalidQuery(format!(
            "invalid column name '{name}'"
        )))
    }
}

/// Renders a filter as a WHERE clause plus its parameters.
fn where_clause(filter: &Filter) -> StoreResult<(String, Vec<Value>)> {
    if filter.is_empty() {
        return Ok((String::new(), Vec::new()));
    }

    let mut parts = Vec::with_capacity(filter.conditions().len());
    let mut params = Vec::new();
    for condition in filter.conditions() {
        let column = checked_column(condition.column())?;
        match condition {
            Condition::Eq(_, Value::Null) => parts.push(format!("{column} IS NULL")),
            Condition::Eq(_, value) => {
                params.push(value.clone());
                parts.push(format!("{column} = ?{}", params.len()));
            }
            Condition::Ne(_, Value::Null) => parts.push(format!("{column} IS NOT NULL")),
            Condition::Ne(_, value) => {
                params.push(value.clone());
                parts.push(format!("{column} <> ?{}", params.len()));
            }
            Condition::PhoneEq(_, number) => {
                params.push(Value::Text(number.clone()));
                parts.push(format!("phone_numbers_equal({column}, ?{})", params.len()));
            }
        }
    }
    Ok((format!(" WHERE {}", parts.join(" AND ")), params))
}

fn insert_row(conn: &Connection, table: Table, values: &Values) -> StoreResult<i64> {
    if values.is_empty() {
        conn.execute(&format!("INSERT INTO {table} DEFAULT VALUES"), [])?;
        return Ok(conn.last_insert_rowid());
    }

    let columns = values
        .keys()
        .map(|c| checked_column(c))
        .collect::<StoreResult<Vec<_>>>()?;
    let placeholders = (1..=columns.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT INTO {table} ({}) VALUES ({placeholders})",
        columns.join(", ")
    );
    conn.execute(&sql, params_from_iter(values.values()))?;
    Ok(conn.last_insert_rowid())
}

fn update_row(conn: &Connection, table: Table, id: i64, values: &Values) -> StoreResult<usize> {
    if values.is_empty() {
        return Err(StoreError::InvalidQuery(format!(
            "update of {table}#{id} has no values"
        )));
    }

    let assignments = values
        .keys()
        .enumerate()
        .map(|(i, c)| checked_column(c).map(|c| format!("{c} = ?{}", i + 1)))
        .collect::<StoreResult<Vec<_>>>()?;
    let sql = format!(
        "UPDATE {table} SET {} WHERE id = ?{}",
        assignments.join(", "),
        values.len() + 1
    );
    let id_value = Value::Integer(id);
    let params = values.values().chain(std::iter::once(&id_value));
    Ok(conn.execute(&sql, params_from_iter(params))?)
}

fn delete_row(conn: &Connection, table: Table, id: i64) -> StoreResult<usize> {
    Ok(conn.execute(&format!("DELETE FROM {table} WHERE id = ?1"), [id])?)
}

fn apply_operation(conn: &Connection, op: &Operation) -> StoreResult<OperationResult> {
    Ok(match op {
        Operation::Insert { table, values } => OperationResult {
            id: Some(insert_row(conn, *table, values)?),
            rows_affected: 1,
        },
        Operation::Update { table, id, values } => OperationResult {
            id: None,
            rows_affected: update_row(conn, *table, *id, values)?,
        },
        Operation::Delete { table, id } => OperationResult {
            id: None,
            rows_affected: delete_row(conn, *table, *id)?,
        },
    })
}

impl RecordStore for SqliteStore {
    fn insert(&self, table: Table, values: &Values) -> StoreResult<i64> {
        let conn = self.lock();
        insert_row(&conn, table, values)
    }

    fn update(&self, table: Table, id: i64, values: &Values) -> StoreResult<usize> {
        let conn = self.lock();
        update_row(&conn, table, id, values)
    }

    fn delete(&self, table: Table, id: i64) -> StoreResult<usize> {
        let conn = self.lock();
        delete_row(&conn, table, id)
    }

    fn query(&self, table: Table, query: &Query) -> StoreResult<Vec<Row>> {
        let projection = if query.columns().is_empty() {
            "*".to_string()
        } else {
            query
                .columns()
                .iter()
                .map(|c| checked_column(c))
                .collect::<StoreResult<Vec<_>>>()?
                .join(", ")
        };
        let (where_sql, params) = where_clause(query.get_filter())?;
        let order_sql = match query.get_order() {
            Some((column, order)) => {
                let dir = match order {
                    Order::Asc => "ASC",
                    Order::Desc => "DESC",
                };
                format!(" ORDER BY {} {dir}", checked_column(column)?)
            }
            None => String::new(),
        };
        let sql = format!("SELECT {projection} FROM {table}{where_sql}{order_sql}");

        let conn = self.lock();
        let mut stmt = conn.prepare(&sql)?;
        let names: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                let mut out = Row::new();
                for (i, name) in names.iter().enumerate() {
                    out.insert(name.clone(), value_from_ref(row.get_ref(i)?));
                }
                Ok(out)
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn apply_batch(&self, operations: &[Operation]) -> StoreResult<Vec<OperationResult>> {
        let conn = self.lock();
        let tx = Transaction::begin(&conn)?;

        let mut results = Vec::with_capacity(operations.len());
        for (index, op) in operations.iter().enumerate() {
            let result = apply_operation(tx.conn(), op).inspect_err(|e| {
                tracing::debug!(
                    index,
                    table = %op.table(),
                    id = ?op.target_id(),
                    error = %e,
                    "batch operation failed, rolling back"
                );
            })?;
            results.push(result);
        }

        tx.commit()?;
        Ok(results)
    }

    fn count(&self, table: Table, filter: &Filter) -> StoreResult<usize> {
        let (where_sql, params) = where_clause(filter)?;
        let sql = format!("SELECT COUNT(*) FROM {table}{where_sql}");
        let conn = self.lock();
        let count: i64 = conn.query_row(&sql, params_from_iter(params.iter()), |r| r.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}
