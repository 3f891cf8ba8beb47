use std::time::{Duration, Instant};

use duckdb::types::ValueRef;
use duckdb::{Appender, Connection};
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use crate::engine::ConnectTarget;
use crate::errors::{config, Result};
use crate::loader::quote_ident;

/// An open engine session.
///
/// Wraps a single connection handle; the connect target is immutable for
/// the session's lifetime. Dropping the session closes the connection.
/// One session, one caller: concurrent use of a handle is unsupported.
pub struct Session {
    conn: Connection,
    target: ConnectTarget,
}

/// A fully materialized query result.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutput {
    /// Column names in result order.
    pub columns: Vec<String>,
    /// Row values encoded as JSON.
    pub rows: Vec<Vec<JsonValue>>,
    /// Wall-clock time spent in the engine.
    pub elapsed: Duration,
}

impl QueryOutput {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The single value of a one-row, one-column result.
    pub fn scalar(&self) -> Option<&JsonValue> {
        match self.rows.as_slice() {
            [row] => match row.as_slice() {
                [value] => Some(value),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Session {
    pub(crate) fn new(conn: Connection, target: ConnectTarget) -> Session {
        Session { conn, target }
    }

    /// The target this session was opened against.
    pub fn target(&self) -> &ConnectTarget {
        &self.target
    }

    pub fn is_cloud(&self) -> bool {
        matches!(self.target, ConnectTarget::Cloud { .. })
    }

    /// Execute a single statement, returning the number of affected rows.
    ///
    /// Engine errors are propagated unchanged.
    pub fn execute(&self, sql: &str) -> Result<usize> {
        debug!(sql, "execute");
        Ok(self.conn.execute(sql, [])?)
    }

    /// Execute one or more statements, discarding any results.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        debug!(sql, "execute batch");
        Ok(self.conn.execute_batch(sql)?)
    }

    /// Run a query and materialize the full result set.
    ///
    /// Blocks until the engine returns. No streaming, no pagination, no
    /// cancellation.
    pub fn query(&self, sql: &str) -> Result<QueryOutput> {
        debug!(sql, "query");
        let start = Instant::now();

        let mut stmt = self.conn.prepare(sql)?;
        let mut raw = stmt.query([])?;

        let mut rows = Vec::new();
        while let Some(row) = raw.next()? {
            let mut values = Vec::new();
            for idx in 0.. {
                match row.get_ref(idx) {
                    Ok(value) => values.push(value_to_json(value)),
                    Err(_) => break,
                }
            }
            rows.push(values);
        }

        // `raw` borrows the statement; column names are read once it is
        // dropped.
        drop(raw);
        let columns = stmt.column_names().iter().map(|c| c.to_string()).collect();

        Ok(QueryOutput {
            columns,
            rows,
            elapsed: start.elapsed(),
        })
    }

    /// Copy a local relation into the attached cloud database.
    ///
    /// Cloud-mode sessions only; everything else is a configuration error
    /// raised before the engine is touched.
    pub fn upload_table(&self, local: &str, remote: &str) -> Result<()> {
        if !self.is_cloud() {
            return Err(config!("table upload requires a cloud connection"));
        }
        self.execute_batch(&format!(
            "CREATE OR REPLACE TABLE {} AS SELECT * FROM {}",
            quote_ident(remote),
            quote_ident(local),
        ))?;
        info!(local, remote, "uploaded table");
        Ok(())
    }

    pub(crate) fn appender(&self, table: &str) -> Result<Appender<'_>> {
        Ok(self.conn.appender(table)?)
    }
}

fn value_to_json(value: ValueRef<'_>) -> JsonValue {
    match value {
        ValueRef::Null => JsonValue::Null,
        ValueRef::Boolean(v) => JsonValue::Bool(v),
        ValueRef::TinyInt(v) => JsonValue::Number(v.into()),
        ValueRef::SmallInt(v) => JsonValue::Number(v.into()),
        ValueRef::Int(v) => JsonValue::Number(v.into()),
        ValueRef::BigInt(v) => JsonValue::Number(v.into()),
        ValueRef::UTinyInt(v) => JsonValue::Number(v.into()),
        ValueRef::USmallInt(v) => JsonValue::Number(v.into()),
        ValueRef::UInt(v) => JsonValue::Number(v.into()),
        ValueRef::UBigInt(v) => JsonValue::Number(v.into()),
        ValueRef::HugeInt(v) => match i64::try_from(v) {
            Ok(v) => JsonValue::Number(v.into()),
            Err(_) => JsonValue::String(v.to_string()),
        },
        ValueRef::Float(v) => float_to_json(f64::from(v)),
        ValueRef::Double(v) => float_to_json(v),
        ValueRef::Text(v) => JsonValue::String(String::from_utf8_lossy(v).into_owned()),
        other => JsonValue::String(format!("{other:?}")),
    }
}

fn float_to_json(v: f64) -> JsonValue {
    serde_json::Number::from_f64(v)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}
