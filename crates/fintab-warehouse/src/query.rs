//! Read-only SQL over loaded relations.
//!
//! Queries pass `ReadOnlyStatement` classification first and then run inside a
//! transaction that is always rolled back, so nothing a query does can outlive it.

use std::time::{Duration, Instant};

use ::duckdb::types::{TimeUnit, Value as DuckValue};
use ::duckdb::{Connection, Row, Statement};
use fintab_core::UtcDateTime;
use serde::Serialize;
use serde_json::Value;
use time::{Date, OffsetDateTime};
use tracing::trace;

use crate::statement::ReadOnlyStatement;
use crate::WarehouseError;

/// Julian day number of 1970-01-01; `DuckDB` dates count days from there.
const UNIX_EPOCH_JULIAN_DAY: i32 = 2_440_588;

/// Limits applied to every query.
#[derive(Debug, Clone, Copy)]
pub struct QueryGuardrails {
    /// Rows returned before the result is marked truncated.
    pub max_rows: usize,
    /// Wall-clock budget, checked between fetched rows.
    pub query_timeout_ms: u64,
}

impl Default for QueryGuardrails {
    fn default() -> Self {
        Self {
            max_rows: 10_000,
            query_timeout_ms: 5_000,
        }
    }
}

impl QueryGuardrails {
    fn check(self) -> Result<Deadline, WarehouseError> {
        if self.max_rows == 0 {
            return Err(WarehouseError::QueryRejected(String::from(
                "--max-rows must be greater than zero",
            )));
        }
        if self.query_timeout_ms == 0 {
            return Err(WarehouseError::QueryRejected(String::from(
                "query timeout must be greater than zero",
            )));
        }
        Ok(Deadline {
            started: Instant::now(),
            budget: Duration::from_millis(self.query_timeout_ms),
        })
    }
}

struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    fn check(&self) -> Result<(), WarehouseError> {
        if self.started.elapsed() > self.budget {
            return Err(WarehouseError::QueryTimeout {
                timeout_ms: u64::try_from(self.budget.as_millis()).unwrap_or(u64::MAX),
            });
        }
        Ok(())
    }
}

/// Name and `DuckDB` type of one result column.
#[derive(Debug, Clone, Serialize)]
pub struct SqlColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: String,
}

/// Rows of a query rendered as JSON values.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub columns: Vec<SqlColumn>,
    pub rows: Vec<Vec<Value>>,
    pub row_count: usize,
    /// Set when more rows were available than `max_rows`.
    pub truncated: bool,
}

pub(crate) fn execute_read_only(
    connection: &Connection,
    sql: &str,
    guardrails: QueryGuardrails,
) -> Result<QueryResult, WarehouseError> {
    let deadline = guardrails.check()?;
    let statement = ReadOnlyStatement::parse(sql)?;
    trace!(sql = statement.as_str(), "running read-only query");

    let transaction = connection.unchecked_transaction()?;
    let result = fetch(&transaction, statement, guardrails.max_rows, &deadline);
    transaction.rollback()?;
    result
}

fn fetch(
    connection: &Connection,
    statement: ReadOnlyStatement<'_>,
    max_rows: usize,
    deadline: &Deadline,
) -> Result<QueryResult, WarehouseError> {
    let mut prepared = connection.prepare(statement.as_str())?;
    let mut cursor = prepared.query(::duckdb::params![])?;
    let columns = cursor.as_ref().map(describe_columns).unwrap_or_default();

    let mut rows = Vec::new();
    let mut truncated = false;
    while let Some(row) = cursor.next()? {
        deadline.check()?;
        if rows.len() == max_rows {
            truncated = true;
            break;
        }
        rows.push(json_row(row, columns.len())?);
    }
    deadline.check()?;

    Ok(QueryResult {
        columns,
        row_count: rows.len(),
        rows,
        truncated,
    })
}

fn describe_columns(statement: &Statement<'_>) -> Vec<SqlColumn> {
    (0..statement.column_count())
        .map(|index| SqlColumn {
            name: statement
                .column_name(index)
                .map_or_else(|_| format!("column_{index}"), String::clone),
            r#type: statement.column_type(index).to_string(),
        })
        .collect()
}

fn json_row(row: &Row<'_>, width: usize) -> Result<Vec<Value>, ::duckdb::Error> {
    (0..width)
        .map(|index| row.get::<_, DuckValue>(index).map(json_cell))
        .collect()
}

/// Relation cells come back in the shapes the relations emit: timestamps as
/// RFC3339 strings, json columns as their stored text.
fn json_cell(value: DuckValue) -> Value {
    match value {
        DuckValue::Null => Value::Null,
        DuckValue::Boolean(flag) => Value::Bool(flag),
        DuckValue::TinyInt(n) => Value::from(n),
        DuckValue::SmallInt(n) => Value::from(n),
        DuckValue::Int(n) => Value::from(n),
        DuckValue::BigInt(n) => Value::from(n),
        DuckValue::UTinyInt(n) => Value::from(n),
        DuckValue::USmallInt(n) => Value::from(n),
        DuckValue::UInt(n) => Value::from(n),
        DuckValue::UBigInt(n) => Value::from(n),
        // SUM over BIGINT widens to HUGEINT.
        DuckValue::HugeInt(n) => {
            i64::try_from(n).map_or_else(|_| Value::from(n.to_string()), Value::from)
        }
        DuckValue::Float(n) => Value::from(n),
        DuckValue::Double(n) => Value::from(n),
        DuckValue::Text(text) => Value::String(text),
        DuckValue::Blob(bytes) => Value::String(hex::encode(bytes)),
        DuckValue::Date32(days) => date_cell(days),
        DuckValue::Timestamp(unit, ticks) => timestamp_cell(unit, ticks),
        other => Value::String(format!("{other:?}")),
    }
}

fn date_cell(days: i32) -> Value {
    days.checked_add(UNIX_EPOCH_JULIAN_DAY)
        .and_then(|julian| Date::from_julian_day(julian).ok())
        .map_or(Value::Null, |date| Value::String(date.to_string()))
}

fn timestamp_cell(unit: TimeUnit, ticks: i64) -> Value {
    let ticks = i128::from(ticks);
    let nanos = match unit {
        TimeUnit::Second => ticks * 1_000_000_000,
        TimeUnit::Millisecond => ticks * 1_000_000,
        TimeUnit::Microsecond => ticks * 1_000,
        TimeUnit::Nanosecond => ticks,
    };

    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|ts| UtcDateTime::from_offset_datetime(ts).ok())
        .map_or(Value::Null, |ts| Value::String(ts.format_rfc3339()))
}
