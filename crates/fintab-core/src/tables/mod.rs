//! # Relations
//!
//! Table definitions, rows and the list operation contract shared by every relation.
//!
//! A host asks a [`Plugin`] for its [`TableDef`]s, then calls
//! [`Plugin::list`] with a table name, equality [`Qualifiers`] on key columns and a
//! [`RowSink`]. Rows are pushed one at a time; the sink may stop the operation early.

mod companies;
mod plugin;
mod sec_filers;
mod sec_filings;

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::ops::ControlFlow;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::client::ClientError;
use crate::domain::UtcDateTime;
use crate::error::{ConfigError, IdentifierError};

pub use plugin::{Plugin, Relation, DEFAULT_MAX_CONCURRENCY, PLUGIN_NAME};

/// Column value type understood by hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Int,
    Bool,
    Json,
    Timestamp,
}

impl ColumnType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Json => "json",
            Self::Timestamp => "timestamp",
        }
    }
}

/// One nullable column of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub description: &'static str,
}

impl ColumnDef {
    pub const fn new(
        name: &'static str,
        column_type: ColumnType,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            column_type,
            description,
        }
    }
}

/// Registration record for a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDef {
    pub name: &'static str,
    pub description: &'static str,
    pub columns: Vec<ColumnDef>,
    /// Columns a qualifier must be supplied for.
    pub key_columns: Vec<&'static str>,
}

impl TableDef {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }
}

/// A single cell. `Null` is used for every absent upstream value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    String(String),
    Int(i64),
    Bool(bool),
    Json(Value),
    Timestamp(UtcDateTime),
}

impl CellValue {
    pub fn string(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::String)
    }

    pub fn int<T: Into<i64>>(value: Option<T>) -> Self {
        value.map_or(Self::Null, |v| Self::Int(v.into()))
    }

    pub fn bool(value: Option<bool>) -> Self {
        value.map_or(Self::Null, Self::Bool)
    }

    pub fn timestamp(value: Option<UtcDateTime>) -> Self {
        value.map_or(Self::Null, Self::Timestamp)
    }

    /// Encode any serializable value into a json cell; `None` stays `Null`.
    pub fn json<T: Serialize>(
        column: &'static str,
        value: Option<&T>,
    ) -> Result<Self, TableErrorKind> {
        match value {
            None => Ok(Self::Null),
            Some(value) => serde_json::to_value(value)
                .map(Self::Json)
                .map_err(|source| TableErrorKind::Encode { column, source }),
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn to_json_value(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::String(value) => Value::String(value.clone()),
            Self::Int(value) => Value::from(*value),
            Self::Bool(value) => Value::Bool(*value),
            Self::Json(value) => value.clone(),
            Self::Timestamp(value) => Value::String(value.format_rfc3339()),
        }
    }
}

/// One row, cells in the column order of its [`TableDef`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<CellValue>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn get(&self, table: &TableDef, column: &str) -> Option<&CellValue> {
        table
            .column_index(column)
            .and_then(|index| self.cells.get(index))
    }

    /// Render as a JSON object keyed by column name.
    pub fn to_json_object(&self, table: &TableDef) -> Map<String, Value> {
        table
            .columns
            .iter()
            .zip(&self.cells)
            .map(|(column, cell)| (column.name.to_owned(), cell.to_json_value()))
            .collect()
    }
}

/// Receiver for rows produced by a list operation.
pub trait RowSink: Send {
    /// Accept one row. Returning `Break` stops the operation after this row.
    fn emit(&mut self, row: Row) -> ControlFlow<()>;
}

impl RowSink for Vec<Row> {
    fn emit(&mut self, row: Row) -> ControlFlow<()> {
        self.push(row);
        ControlFlow::Continue(())
    }
}

/// Equality predicates on key columns supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Qualifiers {
    values: BTreeMap<String, String>,
}

impl Qualifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }
}

/// Outcome of a completed list operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListSummary {
    pub rows_emitted: usize,
    /// The sink asked to stop before the relation ran out of rows.
    pub stopped_early: bool,
}

#[derive(Debug, Error)]
pub enum TableErrorKind {
    #[error("unknown table")]
    UnknownTable,

    #[error("missing required qualifier '{column}'")]
    MissingQualifier { column: &'static str },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    #[error("failed to encode column '{column}': {source}")]
    Encode {
        column: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// A failed list operation, tagged with the table and key it ran for.
#[derive(Debug)]
pub struct TableError {
    table: String,
    key: Option<String>,
    kind: TableErrorKind,
}

impl TableError {
    pub fn new(table: impl Into<String>, key: Option<String>, kind: TableErrorKind) -> Self {
        Self {
            table: table.into(),
            key,
            kind,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub const fn kind(&self) -> &TableErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> TableErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        match &self.kind {
            TableErrorKind::UnknownTable => "table.unknown",
            TableErrorKind::MissingQualifier { .. } => "table.missing_qualifier",
            TableErrorKind::Config(_) => "config.missing_credential",
            TableErrorKind::Client(ClientError::Transport(_)) => "upstream.transport",
            TableErrorKind::Client(ClientError::Api(_)) => "upstream.api",
            TableErrorKind::Client(ClientError::Decode(_)) => "upstream.decode",
            TableErrorKind::Client(ClientError::Encode(_)) => "upstream.encode",
            TableErrorKind::Identifier(_) => "identifier.invalid",
            TableErrorKind::Encode { .. } => "row.encode",
        }
    }
}

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.key {
            Some(key) => write!(f, "list {} (cik={key}): {}", self.table, self.kind),
            None => write!(f, "list {}: {}", self.table, self.kind),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Push rows into `sink` until it breaks or a row fails.
///
/// Rows emitted before a failure stay emitted.
pub(crate) fn drain<I>(rows: I, sink: &mut dyn RowSink) -> Result<ListSummary, TableErrorKind>
where
    I: IntoIterator<Item = Result<Row, TableErrorKind>>,
{
    let mut summary = ListSummary::default();
    for row in rows {
        let flow = sink.emit(row?);
        summary.rows_emitted += 1;
        if flow.is_break() {
            summary.stopped_early = true;
            break;
        }
    }
    Ok(summary)
}
