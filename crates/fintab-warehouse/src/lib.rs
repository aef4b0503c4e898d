//! # fintab warehouse
//!
//! `DuckDB` host engine for fintab relations.
//!
//! ## Overview
//!
//! Relation rows produced by `fintab-core` list operations are materialized into
//! `DuckDB` tables, one table per relation, and queried with read-only SQL.
//!
//! ### Features
//!
//! - **Typed tables**: each relation column maps onto a `DuckDB` type
//! - **Parameterized loading**: cell values are bound, never interpolated
//! - **Query guardrails**: row limits and timeouts
//! - **Read-only queries**: a single SELECT/CTE statement, run in a transaction that
//!   is rolled back afterwards
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fintab_core::{Row, TableDef};
//! use fintab_warehouse::{QueryGuardrails, Warehouse};
//!
//! fn run(table: &TableDef, rows: &[Row]) -> Result<(), Box<dyn std::error::Error>> {
//!     let warehouse = Warehouse::open_in_memory()?;
//!     warehouse.load_relation(table, rows)?;
//!
//!     let result = warehouse.execute_query(
//!         "SELECT form, COUNT(*) AS filings FROM sec_filings GROUP BY form",
//!         QueryGuardrails::default(),
//!     )?;
//!     println!("{} rows", result.row_count);
//!     Ok(())
//! }
//! ```

mod error;
mod load;
mod query;
mod statement;

use std::fs;
use std::path::{Path, PathBuf};

use ::duckdb::Connection;
use fintab_core::{Row, TableDef};
use tracing::debug;

pub use error::WarehouseError;
pub use load::sql_type;
pub use query::{QueryGuardrails, QueryResult, SqlColumn};

/// A `DuckDB` database holding loaded relations.
pub struct Warehouse {
    path: Option<PathBuf>,
    connection: Connection,
}

impl Warehouse {
    /// Open (or create) a database file, creating its parent directory.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, WarehouseError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let connection = Connection::open(&path)?;
        Ok(Self {
            path: Some(path),
            connection,
        })
    }

    /// Open a throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self, WarehouseError> {
        Ok(Self {
            path: None,
            connection: Connection::open_in_memory()?,
        })
    }

    /// Database file path; `None` when in memory.
    pub fn db_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Replace the table named after `table` with `rows`.
    pub fn load_relation(&self, table: &TableDef, rows: &[Row]) -> Result<usize, WarehouseError> {
        let loaded = load::load_rows(&self.connection, table, rows)?;
        debug!(table = table.name, rows = loaded, "relation loaded");
        Ok(loaded)
    }

    /// Execute a read-only query with guardrails.
    pub fn execute_query(
        &self,
        sql: &str,
        guardrails: QueryGuardrails,
    ) -> Result<QueryResult, WarehouseError> {
        let result = query::execute_read_only(&self.connection, sql, guardrails)?;
        debug!(
            rows = result.row_count,
            truncated = result.truncated,
            "query executed"
        );
        Ok(result)
    }
}
