use thiserror::Error;

/// Errors that can occur during warehouse operations.
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// `DuckDB` database error.
    #[error(transparent)]
    DuckDb(#[from] ::duckdb::Error),

    /// I/O error creating the database directory.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Query was rejected due to policy violation.
    #[error("query rejected: {0}")]
    QueryRejected(String),

    /// Query execution timed out.
    #[error("query timed out after {timeout_ms}ms")]
    QueryTimeout { timeout_ms: u64 },

    /// A row did not match the width of its relation.
    #[error("row {index} of '{table}' has {actual} cells, expected {expected}")]
    RowShape {
        table: String,
        index: usize,
        expected: usize,
        actual: usize,
    },
}
