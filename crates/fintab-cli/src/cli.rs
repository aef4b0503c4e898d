//! CLI argument definitions for fintab.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `tables` | Describe the registered relations |
//! | `list` | Stream a relation's rows as NDJSON |
//! | `sql` | Load relations into DuckDB and query them |
//!
//! # Examples
//!
//! ```bash
//! fintab tables --pretty
//! fintab list sec_filings --cik 320193 --limit 20
//! fintab sql "SELECT form, COUNT(*) FROM sec_filings GROUP BY form" --load sec_filings --cik 320193
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// IEX reference data and SEC EDGAR submissions as queryable relations.
///
/// Requires IEX_API_KEY. Set FINTAB_USER_AGENT to identify yourself to EDGAR and
/// FINTAB_LOG to control diagnostics on stderr.
#[derive(Debug, Parser)]
#[command(name = "fintab", author, version, about)]
pub struct Cli {
    /// Pretty-print JSON documents. NDJSON rows are always one per line.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Describe every relation: columns, types and key columns.
    Tables,

    /// Stream the rows of one relation as newline-delimited JSON.
    ///
    /// # Examples
    ///
    ///   fintab list companies --limit 5
    ///   fintab list sec_filers --cik 0000320193
    List(ListArgs),

    /// Load relations into an in-memory DuckDB and run a read-only query.
    ///
    /// # Examples
    ///
    ///   fintab sql "SELECT * FROM sec_filers" --load sec_filers --cik 320193
    ///   fintab sql "SELECT c.name, f.form FROM companies c JOIN sec_filings f ON c.cik = f.cik" \
    ///     --load companies --load sec_filings --cik 320193
    Sql(SqlArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Relation name (companies, sec_filers, sec_filings).
    pub table: String,

    /// Central Index Key qualifier, padded to 10 digits before use.
    #[arg(long)]
    pub cik: Option<String>,

    /// Stop after this many rows.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct SqlArgs {
    /// SELECT/CTE query to execute.
    pub query: String,

    /// Relation to load before querying; repeatable.
    #[arg(long = "load", required = true, num_args = 1)]
    pub tables: Vec<String>,

    /// Central Index Key qualifier for keyed relations.
    #[arg(long)]
    pub cik: Option<String>,

    /// Maximum number of rows to return.
    #[arg(long, default_value_t = 10_000)]
    pub max_rows: usize,

    /// Query timeout in milliseconds.
    #[arg(long, default_value_t = 5_000)]
    pub query_timeout_ms: u64,

    /// Persist loaded relations to this DuckDB file instead of memory.
    #[arg(long)]
    pub database: Option<PathBuf>,
}
