//! # fintab core
//!
//! IEX Cloud reference data and SEC EDGAR submissions exposed as queryable relations.
//!
//! ## Overview
//!
//! A host asks the [`Plugin`] for its [`TableDef`]s and then runs list operations
//! against them. Each list operation makes exactly one upstream HTTP request, decodes
//! the payload, reshapes it into rows and pushes the rows into a caller-supplied
//! [`RowSink`].
//!
//! ## Relations
//!
//! | Relation | Key | Rows |
//! |----------|-----|------|
//! | `companies` | none | one per IEX symbol |
//! | `sec_filers` | `cik` | one for the filer |
//! | `sec_filings` | `cik` | one per recent filing, with archive URLs |
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Upstream API client and [`ApiError`] |
//! | [`config`] | Environment-driven [`Config`] |
//! | [`domain`] | Payload schemas and the row-major [`Filing`] |
//! | [`error`] | Configuration, identifier and timestamp errors |
//! | [`http_client`] | Transport trait, reqwest and fixture implementations |
//! | [`tables`] | Table definitions, rows, sinks and the [`Plugin`] |
//! | [`transform`] | CIK normalization, SIC coercion, archive URLs, filing transpose |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fintab_core::{Plugin, Qualifiers, Row};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let plugin = Plugin::from_env();
//!     let mut rows: Vec<Row> = Vec::new();
//!
//!     plugin
//!         .list("sec_filings", &Qualifiers::new().with("cik", "320193"), &mut rows)
//!         .await?;
//!
//!     println!("{} filings", rows.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Host / CLI     │
//! └────────┬────────┘
//!          │ list(table, qualifiers, sink)
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Plugin          │────▶│ FinanceClient    │
//! │ (relations)     │     │ (HttpClient)     │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Transform       │
//! │ (transpose)     │
//! └────────┬────────┘
//!          │ one row at a time
//!          ▼
//! ┌─────────────────┐
//! │ RowSink         │
//! └─────────────────┘
//! ```
//!
//! ## Security
//!
//! - The IEX token is read from `IEX_API_KEY` and is only sent to the IEX host
//! - Error messages and logs carry request URLs without the token

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod tables;
pub mod transform;

// Client
pub use client::{ApiError, ClientError, FinanceClient};

// Configuration
pub use config::Config;

// Domain models
pub use domain::{
    Address, Addresses, Company, Filing, FilingFile, FilingHistory, FilingTable, FormerName,
    Submissions, UtcDateTime,
};

// Error types
pub use error::{ConfigError, IdentifierError, TimestampError};

// HTTP client types
pub use http_client::{
    FixtureHttpClient, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse,
    ReqwestHttpClient,
};

// Relations
pub use tables::{
    CellValue, ColumnDef, ColumnType, ListSummary, Plugin, Qualifiers, Relation, Row, RowSink,
    TableDef, TableError, TableErrorKind, DEFAULT_MAX_CONCURRENCY, PLUGIN_NAME,
};

// Transform
pub use transform::{normalize_cik, normalize_query_cik, transpose, FilingRows};
