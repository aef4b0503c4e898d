use fintab_core::{TableError, TableErrorKind};
use fintab_warehouse::WarehouseError;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("usage error: {0}")]
    Usage(String),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Warehouse(#[from] WarehouseError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            Self::Table(error) => match error.kind() {
                TableErrorKind::UnknownTable
                | TableErrorKind::MissingQualifier { .. }
                | TableErrorKind::Config(_) => 2,
                TableErrorKind::Client(_) => 3,
                TableErrorKind::Encode { .. } => 4,
                TableErrorKind::Identifier(_) => 5,
            },
            Self::Warehouse(_) => 6,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
