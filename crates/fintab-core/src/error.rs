use thiserror::Error;

/// Configuration errors raised before any upstream call is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required credential {name} is not set")]
    MissingCredential { name: &'static str },
}

/// Malformed identifiers found while normalizing or deriving values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("invalid CIK '{value}': {len} characters exceeds the maximum of {max}")]
    CikTooLong { value: String, len: usize, max: usize },

    #[error("invalid CIK '{value}': not a base-10 integer")]
    CikNotNumeric { value: String },

    #[error("invalid SIC '{value}': not a base-10 integer")]
    SicNotNumeric { value: String },
}

/// Timestamp decode failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
pub struct TimestampError {
    pub value: String,
}
