//! # Transform
//!
//! Pure reshaping of decoded payloads: identifier normalization, SIC coercion,
//! archive URL derivation and the column-major to row-major filing transpose.
//! Nothing here touches the network.

mod identifiers;
mod transpose;

pub use identifiers::{
    document_url, index_url, normalize_cik, normalize_query_cik, parse_sic, sic_value, CIK_WIDTH,
    SEC_ARCHIVES_URL,
};
pub use transpose::{transpose, FilingRows};
