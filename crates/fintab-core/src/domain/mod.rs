//! # Domain Models
//!
//! Upstream payload schemas and the row-major filing record.
//!
//! Every upstream field is an `Option`: a missing or `null` JSON field decodes to
//! `None`, and an empty string stays `Some("")`. Unknown fields are ignored; a type
//! mismatch fails the whole decode.
//!
//! | Type | Source |
//! |------|--------|
//! | [`Company`] | IEX Cloud `ref-data/symbols` element |
//! | [`Submissions`] | EDGAR `submissions/CIK##########.json` |
//! | [`FilingTable`] | column-major `filings.recent` block of a submission |
//! | [`Filing`] | one row of a [`FilingTable`] plus derived archive URLs |
//! | [`UtcDateTime`] | RFC3339 UTC timestamp |

mod company;
mod filing;
mod submissions;
mod timestamp;

pub use company::Company;
pub use filing::Filing;
pub use submissions::{
    Address, Addresses, FilingFile, FilingHistory, FilingTable, FormerName, Submissions,
};
pub use timestamp::UtcDateTime;
