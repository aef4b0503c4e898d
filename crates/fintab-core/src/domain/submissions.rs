use serde::{Deserialize, Serialize};

use super::UtcDateTime;

/// One filer's EDGAR submissions document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submissions {
    /// Zero padding is inconsistent upstream; see [`normalize_cik`](crate::normalize_cik).
    pub cik: Option<String>,
    pub entity_type: Option<String>,
    /// String-encoded integer, sometimes empty.
    pub sic: Option<String>,
    pub sic_description: Option<String>,
    pub insider_transaction_for_owner_exists: Option<i8>,
    pub insider_transaction_for_issuer_exists: Option<i8>,
    pub name: Option<String>,
    pub tickers: Option<Vec<Option<String>>>,
    pub exchanges: Option<Vec<Option<String>>>,
    pub ein: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub investor_website: Option<String>,
    pub category: Option<String>,
    pub fiscal_year_end: Option<String>,
    pub state_of_incorporation: Option<String>,
    pub state_of_incorporation_description: Option<String>,
    pub addresses: Option<Addresses>,
    pub phone: Option<String>,
    pub flags: Option<String>,
    pub former_names: Option<Vec<FormerName>>,
    pub filings: Option<FilingHistory>,
}

impl Submissions {
    /// The column-major `filings.recent` block, when present.
    pub fn recent_filings(&self) -> Option<&FilingTable> {
        self.filings.as_ref().and_then(|filings| filings.recent.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addresses {
    pub mailing: Option<Address>,
    pub business: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street1: Option<String>,
    pub street2: Option<String>,
    pub city: Option<String>,
    pub state_or_country: Option<String>,
    pub zip_code: Option<String>,
    pub state_or_country_description: Option<String>,
}

/// A name the filer was previously registered under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormerName {
    pub name: Option<String>,
    pub from: Option<UtcDateTime>,
    pub to: Option<UtcDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingHistory {
    pub recent: Option<FilingTable>,
    /// Older submission pages. Decoded for completeness, never fetched.
    pub files: Option<Vec<FilingFile>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingFile {
    pub name: Option<String>,
    pub filing_count: Option<u32>,
    pub filing_from: Option<String>,
    pub filing_to: Option<String>,
}

/// Column-major filing history: position `i` of every present sequence describes filing `i`.
///
/// Any sequence may be absent for the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingTable {
    pub accession_number: Option<Vec<String>>,
    pub filing_date: Option<Vec<String>>,
    pub report_date: Option<Vec<String>>,
    pub acceptance_date_time: Option<Vec<UtcDateTime>>,
    pub act: Option<Vec<String>>,
    pub form: Option<Vec<String>>,
    pub file_number: Option<Vec<String>>,
    pub film_number: Option<Vec<String>>,
    pub items: Option<Vec<String>>,
    pub size: Option<Vec<i64>>,
    #[serde(rename = "isXBRL")]
    pub is_xbrl: Option<Vec<i8>>,
    #[serde(rename = "isInlineXBRL")]
    pub is_inline_xbrl: Option<Vec<i8>>,
    pub primary_document: Option<Vec<String>>,
    pub primary_doc_description: Option<Vec<String>>,
}
