use serde::Serialize;

use super::UtcDateTime;
use crate::error::IdentifierError;
use crate::transform::{document_url, index_url};

/// One filing, row-major, cut out of a [`FilingTable`](super::FilingTable).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filing {
    /// Normalized CIK of the filer the row belongs to.
    pub cik: String,
    pub accession_number: Option<String>,
    pub filing_date: Option<String>,
    pub report_date: Option<String>,
    pub acceptance_date_time: Option<UtcDateTime>,
    pub act: Option<String>,
    pub form: Option<String>,
    pub file_number: Option<String>,
    pub film_number: Option<String>,
    pub items: Option<String>,
    pub size: Option<i64>,
    pub is_xbrl: Option<i8>,
    pub is_inline_xbrl: Option<i8>,
    pub primary_document: Option<String>,
    pub primary_doc_description: Option<String>,
    pub index_url: Option<String>,
    pub primary_document_url: Option<String>,
}

impl Filing {
    /// Fill `index_url` and `primary_document_url` from the CIK, accession number and
    /// primary document. Rows without an accession number keep both URLs unset.
    pub fn with_archive_urls(mut self) -> Result<Self, IdentifierError> {
        let Some(accession) = self.accession_number.as_deref() else {
            return Ok(self);
        };

        self.index_url = Some(index_url(&self.cik, accession)?);
        self.primary_document_url = match self.primary_document.as_deref() {
            Some(document) => Some(document_url(&self.cik, accession, document)?),
            None => None,
        };
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_urls_follow_cik_and_accession() {
        let filing = Filing {
            cik: String::from("0000320193"),
            accession_number: Some(String::from("0001214659-23-000970")),
            primary_document: Some(String::from("aapl-20221231.htm")),
            ..Filing::default()
        }
        .with_archive_urls()
        .expect("urls");

        assert_eq!(
            filing.index_url.as_deref(),
            Some("https://www.sec.gov/Archives/edgar/data/320193/000121465923000970/0001214659-23-000970-index.htm")
        );
        assert_eq!(
            filing.primary_document_url.as_deref(),
            Some("https://www.sec.gov/Archives/edgar/data/320193/000121465923000970/aapl-20221231.htm")
        );
    }

    #[test]
    fn missing_accession_leaves_urls_unset() {
        let filing = Filing {
            cik: String::from("not-a-cik"),
            primary_document: Some(String::from("doc.htm")),
            ..Filing::default()
        }
        .with_archive_urls()
        .expect("no derivation attempted");

        assert_eq!(filing.index_url, None);
        assert_eq!(filing.primary_document_url, None);
    }

    #[test]
    fn missing_document_still_derives_index() {
        let filing = Filing {
            cik: String::from("0001650373"),
            accession_number: Some(String::from("0001650373-22-000004")),
            ..Filing::default()
        }
        .with_archive_urls()
        .expect("urls");

        assert!(filing.index_url.is_some());
        assert_eq!(filing.primary_document_url, None);
    }

    #[test]
    fn non_numeric_cik_fails_derivation() {
        let result = Filing {
            cik: String::from("00ABC"),
            accession_number: Some(String::from("0001650373-22-000004")),
            ..Filing::default()
        }
        .with_archive_urls();

        assert_eq!(
            result,
            Err(IdentifierError::CikNotNumeric {
                value: String::from("00ABC")
            })
        );
    }
}
