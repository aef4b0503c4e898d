use crate::error::IdentifierError;

/// Canonical CIK width.
pub const CIK_WIDTH: usize = 10;

/// Root of the EDGAR filing archive.
pub const SEC_ARCHIVES_URL: &str = "https://www.sec.gov/Archives/edgar/data";

/// Left-pad a CIK with `0` to [`CIK_WIDTH`] characters.
///
/// A value already [`CIK_WIDTH`] long is returned unchanged; a longer one is an error.
/// Characters are not validated here, only length.
pub fn normalize_cik(cik: &str) -> Result<String, IdentifierError> {
    let len = cik.chars().count();
    if len > CIK_WIDTH {
        return Err(IdentifierError::CikTooLong {
            value: cik.to_owned(),
            len,
            max: CIK_WIDTH,
        });
    }

    Ok(format!("{cik:0>width$}", width = CIK_WIDTH))
}

/// Normalize a CIK supplied as a query key. Unlike [`normalize_cik`], anything other
/// than ASCII digits is rejected, so a malformed key never reaches EDGAR.
pub fn normalize_query_cik(cik: &str) -> Result<String, IdentifierError> {
    let normalized = normalize_cik(cik)?;
    if cik.is_empty() || !cik.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(IdentifierError::CikNotNumeric {
            value: cik.to_owned(),
        });
    }
    Ok(normalized)
}

/// EDGAR reports a missing SIC as an empty string.
pub fn sic_value(sic: &str) -> Option<&str> {
    if sic.is_empty() {
        None
    } else {
        Some(sic)
    }
}

/// Coerce an upstream SIC into an integer column value.
pub fn parse_sic(sic: Option<&str>) -> Result<Option<i64>, IdentifierError> {
    let Some(value) = sic.and_then(sic_value) else {
        return Ok(None);
    };

    value
        .parse::<i64>()
        .map(Some)
        .map_err(|_| IdentifierError::SicNotNumeric {
            value: value.to_owned(),
        })
}

/// `{archive}/{int(cik)}/{accession without hyphens}/{accession}-index.htm`
pub fn index_url(cik: &str, accession_number: &str) -> Result<String, IdentifierError> {
    Ok(format!(
        "{}/{accession_number}-index.htm",
        archive_folder(cik, accession_number)?
    ))
}

/// `{archive}/{int(cik)}/{accession without hyphens}/{document}`
pub fn document_url(
    cik: &str,
    accession_number: &str,
    document: &str,
) -> Result<String, IdentifierError> {
    Ok(format!(
        "{}/{document}",
        archive_folder(cik, accession_number)?
    ))
}

fn archive_folder(cik: &str, accession_number: &str) -> Result<String, IdentifierError> {
    let numeric = cik
        .parse::<u64>()
        .map_err(|_| IdentifierError::CikNotNumeric {
            value: cik.to_owned(),
        })?;
    let folder = accession_number.replace('-', "");

    Ok(format!("{SEC_ARCHIVES_URL}/{numeric}/{folder}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_cik_is_left_padded() {
        assert_eq!(normalize_cik("1650373").as_deref(), Ok("0001650373"));
        assert_eq!(normalize_cik("320193").as_deref(), Ok("0000320193"));
    }

    #[test]
    fn full_width_cik_is_unchanged() {
        assert_eq!(normalize_cik("0000320193").as_deref(), Ok("0000320193"));
    }

    #[test]
    fn empty_cik_pads_to_zeros() {
        assert_eq!(normalize_cik("").as_deref(), Ok("0000000000"));
    }

    #[test]
    fn overlong_cik_is_rejected() {
        assert_eq!(
            normalize_cik("123456789012"),
            Err(IdentifierError::CikTooLong {
                value: String::from("123456789012"),
                len: 12,
                max: CIK_WIDTH,
            })
        );
    }

    #[test]
    fn query_cik_must_be_digits() {
        assert_eq!(normalize_query_cik("320193").as_deref(), Ok("0000320193"));
        for cik in ["abc", "", "32019x", " 320193", "-320193"] {
            assert_eq!(
                normalize_query_cik(cik),
                Err(IdentifierError::CikNotNumeric {
                    value: cik.to_owned()
                }),
                "{cik:?}"
            );
        }
        assert!(matches!(
            normalize_query_cik("12345678901x"),
            Err(IdentifierError::CikTooLong { len: 12, .. })
        ));
    }

    #[test]
    fn empty_sic_is_absent() {
        assert_eq!(sic_value(""), None);
        assert_eq!(sic_value("3571"), Some("3571"));
        assert_eq!(sic_value(" "), Some(" "));
    }

    #[test]
    fn sic_parses_base_ten() {
        assert_eq!(parse_sic(Some("3571")), Ok(Some(3571)));
        assert_eq!(parse_sic(Some("")), Ok(None));
        assert_eq!(parse_sic(None), Ok(None));
        assert_eq!(
            parse_sic(Some("35x1")),
            Err(IdentifierError::SicNotNumeric {
                value: String::from("35x1")
            })
        );
    }

    #[test]
    fn derives_apple_archive_urls() {
        assert_eq!(
            index_url("0000320193", "0001214659-23-000970").as_deref(),
            Ok("https://www.sec.gov/Archives/edgar/data/320193/000121465923000970/0001214659-23-000970-index.htm")
        );
        assert_eq!(
            document_url("0000320193", "0001214659-23-000970", "aapl-20221231.htm").as_deref(),
            Ok("https://www.sec.gov/Archives/edgar/data/320193/000121465923000970/aapl-20221231.htm")
        );
    }

    #[test]
    fn non_numeric_cik_cannot_build_url() {
        assert_eq!(
            index_url("CIK320193", "0001214659-23-000970"),
            Err(IdentifierError::CikNotNumeric {
                value: String::from("CIK320193")
            })
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any 1..=10 digit CIK pads to full width and keeps its digits as the suffix.
        #[test]
        fn digit_ciks_pad_to_width(cik in "[0-9]{1,10}") {
            let normalized = normalize_cik(&cik).expect("within width");
            prop_assert_eq!(normalized.len(), CIK_WIDTH);
            prop_assert!(normalized.ends_with(&cik));
            prop_assert!(normalized[..CIK_WIDTH - cik.len()].bytes().all(|b| b == b'0'));
            prop_assert_eq!(normalize_cik(&normalized), Ok(normalized.clone()));
            prop_assert_eq!(normalize_query_cik(&cik), Ok(normalized));
        }

        #[test]
        fn overlong_ciks_are_rejected(cik in "[0-9]{11,20}") {
            prop_assert_eq!(
                normalize_cik(&cik),
                Err(IdentifierError::CikTooLong {
                    value: cik.clone(),
                    len: cik.len(),
                    max: CIK_WIDTH,
                })
            );
        }

        #[test]
        fn archive_folder_drops_padding(cik in "[0-9]{1,10}") {
            let normalized = normalize_cik(&cik).expect("within width");
            let url = index_url(&normalized, "0000320193-23-000006").expect("numeric");
            let expected = cik.parse::<u64>().expect("digits");
            prop_assert!(url.starts_with(&format!("{SEC_ARCHIVES_URL}/{expected}/")));
        }
    }
}
