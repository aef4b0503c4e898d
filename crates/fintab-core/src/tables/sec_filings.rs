use crate::client::FinanceClient;
use crate::domain::Filing;
use crate::transform::transpose;

use super::{
    drain, CellValue, ColumnDef, ColumnType, ListSummary, Row, RowSink, TableDef, TableErrorKind,
};

pub(crate) const NAME: &str = "sec_filings";

pub(crate) fn definition() -> TableDef {
    TableDef {
        name: NAME,
        description: "US public company filings from the SEC EDGAR database.",
        columns: vec![
            ColumnDef::new("cik", ColumnType::String, "CIK (Central Index Key) of the filer."),
            ColumnDef::new(
                "accession_number",
                ColumnType::String,
                "Accession number of the filing.",
            ),
            ColumnDef::new("filing_date", ColumnType::String, "Filing date of the filing."),
            ColumnDef::new("report_date", ColumnType::String, "Report date of the filing."),
            ColumnDef::new(
                "acceptance_date_time",
                ColumnType::Timestamp,
                "Acceptance datetime of the filing.",
            ),
            ColumnDef::new("act", ColumnType::String, "Act of the filing."),
            ColumnDef::new("form", ColumnType::String, "Form of the filing."),
            ColumnDef::new("file_number", ColumnType::String, "File number of the filing."),
            ColumnDef::new("film_number", ColumnType::String, "Film number of the filing."),
            ColumnDef::new("items", ColumnType::String, "Items of the filing."),
            ColumnDef::new("size", ColumnType::Int, "Size of the filing in bytes."),
            ColumnDef::new(
                "is_xbrl",
                ColumnType::Int,
                "Whether or not the filing is in XBRL format.",
            ),
            ColumnDef::new(
                "is_inline_xbrl",
                ColumnType::Int,
                "Whether or not the filing is in inline XBRL format.",
            ),
            ColumnDef::new(
                "primary_document",
                ColumnType::String,
                "Primary document of the filing.",
            ),
            ColumnDef::new(
                "primary_document_url",
                ColumnType::String,
                "Archive URL of the primary document.",
            ),
            ColumnDef::new(
                "primary_doc_description",
                ColumnType::String,
                "Primary document description.",
            ),
            ColumnDef::new("index_url", ColumnType::String, "Index URL of the filing."),
        ],
        key_columns: vec!["cik"],
    }
}

pub(crate) fn to_row(filing: Filing) -> Row {
    Row::new(vec![
        CellValue::String(filing.cik),
        CellValue::string(filing.accession_number),
        CellValue::string(filing.filing_date),
        CellValue::string(filing.report_date),
        CellValue::timestamp(filing.acceptance_date_time),
        CellValue::string(filing.act),
        CellValue::string(filing.form),
        CellValue::string(filing.file_number),
        CellValue::string(filing.film_number),
        CellValue::string(filing.items),
        CellValue::int(filing.size),
        CellValue::int(filing.is_xbrl),
        CellValue::int(filing.is_inline_xbrl),
        CellValue::string(filing.primary_document),
        CellValue::string(filing.primary_document_url),
        CellValue::string(filing.primary_doc_description),
        CellValue::string(filing.index_url),
    ])
}

/// Rows carry the queried (normalized) CIK, which the archive URLs are derived from.
pub(crate) async fn list(
    client: &FinanceClient,
    cik: &str,
    sink: &mut dyn RowSink,
) -> Result<ListSummary, TableErrorKind> {
    let filer = client.get_submissions(cik).await?;
    let Some(recent) = filer.recent_filings() else {
        return Ok(ListSummary::default());
    };

    let rows = transpose(cik, recent).map(|filing| {
        filing
            .with_archive_urls()
            .map(to_row)
            .map_err(TableErrorKind::from)
    });
    drain(rows, sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_carries_derived_urls() {
        let table = definition();
        let filing = Filing {
            cik: String::from("0000320193"),
            accession_number: Some(String::from("0001214659-23-000970")),
            primary_document: Some(String::from("aapl-20221231.htm")),
            size: Some(4_431_452),
            is_xbrl: Some(1),
            ..Filing::default()
        }
        .with_archive_urls()
        .expect("urls");

        let row = to_row(filing);

        assert_eq!(row.cells().len(), table.columns.len());
        assert_eq!(row.get(&table, "size"), Some(&CellValue::Int(4_431_452)));
        assert_eq!(row.get(&table, "is_xbrl"), Some(&CellValue::Int(1)));
        assert_eq!(
            row.get(&table, "primary_document_url"),
            Some(&CellValue::String(String::from(
                "https://www.sec.gov/Archives/edgar/data/320193/000121465923000970/aapl-20221231.htm"
            )))
        );
        assert_eq!(row.get(&table, "report_date"), Some(&CellValue::Null));
    }
}
