use crate::client::FinanceClient;
use crate::domain::Submissions;
use crate::transform::{normalize_cik, parse_sic};

use super::{
    drain, CellValue, ColumnDef, ColumnType, ListSummary, Row, RowSink, TableDef, TableErrorKind,
};

pub(crate) const NAME: &str = "sec_filers";

pub(crate) fn definition() -> TableDef {
    TableDef {
        name: NAME,
        description: "Lookup company filer details from the US SEC EDGAR database.",
        columns: vec![
            ColumnDef::new("cik", ColumnType::String, "CIK (Central Index Key) of the filer."),
            ColumnDef::new("entity_type", ColumnType::String, "Entity type of the filer."),
            ColumnDef::new(
                "sic",
                ColumnType::Int,
                "SIC (Standard Industrial Classification) of the filer.",
            ),
            ColumnDef::new(
                "sic_description",
                ColumnType::String,
                "SIC (Standard Industrial Classification) description of the filer.",
            ),
            ColumnDef::new(
                "insider_transaction_for_owner_exists",
                ColumnType::Int,
                "Whether or not an insider transaction for the owner of the filer exists.",
            ),
            ColumnDef::new(
                "insider_transaction_for_issuer_exists",
                ColumnType::Int,
                "Whether or not an insider transaction for the issuer of the filer exists.",
            ),
            ColumnDef::new("name", ColumnType::String, "Name of the filer."),
            ColumnDef::new("tickers", ColumnType::Json, "Tickers of the filer."),
            ColumnDef::new("exchanges", ColumnType::Json, "Exchanges on which the filer trades."),
            ColumnDef::new(
                "ein",
                ColumnType::String,
                "EIN (Employer Identification Number) of the filer.",
            ),
            ColumnDef::new("description", ColumnType::String, "Description of the filer."),
            ColumnDef::new("website", ColumnType::String, "Website of the filer."),
            ColumnDef::new(
                "investor_website",
                ColumnType::String,
                "Investor website of the filer.",
            ),
            ColumnDef::new("category", ColumnType::String, "Category of the filer."),
            ColumnDef::new("fiscal_year_end", ColumnType::String, "Fiscal year end of the filer."),
            ColumnDef::new(
                "state_of_incorporation",
                ColumnType::String,
                "State of incorporation of the filer.",
            ),
            ColumnDef::new(
                "state_of_incorporation_description",
                ColumnType::String,
                "State of incorporation description of the filer.",
            ),
            ColumnDef::new(
                "addresses",
                ColumnType::Json,
                "Mailing and business addresses of the filer.",
            ),
            ColumnDef::new("phone", ColumnType::String, "Phone of the filer."),
            ColumnDef::new("flags", ColumnType::String, "Flags of the filer."),
            ColumnDef::new("former_names", ColumnType::Json, "Former names of the filer."),
        ],
        key_columns: vec!["cik"],
    }
}

/// The upstream CIK is normalized; a filer without one falls back to the queried CIK.
pub(crate) fn to_row(filer: Submissions, queried_cik: &str) -> Result<Row, TableErrorKind> {
    let cik = match filer.cik.as_deref() {
        Some(cik) => normalize_cik(cik)?,
        None => queried_cik.to_owned(),
    };
    let sic = parse_sic(filer.sic.as_deref())?;

    Ok(Row::new(vec![
        CellValue::String(cik),
        CellValue::string(filer.entity_type),
        CellValue::int(sic),
        CellValue::string(filer.sic_description),
        CellValue::int(filer.insider_transaction_for_owner_exists),
        CellValue::int(filer.insider_transaction_for_issuer_exists),
        CellValue::string(filer.name),
        CellValue::json("tickers", filer.tickers.as_ref())?,
        CellValue::json("exchanges", filer.exchanges.as_ref())?,
        CellValue::string(filer.ein),
        CellValue::string(filer.description),
        CellValue::string(filer.website),
        CellValue::string(filer.investor_website),
        CellValue::string(filer.category),
        CellValue::string(filer.fiscal_year_end),
        CellValue::string(filer.state_of_incorporation),
        CellValue::string(filer.state_of_incorporation_description),
        CellValue::json("addresses", filer.addresses.as_ref())?,
        CellValue::string(filer.phone),
        CellValue::string(filer.flags),
        CellValue::json("former_names", filer.former_names.as_ref())?,
    ]))
}

pub(crate) async fn list(
    client: &FinanceClient,
    cik: &str,
    sink: &mut dyn RowSink,
) -> Result<ListSummary, TableErrorKind> {
    let filer = client.get_submissions(cik).await?;
    drain(std::iter::once(to_row(filer, cik)), sink)
}
