use crate::client::FinanceClient;
use crate::domain::Company;

use super::{
    drain, CellValue, ColumnDef, ColumnType, ListSummary, Row, RowSink, TableDef, TableErrorKind,
};

pub(crate) const NAME: &str = "companies";

pub(crate) fn definition() -> TableDef {
    TableDef {
        name: NAME,
        description: "US public companies from the IEX Cloud reference data.",
        columns: vec![
            ColumnDef::new("symbol", ColumnType::String, "Symbol of the company."),
            ColumnDef::new("exchange", ColumnType::String, "Exchange of the company."),
            ColumnDef::new(
                "exchange_suffix",
                ColumnType::String,
                "Exchange suffix of the company.",
            ),
            ColumnDef::new("exchange_name", ColumnType::String, "Exchange name of the company."),
            ColumnDef::new(
                "exchange_segment",
                ColumnType::String,
                "Exchange segment of the company.",
            ),
            ColumnDef::new(
                "exchange_segment_name",
                ColumnType::String,
                "Exchange segment name of the company.",
            ),
            ColumnDef::new("name", ColumnType::String, "Name of the company."),
            ColumnDef::new("date", ColumnType::String, "Date of the company."),
            ColumnDef::new("type", ColumnType::String, "Type of the company."),
            ColumnDef::new("iex_id", ColumnType::String, "IEX id of the company."),
            ColumnDef::new("region", ColumnType::String, "Region of the company."),
            ColumnDef::new("currency", ColumnType::String, "Currency of the company."),
            ColumnDef::new(
                "is_enabled",
                ColumnType::Bool,
                "Whether or not the company is enabled.",
            ),
            ColumnDef::new(
                "figi",
                ColumnType::String,
                "Financial Instrument Global Identifier of the company.",
            ),
            ColumnDef::new("cik", ColumnType::String, "Central Index Key of the company."),
            ColumnDef::new("lei", ColumnType::String, "Legal Entity Identifier of the company."),
        ],
        key_columns: Vec::new(),
    }
}

pub(crate) fn to_row(company: Company) -> Row {
    Row::new(vec![
        CellValue::string(company.symbol),
        CellValue::string(company.exchange),
        CellValue::string(company.exchange_suffix),
        CellValue::string(company.exchange_name),
        CellValue::string(company.exchange_segment),
        CellValue::string(company.exchange_segment_name),
        CellValue::string(company.name),
        CellValue::string(company.date),
        CellValue::string(company.security_type),
        CellValue::string(company.iex_id),
        CellValue::string(company.region),
        CellValue::string(company.currency),
        CellValue::bool(company.is_enabled),
        CellValue::string(company.figi),
        CellValue::string(company.cik),
        CellValue::string(company.lei),
    ])
}

pub(crate) async fn list(
    client: &FinanceClient,
    sink: &mut dyn RowSink,
) -> Result<ListSummary, TableErrorKind> {
    let companies = client.get_public_companies().await?;
    drain(companies.into_iter().map(|company| Ok(to_row(company))), sink)
}
