use std::collections::HashSet;
use std::sync::Arc;

use fintab_core::{
    CellValue, ColumnType, Config, FixtureHttpClient, HttpResponse, Plugin, Qualifiers, Row,
    TableDef,
};

const SYMBOLS: &str = r#"[
    {"symbol": "AAPL", "exchange": "NAS", "exchangeSuffix": "", "exchangeName": "Nasdaq All Markets",
     "exchangeSegment": "XNGS", "exchangeSegmentName": "Nasdaq Global Select", "name": "Apple Inc",
     "date": "2023-02-03", "type": "cs", "iexId": "IEX_4D48333344362D52", "region": "US",
     "currency": "USD", "isEnabled": true, "figi": "BBG000B9XRY4", "cik": "0000320193", "lei": null}
]"#;

const SUBMISSIONS: &str = r#"{
    "cik": "320193",
    "entityType": "operating",
    "sic": "3571",
    "sicDescription": "Electronic Computers",
    "insiderTransactionForOwnerExists": 0,
    "insiderTransactionForIssuerExists": 1,
    "name": "Apple Inc.",
    "tickers": ["AAPL"],
    "exchanges": ["Nasdaq"],
    "addresses": {"mailing": {"street1": "ONE APPLE PARK WAY", "street2": null, "city": "CUPERTINO"}},
    "formerNames": [{"name": "APPLE INC", "from": "2007-01-10T05:00:00.000Z", "to": "2019-08-05T04:00:00.000Z"}],
    "filings": {
        "recent": {
            "accessionNumber": ["0001214659-23-000970", "0000320193-23-000006"],
            "filingDate": ["2023-01-24", "2023-02-03"],
            "reportDate": ["2022-12-31", "2022-12-31"],
            "acceptanceDateTime": ["2023-01-24T16:31:21.000Z", "2023-02-02T18:01:30.000Z"],
            "act": ["33", "34"],
            "form": ["424B2", "10-Q"],
            "fileNumber": ["333-", "001-36743"],
            "filmNumber": ["23547193", "23585017"],
            "items": ["", ""],
            "size": [4431452, 10234],
            "isXBRL": [0, 1],
            "isInlineXBRL": [0, 1],
            "primaryDocument": ["doc.htm", "aapl-20221231.htm"],
            "primaryDocDescription": ["", "10-Q"]
        }
    }
}"#;

fn plugin() -> Plugin {
    let http = FixtureHttpClient::new()
        .with_route(
            "https://cloud.iexapis.com/stable/ref-data/symbols",
            HttpResponse::ok_json(SYMBOLS),
        )
        .with_route(
            "https://data.sec.gov/submissions/",
            HttpResponse::ok_json(SUBMISSIONS),
        );
    Plugin::new(Config::default().with_iex_api_key("pk_test"), Arc::new(http))
}

fn qualifiers_for(table: &TableDef) -> Qualifiers {
    table
        .key_columns
        .iter()
        .fold(Qualifiers::new(), |qualifiers, column| {
            qualifiers.with(*column, "320193")
        })
}

fn cell_matches(cell: &CellValue, column_type: ColumnType) -> bool {
    matches!(
        (cell, column_type),
        (CellValue::Null, _)
            | (CellValue::String(_), ColumnType::String)
            | (CellValue::Int(_), ColumnType::Int)
            | (CellValue::Bool(_), ColumnType::Bool)
            | (CellValue::Json(_), ColumnType::Json)
            | (CellValue::Timestamp(_), ColumnType::Timestamp)
    )
}

#[test]
fn table_definitions_are_well_formed() {
    for table in plugin().tables() {
        assert!(!table.description.is_empty(), "{} lacks a description", table.name);

        let mut seen = HashSet::new();
        for column in &table.columns {
            assert!(seen.insert(column.name), "{} repeats column {}", table.name, column.name);
            assert!(
                column
                    .name
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c == '_'),
                "{}.{} is not snake_case",
                table.name,
                column.name
            );
            assert!(!column.description.is_empty());
        }

        for key in &table.key_columns {
            assert!(
                table.column_index(key).is_some(),
                "{} key {key} is not a column",
                table.name
            );
        }
    }
}

#[tokio::test]
async fn every_relation_emits_rows_matching_its_definition() {
    let plugin = plugin();

    for table in plugin.tables() {
        let mut rows: Vec<Row> = Vec::new();
        let summary = plugin
            .list(table.name, &qualifiers_for(&table), &mut rows)
            .await
            .unwrap_or_else(|err| panic!("{} failed: {err}", table.name));

        assert!(!rows.is_empty(), "{} emitted no rows", table.name);
        assert_eq!(summary.rows_emitted, rows.len());
        assert!(!summary.stopped_early);

        for row in &rows {
            assert_eq!(row.cells().len(), table.columns.len(), "{} row width", table.name);
            for (column, cell) in table.columns.iter().zip(row.cells()) {
                assert!(
                    cell_matches(cell, column.column_type),
                    "{}.{} holds {cell:?} but is declared {:?}",
                    table.name,
                    column.name,
                    column.column_type
                );
            }
        }
    }
}

#[tokio::test]
async fn keyed_relations_echo_normalized_key() {
    let plugin = plugin();

    for table in plugin.tables().into_iter().filter(|t| !t.key_columns.is_empty()) {
        let mut rows: Vec<Row> = Vec::new();
        plugin
            .list(table.name, &qualifiers_for(&table), &mut rows)
            .await
            .expect("list succeeds");

        for row in &rows {
            assert_eq!(
                row.get(&table, "cik"),
                Some(&CellValue::String(String::from("0000320193"))),
                "{} must echo the padded CIK",
                table.name
            );
        }
    }
}

#[test]
fn table_definitions_serialize_for_hosts() {
    let rendered = serde_json::to_value(plugin().tables()).expect("serializable");
    let tables = rendered.as_array().expect("array");

    assert_eq!(tables.len(), 3);
    assert_eq!(tables[2]["name"], "sec_filings");
    assert_eq!(tables[2]["key_columns"][0], "cik");
    assert_eq!(tables[2]["columns"][4]["type"], "timestamp");
}
