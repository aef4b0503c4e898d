//! Materialization of relation rows into `DuckDB` tables.

use ::duckdb::types::Value as DuckValue;
use ::duckdb::{params_from_iter, Connection};
use fintab_core::{CellValue, ColumnType, Row, TableDef, UtcDateTime};

use crate::WarehouseError;

/// `DuckDB` type a relation column is stored as. Json cells are kept as text.
pub const fn sql_type(column_type: ColumnType) -> &'static str {
    match column_type {
        ColumnType::String | ColumnType::Json => "VARCHAR",
        ColumnType::Int => "BIGINT",
        ColumnType::Bool => "BOOLEAN",
        ColumnType::Timestamp => "TIMESTAMP",
    }
}

pub(crate) fn create_table_sql(table: &TableDef) -> String {
    let columns = table
        .columns
        .iter()
        .map(|column| format!("{} {}", quote_identifier(column.name), sql_type(column.column_type)))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "CREATE OR REPLACE TABLE {} ({columns})",
        quote_identifier(table.name)
    )
}

pub(crate) fn insert_sql(table: &TableDef) -> String {
    let names = table
        .columns
        .iter()
        .map(|column| quote_identifier(column.name))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = table
        .columns
        .iter()
        .map(|column| match column.column_type {
            ColumnType::Timestamp => "TRY_CAST(? AS TIMESTAMP)",
            _ => "?",
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({names}) VALUES ({placeholders})",
        quote_identifier(table.name)
    )
}

/// Replace `table` with `rows` inside one transaction; an early return rolls it back.
/// Returns the number of rows written.
pub(crate) fn load_rows(
    connection: &Connection,
    table: &TableDef,
    rows: &[Row],
) -> Result<usize, WarehouseError> {
    let transaction = connection.unchecked_transaction()?;
    transaction.execute_batch(&create_table_sql(table))?;

    let mut insert = transaction.prepare(&insert_sql(table))?;
    for (index, row) in rows.iter().enumerate() {
        if row.cells().len() != table.columns.len() {
            return Err(WarehouseError::RowShape {
                table: table.name.to_owned(),
                index,
                expected: table.columns.len(),
                actual: row.cells().len(),
            });
        }
        insert.execute(params_from_iter(row.cells().iter().map(to_duck_value)))?;
    }
    drop(insert);

    transaction.commit()?;
    Ok(rows.len())
}

fn to_duck_value(cell: &CellValue) -> DuckValue {
    match cell {
        CellValue::Null => DuckValue::Null,
        CellValue::String(value) => DuckValue::Text(value.clone()),
        CellValue::Int(value) => DuckValue::BigInt(*value),
        CellValue::Bool(value) => DuckValue::Boolean(*value),
        CellValue::Json(value) => DuckValue::Text(value.to_string()),
        CellValue::Timestamp(value) => DuckValue::Text(timestamp_literal(*value)),
    }
}

/// `YYYY-MM-DD HH:MM:SS.ffffff`, which `DuckDB` casts to `TIMESTAMP` without a zone.
fn timestamp_literal(value: UtcDateTime) -> String {
    let ts = value.into_inner();
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:06}",
        ts.year(),
        u8::from(ts.month()),
        ts.day(),
        ts.hour(),
        ts.minute(),
        ts.second(),
        ts.microsecond()
    )
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintab_core::ColumnDef;

    fn table() -> TableDef {
        TableDef {
            name: "sec_filings",
            description: "filings",
            columns: vec![
                ColumnDef::new("cik", ColumnType::String, "cik"),
                ColumnDef::new("size", ColumnType::Int, "size"),
                ColumnDef::new("acceptance_date_time", ColumnType::Timestamp, "accepted"),
                ColumnDef::new("tickers", ColumnType::Json, "tickers"),
            ],
            key_columns: vec!["cik"],
        }
    }

    #[test]
    fn create_statement_maps_column_types() {
        assert_eq!(
            create_table_sql(&table()),
            "CREATE OR REPLACE TABLE \"sec_filings\" (\"cik\" VARCHAR, \"size\" BIGINT, \
             \"acceptance_date_time\" TIMESTAMP, \"tickers\" VARCHAR)"
        );
    }

    #[test]
    fn insert_statement_casts_timestamps() {
        assert_eq!(
            insert_sql(&table()),
            "INSERT INTO \"sec_filings\" (\"cik\", \"size\", \"acceptance_date_time\", \"tickers\") \
             VALUES (?, ?, TRY_CAST(? AS TIMESTAMP), ?)"
        );
    }

    #[test]
    fn timestamp_literal_drops_zone_suffix() {
        let ts = UtcDateTime::parse("2023-02-02T18:01:30.000Z").expect("timestamp");
        assert_eq!(timestamp_literal(ts), "2023-02-02 18:01:30.000000");
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }
}
