use std::io::{self, Write};
use std::ops::ControlFlow;

use fintab_core::{Row, RowSink, TableDef};
use serde::Serialize;

use crate::error::CliError;

/// Print one JSON document on stdout.
pub fn render<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{payload}");
    Ok(())
}

/// Writes each emitted row as one JSON object per line.
///
/// Breaks the list operation once `limit` rows are written or a write fails; the
/// failure is kept for [`NdjsonSink::finish`].
pub struct NdjsonSink<W: Write + Send> {
    table: TableDef,
    writer: W,
    limit: Option<usize>,
    written: usize,
    failure: Option<CliError>,
}

impl<W: Write + Send> NdjsonSink<W> {
    pub fn new(table: TableDef, writer: W, limit: Option<usize>) -> Self {
        Self {
            table,
            writer,
            limit,
            written: 0,
            failure: None,
        }
    }

    fn write_row(&mut self, row: &Row) -> Result<(), CliError> {
        serde_json::to_writer(&mut self.writer, &row.to_json_object(&self.table))?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flush the writer, surfacing any failure seen while emitting.
    pub fn finish(mut self) -> Result<usize, CliError> {
        if let Some(failure) = self.failure.take() {
            return Err(failure);
        }
        self.writer.flush()?;
        Ok(self.written)
    }
}

impl<W: Write + Send> RowSink for NdjsonSink<W> {
    fn emit(&mut self, row: Row) -> ControlFlow<()> {
        if let Err(failure) = self.write_row(&row) {
            self.failure = Some(failure);
            return ControlFlow::Break(());
        }
        self.written += 1;

        match self.limit {
            Some(limit) if self.written >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }
}

/// Line-buffered stdout for streaming rows.
pub fn stdout_writer() -> io::LineWriter<io::Stdout> {
    io::LineWriter::new(io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintab_core::{CellValue, ColumnDef, ColumnType};

    fn table() -> TableDef {
        TableDef {
            name: "companies",
            description: "companies",
            columns: vec![
                ColumnDef::new("symbol", ColumnType::String, "symbol"),
                ColumnDef::new("is_enabled", ColumnType::Bool, "enabled"),
            ],
            key_columns: Vec::new(),
        }
    }

    fn row(symbol: &str) -> Row {
        Row::new(vec![
            CellValue::String(symbol.to_owned()),
            CellValue::Bool(true),
        ])
    }

    #[test]
    fn writes_one_object_per_line() {
        let mut sink = NdjsonSink::new(table(), Vec::new(), None);
        assert_eq!(sink.emit(row("A")), ControlFlow::Continue(()));
        assert_eq!(sink.emit(row("AA")), ControlFlow::Continue(()));

        let output = String::from_utf8(sink.writer.clone()).expect("utf8");
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).expect("one object per line"))
            .collect();
        assert_eq!(
            lines,
            [
                serde_json::json!({"symbol": "A", "is_enabled": true}),
                serde_json::json!({"symbol": "AA", "is_enabled": true}),
            ]
        );
        assert_eq!(sink.finish().expect("flush"), 2);
    }

    #[test]
    fn breaks_once_limit_is_reached() {
        let mut sink = NdjsonSink::new(table(), Vec::new(), Some(1));
        assert_eq!(sink.emit(row("A")), ControlFlow::Break(()));
        assert_eq!(sink.finish().expect("flush"), 1);
    }
}
