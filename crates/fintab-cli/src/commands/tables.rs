use fintab_core::{Plugin, TableDef};
use serde::Serialize;

use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct TablesResponse {
    plugin: &'static str,
    max_concurrency: usize,
    tables: Vec<TableDef>,
}

pub fn run(plugin: &Plugin, pretty: bool) -> Result<(), CliError> {
    output::render(
        &TablesResponse {
            plugin: plugin.name(),
            max_concurrency: plugin.max_concurrency(),
            tables: plugin.tables(),
        },
        pretty,
    )
}
