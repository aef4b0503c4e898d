use fintab_core::{Plugin, Row, TableError, TableErrorKind};
use fintab_warehouse::{QueryGuardrails, QueryResult, Warehouse};
use tracing::info;

use crate::cli::SqlArgs;
use crate::error::CliError;
use crate::output;

pub async fn run(args: &SqlArgs, plugin: &Plugin, pretty: bool) -> Result<(), CliError> {
    let result = execute(args, plugin).await?;
    output::render(&result, pretty)
}

/// Load every `--load` relation, then run the query against them.
async fn execute(args: &SqlArgs, plugin: &Plugin) -> Result<QueryResult, CliError> {
    let query = args.query.trim();
    if query.is_empty() {
        return Err(CliError::Usage(String::from("query must not be empty")));
    }

    let warehouse = match &args.database {
        Some(path) => Warehouse::open(path)?,
        None => Warehouse::open_in_memory()?,
    };

    let qualifiers = super::qualifiers(args.cik.as_deref());
    for name in &args.tables {
        let table = plugin.table(name).ok_or_else(|| {
            TableError::new(name, args.cik.clone(), TableErrorKind::UnknownTable)
        })?;

        let mut rows: Vec<Row> = Vec::new();
        plugin.list(name, &qualifiers, &mut rows).await?;
        let loaded = warehouse.load_relation(&table, &rows)?;
        info!(table = %name, rows = loaded, "relation loaded");
    }

    Ok(warehouse.execute_query(
        query,
        QueryGuardrails {
            max_rows: args.max_rows,
            query_timeout_ms: args.query_timeout_ms,
        },
    )?)
}
