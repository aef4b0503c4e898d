use fintab_core::{Plugin, TableError, TableErrorKind};
use tracing::info;

use crate::cli::ListArgs;
use crate::error::CliError;
use crate::output::{self, NdjsonSink};

pub async fn run(args: &ListArgs, plugin: &Plugin) -> Result<(), CliError> {
    if args.limit == Some(0) {
        return Err(CliError::Usage(String::from("--limit must be greater than zero")));
    }

    let table = plugin.table(&args.table).ok_or_else(|| {
        TableError::new(&args.table, args.cik.clone(), TableErrorKind::UnknownTable)
    })?;

    let mut sink = NdjsonSink::new(table, output::stdout_writer(), args.limit);
    let summary = plugin
        .list(&args.table, &super::qualifiers(args.cik.as_deref()), &mut sink)
        .await;
    // A write failure breaks the list early; report it ahead of the summary.
    let written = sink.finish()?;
    let summary = summary?;

    info!(
        table = %args.table,
        rows = written,
        stopped_early = summary.stopped_early,
        "list finished"
    );
    Ok(())
}
