mod list;
mod sql;
mod tables;

use fintab_core::{Plugin, Qualifiers};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli, plugin: &Plugin) -> Result<(), CliError> {
    match &cli.command {
        Command::Tables => tables::run(plugin, cli.pretty),
        Command::List(args) => list::run(args, plugin).await,
        Command::Sql(args) => sql::run(args, plugin, cli.pretty).await,
    }
}

fn qualifiers(cik: Option<&str>) -> Qualifiers {
    match cik {
        Some(cik) => Qualifiers::new().with("cik", cik),
        None => Qualifiers::new(),
    }
}
