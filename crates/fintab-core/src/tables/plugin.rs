use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use tracing::{debug, error};

use crate::client::FinanceClient;
use crate::config::Config;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::transform::normalize_query_cik;

use super::{
    companies, sec_filers, sec_filings, ListSummary, Qualifiers, RowSink, TableDef, TableError,
    TableErrorKind,
};

pub const PLUGIN_NAME: &str = "fintab";

/// Ceiling on concurrent list operations a host should run against this plugin.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// The relations this plugin serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Companies,
    SecFilers,
    SecFilings,
}

impl Relation {
    pub const ALL: [Self; 3] = [Self::Companies, Self::SecFilers, Self::SecFilings];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|relation| relation.name() == name)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Companies => companies::NAME,
            Self::SecFilers => sec_filers::NAME,
            Self::SecFilings => sec_filings::NAME,
        }
    }

    pub fn definition(self) -> TableDef {
        match self {
            Self::Companies => companies::definition(),
            Self::SecFilers => sec_filers::definition(),
            Self::SecFilings => sec_filings::definition(),
        }
    }

    const fn key_column(self) -> Option<&'static str> {
        match self {
            Self::Companies => None,
            Self::SecFilers | Self::SecFilings => Some("cik"),
        }
    }
}

/// Registration surface and entry point for list operations.
///
/// Holds immutable configuration and a stateless transport, so one instance can serve
/// concurrent calls.
#[derive(Clone)]
pub struct Plugin {
    config: Config,
    http: Arc<dyn HttpClient>,
}

impl Plugin {
    pub fn new(config: Config, http: Arc<dyn HttpClient>) -> Self {
        Self { config, http }
    }

    /// Environment configuration over the reqwest transport.
    pub fn from_env() -> Self {
        Self::new(Config::from_env(), Arc::new(ReqwestHttpClient::new()))
    }

    pub const fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub const fn max_concurrency(&self) -> usize {
        DEFAULT_MAX_CONCURRENCY
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tables(&self) -> Vec<TableDef> {
        Relation::ALL.into_iter().map(Relation::definition).collect()
    }

    pub fn table(&self, name: &str) -> Option<TableDef> {
        Relation::from_name(name).map(Relation::definition)
    }

    /// Run the list operation of `table`, pushing rows into `sink`.
    ///
    /// Checks run in order: table exists, required qualifier present, credential set,
    /// CIK well-formed. Only then is the single upstream request made.
    pub async fn list(
        &self,
        table: &str,
        qualifiers: &Qualifiers,
        sink: &mut dyn RowSink,
    ) -> Result<ListSummary, TableError> {
        let key = qualifiers.get("cik").map(str::to_owned);
        let result = self.list_inner(table, qualifiers, sink).await;

        match result {
            Ok(summary) => {
                debug!(
                    table,
                    cik = key.as_deref(),
                    rows = summary.rows_emitted,
                    stopped_early = summary.stopped_early,
                    "list completed"
                );
                Ok(summary)
            }
            Err(kind) => {
                let err = TableError::new(table, key, kind);
                error!(table, cik = err.key(), code = err.code(), error = %err, "list failed");
                Err(err)
            }
        }
    }

    async fn list_inner(
        &self,
        table: &str,
        qualifiers: &Qualifiers,
        sink: &mut dyn RowSink,
    ) -> Result<ListSummary, TableErrorKind> {
        let relation = Relation::from_name(table).ok_or(TableErrorKind::UnknownTable)?;

        let key = match relation.key_column() {
            Some(column) => Some(
                qualifiers
                    .get(column)
                    .ok_or(TableErrorKind::MissingQualifier { column })?,
            ),
            None => None,
        };

        let token = self.config.iex_api_key()?;
        let cik = key.map(normalize_query_cik).transpose()?;
        let client = FinanceClient::new(Arc::clone(&self.http), token, self.config.user_agent());

        match (relation, cik.as_deref()) {
            (Relation::Companies, _) => companies::list(&client, sink).await,
            (Relation::SecFilers, Some(cik)) => sec_filers::list(&client, cik, sink).await,
            (Relation::SecFilings, Some(cik)) => sec_filings::list(&client, cik, sink).await,
            (Relation::SecFilers | Relation::SecFilings, None) => {
                Err(TableErrorKind::MissingQualifier { column: "cik" })
            }
        }
    }
}

impl Debug for Plugin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("name", &PLUGIN_NAME)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
