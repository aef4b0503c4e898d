use std::fmt::{Debug, Formatter};

use crate::error::ConfigError;

/// Environment variable holding the IEX Cloud token.
pub const IEX_API_KEY_ENV: &str = "IEX_API_KEY";
/// Environment variable overriding the outgoing User-Agent.
pub const USER_AGENT_ENV: &str = "FINTAB_USER_AGENT";

/// EDGAR refuses library default agents, so a browser agent is sent unless overridden.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";

/// Adapter configuration, built once and handed to the [`Plugin`](crate::Plugin).
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    iex_api_key: Option<String>,
    user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            iex_api_key: None,
            user_agent: String::from(DEFAULT_USER_AGENT),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            iex_api_key: read(IEX_API_KEY_ENV),
            user_agent: read(USER_AGENT_ENV).unwrap_or_else(|| String::from(DEFAULT_USER_AGENT)),
        }
    }

    pub fn with_iex_api_key(mut self, key: impl Into<String>) -> Self {
        self.iex_api_key = Some(key.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The IEX token, or [`ConfigError::MissingCredential`] when unset.
    pub fn iex_api_key(&self) -> Result<&str, ConfigError> {
        self.iex_api_key
            .as_deref()
            .ok_or(ConfigError::MissingCredential {
                name: IEX_API_KEY_ENV,
            })
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "iex_api_key",
                &self.iex_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
