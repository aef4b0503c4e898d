use serde::{Deserialize, Serialize};

/// Reference-data record for one listed security.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub symbol: Option<String>,
    pub exchange: Option<String>,
    pub exchange_suffix: Option<String>,
    pub exchange_name: Option<String>,
    pub exchange_segment: Option<String>,
    pub exchange_segment_name: Option<String>,
    pub name: Option<String>,
    /// Listing date exactly as sent upstream.
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub security_type: Option<String>,
    pub iex_id: Option<String>,
    pub region: Option<String>,
    pub currency: Option<String>,
    pub is_enabled: Option<bool>,
    pub figi: Option<String>,
    pub cik: Option<String>,
    pub lei: Option<String>,
}
