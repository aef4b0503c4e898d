//! Upstream API client for IEX Cloud reference data and SEC EDGAR submissions.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{Company, Submissions};
use crate::http_client::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};

pub const IEX_SYMBOLS_URL: &str = "https://cloud.iexapis.com/stable/ref-data/symbols";
pub const SEC_SUBMISSIONS_URL: &str = "https://data.sec.gov/submissions/";

/// Requests to this host carry the IEX token.
pub const IEX_HOST: &str = "cloud.iexapis.com";

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,\
image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9";

/// Used when a non-2xx body is not the upstream `{"value": ...}` shape.
pub const UNPARSEABLE_ERROR_MESSAGE: &str =
    "Oops! Something went wrong when parsing the error response.";

/// Non-2xx response from an upstream API.
///
/// `url` is the request URL before the token is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub method: HttpMethod,
    pub url: String,
    pub status: u16,
    pub message: Option<String>,
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.method, self.url, self.status)?;
        if let Some(message) = &self.message {
            write!(f, " {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    value: Option<String>,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Thin client over an [`HttpClient`] transport.
///
/// One instance is built per list operation; it holds nothing mutable.
#[derive(Clone)]
pub struct FinanceClient {
    http: Arc<dyn HttpClient>,
    iex_token: String,
    user_agent: String,
}

impl FinanceClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        iex_token: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            http,
            iex_token: iex_token.into(),
            user_agent: user_agent.into(),
        }
    }

    /// All symbols known to IEX Cloud.
    pub async fn get_public_companies(&self) -> Result<Vec<Company>, ClientError> {
        self.get(IEX_SYMBOLS_URL).await
    }

    /// Submissions document for a CIK. The CIK is used verbatim; callers normalize it.
    pub async fn get_submissions(&self, cik: &str) -> Result<Submissions, ClientError> {
        self.get(&format!("{SEC_SUBMISSIONS_URL}CIK{cik}.json")).await
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        let response = self.request::<()>(HttpMethod::Get, url, None).await?;
        decode(HttpMethod::Get, url, response)
    }

    /// Send one decorated request. A present `body` is sent as JSON.
    pub async fn request<B>(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&B>,
    ) -> Result<HttpResponse, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.build_request(method, url, body)?;
        debug!(%method, url, "sending upstream request");

        let response = self.http.execute(request).await?;
        debug!(%method, url, status = response.status, "upstream responded");
        Ok(response)
    }

    fn build_request<B>(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&B>,
    ) -> Result<HttpRequest, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = HttpRequest::new(method, url)
            .with_header("User-Agent", self.user_agent.as_str())
            .with_header("Accept", ACCEPT);

        if let Some(body) = body {
            let payload = serde_json::to_string(body).map_err(ClientError::Encode)?;
            request = request
                .with_header("Content-Type", "application/json")
                .with_body(payload);
        }

        if request.host().as_deref() == Some(IEX_HOST) {
            request = request.with_query_param("token", &self.iex_token);
        }

        Ok(request)
    }
}

fn decode<T: DeserializeOwned>(
    method: HttpMethod,
    url: &str,
    response: HttpResponse,
) -> Result<T, ClientError> {
    if !response.is_success() {
        let message = match serde_json::from_str::<UpstreamErrorBody>(&response.body) {
            Ok(body) => body.value,
            Err(_) => Some(String::from(UNPARSEABLE_ERROR_MESSAGE)),
        };
        return Err(ApiError {
            method,
            url: url.to_owned(),
            status: response.status,
            message,
        }
        .into());
    }

    serde_json::from_str(&response.body).map_err(ClientError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::FixtureHttpClient;

    fn client(http: Arc<FixtureHttpClient>) -> FinanceClient {
        FinanceClient::new(http, "pk_test", "fintab-tests")
    }

    #[tokio::test]
    async fn iex_requests_carry_token_and_headers() {
        let http = Arc::new(
            FixtureHttpClient::new().with_route(IEX_SYMBOLS_URL, HttpResponse::ok_json("[]")),
        );

        let companies = client(Arc::clone(&http))
            .get_public_companies()
            .await
            .expect("empty list");

        assert!(companies.is_empty());
        let requests = http.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, format!("{IEX_SYMBOLS_URL}?token=pk_test"));
        assert_eq!(
            requests[0].headers.get("user-agent").map(String::as_str),
            Some("fintab-tests")
        );
        assert_eq!(
            requests[0].headers.get("accept").map(String::as_str),
            Some(ACCEPT)
        );
        assert!(!requests[0].headers.contains_key("content-type"));
        assert_eq!(requests[0].body, None);
    }

    #[tokio::test]
    async fn sec_requests_never_carry_token() {
        let http = Arc::new(FixtureHttpClient::new().with_route(
            SEC_SUBMISSIONS_URL,
            HttpResponse::ok_json(r#"{"cik": "320193"}"#),
        ));

        let submissions = client(Arc::clone(&http))
            .get_submissions("0000320193")
            .await
            .expect("submissions");

        assert_eq!(submissions.cik.as_deref(), Some("320193"));
        let requests = http.recorded_requests();
        assert_eq!(
            requests[0].url,
            "https://data.sec.gov/submissions/CIK0000320193.json"
        );
        assert!(!requests[0].url.contains("token"));
    }

    #[tokio::test]
    async fn json_body_sets_content_type() {
        let http = Arc::new(FixtureHttpClient::new());
        let body = serde_json::json!({"company": "Google"});

        client(Arc::clone(&http))
            .request(HttpMethod::Post, "https://www.sec.gov/cgi-bin/cik_lookup", Some(&body))
            .await
            .expect("fixture answers 404 without failing transport");

        let requests = http.recorded_requests();
        assert_eq!(
            requests[0].headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"company":"Google"}"#));
    }

    #[tokio::test]
    async fn upstream_error_value_becomes_message() {
        let http = Arc::new(FixtureHttpClient::new().with_route(
            IEX_SYMBOLS_URL,
            HttpResponse::new(403, r#"{"value": "The API key provided is not valid."}"#),
        ));

        let error = client(http)
            .get_public_companies()
            .await
            .expect_err("403 must fail");

        let ClientError::Api(api) = error else {
            panic!("expected api error, got {error:?}");
        };
        assert_eq!(api.status, 403);
        assert_eq!(api.url, IEX_SYMBOLS_URL);
        assert_eq!(
            api.to_string(),
            format!("GET {IEX_SYMBOLS_URL}: 403 The API key provided is not valid.")
        );
    }

    #[tokio::test]
    async fn unparseable_error_body_uses_generic_message() {
        let http = Arc::new(FixtureHttpClient::new().with_route(
            SEC_SUBMISSIONS_URL,
            HttpResponse::new(404, "<html>Not Found</html>"),
        ));

        let error = client(http)
            .get_submissions("0000000001")
            .await
            .expect_err("404 must fail");

        match error {
            ClientError::Api(api) => {
                assert_eq!(api.message.as_deref(), Some(UNPARSEABLE_ERROR_MESSAGE));
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_success_body_is_decode_error() {
        let http = Arc::new(
            FixtureHttpClient::new().with_route(IEX_SYMBOLS_URL, HttpResponse::ok_json("{")),
        );

        let error = client(http).get_public_companies().await.expect_err("bad json");
        assert!(matches!(error, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn transport_failure_is_surfaced() {
        let http = Arc::new(
            FixtureHttpClient::new()
                .with_failure(IEX_SYMBOLS_URL, HttpError::new("connection failed: refused")),
        );

        let error = client(http).get_public_companies().await.expect_err("fails");
        assert_eq!(error.to_string(), "transport error: connection failed: refused");
    }
}
