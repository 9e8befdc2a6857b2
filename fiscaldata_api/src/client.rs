//! HTTP client for the US Treasury Fiscal Data API.

use std::time::Duration;

use url::Url;

use crate::{
    query::{DatasetQuery, Query},
    Error,
};

const USER_AGENT: &str = concat!("fiscaldata/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the Fiscal Data API.
///
/// The service is public and unauthenticated; requests carry only an accept
/// header and a static user agent. Each request builds a fresh
/// `reqwest::Client` with a bounded timeout (30 seconds unless overridden via
/// `FISCALDATA_TIMEOUT_SECS`), and is issued exactly once: failures surface
/// immediately, no retry.
pub struct Client {
    /// Base URL for the API. Defaults to
    /// `https://api.fiscaldata.treasury.gov/services/api/fiscal_service`.
    base_api_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production Fiscal Data service.
    pub fn new() -> Self {
        Self {
            base_api_url: "https://api.fiscaldata.treasury.gov/services/api/fiscal_service"
                .to_string(),
        }
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get_url(&self, path: &str, query: &impl Query) -> Result<Url, Error> {
        let endpoint = path.trim_matches('/');
        if endpoint.is_empty() {
            return Err(Error::InvalidEndpoint(path.to_string()));
        }
        let url = Url::parse(format!("{}/{}", &self.base_api_url, endpoint).as_str()).map_err(
            |e| {
                tracing::error!("Invalid URL constructed: {}", e);
                Error::Network(e.to_string())
            },
        )?;
        Ok(query.add_to_url(&url))
    }

    /// Issues a single GET against a dataset endpoint and returns the raw
    /// response body.
    ///
    /// The path is relative to the base URL, e.g.
    /// `"v2/accounting/od/avg_interest_rates"`; an empty path is rejected
    /// before any network activity. `DatasetQuery::default()` carries the
    /// single-oversized-page pagination suffix, so every request is
    /// paginated. A non-2xx status fails with [`Error::HttpStatus`], and a
    /// 2xx response with an empty body fails with [`Error::EmptyResponse`].
    pub async fn fetch(&self, path: &str, query: &DatasetQuery) -> Result<String, Error> {
        let url = self.get_url(path, query)?;
        tracing::debug!("GET {}", url);
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(request_timeout())
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Network(e.to_string())
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::Network(e.to_string())
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Network(e.to_string())
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        if body.trim().is_empty() {
            tracing::error!("Response body is empty for {}", path);
            return Err(Error::EmptyResponse);
        }

        Ok(body)
    }

    /// Fetches one page of the Average Interest Rates on U.S. Treasury
    /// Securities dataset.
    pub async fn get_avg_interest_rates(&self, query: &DatasetQuery) -> Result<String, Error> {
        self.fetch("v2/accounting/od/avg_interest_rates", query).await
    }

    /// Fetches one page of MSPD table 1, the Summary of Treasury Securities
    /// Outstanding.
    pub async fn get_debt_outstanding(&self, query: &DatasetQuery) -> Result<String, Error> {
        self.fetch("v1/debt/mspd/mspd_table_1", query).await
    }

    /// Fetches one page of MSPD table 2, the Statutory Debt Limit.
    pub async fn get_debt_limit(&self, query: &DatasetQuery) -> Result<String, Error> {
        self.fetch("v1/debt/mspd/mspd_table_2", query).await
    }
}

fn request_timeout() -> Duration {
    Duration::from_secs(env_u64("FISCALDATA_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS))
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    // The cut can land inside a multi-byte character; back up to a boundary.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...[truncated]", &body[..cut])
}
