use crate::details::{ChatEnvelope, LiveDetails, LiveDetailsEnvelope};
use crate::error::{ClientError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// The deployed assistant service the published map talks to.
pub const DEFAULT_BASE_URL: &str = "https://nitda.onrender.com";

/// Client for the remote assistant API: one endpoint for live institution
/// details, one for scoped chatbot queries. Requests are single-shot; there
/// is no retry, no rate limiting and no cancellation of in-flight reads.
/// Clones share the underlying connection pool.
#[derive(Clone)]
pub struct AssistantClient {
    client: Client,
    base_url: Url,
}

impl AssistantClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, 10)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("Invalid base URL: {}", e)))?;

        let client = Client::builder()
            .user_agent(concat!("Edumap/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("Invalid endpoint {}: {}", path, e)))
    }

    /// `GET /live_details?inst_name=<name>`. The name is passed as a query
    /// pair so encoding is handled for us.
    pub async fn live_details(&self, inst_name: &str) -> Result<LiveDetails> {
        debug!("Fetching live details for {}", inst_name);

        let response = self
            .client
            .get(self.endpoint("/live_details")?)
            .query(&[("inst_name", inst_name)])
            .send()
            .await?
            .error_for_status()?;

        let envelope: LiveDetailsEnvelope = response.json().await?;
        Ok(envelope.ai_response)
    }

    /// `GET /chatbot?query=<text>&inst_name=<name>`: one free-text question
    /// scoped to an institution, one reply string back.
    pub async fn ask(&self, query: &str, inst_name: &str) -> Result<String> {
        debug!("Asking assistant about {}: {}", inst_name, query);

        let response = self
            .client
            .get(self.endpoint("/chatbot")?)
            .query(&[("query", query), ("inst_name", inst_name)])
            .send()
            .await?
            .error_for_status()?;

        let envelope: ChatEnvelope = response.json().await?;
        Ok(envelope.ai_response)
    }
}
