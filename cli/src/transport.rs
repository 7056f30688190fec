use std::time::Duration;

use anyhow::{Context, Result};
use dashboard_core::{DashboardConfig, HttpReply, Transport, TransportError};
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::Client;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// GraphQL transport over reqwest. Outside a browser the session cookie has to
/// be supplied explicitly.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    endpoint: String,
    session: Option<String>,
}

impl ReqwestTransport {
    pub fn new(config: &DashboardConfig, session: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.query_url(),
            session: session.filter(|value| !value.trim().is_empty()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for ReqwestTransport {
    async fn post(&self, body: String) -> Result<HttpReply, TransportError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(session) = &self.session {
            request = request.header(COOKIE, session);
        }

        let response = request
            .send()
            .await
            .map_err(|err| TransportError::Request(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::Request(err.to_string()))?;

        log::debug!(target: "transport", "POST {} -> {status} ({} bytes)", self.endpoint, body.len());
        Ok(HttpReply { status, body })
    }
}
