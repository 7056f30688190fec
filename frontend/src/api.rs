use std::rc::Rc;

use dashboard_core::{Api, DashboardConfig, HttpReply, Transport, TransportError};
use gloo_net::http::Request;
use web_sys::RequestCredentials;

/// Settings baked in at build time (`trunk build` reads them from the environment).
pub fn build_config() -> DashboardConfig {
    DashboardConfig::from_lookup(|key| match key {
        dashboard_core::config::BACKEND_URL_ENV => option_env!("DASHBOARD_BACKEND_URL").map(str::to_string),
        dashboard_core::config::ENABLE_NOTIFICATION_ENV => {
            option_env!("DASHBOARD_ENABLE_NOTIFICATION").map(str::to_string)
        }
        _ => None,
    })
}

/// Posts GraphQL requests with `fetch`, sending the session cookie along.
#[derive(Debug, Clone)]
pub struct BrowserTransport {
    endpoint: String,
}

impl BrowserTransport {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            endpoint: config.query_url(),
        }
    }
}

impl Transport for BrowserTransport {
    async fn post(&self, body: String) -> Result<HttpReply, TransportError> {
        let request = Request::post(&self.endpoint)
            .credentials(RequestCredentials::Include)
            .header("Content-Type", "application/json")
            .body(body)
            .map_err(|err| TransportError::Request(err.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|err| TransportError::Request(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::Request(err.to_string()))?;

        Ok(HttpReply { status, body })
    }
}

pub type BrowserApi = Rc<Api<BrowserTransport>>;

pub fn connect(config: &DashboardConfig) -> BrowserApi {
    log::info!("using GraphQL endpoint {}", config.query_url());
    Rc::new(Api::new(BrowserTransport::new(config)))
}
