use url::Url;

use crate::config::ApiConfig;
use crate::error::{SkylineError, SkylineResult};

/// Raw result of one POST.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a GraphQL request body. Only connection-level failures are errors;
/// the status code is reported back to the caller.
pub trait Transport: Send + Sync {
    fn post_graphql(&self, endpoint: &Url, token: &str, body: &str) -> SkylineResult<HttpResponse>;
}

/// Blocking `reqwest` transport.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ApiConfig) -> SkylineResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SkylineError::request(format!("client error: {}", e)))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn post_graphql(&self, endpoint: &Url, token: &str, body: &str) -> SkylineResult<HttpResponse> {
        let response = self
            .client
            .post(endpoint.as_str())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .bearer_auth(token)
            .body(body.to_owned())
            .send()
            .map_err(SkylineError::request)?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| SkylineError::request(format!("failed to read body: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
