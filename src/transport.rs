//! HTTP seam shared by schema retrieval and submission.
//!
//! All network traffic flows through the [`Transport`] trait so the engine can
//! be exercised against recorded responses in tests while production code uses
//! the `ureq`-backed implementation.

use crate::errors::FormError;

/// Remote form-builder service endpoint (schema dialect (a)).
pub const FORMS_API_ENDPOINT: &str =
    "https://ms-forms-service-production.digitalpfizer.com/api/v2/forms";

/// Header carrying the opaque builder-service credential.
pub const CONFIG_TOKEN_HEADER: &str = "x-config-token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

pub trait Transport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, FormError>;

    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<HttpResponse, FormError>;
}

/// Blocking `ureq` transport. Error statuses are surfaced as responses, not
/// errors, so callers can read rejection bodies.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.new_agent(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, FormError> {
        let mut request = self.agent.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request
            .call()
            .map_err(|err| FormError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|err| FormError::Transport(err.to_string()))?;
        Ok(HttpResponse { status, body })
    }

    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<HttpResponse, FormError> {
        let mut request = self.agent.post(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request
            .send_json(body)
            .map_err(|err| FormError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|err| FormError::Transport(err.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}
