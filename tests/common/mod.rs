#![allow(dead_code)]

//! Shared recording transport used by the integration suites.

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde_json::Value;

use webform_core::errors::FormError;
use webform_core::transport::{HttpResponse, Transport};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// In-memory transport: stubbed responses keyed by URL, every request
/// recorded in order.
#[derive(Default)]
pub struct MockTransport {
    responses: RefCell<BTreeMap<String, HttpResponse>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stub(&self, url: &str, status: u16, body: &str) {
        self.responses.borrow_mut().insert(
            url.to_string(),
            HttpResponse {
                status,
                body: body.to_string(),
            },
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self, method: &'static str, url: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.method == method && request.url == url)
            .count()
    }

    pub fn last_body(&self) -> Option<Value> {
        self.requests
            .borrow()
            .iter()
            .rev()
            .find_map(|request| request.body.clone())
    }

    fn record(&self, method: &'static str, url: &str, headers: &[(&str, &str)], body: Option<Value>) {
        self.requests.borrow_mut().push(RecordedRequest {
            method,
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            body,
        });
    }

    fn respond(&self, url: &str) -> Result<HttpResponse, FormError> {
        self.responses
            .borrow()
            .get(url)
            .cloned()
            .ok_or_else(|| FormError::Transport(format!("no stubbed response for {url}")))
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, FormError> {
        self.record("GET", url, headers, None);
        self.respond(url)
    }

    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &Value,
    ) -> Result<HttpResponse, FormError> {
        self.record("POST", url, headers, Some(body.clone()));
        self.respond(url)
    }
}
