//! Mock transport for testing without API access.
//!
//! Serves canned bodies keyed by URL path and records every request so tests
//! can assert on what was (or was not) sent.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use reqwest::Url;

use super::transport::{RawResponse, Transport};
use crate::error::MbtaError;

/// Body returned for paths with no canned response.
const NOT_FOUND_BODY: &str =
    r#"{"errors":[{"status":"404","title":"Resource Not Found","code":"not_found"}]}"#;

/// A request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// URL path, e.g. `/stops/place-sstat`.
    pub path: String,
    /// Query pairs in the order they were sent.
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of the first query pair named `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Transport that serves canned responses.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: HashMap<String, RawResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer GETs of `path` with `status` and `body`.
    pub fn respond(mut self, path: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        self.responses
            .insert(path.into(), RawResponse::new(status, body));
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Transport for MockTransport {
    async fn get(&self, url: &Url, query: &[(String, String)]) -> Result<RawResponse, MbtaError> {
        let path = url.path().to_string();

        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                path: path.clone(),
                query: query.to_vec(),
            });

        Ok(self
            .responses
            .get(&path)
            .cloned()
            .unwrap_or_else(|| RawResponse::new(404, NOT_FOUND_BODY)))
    }
}
