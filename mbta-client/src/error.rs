//! Error types.
//!
//! Failures fall into four groups: preconditions checked before any request
//! is sent, errors the API reports through its JSON:API `errors` envelope,
//! responses that cannot be mapped to records, and transport or status
//! failures outside the documented set.

use std::fmt;

use serde::Deserialize;

use crate::endpoint::ResourceKind;

/// Maximum number of body characters kept in error messages.
pub(crate) const BODY_EXCERPT_CHARS: usize = 500;

/// 400: the server rejected the request parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadRequest {
    pub status: String,
    /// Offending query parameter, when the API names one.
    pub source: Option<String>,
    pub detail: String,
    pub code: String,
}

/// 403: the API key is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forbidden {
    pub status: String,
    pub code: String,
}

/// 404: no resource with the requested id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFound {
    pub status: String,
    pub title: String,
    /// Parameter that named the missing resource.
    pub source: String,
    pub code: String,
}

/// 406: the `Accept` header was not acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotAcceptable {
    pub status: String,
    pub detail: String,
    pub code: String,
}

/// 429: rate limited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooManyRequests {
    pub status: String,
    pub detail: String,
    pub code: String,
}

impl fmt::Display for BadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.detail)
    }
}

impl fmt::Display for Forbidden {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.code)
    }
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.status, self.title, self.source)
    }
}

impl fmt::Display for NotAcceptable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.detail)
    }
}

impl fmt::Display for TooManyRequests {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.detail)
    }
}

/// Errors from the MBTA client.
#[derive(Debug, thiserror::Error)]
pub enum MbtaError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A success response was not valid JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// No API key configured
    #[error("no API key: set MBTA_API_KEY")]
    MissingApiKey,

    /// Base URL could not be used to build endpoint URLs
    #[error("invalid base URL {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    /// A collection query lacked the filter its endpoint requires
    #[error("{kind} queries require at least one {expected} filter")]
    MissingFilter {
        kind: ResourceKind,
        expected: &'static str,
    },

    /// Only one of latitude and longitude was given
    #[error("{kind} queries need latitude and longitude together")]
    UnpairedCoordinates { kind: ResourceKind },

    /// A get-by-id call with a blank id
    #[error("{kind} lookup needs a non-empty id")]
    EmptyId { kind: ResourceKind },

    /// An id that cannot be used as a single path segment
    #[error("{kind} id {id:?} is not a valid path segment")]
    InvalidId { kind: ResourceKind, id: String },

    /// The transport was shut down while a request waited for a slot
    #[error("transport closed")]
    TransportClosed,

    /// A parameter the endpoint does not accept
    #[error("{parameter} is not supported for {kind}")]
    UnsupportedParameter {
        kind: ResourceKind,
        parameter: String,
    },

    #[error("bad request: {0}")]
    BadRequest(BadRequest),

    #[error("forbidden: {0}")]
    Forbidden(Forbidden),

    #[error("not found: {0}")]
    NotFound(NotFound),

    #[error("not acceptable: {0}")]
    NotAcceptable(NotAcceptable),

    #[error("too many requests: {0}")]
    TooManyRequests(TooManyRequests),

    /// A status outside the documented set
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// A response could not be mapped to a record
    #[error("malformed {kind} response: {message}")]
    Malformed { kind: ResourceKind, message: String },
}

/// JSON:API error document.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorDocument {
    errors: Vec<ErrorObject>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorObject {
    status: Option<String>,
    title: Option<String>,
    detail: Option<String>,
    code: Option<String>,
    source: Option<ErrorSource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorSource {
    parameter: Option<String>,
}

impl MbtaError {
    /// Map one of the documented error statuses to its typed error.
    ///
    /// Reads the first entry of the body's `errors` array. Fields the API
    /// left out become empty strings (the status falls back to the numeric
    /// code), so a recognised status is never lost to a sparse body.
    /// Returns `None` for statuses outside 400/403/404/406/429.
    pub fn from_error_response(status: u16, body: &str) -> Option<MbtaError> {
        if !matches!(status, 400 | 403 | 404 | 406 | 429) {
            return None;
        }

        let document: ErrorDocument = serde_json::from_str(body).unwrap_or_default();
        let error = document.errors.into_iter().next().unwrap_or_default();

        let status_text = error.status.unwrap_or_else(|| status.to_string());
        let parameter = error.source.and_then(|s| s.parameter);
        let detail = error.detail.unwrap_or_default();
        let code = error.code.unwrap_or_default();

        Some(match status {
            400 => MbtaError::BadRequest(BadRequest {
                status: status_text,
                source: parameter,
                detail,
                code,
            }),
            403 => MbtaError::Forbidden(Forbidden {
                status: status_text,
                code,
            }),
            404 => MbtaError::NotFound(NotFound {
                status: status_text,
                title: error.title.unwrap_or_default(),
                source: parameter.unwrap_or_default(),
                code,
            }),
            406 => MbtaError::NotAcceptable(NotAcceptable {
                status: status_text,
                detail,
                code,
            }),
            _ => MbtaError::TooManyRequests(TooManyRequests {
                status: status_text,
                detail,
                code,
            }),
        })
    }

    /// HTTP status behind this error, for server-reported failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            MbtaError::BadRequest(_) => Some(400),
            MbtaError::Forbidden(_) => Some(403),
            MbtaError::NotFound(_) => Some(404),
            MbtaError::NotAcceptable(_) => Some(406),
            MbtaError::TooManyRequests(_) => Some(429),
            MbtaError::UnexpectedStatus { status, .. } => Some(*status),
            MbtaError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// First [`BODY_EXCERPT_CHARS`] characters of a response body.
pub(crate) fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_fields() {
        let body = r#"{"errors":[{"status":"404","title":"Not Found","source":{"parameter":"id"},"code":"not_found"}]}"#;
        let err = MbtaError::from_error_response(404, body).unwrap();

        match &err {
            MbtaError::NotFound(e) => {
                assert_eq!(e.status, "404");
                assert_eq!(e.title, "Not Found");
                assert_eq!(e.source, "id");
                assert_eq!(e.code, "not_found");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.to_string(), "not found: 404 Not Found: id");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn bad_request_with_and_without_source() {
        let body = r#"{"errors":[{"status":"400","source":{"parameter":"filter[date]"},"detail":"Invalid date","code":"bad_request"}]}"#;
        match MbtaError::from_error_response(400, body).unwrap() {
            MbtaError::BadRequest(e) => {
                assert_eq!(e.source.as_deref(), Some("filter[date]"));
                assert_eq!(e.to_string(), "400: Invalid date");
            }
            other => panic!("unexpected error: {other}"),
        }

        let body = r#"{"errors":[{"status":"400","detail":"Unsupported include","code":"bad_request"}]}"#;
        match MbtaError::from_error_response(400, body).unwrap() {
            MbtaError::BadRequest(e) => assert_eq!(e.source, None),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn forbidden_displays_code() {
        let body = r#"{"errors":[{"status":"403","code":"forbidden"}]}"#;
        let err = MbtaError::from_error_response(403, body).unwrap();
        assert_eq!(err.to_string(), "forbidden: 403: forbidden");
    }

    #[test]
    fn not_acceptable_and_rate_limit() {
        let body = r#"{"errors":[{"status":"406","detail":"Not acceptable","code":"not_acceptable"}]}"#;
        assert!(matches!(
            MbtaError::from_error_response(406, body),
            Some(MbtaError::NotAcceptable(_))
        ));

        let body = r#"{"errors":[{"status":"429","detail":"You have exceeded your allowed usage rate.","code":"rate_limited"}]}"#;
        match MbtaError::from_error_response(429, body).unwrap() {
            MbtaError::TooManyRequests(e) => {
                assert_eq!(e.code, "rate_limited");
                assert_eq!(
                    e.to_string(),
                    "429: You have exceeded your allowed usage rate."
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn sparse_body_keeps_status() {
        let err = MbtaError::from_error_response(429, "rate limited").unwrap();
        match err {
            MbtaError::TooManyRequests(e) => {
                assert_eq!(e.status, "429");
                assert_eq!(e.detail, "");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unmapped_statuses() {
        assert!(MbtaError::from_error_response(200, "{}").is_none());
        assert!(MbtaError::from_error_response(500, "{}").is_none());
        assert!(MbtaError::from_error_response(401, "{}").is_none());
    }

    #[test]
    fn precondition_messages() {
        let err = MbtaError::MissingFilter {
            kind: ResourceKind::Schedule,
            expected: "route, stop, or trip",
        };
        assert_eq!(
            err.to_string(),
            "schedule queries require at least one route, stop, or trip filter"
        );

        let err = MbtaError::UnsupportedParameter {
            kind: ResourceKind::Shape,
            parameter: "include".into(),
        };
        assert_eq!(err.to_string(), "include is not supported for shape");
    }

    #[test]
    fn excerpt_caps_length() {
        let body = "x".repeat(2000);
        assert_eq!(excerpt(&body).len(), BODY_EXCERPT_CHARS);
        assert_eq!(excerpt("short"), "short");
    }
}
