//! MBTA V3 API client.
//!
//! Every call validates its parameters against the endpoint, attaches the API
//! key, performs one GET and dispatches on the status code. Typed calls then
//! map the document's `data` member to records.

use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};

use super::transport::{HttpTransport, RawResponse, Transport};
use crate::config::{ApiKey, ClientConfig};
use crate::endpoint::ResourceKind;
use crate::error::{MbtaError, excerpt};
use crate::params::QueryParams;
use crate::resources::{Record, record_from_document, records_from_document};

/// Client for the MBTA V3 API.
///
/// Holds no mutable state; share it by reference across tasks.
#[derive(Debug, Clone)]
pub struct MbtaClient<T = HttpTransport> {
    transport: T,
    base_url: Url,
    api_key: ApiKey,
}

impl MbtaClient<HttpTransport> {
    /// Create a client that talks HTTP to `config.base_url`.
    pub fn new(config: ClientConfig) -> Result<Self, MbtaError> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> MbtaClient<T> {
    /// Create a client over any transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, MbtaError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| MbtaError::InvalidBaseUrl {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(MbtaError::InvalidBaseUrl {
                url: config.base_url,
                message: "not a base URL".to_string(),
            });
        }

        Ok(Self {
            transport,
            base_url,
            api_key: config.api_key,
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Query a collection endpoint and return the parsed document unchanged.
    pub async fn list_raw(
        &self,
        kind: ResourceKind,
        params: &QueryParams,
    ) -> Result<Value, MbtaError> {
        params.validate_list(kind)?;
        let url = kind.collection_url(&self.base_url)?;
        self.execute(kind, &url, params).await
    }

    /// Fetch one resource by id and return the parsed document unchanged.
    pub async fn get_raw(
        &self,
        kind: ResourceKind,
        id: &str,
        params: &QueryParams,
    ) -> Result<Value, MbtaError> {
        if id.trim().is_empty() {
            return Err(MbtaError::EmptyId { kind });
        }
        params.validate_item(kind)?;
        let url = kind.item_url(&self.base_url, id)?;
        self.execute(kind, &url, params).await
    }

    /// Query a collection endpoint and map every record, in server order.
    pub async fn list<R: Record>(&self, params: &QueryParams) -> Result<Vec<R>, MbtaError> {
        let document = self.list_raw(R::KIND, params).await?;
        records_from_document(document)
    }

    /// Fetch and map one resource by id.
    pub async fn get<R: Record>(&self, id: &str, params: &QueryParams) -> Result<R, MbtaError> {
        let document = self.get_raw(R::KIND, id, params).await?;
        record_from_document(document)
    }

    async fn execute(
        &self,
        kind: ResourceKind,
        url: &Url,
        params: &QueryParams,
    ) -> Result<Value, MbtaError> {
        let query = params.to_pairs(&self.api_key);
        let response = self.transport.get(url, &query).await?;
        debug!(%kind, status = response.status, "classifying response");
        classify(response)
    }
}

/// Dispatch on status: 200 parses the body, documented error statuses become
/// typed errors, anything else is unexpected.
fn classify(response: RawResponse) -> Result<Value, MbtaError> {
    let RawResponse { status, body } = response;

    if status == 200 {
        return serde_json::from_str(&body).map_err(|e| MbtaError::Json {
            message: e.to_string(),
            body: Some(excerpt(&body)),
        });
    }

    if let Some(error) = MbtaError::from_error_response(status, &body) {
        warn!(status, error = %error, "API error");
        return Err(error);
    }

    warn!(status, "unexpected status");
    Err(MbtaError::UnexpectedStatus {
        status,
        body: excerpt(&body),
    })
}
