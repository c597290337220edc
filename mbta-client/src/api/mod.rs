//! Talking to the API: transport, client, and per-kind queries.

mod client;
mod mock;
mod queries;
mod transport;

pub use client::MbtaClient;
pub use mock::{MockTransport, RecordedRequest};
pub use transport::{HttpTransport, JSON_API, RawResponse, Transport};
