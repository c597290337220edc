//! Client for the MBTA V3 transit API.
//!
//! Builds JSON:API query parameters, performs the GET, maps error statuses to
//! typed errors, and maps resource objects to typed records.
//!
//! ```no_run
//! use mbta_client::{ClientConfig, MbtaClient, QueryParams};
//!
//! # async fn run() -> Result<(), mbta_client::MbtaError> {
//! let client = MbtaClient::new(ClientConfig::from_env()?)?;
//! let stops = client.stops(&QueryParams::new().route(["Red"])).await?;
//! for stop in &stops {
//!     println!("{stop}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod params;
pub mod resources;

pub use api::{HttpTransport, MbtaClient, MockTransport, RawResponse, RecordedRequest, Transport};
pub use config::{ApiKey, ClientConfig};
pub use endpoint::ResourceKind;
pub use error::MbtaError;
pub use params::{Filter, QueryParams};
pub use resources::{
    Alert, Facility, Line, Linkage, LiveFacility, Prediction, Record, Resource, Route,
    RoutePattern, Schedule, Service, Shape, Stop, Trip, Vehicle,
};
