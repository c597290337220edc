//! Typed records for MBTA resources.
//!
//! Every resource object in a JSON:API response has the same envelope: `id`,
//! `type`, optional `links`, optional `relationships` and `attributes`.
//! [`Resource`] captures that envelope once; each kind supplies only its
//! attribute schema and the relationships worth flattening.
//!
//! Attribute schemas are strict about presence: a missing attribute is a
//! malformed response. Attributes the API documents as nullable are typed
//! `Option` and accept an explicit `null`. To-one relationships are flattened
//! to the related id; to-many relationships keep their linkage list.

mod alert;
mod document;
mod facility;
mod line;
mod linkage;
mod live_facility;
mod prediction;
mod route;
mod route_pattern;
mod schedule;
mod service;
mod shape;
mod stop;
mod trip;
mod vehicle;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::endpoint::ResourceKind;
use crate::error::MbtaError;

pub use alert::{ActivePeriod, Alert, AlertAttributes, AlertRelationships, InformedEntity};
pub use document::{record_from_document, records_from_document};
pub use facility::{Facility, FacilityAttributes, FacilityRelationships, Property};
pub use line::{Line, LineAttributes};
pub use linkage::Linkage;
pub use live_facility::{LiveFacility, LiveFacilityAttributes, LiveFacilityRelationships};
pub use prediction::{Prediction, PredictionAttributes, PredictionRelationships};
pub use route::{Route, RouteAttributes, RouteRelationships};
pub use route_pattern::{RoutePattern, RoutePatternAttributes, RoutePatternRelationships};
pub use schedule::{Schedule, ScheduleAttributes, ScheduleRelationships};
pub use service::{Service, ServiceAttributes};
pub use shape::{Shape, ShapeAttributes};
pub use stop::{Stop, StopAttributes, StopRelationships};
pub use trip::{Trip, TripAttributes, TripRelationships};
pub use vehicle::{Carriage, Vehicle, VehicleAttributes, VehicleRelationships};

/// One JSON:API resource object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Resource<A, R = NoRelationships> {
    /// API-assigned identifier.
    pub id: String,

    /// JSON:API type tag, e.g. `"stop"`.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub links: Option<BTreeMap<String, String>>,

    /// Flattened relationships; fields absent from the response stay `None`.
    #[serde(default)]
    pub relationships: R,

    pub attributes: A,
}

/// Relationship schema for kinds that map none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NoRelationships {}

/// Attribute schema of one resource kind.
pub trait Attributes: DeserializeOwned {
    const KIND: ResourceKind;
}

/// A record that can be mapped from a resource object.
pub trait Record: DeserializeOwned {
    const KIND: ResourceKind;

    fn id(&self) -> &str;

    /// The `type` tag the record was built from.
    fn resource_type(&self) -> &str;

    /// Map one resource object, checking its `type` tag matches the kind.
    fn from_json(value: serde_json::Value) -> Result<Self, MbtaError> {
        let record: Self = serde_json::from_value(value).map_err(|e| MbtaError::Malformed {
            kind: Self::KIND,
            message: e.to_string(),
        })?;

        if record.resource_type() != Self::KIND.type_name() {
            return Err(MbtaError::Malformed {
                kind: Self::KIND,
                message: format!(
                    "resource {} has type {:?}",
                    record.id(),
                    record.resource_type()
                ),
            });
        }

        Ok(record)
    }
}

impl<A, R> Record for Resource<A, R>
where
    A: Attributes,
    R: DeserializeOwned + Default,
{
    const KIND: ResourceKind = A::KIND;

    fn id(&self) -> &str {
        &self.id
    }

    fn resource_type(&self) -> &str {
        &self.kind
    }
}

/// Deserialize a field that must be present but may be `null`.
///
/// Unlike a bare `Option`, a missing key is an error.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

pub(crate) fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(String::deserialize(deserializer)?.trim().to_string())
}

pub(crate) fn trimmed_nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(|s| s.trim().to_string()))
}
