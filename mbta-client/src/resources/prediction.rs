//! Real-time arrival and departure predictions.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use super::linkage::{Linkage, to_many, to_one};
use super::{Attributes, Resource, nullable};
use crate::endpoint::ResourceKind;

pub type Prediction = Resource<PredictionAttributes, PredictionRelationships>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionAttributes {
    /// `None` at the first stop of a trip.
    #[serde(deserialize_with = "nullable")]
    pub arrival_time: Option<DateTime<FixedOffset>>,

    /// `None` at the last stop of a trip.
    #[serde(deserialize_with = "nullable")]
    pub departure_time: Option<DateTime<FixedOffset>>,

    pub direction_id: u8,

    /// `ADDED`, `CANCELLED`, `NO_DATA`, `SKIPPED`, `UNSCHEDULED`, or `None`
    /// when the trip runs as scheduled.
    #[serde(deserialize_with = "nullable")]
    pub schedule_relationship: Option<String>,

    /// Free-text status, e.g. `"Approaching"`.
    #[serde(deserialize_with = "nullable")]
    pub status: Option<String>,

    #[serde(deserialize_with = "nullable")]
    pub stop_sequence: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PredictionRelationships {
    #[serde(default, deserialize_with = "to_one")]
    pub route: Option<String>,
    #[serde(default, deserialize_with = "to_one")]
    pub stop: Option<String>,
    #[serde(default, deserialize_with = "to_one")]
    pub trip: Option<String>,
    #[serde(default, deserialize_with = "to_one")]
    pub vehicle: Option<String>,
    #[serde(default, deserialize_with = "to_one")]
    pub schedule: Option<String>,
    #[serde(default, deserialize_with = "to_many")]
    pub alerts: Option<Vec<Linkage>>,
}

impl Attributes for PredictionAttributes {
    const KIND: ResourceKind = ResourceKind::Prediction;
}

impl Prediction {
    /// Departure if known, otherwise arrival.
    pub fn best_time(&self) -> Option<DateTime<FixedOffset>> {
        self.attributes
            .departure_time
            .or(self.attributes.arrival_time)
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route = self.relationships.route.as_deref().unwrap_or("?");
        write!(f, "{}: {}", self.id, route)
    }
}
