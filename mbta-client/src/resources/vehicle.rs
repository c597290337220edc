//! Live vehicle positions.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use super::linkage::to_one;
use super::{Attributes, Resource, nullable};
use crate::endpoint::ResourceKind;

pub type Vehicle = Resource<VehicleAttributes, VehicleRelationships>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VehicleAttributes {
    /// Degrees clockwise from true north.
    #[serde(deserialize_with = "nullable")]
    pub bearing: Option<f64>,
    /// Per-car occupancy; empty for vehicles that do not report it.
    pub carriages: Vec<Carriage>,
    /// `INCOMING_AT`, `STOPPED_AT` or `IN_TRANSIT_TO`.
    pub current_status: String,
    #[serde(deserialize_with = "nullable")]
    pub current_stop_sequence: Option<u32>,
    pub direction_id: u8,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(deserialize_with = "nullable")]
    pub occupancy_status: Option<String>,
    /// Metres per second.
    #[serde(deserialize_with = "nullable")]
    pub speed: Option<f64>,
    pub updated_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Carriage {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub occupancy_status: Option<String>,
    #[serde(default)]
    pub occupancy_percentage: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VehicleRelationships {
    #[serde(default, deserialize_with = "to_one")]
    pub route: Option<String>,
    #[serde(default, deserialize_with = "to_one")]
    pub stop: Option<String>,
    #[serde(default, deserialize_with = "to_one")]
    pub trip: Option<String>,
}

impl Attributes for VehicleAttributes {
    const KIND: ResourceKind = ResourceKind::Vehicle;
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.attributes.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MbtaError;
    use crate::resources::Record;
    use serde_json::json;

    #[test]
    fn maps_vehicle() {
        let vehicle = Vehicle::from_json(json!({
            "id": "R-5482C4F0",
            "type": "vehicle",
            "links": {"self": "/vehicles/R-5482C4F0"},
            "relationships": {
                "route": {"data": {"id": "Red", "type": "route"}},
                "stop": {"data": {"id": "70063", "type": "stop"}},
                "trip": {"data": {"id": "60392455", "type": "trip"}}
            },
            "attributes": {
                "bearing": 135,
                "carriages": [
                    {"label": "1812", "occupancy_status": "MANY_SEATS_AVAILABLE", "occupancy_percentage": 20},
                    {"label": "1813", "occupancy_status": null, "occupancy_percentage": null}
                ],
                "current_status": "STOPPED_AT",
                "current_stop_sequence": 20,
                "direction_id": 0,
                "label": "1812",
                "latitude": 42.39641,
                "longitude": -71.12277,
                "occupancy_status": null,
                "speed": null,
                "updated_at": "2024-03-09T10:20:31-05:00"
            }
        }))
        .unwrap();

        assert_eq!(vehicle.attributes.bearing, Some(135.0));
        assert_eq!(vehicle.attributes.carriages.len(), 2);
        assert_eq!(vehicle.attributes.carriages[0].occupancy_percentage, Some(20));
        assert_eq!(vehicle.attributes.carriages[1].occupancy_status, None);
        assert_eq!(vehicle.relationships.stop.as_deref(), Some("70063"));
        assert_eq!(vehicle.to_string(), "R-5482C4F0: 1812");
    }

    #[test]
    fn missing_carriages_is_malformed() {
        let err = Vehicle::from_json(json!({
            "id": "y1886",
            "type": "vehicle",
            "attributes": {
                "bearing": null,
                "current_status": "IN_TRANSIT_TO",
                "current_stop_sequence": null,
                "direction_id": 1,
                "label": "1886",
                "latitude": 42.35,
                "longitude": -71.06,
                "occupancy_status": null,
                "speed": null,
                "updated_at": "2024-03-09T10:20:31-05:00"
            }
        }))
        .unwrap_err();

        assert!(matches!(
            err,
            MbtaError::Malformed {
                kind: ResourceKind::Vehicle,
                ref message,
            } if message.contains("carriages")
        ));
    }
}
