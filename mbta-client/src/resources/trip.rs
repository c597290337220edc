//! Trips: one journey of a vehicle along a route pattern.

use std::fmt;

use serde::Deserialize;

use super::linkage::to_one;
use super::{Attributes, Resource, nullable};
use crate::endpoint::ResourceKind;

pub type Trip = Resource<TripAttributes, TripRelationships>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TripAttributes {
    /// 0 no information, 1 allowed, 2 not allowed.
    pub bikes_allowed: u8,
    #[serde(deserialize_with = "nullable")]
    pub block_id: Option<String>,
    pub direction_id: u8,
    pub headsign: String,
    /// Public-facing trip name; commuter rail train numbers, empty for most others.
    pub name: String,
    pub wheelchair_accessible: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TripRelationships {
    #[serde(default, deserialize_with = "to_one")]
    pub shape: Option<String>,
    #[serde(default, deserialize_with = "to_one")]
    pub service: Option<String>,
    #[serde(default, deserialize_with = "to_one")]
    pub route_pattern: Option<String>,
    #[serde(default, deserialize_with = "to_one")]
    pub route: Option<String>,
    #[serde(default, deserialize_with = "to_one")]
    pub occupancy: Option<String>,
}

impl Attributes for TripAttributes {
    const KIND: ResourceKind = ResourceKind::Trip;
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}",
            self.id, self.attributes.name, self.attributes.headsign
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Record;
    use serde_json::json;

    #[test]
    fn maps_commuter_rail_trip() {
        let trip = Trip::from_json(json!({
            "id": "CR-Weekday-Fall-23-515",
            "type": "trip",
            "links": {"self": "/trips/CR-Weekday-Fall-23-515"},
            "relationships": {
                "route": {"data": {"id": "CR-Providence", "type": "route"}},
                "route_pattern": {"data": {"id": "CR-Providence-C1-0", "type": "route_pattern"}},
                "service": {"data": {"id": "FallWeekday", "type": "service"}},
                "shape": {"data": {"id": "9890009", "type": "shape"}},
                "occupancy": {"data": null}
            },
            "attributes": {
                "bikes_allowed": 1,
                "block_id": "B515",
                "direction_id": 0,
                "headsign": "Wickford Junction",
                "name": "515",
                "wheelchair_accessible": 1
            }
        }))
        .unwrap();

        let rel = &trip.relationships;
        assert_eq!(rel.route.as_deref(), Some("CR-Providence"));
        assert_eq!(rel.service.as_deref(), Some("FallWeekday"));
        assert_eq!(rel.shape.as_deref(), Some("9890009"));
        assert_eq!(rel.occupancy, None);
        assert_eq!(
            trip.to_string(),
            "CR-Weekday-Fall-23-515: 515 Wickford Junction"
        );
    }
}
