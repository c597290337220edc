//! Stops, platforms, stations, entrances and generic nodes.

use std::fmt;

use serde::Deserialize;

use super::linkage::{Linkage, to_many, to_one};
use super::{Attributes, Resource, nullable};
use crate::endpoint::ResourceKind;

pub type Stop = Resource<StopAttributes, StopRelationships>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StopAttributes {
    #[serde(deserialize_with = "nullable")]
    pub address: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub at_street: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// 0 stop or platform, 1 station, 2 entrance, 3 generic node, 4 boarding area.
    pub location_type: u8,
    #[serde(deserialize_with = "nullable")]
    pub municipality: Option<String>,
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub on_street: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub platform_code: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub platform_name: Option<String>,
    /// Route type of the vehicles serving this stop, when uniform.
    #[serde(deserialize_with = "nullable")]
    pub vehicle_type: Option<u8>,
    /// 0 no information, 1 accessible, 2 inaccessible.
    pub wheelchair_boarding: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StopRelationships {
    #[serde(default, deserialize_with = "to_one")]
    pub parent_station: Option<String>,
    #[serde(default, deserialize_with = "to_one")]
    pub zone: Option<String>,
    #[serde(default, deserialize_with = "to_one")]
    pub route: Option<String>,
    #[serde(default, deserialize_with = "to_many")]
    pub child_stops: Option<Vec<Linkage>>,
    #[serde(default, deserialize_with = "to_many")]
    pub connecting_stops: Option<Vec<Linkage>>,
    #[serde(default, deserialize_with = "to_many")]
    pub facilities: Option<Vec<Linkage>>,
}

impl Attributes for StopAttributes {
    const KIND: ResourceKind = ResourceKind::Stop;
}

impl Stop {
    /// `(latitude, longitude)` in degrees.
    pub fn coordinates(&self) -> (f64, f64) {
        (self.attributes.latitude, self.attributes.longitude)
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.attributes.name)?;
        if let Some(description) = &self.attributes.description {
            write!(f, " {description}")?;
        }
        Ok(())
    }
}
