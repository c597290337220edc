//! Station amenities: elevators, escalators, parking, bike storage.

use std::fmt;

use serde::Deserialize;

use super::linkage::to_one;
use super::{Attributes, Resource, nullable};
use crate::endpoint::ResourceKind;

pub type Facility = Resource<FacilityAttributes, FacilityRelationships>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FacilityAttributes {
    #[serde(deserialize_with = "nullable")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "nullable")]
    pub longitude: Option<f64>,
    pub long_name: String,
    #[serde(deserialize_with = "nullable")]
    pub short_name: Option<String>,
    /// Free-form name/value pairs, e.g. `capacity`, `enclosed`.
    pub properties: Vec<Property>,
    /// Facility type, e.g. `"ELEVATOR"`, `"PARKING_AREA"`.
    #[serde(rename = "type")]
    pub facility_type: String,
}

/// A name/value pair; values may be strings, numbers or booleans.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FacilityRelationships {
    /// Stop the facility belongs to.
    #[serde(default, deserialize_with = "to_one")]
    pub stop: Option<String>,
}

impl Attributes for FacilityAttributes {
    const KIND: ResourceKind = ResourceKind::Facility;
}

impl Facility {
    /// Value of the named property, if present.
    pub fn property(&self, name: &str) -> Option<&serde_json::Value> {
        self.attributes
            .properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.attributes.long_name)
    }
}
