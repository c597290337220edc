//! Live status of a facility, currently parking occupancy.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use super::facility::Property;
use super::linkage::to_one;
use super::{Attributes, Resource};
use crate::endpoint::ResourceKind;

pub type LiveFacility = Resource<LiveFacilityAttributes, LiveFacilityRelationships>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LiveFacilityAttributes {
    pub updated_at: DateTime<FixedOffset>,
    /// e.g. `capacity`, `utilization`.
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LiveFacilityRelationships {
    #[serde(default, deserialize_with = "to_one")]
    pub facility: Option<String>,
}

impl Attributes for LiveFacilityAttributes {
    const KIND: ResourceKind = ResourceKind::LiveFacility;
}

impl fmt::Display for LiveFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.attributes.updated_at.to_rfc3339())
    }
}
