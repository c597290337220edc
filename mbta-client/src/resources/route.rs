//! Routes: a path a vehicle travels, e.g. the Red Line or bus 1.

use std::fmt;

use serde::Deserialize;

use super::linkage::{Linkage, to_many, to_one};
use super::{Attributes, Resource};
use crate::endpoint::ResourceKind;

pub type Route = Resource<RouteAttributes, RouteRelationships>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteAttributes {
    pub color: String,
    pub description: String,
    /// Destination for each direction id.
    pub direction_destinations: Vec<Option<String>>,
    /// Direction name for each direction id, e.g. `["South", "North"]`.
    pub direction_names: Vec<Option<String>>,
    pub fare_class: String,
    pub long_name: String,
    pub short_name: String,
    pub sort_order: i64,
    pub text_color: String,
    /// 0 light rail, 1 subway, 2 commuter rail, 3 bus, 4 ferry.
    #[serde(rename = "type")]
    pub route_type: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RouteRelationships {
    #[serde(default, deserialize_with = "to_one")]
    pub line: Option<String>,
    #[serde(default, deserialize_with = "to_many")]
    pub route_patterns: Option<Vec<Linkage>>,
}

impl Attributes for RouteAttributes {
    const KIND: ResourceKind = ResourceKind::Route;
}

impl Route {
    /// Long name, falling back to the short name (buses often have only one).
    pub fn display_name(&self) -> &str {
        if self.attributes.long_name.is_empty() {
            &self.attributes.short_name
        } else {
            &self.attributes.long_name
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.attributes.long_name)
    }
}
