//! Route patterns: the distinct stop sequences trips on a route follow.

use std::fmt;

use serde::Deserialize;

use super::linkage::to_one;
use super::{Attributes, Resource, nullable};
use crate::endpoint::ResourceKind;

pub type RoutePattern = Resource<RoutePatternAttributes, RoutePatternRelationships>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoutePatternAttributes {
    /// Whether this is the pattern used for maps and diagrams.
    pub canonical: bool,
    pub direction_id: u8,
    pub name: String,
    pub sort_order: i64,
    /// When the pattern runs, if atypical, e.g. `"Weekdays only"`.
    #[serde(deserialize_with = "nullable")]
    pub time_desc: Option<String>,
    /// 0 undefined, 1 typical, 2 deviation, 3 atypical, 4 diversion.
    pub typicality: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RoutePatternRelationships {
    #[serde(default, deserialize_with = "to_one")]
    pub route: Option<String>,
    #[serde(default, deserialize_with = "to_one")]
    pub representative_trip: Option<String>,
}

impl Attributes for RoutePatternAttributes {
    const KIND: ResourceKind = ResourceKind::RoutePattern;
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.attributes.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Record;
    use serde_json::json;

    #[test]
    fn maps_route_pattern() {
        let pattern = RoutePattern::from_json(json!({
            "id": "Red-1-0",
            "type": "route_pattern",
            "links": {"self": "/route_patterns/Red-1-0"},
            "relationships": {
                "route": {"data": {"id": "Red", "type": "route"}},
                "representative_trip": {"data": {"id": "canonical-Red-C2-0", "type": "trip"}}
            },
            "attributes": {
                "canonical": false,
                "direction_id": 0,
                "name": "Alewife - Ashmont",
                "sort_order": 100101000,
                "time_desc": null,
                "typicality": 1
            }
        }))
        .unwrap();

        assert_eq!(pattern.relationships.route.as_deref(), Some("Red"));
        assert_eq!(
            pattern.relationships.representative_trip.as_deref(),
            Some("canonical-Red-C2-0")
        );
        assert!(!pattern.attributes.canonical);
        assert_eq!(pattern.to_string(), "Red-1-0: Alewife - Ashmont");
    }
}
