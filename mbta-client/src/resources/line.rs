//! Lines: groups of routes presented together, e.g. the Green Line.

use std::fmt;

use serde::Deserialize;

use super::{Attributes, Resource};
use crate::endpoint::ResourceKind;

pub type Line = Resource<LineAttributes>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LineAttributes {
    /// Hex colour without the leading `#`.
    pub color: String,
    pub long_name: String,
    pub short_name: String,
    pub sort_order: i64,
    pub text_color: String,
}

impl Attributes for LineAttributes {
    const KIND: ResourceKind = ResourceKind::Line;
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.attributes.long_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Record;
    use serde_json::json;

    #[test]
    fn maps_line() {
        let line = Line::from_json(json!({
            "id": "line-Green",
            "type": "line",
            "links": {"self": "/lines/line-Green"},
            "attributes": {
                "color": "00843D",
                "long_name": "Green Line",
                "short_name": "",
                "sort_order": 10032,
                "text_color": "FFFFFF"
            }
        }))
        .unwrap();

        assert_eq!(line.attributes.sort_order, 10032);
        assert_eq!(line.to_string(), "line-Green: Green Line");
    }

    #[test]
    fn missing_color_is_malformed() {
        let result = Line::from_json(json!({
            "id": "line-Green",
            "type": "line",
            "attributes": {
                "long_name": "Green Line",
                "short_name": "",
                "sort_order": 10032,
                "text_color": "FFFFFF"
            }
        }));

        assert!(result.is_err());
    }
}
