//! Shapes: the path vehicles follow, as an encoded polyline.

use std::fmt;

use serde::Deserialize;

use super::{Attributes, Resource};
use crate::endpoint::ResourceKind;

pub type Shape = Resource<ShapeAttributes>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShapeAttributes {
    /// Google encoded polyline.
    pub polyline: String,
}

impl Attributes for ShapeAttributes {
    const KIND: ResourceKind = ResourceKind::Shape;
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
