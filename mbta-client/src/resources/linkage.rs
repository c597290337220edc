//! JSON:API relationship linkage.

use serde::{Deserialize, Deserializer, Serialize};

/// A `{id, type}` pair identifying a related resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Linkage {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Deserialize)]
struct ToOne {
    data: Option<Linkage>,
}

#[derive(Deserialize)]
struct ToMany {
    data: Option<Vec<Linkage>>,
}

/// Flatten a to-one relationship to the related id.
///
/// A relationship carrying only `links`, or `data: null`, maps to `None`.
pub(crate) fn to_one<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let relationship = Option::<ToOne>::deserialize(deserializer)?;
    Ok(relationship.and_then(|r| r.data).map(|linkage| linkage.id))
}

/// Keep a to-many relationship's linkage list as-is.
pub(crate) fn to_many<'de, D>(deserializer: D) -> Result<Option<Vec<Linkage>>, D::Error>
where
    D: Deserializer<'de>,
{
    let relationship = Option::<ToMany>::deserialize(deserializer)?;
    Ok(relationship.and_then(|r| r.data))
}
