//! Service alerts.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use super::linkage::{Linkage, to_many};
use super::{Attributes, Resource, nullable, trimmed, trimmed_nullable};
use crate::endpoint::ResourceKind;

/// An active or upcoming service alert.
pub type Alert = Resource<AlertAttributes, AlertRelationships>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlertAttributes {
    /// Periods during which the alert is in effect.
    pub active_period: Vec<ActivePeriod>,

    /// Short banner text for the most severe alerts.
    #[serde(deserialize_with = "nullable")]
    pub banner: Option<String>,

    /// Cause of the disruption, e.g. `"MAINTENANCE"`.
    pub cause: String,

    pub created_at: DateTime<FixedOffset>,

    /// Long-form description, whitespace-trimmed.
    #[serde(deserialize_with = "trimmed_nullable")]
    pub description: Option<String>,

    /// Effect on service, e.g. `"DELAY"` or `"SHUTTLE"`.
    pub effect: String,

    /// Headline, whitespace-trimmed.
    #[serde(deserialize_with = "trimmed")]
    pub header: String,

    /// Routes, stops, trips and facilities the alert applies to.
    pub informed_entity: Vec<InformedEntity>,

    /// `"NEW"`, `"ONGOING"`, `"ONGOING_UPCOMING"` or `"UPCOMING"`.
    pub lifecycle: String,

    pub service_effect: String,

    /// 0 (least) to 10 (most severe).
    pub severity: u8,

    #[serde(deserialize_with = "trimmed")]
    pub short_header: String,

    #[serde(deserialize_with = "nullable")]
    pub timeframe: Option<String>,

    pub updated_at: DateTime<FixedOffset>,

    #[serde(deserialize_with = "nullable")]
    pub url: Option<String>,
}

/// A start/end pair; an open-ended period has no end.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActivePeriod {
    pub start: DateTime<FixedOffset>,
    #[serde(default)]
    pub end: Option<DateTime<FixedOffset>>,
}

/// One entity an alert applies to. Any combination of fields may be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InformedEntity {
    pub activities: Vec<String>,
    pub route_type: Option<u8>,
    pub route: Option<String>,
    pub direction_id: Option<u8>,
    pub stop: Option<String>,
    pub trip: Option<String>,
    pub facility: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AlertRelationships {
    #[serde(default, deserialize_with = "to_many")]
    pub stops: Option<Vec<Linkage>>,
    #[serde(default, deserialize_with = "to_many")]
    pub routes: Option<Vec<Linkage>>,
    #[serde(default, deserialize_with = "to_many")]
    pub trips: Option<Vec<Linkage>>,
    #[serde(default, deserialize_with = "to_many")]
    pub facilities: Option<Vec<Linkage>>,
}

impl Attributes for AlertAttributes {
    const KIND: ResourceKind = ResourceKind::Alert;
}

impl Alert {
    /// Header followed by the description on its own line.
    pub fn full_description(&self) -> String {
        let attrs = &self.attributes;
        match &attrs.description {
            Some(description) => format!("{}\n{}", attrs.header, description),
            None => attrs.header.clone(),
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.attributes.header)
    }
}
