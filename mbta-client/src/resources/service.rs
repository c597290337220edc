//! Services: the set of dates on which trips run.

use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

use super::{Attributes, Resource, nullable};
use crate::endpoint::ResourceKind;

pub type Service = Resource<ServiceAttributes>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceAttributes {
    /// Dates added on top of `valid_days`.
    pub added_dates: Vec<NaiveDate>,
    pub added_dates_notes: Vec<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    pub description: Option<String>,
    pub end_date: NaiveDate,
    #[serde(deserialize_with = "nullable")]
    pub rating_description: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub rating_end_date: Option<NaiveDate>,
    #[serde(deserialize_with = "nullable")]
    pub rating_start_date: Option<NaiveDate>,
    /// Dates removed from `valid_days`.
    pub removed_dates: Vec<NaiveDate>,
    pub removed_dates_notes: Vec<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    pub schedule_name: Option<String>,
    /// e.g. `"Weekday"`, `"Saturday"`.
    #[serde(deserialize_with = "nullable")]
    pub schedule_type: Option<String>,
    /// 0 not defined, 1 typical, 2 extra, 3 holiday, 4 planned disruption,
    /// 5 unplanned disruption.
    pub schedule_typicality: u8,
    pub start_date: NaiveDate,
    /// ISO weekdays: 1 Monday to 7 Sunday.
    pub valid_days: Vec<u8>,
}

impl Attributes for ServiceAttributes {
    const KIND: ResourceKind = ResourceKind::Service;
}

impl Service {
    /// Whether trips on this service run on `date`.
    pub fn runs_on(&self, date: NaiveDate) -> bool {
        use chrono::Datelike;

        let attrs = &self.attributes;
        if attrs.removed_dates.contains(&date) {
            return false;
        }
        if attrs.added_dates.contains(&date) {
            return true;
        }
        let weekday = date.weekday().number_from_monday() as u8;
        date >= attrs.start_date && date <= attrs.end_date && attrs.valid_days.contains(&weekday)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = self.attributes.description.as_deref().unwrap_or("");
        write!(f, "{}: {}", self.id, description)
    }
}
