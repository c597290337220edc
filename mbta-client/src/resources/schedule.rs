//! Scheduled arrival and departure times.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use super::linkage::to_one;
use super::{Attributes, Resource, nullable};
use crate::endpoint::ResourceKind;

pub type Schedule = Resource<ScheduleAttributes, ScheduleRelationships>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleAttributes {
    #[serde(deserialize_with = "nullable")]
    pub arrival_time: Option<DateTime<FixedOffset>>,
    #[serde(deserialize_with = "nullable")]
    pub departure_time: Option<DateTime<FixedOffset>>,
    pub direction_id: u8,
    /// 0 regular, 1 none, 2 phone agency, 3 coordinate with driver.
    pub drop_off_type: u8,
    pub pickup_type: u8,
    /// Overrides the trip headsign at this stop.
    #[serde(deserialize_with = "nullable")]
    pub stop_headsign: Option<String>,
    pub stop_sequence: u32,
    /// Whether the times are exact rather than estimated.
    pub timepoint: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScheduleRelationships {
    #[serde(default, deserialize_with = "to_one")]
    pub route: Option<String>,
    #[serde(default, deserialize_with = "to_one")]
    pub stop: Option<String>,
    #[serde(default, deserialize_with = "to_one")]
    pub trip: Option<String>,
    #[serde(default, deserialize_with = "to_one")]
    pub prediction: Option<String>,
}

impl Attributes for ScheduleAttributes {
    const KIND: ResourceKind = ResourceKind::Schedule;
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route = self.relationships.route.as_deref().unwrap_or("?");
        write!(f, "{}: {}", self.id, route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Record;
    use serde_json::json;

    #[test]
    fn maps_schedule() {
        let schedule = Schedule::from_json(json!({
            "id": "schedule-CR-Weekday-Fall-23-515-NEC-2287-1",
            "type": "schedule",
            "relationships": {
                "route": {"data": {"id": "CR-Providence", "type": "route"}},
                "stop": {"data": {"id": "NEC-2287", "type": "stop"}},
                "trip": {"data": {"id": "CR-Weekday-Fall-23-515", "type": "trip"}},
                "prediction": {"data": null}
            },
            "attributes": {
                "arrival_time": null,
                "departure_time": "2024-03-08T06:40:00-05:00",
                "direction_id": 0,
                "drop_off_type": 1,
                "pickup_type": 0,
                "stop_headsign": null,
                "stop_sequence": 1,
                "timepoint": true
            }
        }))
        .unwrap();

        assert_eq!(schedule.relationships.stop.as_deref(), Some("NEC-2287"));
        assert_eq!(schedule.relationships.prediction, None);
        assert!(schedule.attributes.timepoint);
        assert_eq!(
            schedule.to_string(),
            "schedule-CR-Weekday-Fall-23-515-NEC-2287-1: CR-Providence"
        );
    }

    #[test]
    fn bad_time_is_malformed() {
        let result = Schedule::from_json(json!({
            "id": "s",
            "type": "schedule",
            "attributes": {
                "arrival_time": "6:40 AM",
                "departure_time": null,
                "direction_id": 0,
                "drop_off_type": 0,
                "pickup_type": 0,
                "stop_headsign": null,
                "stop_sequence": 1,
                "timepoint": false
            }
        }));

        assert!(result.is_err());
    }
}
