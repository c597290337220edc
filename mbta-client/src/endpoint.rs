//! Endpoint registry.
//!
//! Every resource the MBTA V3 API serves is one [`ResourceKind`]. The kind
//! knows its URL path, its JSON:API `type` tag, which query parameters its
//! collection endpoint accepts, and whether the API refuses to answer a
//! collection query without some discriminating filter.

use std::fmt;
use std::str::FromStr;

use reqwest::Url;

use crate::error::MbtaError;
use crate::params::Filter;

/// Error returned when parsing an unknown resource kind name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource kind: {0}")]
pub struct UnknownResourceKind(pub String);

/// A resource type served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    Alert,
    Facility,
    Line,
    LiveFacility,
    Prediction,
    Route,
    RoutePattern,
    Schedule,
    Service,
    Shape,
    Stop,
    Trip,
    Vehicle,
}

/// A collection endpoint's precondition: at least one of `any_of` must be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterRequirement {
    pub any_of: &'static [Filter],
    /// Human-readable list used in error messages.
    pub description: &'static str,
}

impl ResourceKind {
    /// All kinds, in alphabetical order of their type tag.
    pub const ALL: [ResourceKind; 13] = [
        ResourceKind::Alert,
        ResourceKind::Facility,
        ResourceKind::Line,
        ResourceKind::LiveFacility,
        ResourceKind::Prediction,
        ResourceKind::Route,
        ResourceKind::RoutePattern,
        ResourceKind::Schedule,
        ResourceKind::Service,
        ResourceKind::Shape,
        ResourceKind::Stop,
        ResourceKind::Trip,
        ResourceKind::Vehicle,
    ];

    /// The JSON:API `type` tag, also used in `fields[...]` keys.
    pub fn type_name(self) -> &'static str {
        match self {
            ResourceKind::Alert => "alert",
            ResourceKind::Facility => "facility",
            ResourceKind::Line => "line",
            ResourceKind::LiveFacility => "live_facility",
            ResourceKind::Prediction => "prediction",
            ResourceKind::Route => "route",
            ResourceKind::RoutePattern => "route_pattern",
            ResourceKind::Schedule => "schedule",
            ResourceKind::Service => "service",
            ResourceKind::Shape => "shape",
            ResourceKind::Stop => "stop",
            ResourceKind::Trip => "trip",
            ResourceKind::Vehicle => "vehicle",
        }
    }

    /// URL path segment of the collection endpoint.
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::Alert => "alerts",
            ResourceKind::Facility => "facilities",
            ResourceKind::Line => "lines",
            ResourceKind::LiveFacility => "live_facilities",
            ResourceKind::Prediction => "predictions",
            ResourceKind::Route => "routes",
            ResourceKind::RoutePattern => "route_patterns",
            ResourceKind::Schedule => "schedules",
            ResourceKind::Service => "services",
            ResourceKind::Shape => "shapes",
            ResourceKind::Stop => "stops",
            ResourceKind::Trip => "trips",
            ResourceKind::Vehicle => "vehicles",
        }
    }

    /// Filters the collection endpoint understands.
    pub fn supported_filters(self) -> &'static [Filter] {
        use Filter::*;

        match self {
            ResourceKind::Alert => &[
                Activity, RouteType, DirectionId, Route, Stop, Trip, Facility, Id, Banner,
                Datetime, Lifecycle, Severity,
            ],
            ResourceKind::Facility => &[Stop, Type],
            ResourceKind::Line => &[Id],
            ResourceKind::LiveFacility => &[Id],
            ResourceKind::Prediction => &[
                Latitude,
                Longitude,
                Radius,
                DirectionId,
                RouteType,
                Stop,
                Route,
                Trip,
                RoutePattern,
            ],
            ResourceKind::Route => &[Stop, Type, DirectionId, Date, Id],
            ResourceKind::RoutePattern => &[Id, Route, DirectionId, Stop, Canonical],
            ResourceKind::Schedule => &[
                Date,
                DirectionId,
                RouteType,
                MinTime,
                MaxTime,
                Route,
                Stop,
                Trip,
                StopSequence,
            ],
            ResourceKind::Service => &[Id, Route],
            ResourceKind::Shape => &[Route],
            ResourceKind::Stop => &[
                Date,
                DirectionId,
                Latitude,
                Longitude,
                Radius,
                Id,
                RouteType,
                Route,
                Service,
                LocationType,
            ],
            ResourceKind::Trip => &[Date, DirectionId, Route, RoutePattern, Id, Name],
            ResourceKind::Vehicle => &[Id, Trip, Label, Route, DirectionId, RouteType],
        }
    }

    /// Whether the endpoints accept `include`.
    pub fn supports_include(self) -> bool {
        !matches!(self, ResourceKind::Service | ResourceKind::Shape)
    }

    /// The collection endpoint's mandatory filter, if it has one.
    pub fn requirement(self) -> Option<FilterRequirement> {
        use Filter::*;

        match self {
            ResourceKind::Prediction => Some(FilterRequirement {
                any_of: &[
                    Latitude,
                    Longitude,
                    Radius,
                    DirectionId,
                    RouteType,
                    Stop,
                    Route,
                    Trip,
                    RoutePattern,
                ],
                description: "latitude/longitude, radius, direction_id, route_type, stop, route, trip, or route_pattern",
            }),
            ResourceKind::Schedule => Some(FilterRequirement {
                any_of: &[Route, Stop, Trip],
                description: "route, stop, or trip",
            }),
            ResourceKind::Service => Some(FilterRequirement {
                any_of: &[Id, Route],
                description: "id or route",
            }),
            ResourceKind::Trip => Some(FilterRequirement {
                any_of: &[Id, Route, RoutePattern, Name],
                description: "id, route, route_pattern, or name",
            }),
            ResourceKind::Shape => Some(FilterRequirement {
                any_of: &[Route],
                description: "route",
            }),
            ResourceKind::LiveFacility => Some(FilterRequirement {
                any_of: &[Id],
                description: "id",
            }),
            _ => None,
        }
    }

    /// Whether latitude and longitude must be given together.
    pub fn pairs_coordinates(self) -> bool {
        matches!(self, ResourceKind::Prediction | ResourceKind::Stop)
    }

    /// URL of the collection endpoint under `base`.
    pub fn collection_url(self, base: &Url) -> Result<Url, MbtaError> {
        join_segments(base, &[self.path()])
    }

    /// URL of a single resource under `base`.
    ///
    /// `.` and `..` are rejected: URL normalisation would turn them into the
    /// collection path.
    pub fn item_url(self, base: &Url, id: &str) -> Result<Url, MbtaError> {
        if matches!(id, "." | "..") {
            return Err(MbtaError::InvalidId {
                kind: self,
                id: id.to_string(),
            });
        }
        join_segments(base, &[self.path(), id])
    }
}

/// Append path segments to `base`, percent-encoding each one.
fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, MbtaError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| MbtaError::InvalidBaseUrl {
            url: base.to_string(),
            message: "cannot be a base URL".to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for ResourceKind {
    type Err = UnknownResourceKind;

    /// Accepts either the type tag (`route_pattern`) or the path (`route_patterns`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase().replace('-', "_");
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.type_name() == s || kind.path() == s)
            .ok_or(UnknownResourceKind(s))
    }
}
