//! Query parameter builder.
//!
//! [`QueryParams`] collects pagination, sorting, sparse fieldsets, `include`
//! and `filter[...]` entries. Only parameters that were explicitly set end up
//! on the wire; the API key is merged in by [`QueryParams::to_pairs`] so that
//! every request carries it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::config::ApiKey;
use crate::endpoint::ResourceKind;
use crate::error::MbtaError;

/// Query parameter carrying the API key.
pub const API_KEY_PARAM: &str = "api_key";

/// Error returned when parsing an unknown filter name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter: {0}")]
pub struct UnknownFilter(pub String);

/// A `filter[...]` dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Filter {
    Activity,
    RouteType,
    DirectionId,
    Route,
    Stop,
    Trip,
    Facility,
    Id,
    Banner,
    Datetime,
    Lifecycle,
    Severity,
    /// Facility type on `/facilities`, route type on `/routes`.
    Type,
    Latitude,
    Longitude,
    Radius,
    RoutePattern,
    Date,
    Canonical,
    MinTime,
    MaxTime,
    StopSequence,
    Service,
    LocationType,
    Name,
    Label,
}

impl Filter {
    pub const ALL: [Filter; 26] = [
        Filter::Activity,
        Filter::RouteType,
        Filter::DirectionId,
        Filter::Route,
        Filter::Stop,
        Filter::Trip,
        Filter::Facility,
        Filter::Id,
        Filter::Banner,
        Filter::Datetime,
        Filter::Lifecycle,
        Filter::Severity,
        Filter::Type,
        Filter::Latitude,
        Filter::Longitude,
        Filter::Radius,
        Filter::RoutePattern,
        Filter::Date,
        Filter::Canonical,
        Filter::MinTime,
        Filter::MaxTime,
        Filter::StopSequence,
        Filter::Service,
        Filter::LocationType,
        Filter::Name,
        Filter::Label,
    ];

    /// Dimension name as it appears between the brackets.
    pub fn name(self) -> &'static str {
        match self {
            Filter::Activity => "activity",
            Filter::RouteType => "route_type",
            Filter::DirectionId => "direction_id",
            Filter::Route => "route",
            Filter::Stop => "stop",
            Filter::Trip => "trip",
            Filter::Facility => "facility",
            Filter::Id => "id",
            Filter::Banner => "banner",
            Filter::Datetime => "datetime",
            Filter::Lifecycle => "lifecycle",
            Filter::Severity => "severity",
            Filter::Type => "type",
            Filter::Latitude => "latitude",
            Filter::Longitude => "longitude",
            Filter::Radius => "radius",
            Filter::RoutePattern => "route_pattern",
            Filter::Date => "date",
            Filter::Canonical => "canonical",
            Filter::MinTime => "min_time",
            Filter::MaxTime => "max_time",
            Filter::StopSequence => "stop_sequence",
            Filter::Service => "service",
            Filter::LocationType => "location_type",
            Filter::Name => "name",
            Filter::Label => "label",
        }
    }

    /// Full query key, e.g. `filter[route]`.
    pub fn key(self) -> String {
        format!("filter[{}]", self.name())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = UnknownFilter;

    /// Accepts the bare dimension (`route_type`) or the full key (`filter[route_type]`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let name = s
            .strip_prefix("filter[")
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(s);
        Filter::ALL
            .into_iter()
            .find(|filter| filter.name() == name)
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}

/// Optional query parameters for one request.
///
/// Unset parameters are omitted entirely, which is distinct from filtering
/// on an empty value.
///
/// # Examples
///
/// ```
/// use mbta_client::{Filter, QueryParams};
///
/// let params = QueryParams::new().route(["Red", "Orange"]).direction_id(0).limit(5);
/// assert_eq!(params.get(Filter::Route), Some("Red,Orange"));
/// assert_eq!(params.get(Filter::DirectionId), Some("0"));
/// assert_eq!(params.get(Filter::Stop), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    page_offset: Option<u32>,
    page_limit: Option<u32>,
    sort: Option<String>,
    fields: BTreeMap<ResourceKind, String>,
    include: Option<String>,
    filters: BTreeMap<Filter, String>,
}

/// Join any iterable of displayable values with commas.
fn join<I>(values: I) -> String
where
    I: IntoIterator,
    I::Item: ToString,
{
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// `page[offset]`
    pub fn offset(mut self, offset: u32) -> Self {
        self.page_offset = Some(offset);
        self
    }

    /// `page[limit]`
    pub fn limit(mut self, limit: u32) -> Self {
        self.page_limit = Some(limit);
        self
    }

    /// `sort`; prefix the attribute with `-` for descending order.
    pub fn sort(mut self, attribute: impl Into<String>) -> Self {
        self.sort = Some(attribute.into());
        self
    }

    /// `fields[<kind>]`: restrict the attributes returned for `kind`.
    pub fn fields<I>(mut self, kind: ResourceKind, attributes: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.fields.insert(kind, join(attributes));
        self
    }

    /// `include`: related resources to side-load into `included`.
    pub fn include<I>(mut self, relationships: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.include = Some(join(relationships));
        self
    }

    /// Set any filter to a comma-joined list of values.
    pub fn filter<I>(mut self, filter: Filter, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.filters.insert(filter, join(values));
        self
    }

    /// Set any filter to a single value.
    pub fn filter_value(mut self, filter: Filter, value: impl ToString) -> Self {
        self.filters.insert(filter, value.to_string());
        self
    }

    pub fn activity<I>(self, activities: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.filter(Filter::Activity, activities)
    }

    /// Route types: 0 light rail, 1 subway, 2 commuter rail, 3 bus, 4 ferry.
    pub fn route_type<I>(self, route_types: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        self.filter(Filter::RouteType, route_types)
    }

    pub fn direction_id(self, direction_id: u8) -> Self {
        self.filter_value(Filter::DirectionId, direction_id)
    }

    pub fn route<I>(self, routes: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.filter(Filter::Route, routes)
    }

    pub fn stop<I>(self, stops: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.filter(Filter::Stop, stops)
    }

    pub fn trip<I>(self, trips: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.filter(Filter::Trip, trips)
    }

    pub fn facility<I>(self, facilities: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.filter(Filter::Facility, facilities)
    }

    pub fn id<I>(self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.filter(Filter::Id, ids)
    }

    pub fn banner(self, banner: bool) -> Self {
        self.filter_value(Filter::Banner, banner)
    }

    /// ISO 8601 datetime, or `NOW`.
    pub fn datetime(self, datetime: impl Into<String>) -> Self {
        self.filter_value(Filter::Datetime, datetime.into())
    }

    pub fn lifecycle<I>(self, lifecycles: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.filter(Filter::Lifecycle, lifecycles)
    }

    pub fn severity<I>(self, severities: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        self.filter(Filter::Severity, severities)
    }

    /// `filter[type]` on facilities (e.g. `ELEVATOR`).
    pub fn facility_type<I>(self, types: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.filter(Filter::Type, types)
    }

    /// `filter[type]` on routes.
    pub fn route_kind<I>(self, route_types: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        self.filter(Filter::Type, route_types)
    }

    pub fn latitude(self, latitude: f64) -> Self {
        self.filter_value(Filter::Latitude, latitude)
    }

    pub fn longitude(self, longitude: f64) -> Self {
        self.filter_value(Filter::Longitude, longitude)
    }

    /// Convenience for setting latitude and longitude together.
    pub fn near(self, latitude: f64, longitude: f64) -> Self {
        self.latitude(latitude).longitude(longitude)
    }

    /// Search radius in degrees (0.02 is roughly one mile).
    pub fn radius(self, radius: f64) -> Self {
        self.filter_value(Filter::Radius, radius)
    }

    pub fn route_pattern<I>(self, route_patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.filter(Filter::RoutePattern, route_patterns)
    }

    pub fn date(self, date: NaiveDate) -> Self {
        self.filter_value(Filter::Date, date.format("%Y-%m-%d"))
    }

    pub fn canonical(self, canonical: bool) -> Self {
        self.filter_value(Filter::Canonical, canonical)
    }

    /// `HH:MM`, may exceed 24:00 for service past midnight.
    pub fn min_time(self, time: impl Into<String>) -> Self {
        self.filter_value(Filter::MinTime, time.into())
    }

    /// `HH:MM`, may exceed 24:00 for service past midnight.
    pub fn max_time(self, time: impl Into<String>) -> Self {
        self.filter_value(Filter::MaxTime, time.into())
    }

    pub fn stop_sequence<I>(self, sequences: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.filter(Filter::StopSequence, sequences)
    }

    pub fn service<I>(self, services: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.filter(Filter::Service, services)
    }

    pub fn location_type<I>(self, location_types: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        self.filter(Filter::LocationType, location_types)
    }

    pub fn name<I>(self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.filter(Filter::Name, names)
    }

    pub fn label<I>(self, labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.filter(Filter::Label, labels)
    }

    /// Value of a filter, if set.
    pub fn get(&self, filter: Filter) -> Option<&str> {
        self.filters.get(&filter).map(String::as_str)
    }

    pub fn is_set(&self, filter: Filter) -> bool {
        self.filters.contains_key(&filter)
    }

    /// Filters that have been set, in a stable order.
    pub fn filters(&self) -> impl Iterator<Item = (Filter, &str)> {
        self.filters.iter().map(|(f, v)| (*f, v.as_str()))
    }

    /// Check these parameters against a collection endpoint before sending.
    ///
    /// Fails on parameters the endpoint does not understand, on a missing
    /// mandatory filter, and on an unpaired latitude/longitude.
    pub fn validate_list(&self, kind: ResourceKind) -> Result<(), MbtaError> {
        if let Some(requirement) = kind.requirement()
            && !requirement.any_of.iter().any(|f| self.is_set(*f))
        {
            return Err(MbtaError::MissingFilter {
                kind,
                expected: requirement.description,
            });
        }

        if kind.pairs_coordinates()
            && self.is_set(Filter::Latitude) != self.is_set(Filter::Longitude)
        {
            return Err(MbtaError::UnpairedCoordinates { kind });
        }

        let supported = kind.supported_filters();
        if let Some(filter) = self.filters.keys().find(|f| !supported.contains(*f)) {
            return Err(MbtaError::UnsupportedParameter {
                kind,
                parameter: filter.key(),
            });
        }

        self.check_include(kind)
    }

    /// Check these parameters against a single-resource endpoint.
    ///
    /// Only sparse fieldsets and `include` apply to a lookup by id.
    pub fn validate_item(&self, kind: ResourceKind) -> Result<(), MbtaError> {
        let unsupported = if self.page_offset.is_some() {
            Some("page[offset]".to_string())
        } else if self.page_limit.is_some() {
            Some("page[limit]".to_string())
        } else if self.sort.is_some() {
            Some("sort".to_string())
        } else {
            self.filters.keys().next().map(|f| f.key())
        };

        if let Some(parameter) = unsupported {
            return Err(MbtaError::UnsupportedParameter { kind, parameter });
        }

        self.check_include(kind)
    }

    fn check_include(&self, kind: ResourceKind) -> Result<(), MbtaError> {
        if self.include.is_some() && !kind.supports_include() {
            return Err(MbtaError::UnsupportedParameter {
                kind,
                parameter: "include".to_string(),
            });
        }
        Ok(())
    }

    /// Render as query pairs, API key first.
    pub fn to_pairs(&self, api_key: &ApiKey) -> Vec<(String, String)> {
        let mut pairs = vec![(API_KEY_PARAM.to_string(), api_key.as_str().to_string())];

        if let Some(offset) = self.page_offset {
            pairs.push(("page[offset]".to_string(), offset.to_string()));
        }
        if let Some(limit) = self.page_limit {
            pairs.push(("page[limit]".to_string(), limit.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        for (kind, attributes) in &self.fields {
            pairs.push((format!("fields[{}]", kind.type_name()), attributes.clone()));
        }
        if let Some(include) = &self.include {
            pairs.push(("include".to_string(), include.clone()));
        }
        for (filter, value) in &self.filters {
            pairs.push((filter.key(), value.clone()));
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ApiKey {
        ApiKey::new("secret").unwrap()
    }

    fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Vec<&'a str> {
        pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn empty_params_carry_only_the_key() {
        let pairs = QueryParams::new().to_pairs(&key());
        assert_eq!(pairs, vec![("api_key".to_string(), "secret".to_string())]);
    }

    #[test]
    fn pagination_sort_and_include() {
        let pairs = QueryParams::new()
            .offset(0)
            .limit(25)
            .sort("-arrival_time")
            .include(["stop", "trip"])
            .to_pairs(&key());

        assert_eq!(lookup(&pairs, "page[offset]"), vec!["0"]);
        assert_eq!(lookup(&pairs, "page[limit]"), vec!["25"]);
        assert_eq!(lookup(&pairs, "sort"), vec!["-arrival_time"]);
        assert_eq!(lookup(&pairs, "include"), vec!["stop,trip"]);
    }

    #[test]
    fn sparse_fieldsets_per_kind() {
        let pairs = QueryParams::new()
            .fields(ResourceKind::Stop, ["name", "latitude"])
            .fields(ResourceKind::RoutePattern, ["name"])
            .to_pairs(&key());

        assert_eq!(lookup(&pairs, "fields[stop]"), vec!["name,latitude"]);
        assert_eq!(lookup(&pairs, "fields[route_pattern]"), vec!["name"]);
    }

    #[test]
    fn typed_setters_render_values() {
        let params = QueryParams::new()
            .route_type([0, 1])
            .direction_id(1)
            .banner(false)
            .canonical(true)
            .near(42.3601, -71.0589)
            .radius(0.02)
            .date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
            .min_time("23:30")
            .max_time("25:10")
            .severity([7, 10]);

        assert_eq!(params.get(Filter::RouteType), Some("0,1"));
        assert_eq!(params.get(Filter::DirectionId), Some("1"));
        assert_eq!(params.get(Filter::Banner), Some("false"));
        assert_eq!(params.get(Filter::Canonical), Some("true"));
        assert_eq!(params.get(Filter::Latitude), Some("42.3601"));
        assert_eq!(params.get(Filter::Longitude), Some("-71.0589"));
        assert_eq!(params.get(Filter::Radius), Some("0.02"));
        assert_eq!(params.get(Filter::Date), Some("2024-03-09"));
        assert_eq!(params.get(Filter::MinTime), Some("23:30"));
        assert_eq!(params.get(Filter::MaxTime), Some("25:10"));
        assert_eq!(params.get(Filter::Severity), Some("7,10"));
    }

    #[test]
    fn direction_id_key_is_well_formed() {
        let pairs = QueryParams::new().direction_id(0).to_pairs(&key());
        assert_eq!(lookup(&pairs, "filter[direction_id]"), vec!["0"]);
    }

    #[test]
    fn empty_filter_is_not_absent() {
        let params = QueryParams::new().route(Vec::<String>::new());
        assert!(params.is_set(Filter::Route));
        assert_eq!(params.get(Filter::Route), Some(""));
    }

    #[test]
    fn facility_and_route_type_share_a_key() {
        let facilities = QueryParams::new().facility_type(["ELEVATOR", "ESCALATOR"]);
        assert_eq!(facilities.get(Filter::Type), Some("ELEVATOR,ESCALATOR"));

        let routes = QueryParams::new().route_kind([2]);
        assert_eq!(routes.get(Filter::Type), Some("2"));
    }

    #[test]
    fn parse_filter_names() {
        assert_eq!("route".parse::<Filter>(), Ok(Filter::Route));
        assert_eq!("filter[min_time]".parse::<Filter>(), Ok(Filter::MinTime));
        assert!("colour".parse::<Filter>().is_err());
    }

    #[test]
    fn predictions_require_a_filter() {
        let err = QueryParams::new()
            .limit(10)
            .validate_list(ResourceKind::Prediction)
            .unwrap_err();
        assert!(matches!(
            err,
            MbtaError::MissingFilter {
                kind: ResourceKind::Prediction,
                ..
            }
        ));

        assert!(
            QueryParams::new()
                .route(["Red"])
                .validate_list(ResourceKind::Prediction)
                .is_ok()
        );
    }

    #[test]
    fn predictions_require_paired_coordinates() {
        let err = QueryParams::new()
            .latitude(42.35)
            .validate_list(ResourceKind::Prediction)
            .unwrap_err();
        assert!(matches!(err, MbtaError::UnpairedCoordinates { .. }));

        let err = QueryParams::new()
            .longitude(-71.06)
            .route(["Red"])
            .validate_list(ResourceKind::Prediction)
            .unwrap_err();
        assert!(matches!(err, MbtaError::UnpairedCoordinates { .. }));

        assert!(
            QueryParams::new()
                .near(42.35, -71.06)
                .validate_list(ResourceKind::Prediction)
                .is_ok()
        );
    }

    #[test]
    fn stops_require_paired_coordinates() {
        let err = QueryParams::new()
            .latitude(42.35)
            .validate_list(ResourceKind::Stop)
            .unwrap_err();
        assert!(matches!(
            err,
            MbtaError::UnpairedCoordinates {
                kind: ResourceKind::Stop
            }
        ));

        let err = QueryParams::new()
            .longitude(-71.06)
            .radius(0.01)
            .validate_list(ResourceKind::Stop)
            .unwrap_err();
        assert!(matches!(err, MbtaError::UnpairedCoordinates { .. }));

        assert!(
            QueryParams::new()
                .near(42.35, -71.06)
                .radius(0.01)
                .validate_list(ResourceKind::Stop)
                .is_ok()
        );
        assert!(QueryParams::new().validate_list(ResourceKind::Stop).is_ok());
    }

    #[test]
    fn schedules_require_route_stop_or_trip() {
        let err = QueryParams::new()
            .date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
            .validate_list(ResourceKind::Schedule)
            .unwrap_err();
        assert!(matches!(err, MbtaError::MissingFilter { .. }));

        assert!(
            QueryParams::new()
                .stop(["place-sstat"])
                .validate_list(ResourceKind::Schedule)
                .is_ok()
        );
    }

    #[test]
    fn services_and_trips_require_a_filter() {
        for kind in [ResourceKind::Service, ResourceKind::Trip] {
            assert!(QueryParams::new().validate_list(kind).is_err());
            assert!(QueryParams::new().id(["x"]).validate_list(kind).is_ok());
        }
        assert!(
            QueryParams::new()
                .name(["1702"])
                .validate_list(ResourceKind::Trip)
                .is_ok()
        );
    }

    #[test]
    fn unsupported_filter_is_rejected() {
        let err = QueryParams::new()
            .label(["1234"])
            .validate_list(ResourceKind::Stop)
            .unwrap_err();
        match err {
            MbtaError::UnsupportedParameter { kind, parameter } => {
                assert_eq!(kind, ResourceKind::Stop);
                assert_eq!(parameter, "filter[label]");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn include_rejected_where_unsupported() {
        let err = QueryParams::new()
            .route(["Red"])
            .include(["route"])
            .validate_list(ResourceKind::Shape)
            .unwrap_err();
        assert!(matches!(err, MbtaError::UnsupportedParameter { .. }));
    }

    #[test]
    fn item_lookup_accepts_only_fields_and_include() {
        let ok = QueryParams::new()
            .fields(ResourceKind::Stop, ["name"])
            .include(["parent_station"]);
        assert!(ok.validate_item(ResourceKind::Stop).is_ok());

        let err = QueryParams::new()
            .limit(1)
            .validate_item(ResourceKind::Stop)
            .unwrap_err();
        assert!(matches!(err, MbtaError::UnsupportedParameter { .. }));

        let err = QueryParams::new()
            .route(["Red"])
            .validate_item(ResourceKind::Stop)
            .unwrap_err();
        assert!(matches!(err, MbtaError::UnsupportedParameter { .. }));
    }
}
