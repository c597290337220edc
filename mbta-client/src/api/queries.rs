//! Per-kind query functions.
//!
//! Thin typed wrappers over [`MbtaClient::list`] and [`MbtaClient::get`], one
//! list and one lookup per resource kind, plus `all_*` for the kinds where an
//! unfiltered listing is allowed.

use super::client::MbtaClient;
use super::transport::Transport;
use crate::error::MbtaError;
use crate::params::QueryParams;
use crate::resources::{
    Alert, Facility, Line, LiveFacility, Prediction, Route, RoutePattern, Schedule, Service,
    Shape, Stop, Trip, Vehicle,
};

macro_rules! impl_queries {
    ($record:ty, $list:ident, $get:ident) => {
        #[doc = concat!("List `", stringify!($record), "` records matching `params`, in server order.")]
        pub async fn $list(&self, params: &QueryParams) -> Result<Vec<$record>, MbtaError> {
            self.list::<$record>(params).await
        }

        #[doc = concat!("Fetch one `", stringify!($record), "` by id.")]
        pub async fn $get(&self, id: &str, params: &QueryParams) -> Result<$record, MbtaError> {
            self.get::<$record>(id, params).await
        }
    };
    ($record:ty, $list:ident, $get:ident, $all:ident) => {
        impl_queries!($record, $list, $get);

        #[doc = concat!("Every `", stringify!($record), "`; same as `", stringify!($list), "` with no parameters.")]
        pub async fn $all(&self) -> Result<Vec<$record>, MbtaError> {
            self.$list(&QueryParams::default()).await
        }
    };
}

impl<T: Transport> MbtaClient<T> {
    impl_queries!(Alert, alerts, alert, all_alerts);
    impl_queries!(Facility, facilities, facility, all_facilities);
    impl_queries!(Line, lines, line, all_lines);
    impl_queries!(LiveFacility, live_facilities, live_facility);
    impl_queries!(Prediction, predictions, prediction);
    impl_queries!(Route, routes, route, all_routes);
    impl_queries!(RoutePattern, route_patterns, route_pattern, all_route_patterns);
    impl_queries!(Schedule, schedules, schedule);
    impl_queries!(Service, services, service);
    impl_queries!(Shape, shapes, shape);
    impl_queries!(Stop, stops, stop, all_stops);
    impl_queries!(Trip, trips, trip);
    impl_queries!(Vehicle, vehicles, vehicle, all_vehicles);
}
