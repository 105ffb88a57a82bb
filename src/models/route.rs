use serde::{Deserialize, Serialize};

use crate::models::itinerary::DayPlan;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Resolver input derived from one day's activities: only activities that
/// carry a location are projected, in itinerary order. Rebuilt on every
/// render, never mutated.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RouteStop {
    pub address: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub time: String,
}

impl RouteStop {
    pub fn from_day(day: &DayPlan) -> Vec<RouteStop> {
        day.activities
            .iter()
            .filter_map(|act| {
                act.location.as_ref().map(|location| RouteStop {
                    address: location.clone(),
                    title: act.activity.clone(),
                    description: act.description.clone(),
                    time: act.time.clone(),
                })
            })
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RouteLeg {
    pub start: Coordinate,
    pub end: Coordinate,
    #[serde(rename = "distanceMeters")]
    pub distance_meters: u32,
    #[serde(rename = "durationSeconds")]
    pub duration_seconds: u32,
}

/// A stop placed on the map: the resolved coordinate plus the stop data for
/// its detail popup.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlottedStop {
    pub coordinate: Coordinate,
    pub stop: RouteStop,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RouteSummary {
    /// Total distance in km, one decimal.
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    /// Total duration in whole minutes.
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: u32,
}

impl RouteSummary {
    pub fn from_legs(legs: &[RouteLeg]) -> Self {
        let total_meters: u64 = legs.iter().map(|leg| leg.distance_meters as u64).sum();
        let total_seconds: u64 = legs.iter().map(|leg| leg.duration_seconds as u64).sum();

        RouteSummary {
            distance_km: (total_meters as f64 / 100.0).round() / 10.0,
            duration_minutes: ((total_seconds as f64) / 60.0).round() as u32,
        }
    }
}

/// Outcome of resolving one day's stops. Built fresh per travel-mode change;
/// the previous resolution is discarded, not merged.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RouteResolution {
    /// No stops carried a location. Nothing to resolve, not an error.
    Nothing,
    /// A single stop, geocoded; the map centers and zooms on it.
    SinglePin { stop: PlottedStop },
    /// A multi-leg route with numbered markers in visit order.
    Route {
        stops: Vec<PlottedStop>,
        legs: Vec<RouteLeg>,
        summary: RouteSummary,
        #[serde(rename = "externalMapsUrl")]
        external_maps_url: String,
    },
    /// Routing failed; stops were geocoded individually instead.
    PinsOnly { stops: Vec<PlottedStop>, notice: String },
}
