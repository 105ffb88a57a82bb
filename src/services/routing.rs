//! Google Directions API adapter behind the `RoutingService` trait.
//!
//! Waypoints are passed through in the order given: itinerary order is
//! semantically meaningful, so no waypoint optimization is requested.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::{env, time::Duration};

use crate::models::route::{Coordinate, RouteLeg};

const DIRECTIONS_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/directions/json";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    Transit,
    Walking,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Transit => "transit",
            TravelMode::Walking => "walking",
        }
    }
}

#[derive(Debug)]
pub enum RoutingError {
    NoRoute,
    Http(reqwest::Error),
    Service(String),
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::NoRoute => write!(f, "No route found"),
            RoutingError::Http(err) => write!(f, "HTTP error: {}", err),
            RoutingError::Service(msg) => write!(f, "Routing service error: {}", msg),
        }
    }
}

impl Error for RoutingError {}

impl From<reqwest::Error> for RoutingError {
    fn from(err: reqwest::Error) -> Self {
        RoutingError::Http(err)
    }
}

#[async_trait]
pub trait RoutingService: Send + Sync {
    /// Request a multi-leg route. Interior stops are stopover waypoints in
    /// fixed order between origin and destination.
    async fn route(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[String],
        mode: TravelMode,
    ) -> Result<Vec<RouteLeg>, RoutingError>;
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Deserialize)]
struct DirectionsLeg {
    distance: ValueField,
    duration: ValueField,
    start_location: LatLng,
    end_location: LatLng,
}

#[derive(Debug, Deserialize)]
struct ValueField {
    value: u32,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Clone)]
pub struct GoogleDirections {
    http: Client,
    api_key: String,
}

impl GoogleDirections {
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        let api_key = env::var("GOOGLE_MAPS_API_KEY")
            .map_err(|_| "GOOGLE_MAPS_API_KEY environment variable not set")?;

        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { http, api_key })
    }
}

#[async_trait]
impl RoutingService for GoogleDirections {
    async fn route(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[String],
        mode: TravelMode,
    ) -> Result<Vec<RouteLeg>, RoutingError> {
        let mut query: Vec<(&str, String)> = vec![
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
            ("mode", mode.as_str().to_string()),
            ("key", self.api_key.clone()),
        ];
        if !waypoints.is_empty() {
            query.push(("waypoints", waypoints.join("|")));
        }

        let response = self.http.get(DIRECTIONS_ENDPOINT).query(&query).send().await?;

        let parsed: DirectionsResponse = response
            .json()
            .await
            .map_err(|e| RoutingError::Service(format!("Failed to parse response: {}", e)))?;

        match parsed.status.as_str() {
            "OK" => {
                let route = parsed.routes.into_iter().next().ok_or(RoutingError::NoRoute)?;
                Ok(route
                    .legs
                    .into_iter()
                    .map(|leg| RouteLeg {
                        start: Coordinate { lat: leg.start_location.lat, lng: leg.start_location.lng },
                        end: Coordinate { lat: leg.end_location.lat, lng: leg.end_location.lng },
                        distance_meters: leg.distance.value,
                        duration_seconds: leg.duration.value,
                    })
                    .collect())
            }
            "ZERO_RESULTS" | "NOT_FOUND" => Err(RoutingError::NoRoute),
            other => Err(RoutingError::Service(format!("Directions API error: {}", other))),
        }
    }
}
