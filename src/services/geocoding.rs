//! Google Geocoding API adapter behind the `Geocoder` trait.
//!
//! Uses the same `GOOGLE_MAPS_API_KEY` environment variable as the
//! directions adapter. "Not found" is its own error class so callers can
//! treat it as non-fatal.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::{env, time::Duration};

use crate::models::route::Coordinate;

const GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug)]
pub enum GeocodeError {
    NotFound,
    Http(reqwest::Error),
    Service(String),
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeError::NotFound => write!(f, "Address not found"),
            GeocodeError::Http(err) => write!(f, "HTTP error: {}", err),
            GeocodeError::Service(msg) => write!(f, "Geocoding service error: {}", msg),
        }
    }
}

impl Error for GeocodeError {}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        GeocodeError::Http(err)
    }
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError>;
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Clone)]
pub struct GoogleGeocoder {
    http: Client,
    api_key: String,
}

impl GoogleGeocoder {
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
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let response = self
            .http
            .get(GEOCODE_ENDPOINT)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let parsed: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::Service(format!("Failed to parse response: {}", e)))?;

        match parsed.status.as_str() {
            "OK" => {
                let result = parsed.results.into_iter().next().ok_or(GeocodeError::NotFound)?;
                Ok(Coordinate {
                    lat: result.geometry.location.lat,
                    lng: result.geometry.location.lng,
                })
            }
            "ZERO_RESULTS" => Err(GeocodeError::NotFound),
            other => Err(GeocodeError::Service(format!("Geocoding API error: {}", other))),
        }
    }
}
