//! Google Places adapter for per-location media.
//!
//! A free-text search resolves an activity's location string to its best
//! place match: one photo (bounded size), the coordinate, and the external
//! search link. Same `GOOGLE_MAPS_API_KEY` as the other maps adapters. "No
//! place found" is its own error class; the detail view treats it as a
//! placeholder, not a failure.

use reqwest::Client;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::{env, time::Duration};

use url::form_urlencoded;

use crate::models::place::PlaceMedia;
use crate::models::route::Coordinate;

const FIND_PLACE_ENDPOINT: &str =
    "https://maps.googleapis.com/maps/api/place/findplacefromtext/json";
const PLACE_PHOTO_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/place/photo";
const EXTERNAL_SEARCH_ENDPOINT: &str = "https://www.google.com/maps/search/";
const PHOTO_MAX_WIDTH: u32 = 400;
const PHOTO_MAX_HEIGHT: u32 = 300;
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug)]
pub enum PlaceMediaError {
    NotFound,
    Http(reqwest::Error),
    Service(String),
}

impl PlaceMediaError {
    pub fn user_message(&self) -> &'static str {
        match self {
            PlaceMediaError::NotFound => "Lokasi tidak ditemukan.",
            _ => "Gagal memuat media lokasi. Silakan coba lagi.",
        }
    }
}

impl fmt::Display for PlaceMediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceMediaError::NotFound => write!(f, "No place found"),
            PlaceMediaError::Http(err) => write!(f, "HTTP error: {}", err),
            PlaceMediaError::Service(msg) => write!(f, "Places service error: {}", msg),
        }
    }
}

impl Error for PlaceMediaError {}

impl From<reqwest::Error> for PlaceMediaError {
    fn from(err: reqwest::Error) -> Self {
        PlaceMediaError::Http(err)
    }
}

/// Deep link searching the external maps app for the same location text.
pub fn external_search_url(query: &str) -> String {
    let params = form_urlencoded::Serializer::new(String::new())
        .append_pair("api", "1")
        .append_pair("query", query)
        .finish();
    format!("{}?{}", EXTERNAL_SEARCH_ENDPOINT, params)
}

fn photo_url(api_key: &str, photo_reference: &str) -> String {
    let params = form_urlencoded::Serializer::new(String::new())
        .append_pair("maxwidth", &PHOTO_MAX_WIDTH.to_string())
        .append_pair("maxheight", &PHOTO_MAX_HEIGHT.to_string())
        .append_pair("photo_reference", photo_reference)
        .append_pair("key", api_key)
        .finish();
    format!("{}?{}", PLACE_PHOTO_ENDPOINT, params)
}

#[derive(Debug, Deserialize)]
struct FindPlaceResponse {
    status: String,
    #[serde(default)]
    candidates: Vec<PlaceCandidate>,
}

#[derive(Debug, Deserialize)]
struct PlaceCandidate {
    name: Option<String>,
    geometry: CandidateGeometry,
    #[serde(default)]
    photos: Vec<CandidatePhoto>,
}

#[derive(Debug, Deserialize)]
struct CandidateGeometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct CandidatePhoto {
    photo_reference: String,
}

fn media_from_candidate(candidate: PlaceCandidate, query: &str, api_key: &str) -> PlaceMedia {
    PlaceMedia {
        name: candidate.name.unwrap_or_else(|| query.to_string()),
        coordinate: Coordinate {
            lat: candidate.geometry.location.lat,
            lng: candidate.geometry.location.lng,
        },
        photo_url: candidate
            .photos
            .first()
            .map(|photo| photo_url(api_key, &photo.photo_reference)),
        external_search_url: external_search_url(query),
    }
}

#[derive(Clone)]
pub struct GooglePlaces {
    http: Client,
    api_key: String,
}

impl GooglePlaces {
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        let api_key = env::var("GOOGLE_MAPS_API_KEY")
            .map_err(|_| "GOOGLE_MAPS_API_KEY environment variable not set")?;

        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { http, api_key })
    }

    /// Resolve a location string to its media bundle via a find-place text
    /// search. The first candidate wins.
    pub async fn lookup(&self, query: &str) -> Result<PlaceMedia, PlaceMediaError> {
        let response = self
            .http
            .get(FIND_PLACE_ENDPOINT)
            .query(&[
                ("input", query),
                ("inputtype", "textquery"),
                ("fields", "name,geometry,photos"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let parsed: FindPlaceResponse = response
            .json()
            .await
            .map_err(|e| PlaceMediaError::Service(format!("Failed to parse response: {}", e)))?;

        match parsed.status.as_str() {
            "OK" => {
                let candidate = parsed
                    .candidates
                    .into_iter()
                    .next()
                    .ok_or(PlaceMediaError::NotFound)?;
                Ok(media_from_candidate(candidate, query, &self.api_key))
            }
            "ZERO_RESULTS" => Err(PlaceMediaError::NotFound),
            other => Err(PlaceMediaError::Service(format!("Places API error: {}", other))),
        }
    }
}
