//! Geocoding/routing resolver: turns an ordered list of stops into a
//! map-ready resolution, choosing strategy by stop count.
//!
//! Zero stops is a no-op. One stop is a single geocode, disambiguated with
//! the destination-region hint. Two or more stops become one routing call
//! (origin, waypoints, destination in itinerary order); on routing failure
//! the resolver degrades to geocoding each stop one at a time, strictly
//! sequentially to respect provider rate limits.

use std::error::Error;
use std::fmt;

use log::warn;
use url::form_urlencoded;

use crate::models::route::{PlottedStop, RouteLeg, RouteResolution, RouteStop, RouteSummary};
use crate::services::geocoding::{GeocodeError, Geocoder};
use crate::services::routing::{RoutingService, TravelMode};

/// Notice shown when the fallback path replaces the route view.
pub const PINS_ONLY_NOTICE: &str = "Rute visual tidak tersedia. Menampilkan lokasi saja.";

const EXTERNAL_MAPS_ENDPOINT: &str = "https://www.google.com/maps/dir/";

#[derive(Debug)]
pub enum ResolveError {
    /// The single stop could not be geocoded. Non-fatal to the screen.
    NotFound,
    Service(String),
}

impl ResolveError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ResolveError::NotFound => "Lokasi tidak ditemukan.",
            ResolveError::Service(_) => "Gagal memuat peta. Silakan coba lagi.",
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::NotFound => write!(f, "Location not found"),
            ResolveError::Service(msg) => write!(f, "Resolver error: {}", msg),
        }
    }
}

impl Error for ResolveError {}

/// Append the destination-region hint to an address that doesn't already
/// mention it, so bare place names geocode inside the right region. The
/// hint is cleaned of any parenthetical ("Indonesia (Bali & Jawa Timur)"
/// becomes "Indonesia").
pub fn disambiguate_address(address: &str, destination_hint: &str) -> String {
    let hint = destination_hint
        .split('(')
        .next()
        .unwrap_or(destination_hint)
        .trim();
    if hint.is_empty() {
        return address.to_string();
    }
    if address.to_lowercase().contains(&hint.to_lowercase()) {
        return address.to_string();
    }
    format!("{}, {}", address, hint)
}

/// Deep link into the external maps app for the same origin/destination/
/// mode triple. Pass-through affordance, no routing logic.
pub fn external_maps_url(origin: &str, destination: &str, mode: TravelMode) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("api", "1")
        .append_pair("origin", origin)
        .append_pair("destination", destination)
        .append_pair("travelmode", mode.as_str())
        .finish();
    format!("{}?{}", EXTERNAL_MAPS_ENDPOINT, query)
}

pub struct RouteResolver<G, R> {
    geocoder: G,
    routing: R,
}

impl<G: Geocoder, R: RoutingService> RouteResolver<G, R> {
    pub fn new(geocoder: G, routing: R) -> Self {
        Self { geocoder, routing }
    }

    /// Resolve one day's stops for the given travel mode. Each call builds
    /// a fresh resolution; the caller discards the previous one.
    pub async fn resolve(
        &self,
        stops: &[RouteStop],
        destination_hint: &str,
        mode: TravelMode,
    ) -> Result<RouteResolution, ResolveError> {
        if stops.is_empty() {
            return Ok(RouteResolution::Nothing);
        }

        if stops.len() == 1 {
            return self.resolve_single(&stops[0], destination_hint).await;
        }

        self.resolve_route(stops, destination_hint, mode).await
    }

    async fn resolve_single(
        &self,
        stop: &RouteStop,
        destination_hint: &str,
    ) -> Result<RouteResolution, ResolveError> {
        let address = disambiguate_address(&stop.address, destination_hint);
        match self.geocoder.geocode(&address).await {
            Ok(coordinate) => Ok(RouteResolution::SinglePin {
                stop: PlottedStop { coordinate, stop: stop.clone() },
            }),
            Err(GeocodeError::NotFound) => Err(ResolveError::NotFound),
            Err(e) => Err(ResolveError::Service(e.to_string())),
        }
    }

    async fn resolve_route(
        &self,
        stops: &[RouteStop],
        destination_hint: &str,
        mode: TravelMode,
    ) -> Result<RouteResolution, ResolveError> {
        let origin = disambiguate_address(&stops[0].address, destination_hint);
        let destination =
            disambiguate_address(&stops[stops.len() - 1].address, destination_hint);
        let waypoints: Vec<String> = stops[1..stops.len() - 1]
            .iter()
            .map(|stop| disambiguate_address(&stop.address, destination_hint))
            .collect();

        match self.routing.route(&origin, &destination, &waypoints, mode).await {
            Ok(legs) => {
                if let Some(plotted) = plot_from_legs(stops, &legs) {
                    let summary = RouteSummary::from_legs(&legs);
                    return Ok(RouteResolution::Route {
                        stops: plotted,
                        summary,
                        external_maps_url: external_maps_url(&origin, &destination, mode),
                        legs,
                    });
                }
                warn!(
                    "routing returned {} legs for {} stops, falling back to pins",
                    legs.len(),
                    stops.len()
                );
                self.resolve_pins(stops, destination_hint).await
            }
            Err(e) => {
                warn!("routing failed: {}, falling back to per-stop geocoding", e);
                self.resolve_pins(stops, destination_hint).await
            }
        }
    }

    /// Fallback: geocode each stop individually. One at a time, in order --
    /// never concurrently -- to stay under the provider's rate limit.
    async fn resolve_pins(
        &self,
        stops: &[RouteStop],
        destination_hint: &str,
    ) -> Result<RouteResolution, ResolveError> {
        let mut plotted = Vec::new();
        for stop in stops {
            let address = disambiguate_address(&stop.address, destination_hint);
            match self.geocoder.geocode(&address).await {
                Ok(coordinate) => {
                    plotted.push(PlottedStop { coordinate, stop: stop.clone() });
                }
                Err(e) => {
                    // A stop that fails to geocode is skipped, not fatal.
                    warn!("fallback geocode failed for '{}': {}", address, e);
                }
            }
        }

        if plotted.is_empty() {
            return Err(ResolveError::Service(
                "No stop could be placed on the map".to_string(),
            ));
        }

        Ok(RouteResolution::PinsOnly { stops: plotted, notice: PINS_ONLY_NOTICE.to_string() })
    }
}

/// Per-stop coordinates out of the route legs: the first leg's start is the
/// origin, each leg's end is the arrival at the next stop. Returns None when
/// the leg count doesn't line up with the stop count.
fn plot_from_legs(stops: &[RouteStop], legs: &[RouteLeg]) -> Option<Vec<PlottedStop>> {
    if legs.len() + 1 != stops.len() {
        return None;
    }

    let mut plotted = Vec::with_capacity(stops.len());
    plotted.push(PlottedStop { coordinate: legs[0].start, stop: stops[0].clone() });
    for (leg, stop) in legs.iter().zip(&stops[1..]) {
        plotted.push(PlottedStop { coordinate: leg.end, stop: stop.clone() });
    }
    Some(plotted)
}
