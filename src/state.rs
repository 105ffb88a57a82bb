//! Shared application state: the capability adapters (present only when
//! their credentials are configured) and the mutable session state behind
//! mutexes. Locks are taken only between awaits, never across a capability
//! call.

use std::sync::Mutex;

use crate::services::assistant::Assistant;
use crate::services::generation::GeminiClient;
use crate::services::geocoding::GoogleGeocoder;
use crate::services::places::GooglePlaces;
use crate::services::planner::ItineraryPlanner;
use crate::services::resolver::RouteResolver;
use crate::services::routing::GoogleDirections;
use crate::services::store::ItineraryStore;

pub struct AppState {
    pub planner: ItineraryPlanner<GeminiClient>,
    /// Shared with the assistant path; the planner holds its own clone.
    pub gemini: Option<GeminiClient>,
    pub resolver: Option<RouteResolver<GoogleGeocoder, GoogleDirections>>,
    pub places: Option<GooglePlaces>,
    pub store: Mutex<ItineraryStore>,
    pub assistant: Mutex<Assistant>,
}

impl AppState {
    /// Build state from the environment. A missing credential disables the
    /// corresponding capability instead of failing startup; the affected
    /// endpoints report "not configured".
    pub fn from_env() -> Self {
        let gemini = match GeminiClient::from_env() {
            Ok(client) => {
                println!("Gemini generation service configured");
                Some(client)
            }
            Err(e) => {
                println!("Generation service not available: {}. AI features disabled.", e);
                None
            }
        };

        let resolver = match (GoogleGeocoder::from_env(), GoogleDirections::from_env()) {
            (Ok(geocoder), Ok(directions)) => {
                println!("Maps resolver configured");
                Some(RouteResolver::new(geocoder, directions))
            }
            (Err(e), _) | (_, Err(e)) => {
                println!("Maps resolver not available: {}. Route resolution disabled.", e);
                None
            }
        };

        let places = match GooglePlaces::from_env() {
            Ok(client) => {
                println!("Places media service configured");
                Some(client)
            }
            Err(e) => {
                println!("Places media not available: {}. Location media disabled.", e);
                None
            }
        };

        Self::new(gemini, resolver, places)
    }

    pub fn new(
        gemini: Option<GeminiClient>,
        resolver: Option<RouteResolver<GoogleGeocoder, GoogleDirections>>,
        places: Option<GooglePlaces>,
    ) -> Self {
        Self {
            planner: ItineraryPlanner::new(gemini.clone()),
            gemini,
            resolver,
            places,
            store: Mutex::new(ItineraryStore::new()),
            assistant: Mutex::new(Assistant::new()),
        }
    }
}
