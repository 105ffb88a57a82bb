//! Itinerary generation pipeline: prompt -> model -> fence stripping ->
//! parse -> validate. The result is atomic: either a valid itinerary with a
//! non-empty day list comes back, or the whole response is rejected.

use std::error::Error;
use std::fmt;

use log::warn;

use crate::models::itinerary::Itinerary;
use crate::models::trip::{TripMode, TripRequest};
use crate::services::generation::{GenerationError, TextGenerator};
use crate::services::prompt_builder::build_itinerary_prompt;

#[derive(Debug)]
pub enum PlanError {
    /// The generation capability has no credential. Surfaced distinctly
    /// from service failures; no network call is attempted.
    NotConfigured,
    Service(String),
    Parse(String),
    Validation(String),
}

impl PlanError {
    /// The single user-facing message per failure class. Parse and service
    /// failures collapse to the same "try again"; only configuration is
    /// distinguished.
    pub fn user_message(&self) -> &'static str {
        match self {
            PlanError::NotConfigured => {
                "Layanan AI belum dikonfigurasi. Hubungi penyedia aplikasi."
            }
            _ => "Gagal membuat itinerary. Periksa koneksi dan coba lagi.",
        }
    }
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::NotConfigured => write!(f, "Generation service not configured"),
            PlanError::Service(msg) => write!(f, "Generation failed: {}", msg),
            PlanError::Parse(msg) => write!(f, "Response was not valid itinerary JSON: {}", msg),
            PlanError::Validation(msg) => write!(f, "Generated itinerary rejected: {}", msg),
        }
    }
}

impl Error for PlanError {}

/// Strip a Markdown code fence the model may wrap around the JSON payload.
/// Idempotent: unfenced input passes through unchanged.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string on the opening fence ("json", "JSON", ...).
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    match rest.trim_end().strip_suffix("```") {
        Some(inner) => inner.trim(),
        None => rest.trim(),
    }
}

/// Last-resort extraction when the model wraps the JSON in prose: the
/// substring between the first '{' and the last '}'.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

pub struct ItineraryPlanner<G> {
    generator: Option<G>,
}

impl<G: TextGenerator> ItineraryPlanner<G> {
    pub fn new(generator: Option<G>) -> Self {
        Self { generator }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Run one generation. Exactly one outbound call; a retry is a fresh
    /// user-initiated invocation.
    pub async fn generate(
        &self,
        request: &TripRequest,
        mode: TripMode,
    ) -> Result<Itinerary, PlanError> {
        let generator = self.generator.as_ref().ok_or(PlanError::NotConfigured)?;

        let prompt = build_itinerary_prompt(request, mode);
        let raw = generator.generate(&prompt).await.map_err(|e| {
            warn!("generation call failed: {}", e);
            match e {
                GenerationError::EmptyResponse => PlanError::Parse("empty response".to_string()),
                other => PlanError::Service(other.to_string()),
            }
        })?;

        let body = strip_code_fences(&raw);
        let mut itinerary: Itinerary = match serde_json::from_str(body) {
            Ok(parsed) => parsed,
            Err(first_err) => {
                let Some(candidate) = extract_json_object(body) else {
                    warn!("model response was not itinerary JSON: {}", first_err);
                    return Err(PlanError::Parse(first_err.to_string()));
                };
                serde_json::from_str(candidate).map_err(|e| {
                    warn!("model response was not itinerary JSON: {}", e);
                    PlanError::Parse(e.to_string())
                })?
            }
        };

        // The requested mode is authoritative over whatever the model tagged.
        itinerary.trip_type = mode;

        itinerary.validate().map_err(|msg| {
            warn!("generated itinerary failed validation: {}", msg);
            PlanError::Validation(msg)
        })?;

        Ok(itinerary)
    }
}
