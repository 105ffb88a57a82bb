use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The two product modes sharing one shell. Content, prompts and the
/// travel-style vocabulary all key off this.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TripMode {
    General,
    Umrah,
}

impl Default for TripMode {
    fn default() -> Self {
        TripMode::General
    }
}

impl TripMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripMode::General => "general",
            TripMode::Umrah => "umrah",
        }
    }
}

/// Budget / package tier. The meaning differs per mode (budget estimate for
/// general travel, package class for umrah) but the tiers are shared.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTier {
    Hemat,
    Standard,
    Sultan,
}

impl BudgetTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Hemat => "Hemat",
            BudgetTier::Standard => "Standard",
            BudgetTier::Sultan => "Sultan",
        }
    }
}

/// User-entered planning parameters, retained verbatim so the form can be
/// re-opened pre-filled for edit-and-regenerate.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TripRequest {
    pub destination: String,
    #[serde(rename = "durationDays")]
    pub duration_days: u32,
    pub budget: BudgetTier,
    pub participants: u32,
    #[serde(rename = "travelStyle", default)]
    pub travel_style: Vec<String>,
    #[serde(rename = "specialRequests", skip_serializing_if = "Option::is_none", default)]
    pub special_requests: Option<String>,
    #[serde(rename = "departureDate", skip_serializing_if = "Option::is_none", default)]
    pub departure_date: Option<String>,
}

/// Fixed travel-style vocabulary per mode. Multi-select values on the form
/// must come from this list.
pub fn travel_style_vocabulary(mode: TripMode) -> &'static [&'static str] {
    match mode {
        TripMode::General => &[
            "Alam & Outdoor",
            "Kuliner",
            "Budaya & Sejarah",
            "Santai / Staycation",
            "Belanja",
            "Petualangan",
        ],
        TripMode::Umrah => &[
            "Ziarah Sejarah",
            "Fokus Ibadah",
            "Wisata Kuliner Halal",
            "City Tour Makkah/Madinah",
            "Belanja Oleh-oleh",
        ],
    }
}

impl TripRequest {
    /// Check form invariants before the request is allowed near the planner.
    pub fn validate(&self, mode: TripMode) -> Result<(), String> {
        if self.destination.trim().is_empty() {
            return Err("Destination must not be empty".to_string());
        }
        if self.duration_days < 1 {
            return Err("Duration must be at least 1 day".to_string());
        }
        if self.participants < 1 {
            return Err("At least 1 participant is required".to_string());
        }

        let vocabulary = travel_style_vocabulary(mode);
        for style in &self.travel_style {
            if !vocabulary.contains(&style.as_str()) {
                return Err(format!("Unknown travel style: {}", style));
            }
        }

        if let Some(date) = &self.departure_date {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| format!("Invalid departure date: {}", date))?;
        }

        Ok(())
    }
}
