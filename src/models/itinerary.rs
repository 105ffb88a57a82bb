use serde::{Deserialize, Serialize};

use crate::models::trip::TripMode;

/// The validated AI output: a day-by-day trip plan. Field names match the
/// JSON shape the model is asked to produce; everything except the day list
/// is tolerated missing so a sloppy response still parses.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Itinerary {
    #[serde(rename = "tripTitle", default)]
    pub trip_title: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub duration: String,
    #[serde(rename = "tripType", default)]
    pub trip_type: TripMode,
    #[serde(rename = "totalCostEstimate", default)]
    pub total_cost_estimate: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(rename = "importantInfo", default)]
    pub important_info: Vec<String>,
    #[serde(rename = "dailyItinerary", default)]
    pub daily_itinerary: Vec<DayPlan>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DayPlan {
    pub day: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// One scheduled event. Time is a free-text label, not a strict time type.
/// Location, when present, is the join key into the routing subsystem.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Activity {
    #[serde(default)]
    pub time: String,
    pub activity: String,
    #[serde(default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cost: Option<String>,
}

impl Itinerary {
    /// A successfully generated itinerary must have at least one day.
    /// Empty activity lists within a day are tolerated.
    pub fn validate(&self) -> Result<(), String> {
        if self.daily_itinerary.is_empty() {
            return Err("dailyItinerary must not be empty".to_string());
        }
        Ok(())
    }

    pub fn day(&self, day: u32) -> Option<&DayPlan> {
        self.daily_itinerary.iter().find(|plan| plan.day == day)
    }
}
