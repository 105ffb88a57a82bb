use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use travas_api::models::trip::{BudgetTier, TripMode, TripRequest};
use travas_api::services::generation::{GenerationError, TextGenerator};
use travas_api::services::planner::{ItineraryPlanner, PlanError};

enum Script {
    Reply(String),
    Fail(String),
}

struct ScriptedGenerator {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    fn replying(text: &str) -> Self {
        Self { script: Script::Reply(text.to_string()), calls: AtomicUsize::new(0) }
    }

    fn failing(message: &str) -> Self {
        Self { script: Script::Fail(message.to_string()), calls: AtomicUsize::new(0) }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for &ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail(message) => Err(GenerationError::Service(message.clone())),
        }
    }
}

fn bali_request() -> TripRequest {
    TripRequest {
        destination: "Bali".to_string(),
        duration_days: 3,
        budget: BudgetTier::Standard,
        participants: 2,
        travel_style: vec!["Kuliner".to_string()],
        special_requests: None,
        departure_date: None,
    }
}

/// A model reply with the requested number of days and two activities per
/// day, in the wire shape the prompt asks for.
fn model_reply(days: usize) -> String {
    let day_plans: Vec<String> = (1..=days)
        .map(|day| {
            format!(
                r#"{{"day": {day}, "title": "Hari {day}", "activities": [
                    {{"time": "08:00", "activity": "Kegiatan {day}A",
                      "description": "Pagi", "location": "Lokasi {day}A", "cost": "Gratis"}},
                    {{"time": "14:00", "activity": "Kegiatan {day}B",
                      "description": "Siang", "location": "Lokasi {day}B", "cost": "IDR 50.000"}}
                ]}}"#
            )
        })
        .collect();
    format!(
        r#"{{"tripTitle": "Liburan Bali", "destination": "Bali",
            "duration": "{days} Hari", "tripType": "general",
            "totalCostEstimate": "IDR 3.000.000",
            "highlights": ["Pantai"], "importantInfo": ["Bawa topi"],
            "dailyItinerary": [{}]}}"#,
        day_plans.join(",")
    )
}

#[actix_rt::test]
async fn valid_reply_becomes_a_full_itinerary() {
    let generator = ScriptedGenerator::replying(&model_reply(3));
    let planner = ItineraryPlanner::new(Some(&generator));

    let itinerary = planner.generate(&bali_request(), TripMode::General).await.unwrap();

    assert_eq!(itinerary.trip_title, "Liburan Bali");
    assert_eq!(itinerary.daily_itinerary.len(), 3);
    for (index, day) in itinerary.daily_itinerary.iter().enumerate() {
        assert_eq!(day.day as usize, index + 1);
        assert_eq!(day.activities.len(), 2);
    }
    // Activity order within a day is preserved as generated.
    assert_eq!(itinerary.daily_itinerary[0].activities[0].activity, "Kegiatan 1A");
    assert_eq!(itinerary.daily_itinerary[0].activities[1].activity, "Kegiatan 1B");
}

#[actix_rt::test]
async fn fenced_reply_parses_identically_to_unfenced() {
    let plain = ScriptedGenerator::replying(&model_reply(2));
    let fenced = ScriptedGenerator::replying(&format!("```json\n{}\n```", model_reply(2)));

    let from_plain = ItineraryPlanner::new(Some(&plain))
        .generate(&bali_request(), TripMode::General)
        .await
        .unwrap();
    let from_fenced = ItineraryPlanner::new(Some(&fenced))
        .generate(&bali_request(), TripMode::General)
        .await
        .unwrap();

    assert_eq!(from_plain, from_fenced);
}

#[actix_rt::test]
async fn requested_mode_overrides_the_generated_tag() {
    // The reply tags itself "general"; the umrah request wins.
    let generator = ScriptedGenerator::replying(&model_reply(2));
    let planner = ItineraryPlanner::new(Some(&generator));

    let mut request = bali_request();
    request.destination = "Makkah".to_string();
    request.travel_style = vec![];
    let itinerary = planner.generate(&request, TripMode::Umrah).await.unwrap();

    assert_eq!(itinerary.trip_type, TripMode::Umrah);
}

#[actix_rt::test]
async fn reply_without_days_is_rejected_as_validation() {
    let generator = ScriptedGenerator::replying(
        r#"{"tripTitle": "Kosong", "destination": "Bali", "duration": "0 Hari",
            "tripType": "general", "totalCostEstimate": "IDR 0",
            "highlights": [], "importantInfo": [], "dailyItinerary": []}"#,
    );
    let planner = ItineraryPlanner::new(Some(&generator));

    let err = planner.generate(&bali_request(), TripMode::General).await.unwrap_err();
    assert!(matches!(err, PlanError::Validation(_)));
}

#[actix_rt::test]
async fn non_json_reply_is_a_parse_error() {
    let generator = ScriptedGenerator::replying("Maaf, saya tidak bisa membantu.");
    let planner = ItineraryPlanner::new(Some(&generator));

    let err = planner.generate(&bali_request(), TripMode::General).await.unwrap_err();
    assert!(matches!(err, PlanError::Parse(_)));
}

#[actix_rt::test]
async fn service_failure_maps_to_service_error() {
    let generator = ScriptedGenerator::failing("quota exceeded");
    let planner = ItineraryPlanner::new(Some(&generator));

    let err = planner.generate(&bali_request(), TripMode::General).await.unwrap_err();
    assert!(matches!(err, PlanError::Service(_)));
    assert_eq!(generator.call_count(), 1);
}

#[actix_rt::test]
async fn unconfigured_planner_makes_no_call() {
    let planner: ItineraryPlanner<&ScriptedGenerator> = ItineraryPlanner::new(None);
    assert!(!planner.is_configured());

    let err = planner.generate(&bali_request(), TripMode::General).await.unwrap_err();
    assert!(matches!(err, PlanError::NotConfigured));
}

#[actix_rt::test]
async fn exactly_one_outbound_call_per_generation() {
    let generator = ScriptedGenerator::replying(&model_reply(1));
    let planner = ItineraryPlanner::new(Some(&generator));

    planner.generate(&bali_request(), TripMode::General).await.unwrap();
    assert_eq!(generator.call_count(), 1);

    planner.generate(&bali_request(), TripMode::General).await.unwrap();
    assert_eq!(generator.call_count(), 2);
}
