#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};

use travas_api::models::itinerary::{Activity, DayPlan, Itinerary};
use travas_api::models::trip::{BudgetTier, TripMode, TripRequest};
use travas_api::routes;
use travas_api::state::AppState;

pub struct TestApp {
    pub state: web::Data<AppState>,
}

impl TestApp {
    /// A test app with no credentials configured: the AI and maps
    /// capabilities report "not configured" instead of calling out.
    pub fn new() -> Self {
        Self { state: web::Data::new(AppState::new(None, None, None)) }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(self.state.clone())
            .route("/health", web::get().to(|| async { "OK" }))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/itineraries")
                            .route("/generate", web::post().to(routes::itinerary::generate))
                            .route("/draft/save", web::post().to(routes::itinerary::save_draft))
                            .route("/draft/edit", web::post().to(routes::itinerary::edit_draft))
                            .route("/draft", web::delete().to(routes::itinerary::discard_draft)),
                    )
                    .service(
                        web::scope("/trip")
                            .route("", web::get().to(routes::itinerary::saved_trip))
                            .route("/guide-steps", web::get().to(routes::itinerary::guide_steps))
                            .route("/days/{day}/stops", web::get().to(routes::itinerary::day_stops)),
                    )
                    .route("/routes/resolve", web::post().to(routes::route::resolve))
                    .route("/places/media", web::get().to(routes::place::media))
                    .service(
                        web::scope("/assistant").service(
                            web::scope("/{topic}")
                                .route("/messages", web::post().to(routes::assistant::send_message))
                                .route("/messages", web::get().to(routes::assistant::history)),
                        ),
                    ),
            )
    }
}

pub fn trip_request() -> TripRequest {
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

/// A small valid itinerary for store and voice-guide tests.
pub fn sample_itinerary(title: &str) -> Itinerary {
    Itinerary {
        trip_title: title.to_string(),
        destination: "Bali".to_string(),
        duration: "2 Hari 1 Malam".to_string(),
        trip_type: TripMode::General,
        total_cost_estimate: "IDR 3.500.000".to_string(),
        highlights: vec!["Pantai".to_string(), "Kuliner lokal".to_string()],
        important_info: vec!["Bawa sunscreen".to_string()],
        daily_itinerary: vec![
            DayPlan {
                day: 1,
                title: "Pantai Selatan".to_string(),
                activities: vec![
                    Activity {
                        time: "08:00".to_string(),
                        activity: "Pantai Kuta".to_string(),
                        description: "Berenang dan sarapan di pantai".to_string(),
                        location: Some("Pantai Kuta".to_string()),
                        cost: Some("Gratis".to_string()),
                    },
                    Activity {
                        time: "13:00".to_string(),
                        activity: "Makan siang seafood".to_string(),
                        description: "Ikan bakar Jimbaran".to_string(),
                        location: Some("Jimbaran".to_string()),
                        cost: Some("IDR 150.000".to_string()),
                    },
                ],
            },
            DayPlan {
                day: 2,
                title: "Ubud".to_string(),
                activities: vec![
                    Activity {
                        time: "09:00".to_string(),
                        activity: "Sawah Tegallalang".to_string(),
                        description: "Jalan pagi di terasering".to_string(),
                        location: Some("Tegallalang".to_string()),
                        cost: None,
                    },
                    Activity {
                        time: "15:00".to_string(),
                        activity: "Istirahat di hotel".to_string(),
                        description: "Waktu bebas".to_string(),
                        location: None,
                        cost: None,
                    },
                ],
            },
        ],
    }
}
