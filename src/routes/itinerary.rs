use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::route::RouteStop;
use crate::models::trip::{TripMode, TripRequest};
use crate::services::planner::PlanError;
use crate::services::store::{CompletionStatus, StoreError};
use crate::services::voice_guide::flatten_guide_steps;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub mode: TripMode,
    pub request: TripRequest,
}

#[derive(Debug, Serialize)]
struct PrefilledForm {
    mode: TripMode,
    request: TripRequest,
}

/*
    POST /api/itineraries/generate
*/
pub async fn generate(
    data: web::Data<AppState>,
    body: web::Json<GenerateRequest>,
) -> impl Responder {
    let GenerateRequest { mode, request } = body.into_inner();

    let token = {
        let mut store = data.store.lock().unwrap();
        match store.begin_submit(request.clone(), mode) {
            Ok(token) => token,
            Err(StoreError::SubmissionInFlight) => {
                return HttpResponse::Conflict()
                    .json(json!({ "error": "A generation is already in progress" }));
            }
            Err(StoreError::InvalidRequest(msg)) => {
                return HttpResponse::BadRequest().json(json!({ "error": msg }));
            }
            Err(err) => {
                eprintln!("Failed to begin submission: {}", err);
                return HttpResponse::InternalServerError()
                    .json(json!({ "error": "Failed to begin submission" }));
            }
        }
    };

    // The store lock is not held across the generation call.
    let outcome = data.planner.generate(&request, mode).await;

    let mut store = data.store.lock().unwrap();
    match store.complete_submit(token, outcome) {
        CompletionStatus::Accepted => match store.draft() {
            Some(itinerary) => HttpResponse::Ok().json(itinerary),
            None => {
                eprintln!("Accepted submission left no draft behind");
                HttpResponse::InternalServerError()
                    .json(json!({ "error": "Draft unavailable" }))
            }
        },
        CompletionStatus::Failed(err) => {
            let response = json!({ "error": err.user_message() });
            match err {
                PlanError::NotConfigured => HttpResponse::ServiceUnavailable().json(response),
                _ => HttpResponse::BadGateway().json(response),
            }
        }
        CompletionStatus::Stale => HttpResponse::Conflict()
            .json(json!({ "error": "The draft was closed before generation finished" })),
    }
}

/*
    POST /api/itineraries/draft/save
*/
pub async fn save_draft(data: web::Data<AppState>) -> impl Responder {
    let mut store = data.store.lock().unwrap();
    match store.save_draft() {
        Ok(()) => match store.saved_trip() {
            Some(itinerary) => HttpResponse::Ok().json(itinerary),
            None => HttpResponse::InternalServerError()
                .json(json!({ "error": "Saved trip unavailable" })),
        },
        Err(StoreError::NoDraft) => {
            HttpResponse::NotFound().json(json!({ "error": "No draft itinerary to save" }))
        }
        Err(err) => {
            eprintln!("Failed to save draft: {}", err);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to save draft" }))
        }
    }
}

/*
    POST /api/itineraries/draft/edit
*/
pub async fn edit_draft(data: web::Data<AppState>) -> impl Responder {
    let mut store = data.store.lock().unwrap();
    match store.edit_draft() {
        Ok((request, mode)) => HttpResponse::Ok().json(PrefilledForm { mode, request }),
        Err(_) => HttpResponse::NotFound().json(json!({ "error": "No draft to edit" })),
    }
}

/*
    DELETE /api/itineraries/draft
*/
pub async fn discard_draft(data: web::Data<AppState>) -> impl Responder {
    let mut store = data.store.lock().unwrap();
    store.discard_draft();
    HttpResponse::NoContent().finish()
}

/*
    GET /api/trip
*/
pub async fn saved_trip(data: web::Data<AppState>) -> impl Responder {
    let store = data.store.lock().unwrap();
    match store.saved_trip() {
        Some(itinerary) => HttpResponse::Ok().json(itinerary),
        None => HttpResponse::NotFound().json(json!({ "error": "No saved trip" })),
    }
}

/*
    GET /api/trip/guide-steps
*/
pub async fn guide_steps(data: web::Data<AppState>) -> impl Responder {
    let store = data.store.lock().unwrap();
    match store.saved_trip() {
        Some(itinerary) => HttpResponse::Ok().json(flatten_guide_steps(itinerary)),
        None => HttpResponse::NotFound().json(json!({ "error": "No saved trip" })),
    }
}

/*
    GET /api/trip/days/{day}/stops
*/
pub async fn day_stops(data: web::Data<AppState>, path: web::Path<u32>) -> impl Responder {
    let day = path.into_inner();
    let store = data.store.lock().unwrap();
    let Some(itinerary) = store.saved_trip() else {
        return HttpResponse::NotFound().json(json!({ "error": "No saved trip" }));
    };

    match itinerary.day(day) {
        Some(plan) => HttpResponse::Ok().json(RouteStop::from_day(plan)),
        None => HttpResponse::NotFound()
            .json(json!({ "error": format!("Day {} is not in the saved trip", day) })),
    }
}
