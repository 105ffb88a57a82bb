use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::services::places::PlaceMediaError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MediaQuery {
    pub location: String,
}

/*
    GET /api/places/media
*/
pub async fn media(data: web::Data<AppState>, query: web::Query<MediaQuery>) -> impl Responder {
    let Some(places) = &data.places else {
        return HttpResponse::ServiceUnavailable()
            .json(json!({ "error": "Places capability not configured" }));
    };

    match places.lookup(&query.location).await {
        Ok(media) => HttpResponse::Ok().json(media),
        Err(err @ PlaceMediaError::NotFound) => {
            HttpResponse::NotFound().json(json!({ "error": err.user_message() }))
        }
        Err(err) => {
            eprintln!("Place media lookup failed: {}", err);
            HttpResponse::BadGateway().json(json!({ "error": err.user_message() }))
        }
    }
}
