use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::models::route::RouteStop;
use crate::services::resolver::ResolveError;
use crate::services::routing::TravelMode;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub stops: Vec<RouteStop>,
    /// Destination-region hint used to disambiguate bare place names.
    #[serde(default)]
    pub destination: String,
    pub mode: TravelMode,
}

/*
    POST /api/routes/resolve
*/
pub async fn resolve(data: web::Data<AppState>, body: web::Json<ResolveRequest>) -> impl Responder {
    let Some(resolver) = &data.resolver else {
        return HttpResponse::ServiceUnavailable()
            .json(json!({ "error": "Maps capability not configured" }));
    };

    let request = body.into_inner();
    match resolver.resolve(&request.stops, &request.destination, request.mode).await {
        Ok(resolution) => HttpResponse::Ok().json(resolution),
        Err(err @ ResolveError::NotFound) => {
            HttpResponse::NotFound().json(json!({ "error": err.user_message() }))
        }
        Err(err) => {
            eprintln!("Route resolution failed: {}", err);
            HttpResponse::BadGateway().json(json!({ "error": err.user_message() }))
        }
    }
}
