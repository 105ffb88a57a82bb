use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use travas_api::{routes, state::AppState};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let state = web::Data::new(AppState::from_env());

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(state.clone())
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
    })
    .bind((host, port))?
    .run()
    .await
}
