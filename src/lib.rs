use actix_web::{http, web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use std::net::TcpListener;
use std::sync::Arc;
use actix_cors::Cors;

pub mod config;
mod routes;
mod handlers;
pub mod models;
pub mod db;
pub mod game;
pub mod league;
pub mod telemetry;
use crate::routes::init_routes;
use crate::db::standings_queries::StandingsRepository;
use crate::league::scoring::RoundScoringService;
use crate::league::standings::StandingsService;

pub fn run(
    listener: TcpListener,
    repository: Arc<dyn StandingsRepository>,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let standings_service = web::Data::new(StandingsService::new(repository.clone()));
    let scoring_service = web::Data::new(RoundScoringService::new(repository));

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(standings_service.clone())
            .app_data(scoring_service.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
