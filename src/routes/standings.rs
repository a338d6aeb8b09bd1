// src/routes/standings.rs
use actix_web::{get, post, web, HttpResponse, Result};
use uuid::Uuid;

use crate::handlers::{scoring_handler, standings_handler};
use crate::handlers::standings_handler::{RoundQuery, StandingsQuery};
use crate::league::scoring::RoundScoringService;
use crate::league::standings::StandingsService;

/// Get overall standings, or one round's standings with `round_id`
#[get("/standings")]
async fn get_standings(
    query: web::Query<StandingsQuery>,
    service: web::Data<StandingsService>,
) -> Result<HttpResponse> {
    standings_handler::get_standings(query, service).await
}

/// Get standings for a specific round
#[get("/rounds/{round_id}/standings")]
async fn get_round_standings(
    path: web::Path<Uuid>,
    service: web::Data<StandingsService>,
) -> Result<HttpResponse> {
    let round_id = path.into_inner();
    standings_handler::get_round_standings(round_id, service).await
}

/// Score all predictions of a closed round
#[post("/rounds/{round_id}/score")]
async fn score_round(
    path: web::Path<Uuid>,
    service: web::Data<RoundScoringService>,
) -> Result<HttpResponse> {
    let round_id = path.into_inner();
    scoring_handler::score_round(round_id, service).await
}

/// Get standings restricted to league members
#[get("/leagues/{league_id}/standings")]
async fn get_league_standings(
    path: web::Path<Uuid>,
    query: web::Query<RoundQuery>,
    service: web::Data<StandingsService>,
) -> Result<HttpResponse> {
    let league_id = path.into_inner();
    standings_handler::get_league_standings(league_id, query, service).await
}

/// Get overall and last round standings in one call
#[get("/dashboard")]
async fn get_dashboard(
    service: web::Data<StandingsService>,
) -> Result<HttpResponse> {
    standings_handler::get_dashboard(service).await
}
