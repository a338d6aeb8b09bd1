use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::league::standings::{StandingsError, StandingsService};
use crate::models::standings::StandingsFilter;

/// Query parameters for standings requests
#[derive(Debug, Deserialize)]
pub struct StandingsQuery {
    pub round_id: Option<Uuid>,
    /// Comma separated user ids. An empty value selects nobody.
    pub user_ids: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RoundQuery {
    pub round_id: Option<Uuid>,
}

pub fn parse_user_ids(raw: &str) -> Result<Vec<Uuid>, uuid::Error> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(Uuid::parse_str)
        .collect()
}

fn standings_error_response(e: &StandingsError) -> HttpResponse {
    match e {
        StandingsError::LeagueNotFound(_) => HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "League not found"
        })),
        StandingsError::Fetch(_) => HttpResponse::InternalServerError().json(json!({
            "success": false,
            "message": "Failed to calculate standings"
        })),
    }
}

/// Get overall or round standings, optionally for a subset of users
pub async fn get_standings(
    query: web::Query<StandingsQuery>,
    service: web::Data<StandingsService>,
) -> Result<HttpResponse> {
    let user_ids = match query.user_ids.as_deref().map(parse_user_ids).transpose() {
        Ok(user_ids) => user_ids,
        Err(e) => {
            tracing::warn!("Invalid user_ids filter {:?}: {}", query.user_ids, e);
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Invalid user_ids parameter"
            })));
        }
    };

    let filter = StandingsFilter {
        round_id: query.round_id,
        user_ids,
    };

    match service.calculate_standings(&filter).await {
        Ok(standings) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": standings
        }))),
        Err(e) => {
            tracing::error!("Failed to get standings: {}", e);
            Ok(standings_error_response(&e))
        }
    }
}

/// Get standings of a single round
pub async fn get_round_standings(
    round_id: Uuid,
    service: web::Data<StandingsService>,
) -> Result<HttpResponse> {
    match service.calculate_standings(&StandingsFilter::for_round(round_id)).await {
        Ok(standings) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": standings
        }))),
        Err(e) => {
            tracing::error!("Failed to get standings for round {}: {}", round_id, e);
            Ok(standings_error_response(&e))
        }
    }
}

/// Get standings of the members of a league
pub async fn get_league_standings(
    league_id: Uuid,
    query: web::Query<RoundQuery>,
    service: web::Data<StandingsService>,
) -> Result<HttpResponse> {
    match service.calculate_league_standings(league_id, query.round_id).await {
        Ok(standings) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": standings
        }))),
        Err(e) => {
            tracing::error!("Failed to get standings for league {}: {}", league_id, e);
            Ok(standings_error_response(&e))
        }
    }
}

/// Overall standings plus the most recently completed round
pub async fn get_dashboard(
    service: web::Data<StandingsService>,
) -> Result<HttpResponse> {
    match service.dashboard().await {
        Ok(dashboard) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": dashboard
        }))),
        Err(e) => {
            tracing::error!("Failed to get dashboard standings: {}", e);
            Ok(standings_error_response(&e))
        }
    }
}
