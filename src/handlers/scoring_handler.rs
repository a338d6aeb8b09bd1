use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use uuid::Uuid;

use crate::league::scoring::{RoundScoringService, ScoringError};

/// Award points for every prediction of a closed round
pub async fn score_round(
    round_id: Uuid,
    service: web::Data<RoundScoringService>,
) -> Result<HttpResponse> {
    match service.score_round(round_id).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": summary
        }))),
        Err(ScoringError::RoundNotFound(_)) => Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "Round not found"
        }))),
        Err(ScoringError::RoundNotScorable { status, .. }) => Ok(HttpResponse::Conflict().json(json!({
            "success": false,
            "message": format!("Round cannot be scored while {}", status)
        }))),
        Err(e) => {
            tracing::error!("Failed to score round {}: {}", round_id, e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to score round"
            })))
        }
    }
}
