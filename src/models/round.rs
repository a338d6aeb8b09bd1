// src/models/round.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use std::fmt;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: Uuid,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub status: RoundStatus,
    pub deadline: DateTime<Utc>,
}

/// Lifecycle of a round: setup -> open -> closed -> completed
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    Setup,
    Open,
    Closed,
    Completed,
}

impl RoundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::Setup => "setup",
            RoundStatus::Open => "open",
            RoundStatus::Closed => "closed",
            RoundStatus::Completed => "completed",
        }
    }

    /// Predictions can only be scored once the deadline has passed
    pub fn is_scorable(&self) -> bool {
        matches!(self, RoundStatus::Closed | RoundStatus::Completed)
    }
}

impl TryFrom<String> for RoundStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "setup" => Ok(RoundStatus::Setup),
            "open" => Ok(RoundStatus::Open),
            "closed" => Ok(RoundStatus::Closed),
            "completed" => Ok(RoundStatus::Completed),
            other => Err(format!("{} is not a valid round status", other)),
        }
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RoundScoringSummary {
    pub round_id: Uuid,
    pub round_name: String,
    pub predictions_scored: usize,
    pub total_points: i64,
    pub incomplete: usize,
    pub invalid: usize,
}
