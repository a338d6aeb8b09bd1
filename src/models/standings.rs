// src/models/standings.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An eligible player, listed even when they have no predictions yet
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub user_id: Uuid,
    pub name: String,
    pub team_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// One row of the leaderboard
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStanding {
    pub user_id: Uuid,
    pub name: String,
    pub team_name: Option<String>,
    pub avatar_url: Option<String>,
    pub points: i32,
    pub total_predictions: i32,
    pub correct_outcomes: i32,
    pub exact_scores: i32,
    /// Percentage of correct outcomes, one decimal. `None` without predictions.
    pub accuracy: Option<f64>,
    pub rank: i32,
    /// Week-over-week rank change. Not tracked yet, always 0.
    pub movement: i32,
}

impl PlayerStanding {
    pub fn new(entry: RosterEntry) -> Self {
        Self {
            user_id: entry.user_id,
            name: entry.name,
            team_name: entry.team_name,
            avatar_url: entry.avatar_url,
            points: 0,
            total_predictions: 0,
            correct_outcomes: 0,
            exact_scores: 0,
            accuracy: None,
            rank: 0, // Will be assigned after sorting
            movement: 0,
        }
    }
}

/// Scope of a standings request
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StandingsFilter {
    /// `None` aggregates across all completed rounds
    pub round_id: Option<Uuid>,
    /// `Some(vec![])` yields an empty leaderboard
    pub user_ids: Option<Vec<Uuid>>,
}

impl StandingsFilter {
    pub fn overall() -> Self {
        Self::default()
    }

    pub fn for_round(round_id: Uuid) -> Self {
        Self {
            round_id: Some(round_id),
            user_ids: None,
        }
    }

    pub fn with_users(mut self, user_ids: Vec<Uuid>) -> Self {
        self.user_ids = Some(user_ids);
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RoundStandings {
    pub round_id: Uuid,
    pub round_name: String,
    pub standings: Vec<PlayerStanding>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStandings {
    pub overall: Vec<PlayerStanding>,
    pub last_round: Option<RoundStandings>,
}
