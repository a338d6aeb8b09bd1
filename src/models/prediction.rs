// src/models/prediction.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Points for predicting the exact final score
pub const EXACT_SCORE_POINTS: i32 = 3;
/// Points for predicting the right outcome (home win, away win, draw)
pub const CORRECT_OUTCOME_POINTS: i32 = 1;
/// Multiplier applied to a correct joker prediction
pub const JOKER_MULTIPLIER: i32 = 2;

/// The scoreline a player predicted for one fixture
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PredictedScore {
    pub predicted_home_goals: Option<i32>,
    pub predicted_away_goals: Option<i32>,
    pub is_joker: bool,
}

/// Actual final score of a fixture. Both sides stay `None` until the match is played.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FixtureResult {
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

/// A prediction joined with its fixture result and round name
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    pub user_id: Uuid,
    pub fixture_id: Uuid,
    pub round_id: Uuid,
    pub round_name: String,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub prediction: PredictedScore,
    pub points_awarded: Option<i32>,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub result: FixtureResult,
}

/// Points computed for a single prediction, ready to be written back
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AwardedPoints {
    pub user_id: Uuid,
    pub fixture_id: Uuid,
    pub points: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl MatchOutcome {
    pub fn from_goals(home: i32, away: i32) -> Self {
        if home > away {
            MatchOutcome::HomeWin
        } else if away > home {
            MatchOutcome::AwayWin
        } else {
            MatchOutcome::Draw
        }
    }
}
