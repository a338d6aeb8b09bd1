use std::sync::Arc;
use uuid::Uuid;

use crate::db::standings_queries::StandingsRepository;
use crate::game::points_calculator::{evaluate_points, PointsVerdict};
use crate::models::prediction::AwardedPoints;
use crate::models::round::{RoundScoringSummary, RoundStatus};

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Round not found: {0}")]
    RoundNotFound(Uuid),
    #[error("Round {round_id} cannot be scored while {status}")]
    RoundNotScorable { round_id: Uuid, status: RoundStatus },
}

/// Awards points to every prediction of a closed round
#[derive(Clone)]
pub struct RoundScoringService {
    repository: Arc<dyn StandingsRepository>,
}

impl RoundScoringService {
    pub fn new(repository: Arc<dyn StandingsRepository>) -> Self {
        Self { repository }
    }

    /// Score all predictions of a round and mark it completed.
    ///
    /// Completed rounds may be scored again, e.g. after a result correction.
    #[tracing::instrument(name = "Score round", skip(self))]
    pub async fn score_round(&self, round_id: Uuid) -> Result<RoundScoringSummary, ScoringError> {
        let round = self
            .repository
            .fetch_round(round_id)
            .await?
            .ok_or(ScoringError::RoundNotFound(round_id))?;

        if !round.status.is_scorable() {
            return Err(ScoringError::RoundNotScorable {
                round_id,
                status: round.status,
            });
        }

        let predictions = self.repository.fetch_round_predictions(round_id).await?;

        let mut awards = Vec::with_capacity(predictions.len());
        let mut incomplete = 0;
        let mut invalid = 0;
        for record in &predictions {
            let verdict = evaluate_points(&record.prediction, &record.result);
            match verdict {
                PointsVerdict::Scored(_) => {}
                PointsVerdict::Incomplete => incomplete += 1,
                PointsVerdict::Invalid => {
                    invalid += 1;
                    tracing::warn!(
                        "Invalid scores for prediction of user {} on fixture {}: predicted {:?}-{:?}, actual {:?}-{:?}. Awarding 0 points",
                        record.user_id,
                        record.fixture_id,
                        record.prediction.predicted_home_goals,
                        record.prediction.predicted_away_goals,
                        record.result.home_score,
                        record.result.away_score
                    );
                }
            }
            awards.push(AwardedPoints {
                user_id: record.user_id,
                fixture_id: record.fixture_id,
                points: verdict.points(),
            });
        }

        self.repository.save_round_points(round_id, &awards).await?;

        let total_points: i64 = awards.iter().map(|award| award.points as i64).sum();
        tracing::info!(
            "Scored round {} ({}): {} predictions, {} points, {} incomplete, {} invalid",
            round.name,
            round_id,
            awards.len(),
            total_points,
            incomplete,
            invalid
        );

        Ok(RoundScoringSummary {
            round_id,
            round_name: round.name,
            predictions_scored: awards.len(),
            total_points,
            incomplete,
            invalid,
        })
    }
}
