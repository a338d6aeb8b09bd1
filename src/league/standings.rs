use std::sync::Arc;
use uuid::Uuid;

use crate::db::standings_queries::StandingsRepository;
use crate::game::standings_calculator::build_standings;
use crate::models::standings::*;

#[derive(Debug, thiserror::Error)]
pub enum StandingsError {
    #[error("Failed to calculate standings: {0}")]
    Fetch(#[from] sqlx::Error),
    #[error("League not found: {0}")]
    LeagueNotFound(Uuid),
}

/// Service responsible for computing prediction league standings
#[derive(Clone)]
pub struct StandingsService {
    repository: Arc<dyn StandingsRepository>,
}

impl StandingsService {
    pub fn new(repository: Arc<dyn StandingsRepository>) -> Self {
        Self { repository }
    }

    /// Ranked leaderboard, overall or for one round, optionally for a subset of users.
    ///
    /// An empty user filter returns an empty leaderboard without touching the store.
    #[tracing::instrument(name = "Calculate standings", skip(self))]
    pub async fn calculate_standings(
        &self,
        filter: &StandingsFilter,
    ) -> Result<Vec<PlayerStanding>, StandingsError> {
        let user_ids = filter.user_ids.as_deref();
        if matches!(user_ids, Some(ids) if ids.is_empty()) {
            return Ok(Vec::new());
        }

        let roster = self.repository.fetch_roster(user_ids).await?;
        if roster.is_empty() {
            return Ok(Vec::new());
        }

        let predictions = self
            .repository
            .fetch_completed_predictions(filter.round_id, user_ids)
            .await?;

        let standings = build_standings(roster, &predictions);
        tracing::info!(
            "Calculated standings for {} players from {} predictions",
            standings.len(),
            predictions.len()
        );
        Ok(standings)
    }

    /// Standings restricted to the members of a league
    #[tracing::instrument(name = "Calculate league standings", skip(self))]
    pub async fn calculate_league_standings(
        &self,
        league_id: Uuid,
        round_id: Option<Uuid>,
    ) -> Result<Vec<PlayerStanding>, StandingsError> {
        let member_ids = self
            .repository
            .fetch_league_member_ids(league_id)
            .await?
            .ok_or(StandingsError::LeagueNotFound(league_id))?;

        let filter = StandingsFilter {
            round_id,
            user_ids: Some(member_ids),
        };
        self.calculate_standings(&filter).await
    }

    /// Overall standings next to the standings of the most recently completed round
    #[tracing::instrument(name = "Calculate dashboard standings", skip(self))]
    pub async fn dashboard(&self) -> Result<DashboardStandings, StandingsError> {
        let overall_filter = StandingsFilter::overall();
        let (overall, last_round) = tokio::try_join!(
            self.calculate_standings(&overall_filter),
            self.last_round_standings()
        )?;

        Ok(DashboardStandings { overall, last_round })
    }

    async fn last_round_standings(&self) -> Result<Option<RoundStandings>, StandingsError> {
        let Some(round) = self.repository.fetch_latest_completed_round().await? else {
            return Ok(None);
        };

        let standings = self
            .calculate_standings(&StandingsFilter::for_round(round.id))
            .await?;

        Ok(Some(RoundStandings {
            round_id: round.id,
            round_name: round.name,
            standings,
        }))
    }
}
