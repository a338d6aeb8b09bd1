use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::prediction::{AwardedPoints, PredictionRecord};
use crate::models::round::{Round, RoundStatus};
use crate::models::standings::RosterEntry;

/// Read and write access to the prediction league data needed for scoring.
///
/// Injected into the services so they can run against Postgres in production
/// and against in-memory fakes in tests.
#[async_trait]
pub trait StandingsRepository: Send + Sync {
    /// Users with the `player` role, optionally restricted to `user_ids`
    async fn fetch_roster(&self, user_ids: Option<&[Uuid]>) -> Result<Vec<RosterEntry>, sqlx::Error>;

    /// Predictions of players in completed rounds whose fixture has a final score
    async fn fetch_completed_predictions(
        &self,
        round_id: Option<Uuid>,
        user_ids: Option<&[Uuid]>,
    ) -> Result<Vec<PredictionRecord>, sqlx::Error>;

    /// Every prediction of a round, with or without a fixture result
    async fn fetch_round_predictions(&self, round_id: Uuid) -> Result<Vec<PredictionRecord>, sqlx::Error>;

    async fn fetch_round(&self, round_id: Uuid) -> Result<Option<Round>, sqlx::Error>;

    /// The completed round with the latest deadline. Rescoring an older round
    /// does not make it the latest one.
    async fn fetch_latest_completed_round(&self) -> Result<Option<Round>, sqlx::Error>;

    /// Write back awarded points and mark the round completed, atomically
    async fn save_round_points(&self, round_id: Uuid, awards: &[AwardedPoints]) -> Result<(), sqlx::Error>;

    /// Member ids of a league, `None` if the league does not exist
    async fn fetch_league_member_ids(&self, league_id: Uuid) -> Result<Option<Vec<Uuid>>, sqlx::Error>;
}

const PREDICTION_COLUMNS: &str = r#"
    SELECT
        p.user_id,
        p.fixture_id,
        p.round_id,
        r.name as round_name,
        p.predicted_home_goals,
        p.predicted_away_goals,
        p.is_joker,
        p.points_awarded,
        f.home_score,
        f.away_score
    FROM predictions p
    INNER JOIN fixtures f ON p.fixture_id = f.id
    INNER JOIN rounds r ON p.round_id = r.id
    INNER JOIN users u ON p.user_id = u.id
"#;

#[derive(Debug, Clone)]
pub struct PgStandingsRepository {
    pool: PgPool,
}

impl PgStandingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StandingsRepository for PgStandingsRepository {
    #[tracing::instrument(name = "Fetch standings roster", skip(self))]
    async fn fetch_roster(&self, user_ids: Option<&[Uuid]>) -> Result<Vec<RosterEntry>, sqlx::Error> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id as user_id, name, team_name, avatar_url FROM users WHERE role = 'player'",
        );
        if let Some(user_ids) = user_ids {
            query.push(" AND id = ANY(").push_bind(user_ids.to_vec()).push(")");
        }
        query.push(" ORDER BY name");

        query
            .build_query_as::<RosterEntry>()
            .fetch_all(&self.pool)
            .await
    }

    #[tracing::instrument(name = "Fetch completed predictions", skip(self))]
    async fn fetch_completed_predictions(
        &self,
        round_id: Option<Uuid>,
        user_ids: Option<&[Uuid]>,
    ) -> Result<Vec<PredictionRecord>, sqlx::Error> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(PREDICTION_COLUMNS);
        query.push(
            r#"
            WHERE r.status = 'completed'
            AND u.role = 'player'
            AND f.home_score IS NOT NULL
            AND f.away_score IS NOT NULL
            "#,
        );
        if let Some(round_id) = round_id {
            query.push(" AND p.round_id = ").push_bind(round_id);
        }
        if let Some(user_ids) = user_ids {
            query.push(" AND p.user_id = ANY(").push_bind(user_ids.to_vec()).push(")");
        }

        query
            .build_query_as::<PredictionRecord>()
            .fetch_all(&self.pool)
            .await
    }

    #[tracing::instrument(name = "Fetch round predictions", skip(self))]
    async fn fetch_round_predictions(&self, round_id: Uuid) -> Result<Vec<PredictionRecord>, sqlx::Error> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(PREDICTION_COLUMNS);
        query.push(" WHERE p.round_id = ").push_bind(round_id);

        query
            .build_query_as::<PredictionRecord>()
            .fetch_all(&self.pool)
            .await
    }

    async fn fetch_round(&self, round_id: Uuid) -> Result<Option<Round>, sqlx::Error> {
        sqlx::query_as::<_, Round>("SELECT id, name, status, deadline FROM rounds WHERE id = $1")
            .bind(round_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn fetch_latest_completed_round(&self) -> Result<Option<Round>, sqlx::Error> {
        sqlx::query_as::<_, Round>(
            r#"
            SELECT id, name, status, deadline
            FROM rounds
            WHERE status = 'completed'
            ORDER BY deadline DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
    }

    #[tracing::instrument(
        name = "Save round points",
        skip(self, awards),
        fields(award_count = awards.len())
    )]
    async fn save_round_points(&self, round_id: Uuid, awards: &[AwardedPoints]) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        for award in awards {
            sqlx::query(
                r#"
                UPDATE predictions
                SET points_awarded = $1
                WHERE user_id = $2 AND fixture_id = $3 AND round_id = $4
                "#,
            )
            .bind(award.points)
            .bind(award.user_id)
            .bind(award.fixture_id)
            .bind(round_id)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE rounds SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(RoundStatus::Completed.as_str())
            .bind(round_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn fetch_league_member_ids(&self, league_id: Uuid) -> Result<Option<Vec<Uuid>>, sqlx::Error> {
        let league_exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM leagues WHERE id = $1")
            .bind(league_id)
            .fetch_optional(&self.pool)
            .await?;
        if league_exists.is_none() {
            return Ok(None);
        }

        let member_ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT user_id FROM league_members WHERE league_id = $1",
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(member_ids))
    }
}
