use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use predictor_backend::db::standings_queries::StandingsRepository;
use predictor_backend::models::prediction::{AwardedPoints, FixtureResult, PredictedScore, PredictionRecord};
use predictor_backend::models::round::{Round, RoundStatus};
use predictor_backend::models::standings::RosterEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Player,
    Admin,
}

#[derive(Debug, Clone)]
struct FakeUser {
    entry: RosterEntry,
    role: Role,
}

#[derive(Debug, Clone)]
struct FakePrediction {
    user_id: Uuid,
    fixture_id: Uuid,
    round_id: Uuid,
    prediction: PredictedScore,
    points_awarded: Option<i32>,
}

#[derive(Default)]
struct FakeData {
    users: Vec<FakeUser>,
    rounds: Vec<Round>,
    fixtures: HashMap<Uuid, (Uuid, FixtureResult)>,
    predictions: Vec<FakePrediction>,
    leagues: HashMap<Uuid, Vec<Uuid>>,
}

/// In-memory stand-in for the Postgres repository
#[derive(Default)]
pub struct FakeRepository {
    data: Mutex<FakeData>,
    fail: AtomicBool,
    pub roster_fetches: AtomicUsize,
    pub prediction_fetches: AtomicUsize,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail like an unreachable database
    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn add_player(&self, name: &str) -> Uuid {
        self.add_user(name, Role::Player)
    }

    pub fn add_user(&self, name: &str, role: Role) -> Uuid {
        let user_id = Uuid::new_v4();
        self.data.lock().unwrap().users.push(FakeUser {
            entry: RosterEntry {
                user_id,
                name: name.to_string(),
                team_name: Some(format!("{} FC", name)),
                avatar_url: None,
            },
            role,
        });
        user_id
    }

    /// Rounds added later get later deadlines
    pub fn add_round(&self, name: &str, status: RoundStatus) -> Uuid {
        let round_id = Uuid::new_v4();
        let mut data = self.data.lock().unwrap();
        let deadline = Utc::now() + Duration::days(data.rounds.len() as i64);
        data.rounds.push(Round {
            id: round_id,
            name: name.to_string(),
            status,
            deadline,
        });
        round_id
    }

    pub fn add_fixture(&self, round_id: Uuid, home_score: Option<i32>, away_score: Option<i32>) -> Uuid {
        let fixture_id = Uuid::new_v4();
        self.data.lock().unwrap().fixtures.insert(
            fixture_id,
            (round_id, FixtureResult { home_score, away_score }),
        );
        fixture_id
    }

    pub fn add_prediction(
        &self,
        user_id: Uuid,
        fixture_id: Uuid,
        predicted: (Option<i32>, Option<i32>),
        is_joker: bool,
        points_awarded: Option<i32>,
    ) {
        let mut data = self.data.lock().unwrap();
        let round_id = data.fixtures[&fixture_id].0;
        data.predictions.push(FakePrediction {
            user_id,
            fixture_id,
            round_id,
            prediction: PredictedScore {
                predicted_home_goals: predicted.0,
                predicted_away_goals: predicted.1,
                is_joker,
            },
            points_awarded,
        });
    }

    pub fn add_league(&self, member_ids: Vec<Uuid>) -> Uuid {
        let league_id = Uuid::new_v4();
        self.data.lock().unwrap().leagues.insert(league_id, member_ids);
        league_id
    }

    pub fn points_awarded(&self, user_id: Uuid, fixture_id: Uuid) -> Option<i32> {
        self.data
            .lock()
            .unwrap()
            .predictions
            .iter()
            .find(|p| p.user_id == user_id && p.fixture_id == fixture_id)
            .and_then(|p| p.points_awarded)
    }

    pub fn round_status(&self, round_id: Uuid) -> Option<RoundStatus> {
        self.data
            .lock()
            .unwrap()
            .rounds
            .iter()
            .find(|r| r.id == round_id)
            .map(|r| r.status)
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.fail.load(Ordering::SeqCst) {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }

    fn records<F>(data: &FakeData, keep: F) -> Vec<PredictionRecord>
    where
        F: Fn(&FakePrediction, &Round, &FixtureResult) -> bool,
    {
        data.predictions
            .iter()
            .filter_map(|p| {
                let round = data.rounds.iter().find(|r| r.id == p.round_id)?;
                let (_, result) = data.fixtures.get(&p.fixture_id)?;
                if !keep(p, round, result) {
                    return None;
                }
                Some(PredictionRecord {
                    user_id: p.user_id,
                    fixture_id: p.fixture_id,
                    round_id: p.round_id,
                    round_name: round.name.clone(),
                    prediction: p.prediction,
                    points_awarded: p.points_awarded,
                    result: *result,
                })
            })
            .collect()
    }
}

#[async_trait]
impl StandingsRepository for FakeRepository {
    async fn fetch_roster(&self, user_ids: Option<&[Uuid]>) -> Result<Vec<RosterEntry>, sqlx::Error> {
        self.check()?;
        self.roster_fetches.fetch_add(1, Ordering::SeqCst);
        let data = self.data.lock().unwrap();
        Ok(data
            .users
            .iter()
            .filter(|u| u.role == Role::Player)
            .filter(|u| user_ids.map_or(true, |ids| ids.contains(&u.entry.user_id)))
            .map(|u| u.entry.clone())
            .collect())
    }

    async fn fetch_completed_predictions(
        &self,
        round_id: Option<Uuid>,
        user_ids: Option<&[Uuid]>,
    ) -> Result<Vec<PredictionRecord>, sqlx::Error> {
        self.check()?;
        self.prediction_fetches.fetch_add(1, Ordering::SeqCst);
        let data = self.data.lock().unwrap();
        let players: Vec<Uuid> = data
            .users
            .iter()
            .filter(|u| u.role == Role::Player)
            .map(|u| u.entry.user_id)
            .collect();
        Ok(Self::records(&data, |p, round, result| {
            round.status == RoundStatus::Completed
                && result.home_score.is_some()
                && result.away_score.is_some()
                && players.contains(&p.user_id)
                && round_id.map_or(true, |id| id == p.round_id)
                && user_ids.map_or(true, |ids| ids.contains(&p.user_id))
        }))
    }

    async fn fetch_round_predictions(&self, round_id: Uuid) -> Result<Vec<PredictionRecord>, sqlx::Error> {
        self.check()?;
        let data = self.data.lock().unwrap();
        Ok(Self::records(&data, |p, _, _| p.round_id == round_id))
    }

    async fn fetch_round(&self, round_id: Uuid) -> Result<Option<Round>, sqlx::Error> {
        self.check()?;
        let data = self.data.lock().unwrap();
        Ok(data.rounds.iter().find(|r| r.id == round_id).cloned())
    }

    async fn fetch_latest_completed_round(&self) -> Result<Option<Round>, sqlx::Error> {
        self.check()?;
        let data = self.data.lock().unwrap();
        Ok(data
            .rounds
            .iter()
            .filter(|r| r.status == RoundStatus::Completed)
            .max_by_key(|r| r.deadline)
            .cloned())
    }

    async fn save_round_points(&self, round_id: Uuid, awards: &[AwardedPoints]) -> Result<(), sqlx::Error> {
        self.check()?;
        let mut data = self.data.lock().unwrap();
        for award in awards {
            if let Some(prediction) = data
                .predictions
                .iter_mut()
                .find(|p| p.user_id == award.user_id && p.fixture_id == award.fixture_id && p.round_id == round_id)
            {
                prediction.points_awarded = Some(award.points);
            }
        }
        if let Some(round) = data.rounds.iter_mut().find(|r| r.id == round_id) {
            round.status = RoundStatus::Completed;
        }
        Ok(())
    }

    async fn fetch_league_member_ids(&self, league_id: Uuid) -> Result<Option<Vec<Uuid>>, sqlx::Error> {
        self.check()?;
        let data = self.data.lock().unwrap();
        Ok(data.leagues.get(&league_id).cloned())
    }
}
