use std::cmp::Ordering;
use std::collections::HashMap;
use uuid::Uuid;

use crate::game::points_calculator::scorelines;
use crate::models::prediction::PredictionRecord;
use crate::models::standings::{PlayerStanding, RosterEntry};

/// Build a ranked leaderboard from the eligible roster and their qualifying predictions.
///
/// Every roster entry appears in the output, with zero points if it has no
/// predictions. Predictions of users outside the roster are ignored.
pub fn build_standings(roster: Vec<RosterEntry>, predictions: &[PredictionRecord]) -> Vec<PlayerStanding> {
    let mut players: HashMap<Uuid, PlayerStanding> = roster
        .into_iter()
        .map(|entry| (entry.user_id, PlayerStanding::new(entry)))
        .collect();

    for record in predictions {
        let Some(player) = players.get_mut(&record.user_id) else {
            tracing::debug!("Skipping prediction of user {} outside the roster", record.user_id);
            continue;
        };
        accumulate(player, record);
    }

    let mut standings: Vec<PlayerStanding> = players.into_values().collect();
    for player in standings.iter_mut() {
        player.accuracy = accuracy(player.correct_outcomes, player.total_predictions);
    }

    sort_standings(&mut standings);
    assign_ranks(&mut standings);
    standings
}

fn accumulate(player: &mut PlayerStanding, record: &PredictionRecord) {
    player.total_predictions += 1;
    player.points += record.points_awarded.unwrap_or(0);

    // Missing or negative scores never count as a correct outcome or exact score
    if let Ok(lines) = scorelines(&record.prediction, &record.result) {
        if lines.is_correct_outcome() {
            player.correct_outcomes += 1;
        }
        if lines.is_exact() {
            player.exact_scores += 1;
        }
    }
}

/// Share of correct outcomes as a percentage rounded to one decimal place
pub fn accuracy(correct_outcomes: i32, total_predictions: i32) -> Option<f64> {
    if total_predictions <= 0 {
        return None;
    }
    let percentage = correct_outcomes as f64 / total_predictions as f64 * 100.0;
    Some((percentage * 10.0).round() / 10.0)
}

/// Points descending, then name ascending. Names are compared ordinally so the
/// order does not depend on the host locale. User id settles identical names.
pub fn sort_standings(standings: &mut [PlayerStanding]) {
    standings.sort_by(|a, b| match b.points.cmp(&a.points) {
        Ordering::Equal => a.name.cmp(&b.name).then_with(|| a.user_id.cmp(&b.user_id)),
        other => other,
    });
}

/// Tied players share a rank and the next player gets its 1-based position (1, 2, 2, 4).
/// Expects the slice to be sorted by points descending.
pub fn assign_ranks(standings: &mut [PlayerStanding]) {
    let mut last_points: Option<i32> = None;
    let mut current_rank = 0;
    for (index, player) in standings.iter_mut().enumerate() {
        if last_points != Some(player.points) {
            current_rank = (index + 1) as i32;
            last_points = Some(player.points);
        }
        player.rank = current_rank;
    }
}
