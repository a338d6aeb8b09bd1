use serde::{Deserialize, Serialize};

use crate::models::prediction::*;

/// Result of evaluating one prediction against the actual score
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", content = "points", rename_all = "lowercase")]
pub enum PointsVerdict {
    /// Both the prediction and the result were complete and valid
    Scored(i32),
    /// A predicted or actual score is missing
    Incomplete,
    /// A score is present but negative
    Invalid,
}

impl PointsVerdict {
    pub fn points(&self) -> i32 {
        match self {
            PointsVerdict::Scored(points) => *points,
            PointsVerdict::Incomplete | PointsVerdict::Invalid => 0,
        }
    }
}

/// Predicted and actual goals of one prediction, all present and non-negative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scorelines {
    pub predicted: (i32, i32),
    pub actual: (i32, i32),
}

impl Scorelines {
    pub fn is_exact(&self) -> bool {
        self.predicted == self.actual
    }

    pub fn is_correct_outcome(&self) -> bool {
        MatchOutcome::from_goals(self.predicted.0, self.predicted.1)
            == MatchOutcome::from_goals(self.actual.0, self.actual.1)
    }
}

/// Extract the scorelines a prediction can be judged on, or the zero-point
/// verdict explaining why it cannot be.
pub fn scorelines(prediction: &PredictedScore, result: &FixtureResult) -> Result<Scorelines, PointsVerdict> {
    let (Some(predicted_home), Some(predicted_away), Some(actual_home), Some(actual_away)) = (
        prediction.predicted_home_goals,
        prediction.predicted_away_goals,
        result.home_score,
        result.away_score,
    ) else {
        return Err(PointsVerdict::Incomplete);
    };

    if [predicted_home, predicted_away, actual_home, actual_away]
        .iter()
        .any(|goals| *goals < 0)
    {
        return Err(PointsVerdict::Invalid);
    }

    Ok(Scorelines {
        predicted: (predicted_home, predicted_away),
        actual: (actual_home, actual_away),
    })
}

/// Evaluate a prediction and report why it earned nothing, if it did.
///
/// Never fails: broken data collapses to zero points so that a single bad
/// record cannot stop a whole round from being scored.
pub fn evaluate_points(prediction: &PredictedScore, result: &FixtureResult) -> PointsVerdict {
    let lines = match scorelines(prediction, result) {
        Ok(lines) => lines,
        Err(verdict) => return verdict,
    };

    let base_points = if lines.is_exact() {
        EXACT_SCORE_POINTS
    } else if lines.is_correct_outcome() {
        CORRECT_OUTCOME_POINTS
    } else {
        0
    };

    // A joker only doubles points that were already earned
    if prediction.is_joker && base_points > 0 {
        PointsVerdict::Scored(base_points * JOKER_MULTIPLIER)
    } else {
        PointsVerdict::Scored(base_points)
    }
}

/// Points earned by a prediction: 3 for the exact score, 1 for the right
/// outcome, doubled when the joker was played. Missing or invalid scores give 0.
pub fn calculate_points(prediction: &PredictedScore, result: &FixtureResult) -> i32 {
    evaluate_points(prediction, result).points()
}
