//! Recency-decay scoring.
//!
//! Wrong and right answers accumulate separately, each shrinking
//! exponentially with its own time constant, so a mistake from months ago
//! weighs almost nothing while yesterday's still counts. The final score
//! trades decayed mistakes against decayed successes and adds a novelty
//! bonus that fades as an item collects history.

use chrono::{DateTime, Utc};

use crate::config::ScoringConfig;
use crate::events::Attempt;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Decay an accumulator across the span from `last` to `current`.
///
/// Non-positive scores and non-positive time constants collapse to zero.
/// A zero or negative span leaves the score untouched; otherwise the score
/// is scaled by `exp(-delta_days / tau_days)` at millisecond resolution.
pub fn decay(score: f64, last: DateTime<Utc>, current: DateTime<Utc>, tau_days: f64) -> f64 {
    if score <= 0.0 {
        return 0.0;
    }
    if tau_days <= 0.0 {
        return 0.0;
    }
    let delta_days = (current - last).num_milliseconds() as f64 / MS_PER_DAY;
    if delta_days <= 0.0 {
        return score;
    }
    score * (-delta_days / tau_days).exp()
}

/// Score components for one (item, direction) history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// Decayed weight of wrong answers, as of `now`.
    pub wrong: f64,
    /// Decayed weight of right answers, as of `now`.
    pub right: f64,
    /// The combined relevance score.
    pub score: f64,
    /// Number of attempts in this history, before any decay.
    pub total_events: usize,
}

/// Fold a chronological attempt history into a relevance score at `now`.
///
/// Each accumulator decays from its own previous attempt before the new
/// answer adds one, then decays once more up to `now`. `tau_right_days`
/// comes from [`ScoringConfig::tau_right_days_for`] so that frequent
/// vocabulary forgets its successes faster.
pub fn compute_scores(
    attempts: &[Attempt],
    now: DateTime<Utc>,
    config: &ScoringConfig,
    tau_right_days: f64,
) -> ScoreBreakdown {
    let mut wrong = 0.0;
    let mut right = 0.0;
    let mut last_wrong: Option<DateTime<Utc>> = None;
    let mut last_right: Option<DateTime<Utc>> = None;

    for attempt in attempts {
        if attempt.correct {
            if let Some(last) = last_right {
                right = decay(right, last, attempt.at, tau_right_days);
            }
            right += 1.0;
            last_right = Some(attempt.at);
        } else {
            if let Some(last) = last_wrong {
                wrong = decay(wrong, last, attempt.at, config.tau_wrong_days);
            }
            wrong += 1.0;
            last_wrong = Some(attempt.at);
        }
    }

    if let Some(last) = last_wrong {
        wrong = decay(wrong, last, now, config.tau_wrong_days);
    }
    if let Some(last) = last_right {
        right = decay(right, last, now, tau_right_days);
    }

    let total_events = attempts.len();
    let score = config.weight_wrong * wrong - config.weight_right * right
        + config.novelty_bonus / (1.0 + total_events as f64);

    ScoreBreakdown {
        wrong,
        right,
        score,
        total_events,
    }
}
