//! Performance scoring against tour averages.
//!
//! Each of three serve/return statistics scores +1 when strictly better than
//! the field average and −1 otherwise (a tie is unfavorable). The seed
//! outcome adds +1 / +0.5 / −1 when seed and round are both known. The total
//! is divided by a fixed 4 even when the seed factor was skipped, so a player
//! without seed data tops out at ±0.75.

use tracing::debug;

use super::expectation;
use super::models::{FactorValue, PerformanceFactor, TourAverages, TournamentStats};

/// Fixed normalization divisor: three stat factors plus the seed factor.
pub const MAX_POINTS: f64 = 4.0;

pub const METRIC_ACES: &str = "Aces";
pub const METRIC_DOUBLE_FAULTS: &str = "Double Faults";
pub const METRIC_BREAK_POINTS_SAVED: &str = "Break Points Saved %";
pub const METRIC_SEED: &str = "Seed Performance";

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceScore {
    /// `total_points / MAX_POINTS`.
    pub normalized: f64,
    pub total_points: f64,
    pub factors: Vec<PerformanceFactor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Better {
    Higher,
    Lower,
}

fn stat_factor(metric: &str, player: f64, tour_avg: f64, better: Better) -> PerformanceFactor {
    let favorable = match better {
        Better::Higher => player > tour_avg,
        Better::Lower => player < tour_avg,
    };
    let sign: i8 = if favorable { 1 } else { -1 };
    PerformanceFactor {
        metric: metric.to_string(),
        value: FactorValue::Number(player),
        tour_avg: FactorValue::Number(tour_avg),
        sign,
        points: f64::from(sign),
    }
}

/// Score a player's tournament against the field.
pub fn score_performance(stats: &TournamentStats, averages: &TourAverages) -> PerformanceScore {
    let mut factors = vec![
        stat_factor(METRIC_ACES, stats.aces, averages.aces, Better::Higher),
        stat_factor(
            METRIC_DOUBLE_FAULTS,
            stats.double_faults,
            averages.double_faults,
            Better::Lower,
        ),
        stat_factor(
            METRIC_BREAK_POINTS_SAVED,
            stats.break_points_saved_pct,
            averages.break_points_saved_pct,
            Better::Higher,
        ),
    ];

    match expectation::evaluate(stats.seed, stats.round_reached.as_deref()) {
        Some(eval) => {
            debug!(
                "Seed {} reached {} (rank {}, expected {}): {:?}",
                eval.seed, eval.round_reached, eval.actual_rank, eval.expected_rank, eval.outcome
            );
            factors.push(PerformanceFactor {
                metric: METRIC_SEED.to_string(),
                value: FactorValue::Text(format!(
                    "Seed {} reached {}",
                    eval.seed, eval.round_reached
                )),
                tour_avg: FactorValue::Text(format!("Expected round {}", eval.expected_rank)),
                sign: eval.outcome.sign(),
                points: eval.outcome.points(),
            });
        }
        None => debug!("Seed or round unavailable, seed factor skipped"),
    }

    let total_points: f64 = factors.iter().map(|f| f.points).sum();
    PerformanceScore {
        normalized: total_points / MAX_POINTS,
        total_points,
        factors,
    }
}

/// Coarse reading of a normalized performance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceBand {
    AboveAverage,
    AboutAverage,
    BelowAverage,
}

impl PerformanceBand {
    pub fn from_score(score: f64) -> Self {
        if score > 0.3 {
            PerformanceBand::AboveAverage
        } else if score < -0.3 {
            PerformanceBand::BelowAverage
        } else {
            PerformanceBand::AboutAverage
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            PerformanceBand::AboveAverage => "above average compared to tour standards",
            PerformanceBand::AboutAverage => "about average compared to tour standards",
            PerformanceBand::BelowAverage => "below average compared to tour standards",
        }
    }
}
