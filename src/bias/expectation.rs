//! Seed-based expectation model.
//!
//! A seed roughly halves the draw each time it doubles: the top seed is
//! expected to win the title, seeds 2–3 to reach the final, 4–7 the semis,
//! and so on. Unseeded entrants (qualifiers, wildcards) are expected to go out
//! by the second round.
//!
//! ```text
//! expected_rank = max(1, 8 − ⌊log2(seed)⌋)   seed > 0
//! expected_rank = 2                           seed = 0
//! ```

use serde::{Deserialize, Serialize};

use super::rounds::round_rank;

/// Expected rank for an unseeded player (exit by R64).
const UNSEEDED_EXPECTED_RANK: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedOutcome {
    Exceeded,
    Met,
    Missed,
}

impl SeedOutcome {
    /// Points contributed to the performance total.
    pub fn points(self) -> f64 {
        match self {
            SeedOutcome::Exceeded => 1.0,
            SeedOutcome::Met => 0.5,
            SeedOutcome::Missed => -1.0,
        }
    }

    /// Display sign of the factor. Meeting expectation counts as favorable.
    pub fn sign(self) -> i8 {
        match self {
            SeedOutcome::Exceeded | SeedOutcome::Met => 1,
            SeedOutcome::Missed => -1,
        }
    }

    /// Recover the outcome from a scored seed factor's points.
    pub fn from_points(points: f64) -> Self {
        if points >= SeedOutcome::Exceeded.points() {
            SeedOutcome::Exceeded
        } else if points > 0.0 {
            SeedOutcome::Met
        } else {
            SeedOutcome::Missed
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            SeedOutcome::Exceeded => "progressed further than their seed suggested",
            SeedOutcome::Met => "progressed as far as their seed suggested",
            SeedOutcome::Missed => "progressed less far than their seed suggested",
        }
    }
}

/// Result of comparing the round reached against the seed expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedEvaluation {
    pub seed: u32,
    pub round_reached: String,
    pub actual_rank: u8,
    pub expected_rank: u8,
    pub outcome: SeedOutcome,
}

/// Round rank a player of this seed is expected to reach.
///
/// Uses the exact integer floor of `log2(seed)`, so powers of two land on the
/// boundary they belong to (seed 1 → 8, seed 2 → 7, seed 4 → 6).
pub fn expected_rank(seed: u32) -> u8 {
    if seed == 0 {
        return UNSEEDED_EXPECTED_RANK;
    }
    let floor_log2 = seed.ilog2() as i32;
    (8 - floor_log2).max(1) as u8
}

pub fn classify(actual_rank: u8, expected_rank: u8) -> SeedOutcome {
    if actual_rank > expected_rank {
        SeedOutcome::Exceeded
    } else if actual_rank == expected_rank {
        SeedOutcome::Met
    } else {
        SeedOutcome::Missed
    }
}

/// Evaluate seed performance. Returns `None` (not evaluated) when either the
/// seed or the round reached is unavailable.
pub fn evaluate(seed: Option<u32>, round_reached: Option<&str>) -> Option<SeedEvaluation> {
    let seed = seed?;
    let round_reached = round_reached?;
    let actual_rank = round_rank(round_reached);
    let expected_rank = expected_rank(seed);
    Some(SeedEvaluation {
        seed,
        round_reached: round_reached.to_string(),
        actual_rank,
        expected_rank,
        outcome: classify(actual_rank, expected_rank),
    })
}
