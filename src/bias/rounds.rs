//! Tournament round ordering.
//!
//! Round codes follow the ATP match-data convention. The rank is strictly
//! increasing with competitive progress, so "furthest round reached" and
//! "expected round" comparisons are plain integer comparisons.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rank assigned to any round string outside the table (round-robin, bronze
/// match, typos). Worse than R128.
pub const UNKNOWN_ROUND_RANK: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoundCode {
    R128,
    R64,
    R32,
    R16,
    QF,
    SF,
    F,
    /// Won the title.
    W,
}

impl RoundCode {
    pub const ALL: [RoundCode; 8] = [
        RoundCode::R128,
        RoundCode::R64,
        RoundCode::R32,
        RoundCode::R16,
        RoundCode::QF,
        RoundCode::SF,
        RoundCode::F,
        RoundCode::W,
    ];

    pub fn rank(self) -> u8 {
        match self {
            RoundCode::R128 => 1,
            RoundCode::R64 => 2,
            RoundCode::R32 => 3,
            RoundCode::R16 => 4,
            RoundCode::QF => 5,
            RoundCode::SF => 6,
            RoundCode::F => 7,
            RoundCode::W => 8,
        }
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.rank() == rank)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoundCode::R128 => "R128",
            RoundCode::R64 => "R64",
            RoundCode::R32 => "R32",
            RoundCode::R16 => "R16",
            RoundCode::QF => "QF",
            RoundCode::SF => "SF",
            RoundCode::F => "F",
            RoundCode::W => "W",
        }
    }
}

impl fmt::Display for RoundCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("unknown round code '{}'", s))
    }
}

/// Rank of a round code exchanged as a literal string. Matching is exact
/// (case-sensitive); anything unrecognised ranks [`UNKNOWN_ROUND_RANK`].
pub fn round_rank(code: &str) -> u8 {
    code.parse::<RoundCode>()
        .map(RoundCode::rank)
        .unwrap_or(UNKNOWN_ROUND_RANK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_match_table() {
        let expected = [
            ("R128", 1),
            ("R64", 2),
            ("R32", 3),
            ("R16", 4),
            ("QF", 5),
            ("SF", 6),
            ("F", 7),
            ("W", 8),
        ];
        for (code, rank) in expected {
            assert_eq!(round_rank(code), rank, "rank for {}", code);
        }
    }

    #[test]
    fn rank_strictly_increases_with_progress() {
        for pair in RoundCode::ALL.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn unknown_codes_rank_below_first_round() {
        assert_eq!(round_rank("RR"), UNKNOWN_ROUND_RANK);
        assert_eq!(round_rank("qf"), UNKNOWN_ROUND_RANK);
        assert_eq!(round_rank(""), UNKNOWN_ROUND_RANK);
        assert!(round_rank("BR") < RoundCode::R128.rank());
    }

    #[test]
    fn from_rank_inverts_rank() {
        for round in RoundCode::ALL {
            assert_eq!(RoundCode::from_rank(round.rank()), Some(round));
        }
        assert_eq!(RoundCode::from_rank(0), None);
        assert_eq!(RoundCode::from_rank(9), None);
    }
}
