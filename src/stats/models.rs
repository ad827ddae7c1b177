use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::bias::TournamentStats;

/// One completed match in ATP results layout (`atp_matches_YYYY`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub tourney_name: String,
    /// `YYYYMMDD`.
    #[serde(default)]
    pub tourney_date: Option<u32>,
    pub round: String,
    #[serde(default)]
    pub minutes: Option<f64>,
    pub winner_name: String,
    pub loser_name: String,
    #[serde(default)]
    pub winner_seed: Option<u32>,
    #[serde(default)]
    pub loser_seed: Option<u32>,
    #[serde(default)]
    pub w_ace: Option<f64>,
    #[serde(default)]
    pub w_df: Option<f64>,
    #[serde(default, rename = "w_bpSaved")]
    pub w_bp_saved: Option<f64>,
    #[serde(default, rename = "w_bpFaced")]
    pub w_bp_faced: Option<f64>,
    #[serde(default)]
    pub l_ace: Option<f64>,
    #[serde(default)]
    pub l_df: Option<f64>,
    #[serde(default, rename = "l_bpSaved")]
    pub l_bp_saved: Option<f64>,
    #[serde(default, rename = "l_bpFaced")]
    pub l_bp_faced: Option<f64>,
}

/// Serve/return numbers for one side of a match.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SideStats {
    pub aces: Option<f64>,
    pub double_faults: Option<f64>,
    pub bp_saved: Option<f64>,
    pub bp_faced: Option<f64>,
}

impl MatchRecord {
    pub fn year(&self) -> Option<i32> {
        let raw = self.tourney_date?.to_string();
        NaiveDate::parse_from_str(&raw, "%Y%m%d")
            .ok()
            .map(|d| d.year())
    }

    /// Case-insensitive substring match on the tournament name.
    pub fn is_tournament(&self, tournament: &str) -> bool {
        self.tourney_name
            .to_lowercase()
            .contains(&tournament.to_lowercase())
    }

    pub fn winner_side(&self) -> SideStats {
        SideStats {
            aces: self.w_ace,
            double_faults: self.w_df,
            bp_saved: self.w_bp_saved,
            bp_faced: self.w_bp_faced,
        }
    }

    pub fn loser_side(&self) -> SideStats {
        SideStats {
            aces: self.l_ace,
            double_faults: self.l_df,
            bp_saved: self.l_bp_saved,
            bp_faced: self.l_bp_faced,
        }
    }
}

/// A player's tournament, with the scoring inputs and the display extras.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTournamentSummary {
    pub player: String,
    pub tournament: String,
    pub total_matches: usize,
    pub wins: usize,
    pub losses: usize,
    /// Percentage, 0–100.
    pub win_rate: f64,
    pub avg_match_minutes: Option<f64>,
    pub break_points_faced: f64,
    pub stats: TournamentStats,
}

/// A player's whole season, every tournament included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerYearlySummary {
    pub player: String,
    /// `None` when the results were not restricted to one season.
    pub year: Option<i32>,
    pub total_matches: usize,
    pub wins: usize,
    pub losses: usize,
    /// Percentage, 0–100.
    pub win_rate: f64,
    pub avg_match_minutes: Option<f64>,
    pub aces: f64,
    pub double_faults: f64,
    pub break_points_faced: f64,
    pub break_points_saved_pct: f64,
}
