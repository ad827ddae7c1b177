use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Per-player statistics for one tournament, averaged over the player's
/// matches. Missing numeric fields deserialize to 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentStats {
    #[serde(default)]
    pub aces: f64,
    #[serde(default)]
    pub double_faults: f64,
    #[serde(default)]
    pub break_points_saved_pct: f64,
    /// `Some(0)` is unseeded; `None` means the seed is unknown.
    #[serde(default)]
    pub seed: Option<u32>,
    /// Furthest round reached, as a round code string (`R128` … `W`).
    #[serde(default)]
    pub round_reached: Option<String>,
}

/// Field-wide averages for the same tournament.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TourAverages {
    #[serde(default)]
    pub aces: f64,
    #[serde(default)]
    pub double_faults: f64,
    #[serde(default)]
    pub break_points_saved_pct: f64,
}

/// Player value / baseline of a factor. Numeric for stat comparisons, text
/// for the seed factor ("Seed 4 reached QF").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactorValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for FactorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactorValue::Number(v) => write!(f, "{:.1}", v),
            FactorValue::Text(s) => f.write_str(s),
        }
    }
}

/// One scored comparison, kept for audit display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceFactor {
    pub metric: String,
    pub value: FactorValue,
    pub tour_avg: FactorValue,
    /// +1 favorable, −1 unfavorable.
    pub sign: i8,
    /// Points added to the total (±1, or +0.5 for a met seed expectation).
    pub points: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Positive" => Ok(SentimentLabel::Positive),
            "Neutral" => Ok(SentimentLabel::Neutral),
            "Negative" => Ok(SentimentLabel::Negative),
            other => Err(format!("unknown sentiment label '{}'", other)),
        }
    }
}

/// A headline as listed in the verdict, confidence annotation removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDetail {
    pub headline: String,
    pub sentiment: SentimentLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BiasLevel {
    Low,
    Moderate,
    High,
}

impl fmt::Display for BiasLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BiasLevel::Low => "Low",
            BiasLevel::Moderate => "Moderate",
            BiasLevel::High => "High",
        };
        f.write_str(s)
    }
}

/// The engine's output. Built fresh per call from its three inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasVerdict {
    pub performance_score: f64,
    pub performance_factors: Vec<PerformanceFactor>,
    pub sentiment_score: f64,
    pub bias_score: f64,
    pub bias_level: BiasLevel,
    pub bias_description: String,
    pub sentiment_details: Vec<SentimentDetail>,
}
