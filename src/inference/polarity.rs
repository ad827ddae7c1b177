//! Lexicon polarity scores (VADER).
//!
//! The classifier was trained with the four VADER intensities as its leading
//! feature columns, named `neg`, `neu`, `pos`, `compound`.

use serde::{Deserialize, Serialize};
use vader_sentiment::SentimentIntensityAnalyzer;

pub const POLARITY_COLUMNS: [&str; 4] = ["neg", "neu", "pos", "compound"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    /// Share of negative intensity, [0, 1].
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    /// Normalized overall intensity, [−1, 1].
    pub compound: f64,
}

impl PolarityScores {
    /// `(column name, value)` pairs in training column order.
    pub fn columns(&self) -> [(&'static str, f64); 4] {
        [
            (POLARITY_COLUMNS[0], self.neg),
            (POLARITY_COLUMNS[1], self.neu),
            (POLARITY_COLUMNS[2], self.pos),
            (POLARITY_COLUMNS[3], self.compound),
        ]
    }
}

/// Source of lexicon polarity for a single headline.
pub trait PolarityScorer: Send + Sync {
    fn polarity_scores(&self, text: &str) -> PolarityScores;
}

/// Stock VADER lexicon and rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaderScorer;

impl PolarityScorer for VaderScorer {
    fn polarity_scores(&self, text: &str) -> PolarityScores {
        let analyzer = SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores(text);
        let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);
        PolarityScores {
            neg: get("neg"),
            neu: get("neu"),
            pos: get("pos"),
            compound: get("compound"),
        }
    }
}
