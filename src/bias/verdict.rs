//! Bias verdict: sentiment score minus performance score.
//!
//! A positive bias means coverage is kinder than the numbers justify; a
//! negative bias means it is harsher.

use tracing::debug;

use super::models::{BiasLevel, BiasVerdict, TourAverages, TournamentStats};
use super::performance::score_performance;
use super::sentiment::{aggregate_sentiment, SentimentResultSet};

/// Magnitudes below this are "Low".
pub const MODERATE_THRESHOLD: f64 = 0.3;
/// Magnitudes at or above this are "High".
pub const HIGH_THRESHOLD: f64 = 0.7;

/// Level and description for a bias score. Bands are checked in order, first
/// match wins.
pub fn classify_bias(bias_score: f64) -> (BiasLevel, &'static str) {
    let magnitude = bias_score.abs();
    if magnitude < MODERATE_THRESHOLD {
        (
            BiasLevel::Low,
            "Media sentiment generally aligns with player performance.",
        )
    } else if magnitude < HIGH_THRESHOLD {
        let description = if bias_score > 0.0 {
            "Media sentiment is somewhat more positive than performance suggests."
        } else {
            "Media sentiment is somewhat more negative than performance suggests."
        };
        (BiasLevel::Moderate, description)
    } else {
        let description = if bias_score > 0.0 {
            "Media sentiment is significantly more positive than performance suggests."
        } else {
            "Media sentiment is significantly more negative than performance suggests."
        };
        (BiasLevel::High, description)
    }
}

/// Compare a player's tournament performance against how the press covered it.
///
/// Pure: the same three inputs always produce the same verdict, and none of
/// them is modified.
pub fn score_bias(
    stats: &TournamentStats,
    averages: &TourAverages,
    sentiment: &SentimentResultSet,
) -> BiasVerdict {
    let performance = score_performance(stats, averages);
    let summary = aggregate_sentiment(sentiment);

    let bias_score = summary.score - performance.normalized;
    let (bias_level, description) = classify_bias(bias_score);

    debug!(
        "performance={:.3} ({} factors) sentiment={:.3} ({}+/{}-) bias={:.3} level={}",
        performance.normalized,
        performance.factors.len(),
        summary.score,
        summary.positive_count,
        summary.negative_count,
        bias_score,
        bias_level
    );

    BiasVerdict {
        performance_score: performance.normalized,
        performance_factors: performance.factors,
        sentiment_score: summary.score,
        bias_score,
        bias_level,
        bias_description: description.to_string(),
        sentiment_details: summary.details,
    }
}

/// Signed reading of the bias score for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiasInterpretation {
    StrongPositive,
    MildPositive,
    Balanced,
    MildNegative,
    StrongNegative,
}

impl BiasInterpretation {
    pub fn from_score(bias_score: f64) -> Self {
        if bias_score > HIGH_THRESHOLD {
            BiasInterpretation::StrongPositive
        } else if bias_score < -HIGH_THRESHOLD {
            BiasInterpretation::StrongNegative
        } else if bias_score > MODERATE_THRESHOLD {
            BiasInterpretation::MildPositive
        } else if bias_score < -MODERATE_THRESHOLD {
            BiasInterpretation::MildNegative
        } else {
            BiasInterpretation::Balanced
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            BiasInterpretation::StrongPositive => {
                "Coverage appears significantly more positive than the performance metrics suggest, indicating potential positive bias."
            }
            BiasInterpretation::StrongNegative => {
                "Coverage appears significantly more negative than the performance metrics suggest, indicating potential negative bias."
            }
            BiasInterpretation::MildPositive => {
                "Coverage is somewhat more positive than the performance metrics suggest."
            }
            BiasInterpretation::MildNegative => {
                "Coverage is somewhat more negative than the performance metrics suggest."
            }
            BiasInterpretation::Balanced => {
                "Coverage appears fairly balanced and aligns with the player's actual performance."
            }
        }
    }
}

impl BiasVerdict {
    pub fn interpretation(&self) -> BiasInterpretation {
        BiasInterpretation::from_score(self.bias_score)
    }
}
