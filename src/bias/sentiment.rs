//! Headline sentiment aggregation and the confidence annotation wire format.
//!
//! Classified headlines cross the boundary to display/aggregation as plain
//! strings carrying their confidence:
//!
//! ```text
//! Sinner wins in straight sets (92.35% confidence)
//! ```
//!
//! Consumers recover the bare text by cutting at the first `" ("`, so the
//! producer refuses text that already contains that separator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::models::{SentimentDetail, SentimentLabel};

const ANNOTATION_SEPARATOR: &str = " (";

#[derive(Debug, Error, PartialEq)]
pub enum AnnotationError {
    #[error("headline is empty")]
    Empty,
    #[error("headline {0:?} contains \" (\" and would not survive annotation stripping")]
    AmbiguousSeparator(String),
    #[error("confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f64),
}

/// Render `"<text> (<pct>% confidence)"` with two decimal digits.
pub fn annotate(text: &str, confidence: f64) -> Result<String, AnnotationError> {
    if text.trim().is_empty() {
        return Err(AnnotationError::Empty);
    }
    if text.contains(ANNOTATION_SEPARATOR) {
        return Err(AnnotationError::AmbiguousSeparator(text.to_string()));
    }
    if !(0.0..=1.0).contains(&confidence) {
        return Err(AnnotationError::ConfidenceOutOfRange(confidence));
    }
    Ok(format!("{} ({:.2}% confidence)", text, confidence * 100.0))
}

/// Bare headline text: everything before the first `" ("`.
pub fn strip_annotation(annotated: &str) -> &str {
    annotated
        .split_once(ANNOTATION_SEPARATOR)
        .map_or(annotated, |(text, _)| text)
}

/// Annotated headlines grouped by predicted label, in classification order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentResultSet {
    #[serde(rename = "Positive", default)]
    pub positive: Vec<String>,
    #[serde(rename = "Neutral", default)]
    pub neutral: Vec<String>,
    #[serde(rename = "Negative", default)]
    pub negative: Vec<String>,
}

impl SentimentResultSet {
    pub fn bucket(&self, label: SentimentLabel) -> &[String] {
        match label {
            SentimentLabel::Positive => &self.positive,
            SentimentLabel::Neutral => &self.neutral,
            SentimentLabel::Negative => &self.negative,
        }
    }

    /// Annotate and file a classified headline under its label.
    pub fn push(
        &mut self,
        text: &str,
        label: SentimentLabel,
        confidence: f64,
    ) -> Result<(), AnnotationError> {
        let annotated = annotate(text, confidence)?;
        match label {
            SentimentLabel::Positive => self.positive.push(annotated),
            SentimentLabel::Neutral => self.neutral.push(annotated),
            SentimentLabel::Negative => self.negative.push(annotated),
        }
        Ok(())
    }

    /// All headlines, neutral included.
    pub fn total(&self) -> usize {
        self.positive.len() + self.neutral.len() + self.negative.len()
    }

    /// Fraction of the polar (positive + negative) headlines carrying `label`.
    /// `None` for neutral or when there are no polar headlines.
    pub fn polar_share(&self, label: SentimentLabel) -> Option<f64> {
        let polar = self.positive.len() + self.negative.len();
        if polar == 0 || label == SentimentLabel::Neutral {
            return None;
        }
        Some(self.bucket(label).len() as f64 / polar as f64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentimentSummary {
    /// `(pos − neg) / (pos + neg)`, or 0 with no polar headlines.
    pub score: f64,
    pub positive_count: usize,
    pub negative_count: usize,
    pub details: Vec<SentimentDetail>,
}

pub fn aggregate_sentiment(results: &SentimentResultSet) -> SentimentSummary {
    let positive_count = results.positive.len();
    let negative_count = results.negative.len();
    let polar = positive_count + negative_count;

    let score = if polar > 0 {
        (positive_count as f64 - negative_count as f64) / polar as f64
    } else {
        0.0
    };

    let details = [SentimentLabel::Positive, SentimentLabel::Negative]
        .into_iter()
        .flat_map(|label| {
            results.bucket(label).iter().map(move |h| SentimentDetail {
                headline: strip_annotation(h).to_string(),
                sentiment: label,
            })
        })
        .collect();

    SentimentSummary {
        score,
        positive_count,
        negative_count,
        details,
    }
}

/// Coarse reading of the press coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageBand {
    PredominantlyPositive,
    RelativelyBalanced,
    PredominantlyNegative,
}

impl CoverageBand {
    pub fn from_score(score: f64) -> Self {
        if score > 0.3 {
            CoverageBand::PredominantlyPositive
        } else if score < -0.3 {
            CoverageBand::PredominantlyNegative
        } else {
            CoverageBand::RelativelyBalanced
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            CoverageBand::PredominantlyPositive => "predominantly positive",
            CoverageBand::RelativelyBalanced => "relatively balanced",
            CoverageBand::PredominantlyNegative => "predominantly negative",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn result_set(pos: &[&str], neu: &[&str], neg: &[&str]) -> SentimentResultSet {
        fn own(xs: &[&str]) -> Vec<String> {
            xs.iter().map(|s| s.to_string()).collect()
        }
        SentimentResultSet {
            positive: own(pos),
            neutral: own(neu),
            negative: own(neg),
        }
    }

    #[test]
    fn strips_confidence_suffix() {
        assert_eq!(
            strip_annotation("Djokovic wins final (88.40% confidence)"),
            "Djokovic wins final"
        );
    }

    #[test]
    fn strip_cuts_at_first_separator() {
        assert_eq!(strip_annotation("Nadal (injured) out (51.00% confidence)"), "Nadal");
        assert_eq!(strip_annotation("No suffix here"), "No suffix here");
    }

    #[test]
    fn annotate_uses_two_decimal_percentage() {
        let s = annotate("Sinner wins in straight sets", 0.9235).unwrap();
        assert_eq!(s, "Sinner wins in straight sets (92.35% confidence)");
        assert_eq!(strip_annotation(&s), "Sinner wins in straight sets");
    }

    #[test]
    fn annotate_rejects_text_that_would_misparse() {
        assert_eq!(
            annotate("Nadal (injured) withdraws", 0.7),
            Err(AnnotationError::AmbiguousSeparator("Nadal (injured) withdraws".into()))
        );
        assert_eq!(annotate("   ", 0.7), Err(AnnotationError::Empty));
        assert!(matches!(
            annotate("Fine", 1.5),
            Err(AnnotationError::ConfidenceOutOfRange(_))
        ));
    }

    #[test]
    fn three_positive_one_negative() {
        let rs = result_set(&["h1 (90.00% confidence)", "h2 (80.00% confidence)", "h3 (70.00% confidence)"], &[], &["h4 (60.00% confidence)"]);
        let summary = aggregate_sentiment(&rs);
        assert_relative_eq!(summary.score, 0.5, epsilon = 1e-12);
        assert_eq!(summary.positive_count, 3);
        assert_eq!(summary.negative_count, 1);
    }

    #[test]
    fn neutral_excluded_from_score_and_details() {
        let rs = result_set(&["a (50.00% confidence)"], &["n1 (99.00% confidence)", "n2 (99.00% confidence)"], &[]);
        let summary = aggregate_sentiment(&rs);
        assert_relative_eq!(summary.score, 1.0, epsilon = 1e-12);
        assert_eq!(summary.details.len(), 1);
        assert_eq!(rs.total(), 3);
    }

    #[test]
    fn no_polar_headlines_scores_zero() {
        let empty = aggregate_sentiment(&SentimentResultSet::default());
        assert_eq!(empty.score, 0.0);
        let neutral_only = aggregate_sentiment(&result_set(&[], &["n (40.00% confidence)"], &[]));
        assert_eq!(neutral_only.score, 0.0);
        assert!(neutral_only.details.is_empty());
    }

    #[test]
    fn details_list_positive_then_negative_in_order() {
        let rs = result_set(
            &["p1 (90.00% confidence)", "p2 (80.00% confidence)"],
            &["n (10.00% confidence)"],
            &["m1 (70.00% confidence)", "m2 (60.00% confidence)"],
        );
        let details = aggregate_sentiment(&rs).details;
        let flat: Vec<(&str, SentimentLabel)> = details
            .iter()
            .map(|d| (d.headline.as_str(), d.sentiment))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("p1", SentimentLabel::Positive),
                ("p2", SentimentLabel::Positive),
                ("m1", SentimentLabel::Negative),
                ("m2", SentimentLabel::Negative),
            ]
        );
    }

    #[test]
    fn score_bounded() {
        for pos in 0..5 {
            for neg in 0..5 {
                let rs = SentimentResultSet {
                    positive: vec!["x (1.00% confidence)".into(); pos],
                    neutral: vec![],
                    negative: vec!["y (1.00% confidence)".into(); neg],
                };
                let s = aggregate_sentiment(&rs).score;
                assert!((-1.0..=1.0).contains(&s));
            }
        }
    }

    #[test]
    fn result_set_uses_capitalised_keys() {
        let rs: SentimentResultSet =
            serde_json::from_str(r#"{"Positive": ["a (1.00% confidence)"], "Negative": []}"#).unwrap();
        assert_eq!(rs.positive.len(), 1);
        assert!(rs.neutral.is_empty());
    }

    #[test]
    fn push_files_under_label() {
        let mut rs = SentimentResultSet::default();
        rs.push("Alcaraz cruises", SentimentLabel::Positive, 0.8842).unwrap();
        rs.push("Rain delay", SentimentLabel::Neutral, 0.5).unwrap();
        assert_eq!(rs.positive, vec!["Alcaraz cruises (88.42% confidence)".to_string()]);
        assert_eq!(rs.neutral, vec!["Rain delay (50.00% confidence)".to_string()]);
        assert!(rs.negative.is_empty());
    }

    #[test]
    fn polar_share_ignores_neutral() {
        let rs = result_set(&["p1", "p2", "p3"], &["n1", "n2"], &["m1"]);
        assert_relative_eq!(rs.polar_share(SentimentLabel::Positive).unwrap(), 0.75, epsilon = 1e-12);
        assert_relative_eq!(rs.polar_share(SentimentLabel::Negative).unwrap(), 0.25, epsilon = 1e-12);
        assert_eq!(rs.polar_share(SentimentLabel::Neutral), None);
        let neutral_only = result_set(&[], &["n"], &[]);
        assert_eq!(neutral_only.polar_share(SentimentLabel::Positive), None);
    }

    #[test]
    fn coverage_bands() {
        assert_eq!(CoverageBand::from_score(0.5), CoverageBand::PredominantlyPositive);
        assert_eq!(CoverageBand::from_score(0.3), CoverageBand::RelativelyBalanced);
        assert_eq!(CoverageBand::from_score(0.0), CoverageBand::RelativelyBalanced);
        assert_eq!(CoverageBand::from_score(-0.3), CoverageBand::RelativelyBalanced);
        assert_eq!(CoverageBand::from_score(-0.31), CoverageBand::PredominantlyNegative);
        assert_eq!(CoverageBand::PredominantlyNegative.describe(), "predominantly negative");
    }
}
