//! Feature vector construction for one headline.
//!
//! Live columns are the four polarity scores followed by the TF-IDF weights.
//! The result is reindexed onto the column order recorded at training time:
//! training columns missing from the live row are 0, live columns the
//! training order does not know are dropped.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::polarity::PolarityScorer;
use super::vectorizer::TfidfVectorizer;

/// Canonical column order the classifier was fitted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureOrder(pub Vec<String>);

impl FeatureOrder {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.iter().any(|c| c == column)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err("feature order is empty".to_string());
        }
        let mut seen = HashSet::new();
        for column in &self.0 {
            if !seen.insert(column.as_str()) {
                return Err(format!("column '{}' listed twice", column));
            }
        }
        Ok(())
    }
}

/// Values aligned one-to-one with a [`FeatureOrder`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub values: Vec<f64>,
}

pub struct FeatureVectorBuilder<'a> {
    vectorizer: &'a TfidfVectorizer,
    order: &'a FeatureOrder,
    polarity: &'a dyn PolarityScorer,
}

impl<'a> FeatureVectorBuilder<'a> {
    pub fn new(
        vectorizer: &'a TfidfVectorizer,
        order: &'a FeatureOrder,
        polarity: &'a dyn PolarityScorer,
    ) -> Self {
        FeatureVectorBuilder {
            vectorizer,
            order,
            polarity,
        }
    }

    /// Named columns computed from the headline before reindexing. Only
    /// non-zero TF-IDF terms appear. A vocabulary term that shares a name
    /// with a polarity column never overrides the polarity value.
    pub fn live_columns(&self, headline: &str) -> HashMap<String, f64> {
        let mut live: HashMap<String, f64> = self
            .polarity
            .polarity_scores(headline)
            .columns()
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect();
        for (term, weight) in self.vectorizer.transform(headline) {
            live.entry(term).or_insert(weight);
        }
        live
    }

    pub fn build(&self, headline: &str) -> FeatureVector {
        let live = self.live_columns(headline);
        let values = self
            .order
            .columns()
            .iter()
            .map(|column| live.get(column).copied().unwrap_or(0.0))
            .collect();
        FeatureVector { values }
    }
}
