//! Headline → label + confidence.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::bias::{SentimentLabel, SentimentResultSet};

use super::artifacts::ArtifactBundle;
use super::classifier::argmax;
use super::features::FeatureVectorBuilder;
use super::polarity::{PolarityScorer, VaderScorer};

#[derive(Debug, Error, PartialEq)]
pub enum ClassifyError {
    #[error("model returned no usable probabilities")]
    NoProbabilities,
    #[error("class index {index} has no label ({classes} classes known)")]
    UnknownClass { index: usize, classes: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: SentimentLabel,
    /// Probability of the chosen class.
    pub confidence: f64,
}

/// A classified headline carried as a structured record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedHeadline {
    pub text: String,
    pub label: SentimentLabel,
    pub confidence: f64,
}

pub fn classify_headline(
    artifacts: &ArtifactBundle,
    polarity: &dyn PolarityScorer,
    headline: &str,
) -> Result<Classification, ClassifyError> {
    let builder = FeatureVectorBuilder::new(&artifacts.vectorizer, &artifacts.feature_order, polarity);
    let features = builder.build(headline);
    let probabilities = artifacts.model.predict_proba(&features.values);
    let (index, confidence) = argmax(&probabilities).ok_or(ClassifyError::NoProbabilities)?;
    let label = artifacts
        .label_encoder
        .inverse_transform(index)
        .ok_or(ClassifyError::UnknownClass {
            index,
            classes: artifacts.label_encoder.classes.len(),
        })?;
    Ok(Classification { label, confidence })
}

/// Loaded artifacts plus the polarity scorer, shared across calls.
#[derive(Clone)]
pub struct SentimentPipeline {
    artifacts: Arc<ArtifactBundle>,
    polarity: Arc<dyn PolarityScorer>,
}

impl SentimentPipeline {
    pub fn new(artifacts: Arc<ArtifactBundle>) -> Self {
        Self::with_polarity(artifacts, Arc::new(VaderScorer))
    }

    pub fn with_polarity(artifacts: Arc<ArtifactBundle>, polarity: Arc<dyn PolarityScorer>) -> Self {
        SentimentPipeline {
            artifacts,
            polarity,
        }
    }

    pub fn classify(&self, headline: &str) -> Result<ClassifiedHeadline, ClassifyError> {
        let c = classify_headline(&self.artifacts, self.polarity.as_ref(), headline)?;
        debug!(
            "Classified {:?} as {} ({:.2}%)",
            headline,
            c.label,
            c.confidence * 100.0
        );
        Ok(ClassifiedHeadline {
            text: headline.to_string(),
            label: c.label,
            confidence: c.confidence,
        })
    }

    /// Classify every non-blank headline in order and file it into a result
    /// set. Headlines the annotation format cannot carry are skipped.
    pub fn classify_all<'h, I>(&self, headlines: I) -> Result<SentimentResultSet, ClassifyError>
    where
        I: IntoIterator<Item = &'h str>,
    {
        let mut results = SentimentResultSet::default();
        for headline in headlines {
            let headline = headline.trim();
            if headline.is_empty() {
                continue;
            }
            let classified = self.classify(headline)?;
            if let Err(e) = results.push(&classified.text, classified.label, classified.confidence) {
                warn!("Skipping headline: {}", e);
            }
        }
        Ok(results)
    }
}
