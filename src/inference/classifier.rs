//! Persisted probability model and label encoder.
//!
//! The model is a fitted linear classifier: one coefficient row and one
//! intercept per class, softmax over the class scores. A single row is the
//! binary case, where the row scores the second class and
//! `p = sigmoid(w·x + b)`.

use serde::{Deserialize, Serialize};

use crate::bias::SentimentLabel;

/// Anything that turns an ordered feature row into class probabilities.
pub trait ProbabilityModel: Send + Sync {
    fn n_features(&self) -> usize;
    fn n_classes(&self) -> usize;
    fn predict_proba(&self, features: &[f64]) -> Vec<f64>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

impl LogisticModel {
    pub fn validate(&self) -> Result<(), String> {
        let Some(first) = self.coef.first() else {
            return Err("model has no coefficient rows".to_string());
        };
        if first.is_empty() {
            return Err("model has zero features".to_string());
        }
        if let Some(row) = self.coef.iter().position(|r| r.len() != first.len()) {
            return Err(format!(
                "coefficient row {} has {} features, expected {}",
                row,
                self.coef[row].len(),
                first.len()
            ));
        }
        if self.intercept.len() != self.coef.len() {
            return Err(format!(
                "{} intercepts for {} coefficient rows",
                self.intercept.len(),
                self.coef.len()
            ));
        }
        Ok(())
    }

    fn decision(&self, features: &[f64]) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect()
    }
}

impl ProbabilityModel for LogisticModel {
    fn n_features(&self) -> usize {
        self.coef.first().map_or(0, Vec::len)
    }

    fn n_classes(&self) -> usize {
        match self.coef.len() {
            1 => 2,
            n => n,
        }
    }

    fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let scores = self.decision(features);
        if scores.len() == 1 {
            let p = sigmoid(scores[0]);
            vec![1.0 - p, p]
        } else {
            softmax(&scores)
        }
    }
}

/// Class index → label name, as fitted at training time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn validate(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("label encoder has no classes".to_string());
        }
        for class in &self.classes {
            class.parse::<SentimentLabel>()?;
        }
        Ok(())
    }

    pub fn inverse_transform(&self, index: usize) -> Option<SentimentLabel> {
        self.classes.get(index)?.parse().ok()
    }
}

/// Index of the largest probability; the first one wins ties.
pub fn argmax(probabilities: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &p) in probabilities.iter().enumerate() {
        match best {
            Some((_, bp)) if p <= bp => {}
            _ if p.is_nan() => {}
            _ => best = Some((i, p)),
        }
    }
    best
}
