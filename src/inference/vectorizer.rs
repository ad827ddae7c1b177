//! TF-IDF bag-of-terms vectorizer restored from a persisted vocabulary.
//!
//! Mirrors the fitted vectorizer the classifier was trained with:
//!   - tokens are maximal runs of word characters (alphanumeric or `_`) at
//!     least two characters long, lower-cased unless disabled
//!   - optional stop-word removal, then word n-grams joined by a single space
//!   - raw term count (or `1 + ln(count)` when sublinear) × idf
//!   - the row is scaled to unit L2 (or L1) norm
//!
//! Only terms present in the vocabulary contribute; everything else is zero.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

fn default_true() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term → column index into `idf`.
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub sublinear_tf: bool,
    /// `null` disables normalization.
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default)]
    pub stop_words: HashSet<String>,
}

#[cfg(test)]
impl TfidfVectorizer {
    /// Vectorizer with default settings over a fixed vocabulary.
    pub(crate) fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Self {
        TfidfVectorizer {
            vocabulary,
            idf,
            lowercase: true,
            ngram_range: default_ngram_range(),
            sublinear_tf: false,
            norm: default_norm(),
            stop_words: HashSet::new(),
        }
    }
}

impl TfidfVectorizer {
    /// Check the restored state is internally consistent.
    pub fn validate(&self) -> Result<(), String> {
        if self.vocabulary.len() != self.idf.len() {
            return Err(format!(
                "vocabulary has {} terms but idf has {} weights",
                self.vocabulary.len(),
                self.idf.len()
            ));
        }
        let mut seen = vec![false; self.idf.len()];
        for (term, &index) in &self.vocabulary {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => return Err(format!("column {} assigned to more than one term", index)),
                None => return Err(format!("term '{}' maps to out-of-range column {}", term, index)),
            }
        }
        let (lo, hi) = self.ngram_range;
        if lo == 0 || lo > hi {
            return Err(format!("invalid ngram_range ({}, {})", lo, hi));
        }
        Ok(())
    }

    /// Vocabulary terms in column order.
    pub fn feature_names(&self) -> Vec<&str> {
        let mut names: Vec<(&str, usize)> = self
            .vocabulary
            .iter()
            .map(|(term, &index)| (term.as_str(), index))
            .collect();
        names.sort_by_key(|&(_, index)| index);
        names.into_iter().map(|(term, _)| term).collect()
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().count() >= 2)
            .filter(|token| !self.stop_words.contains(*token))
            .map(str::to_string)
            .collect()
    }

    fn ngrams(&self, tokens: &[String]) -> Vec<String> {
        let (lo, hi) = self.ngram_range;
        let mut out = Vec::new();
        for n in lo..=hi {
            if n > tokens.len() {
                break;
            }
            out.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        out
    }

    /// Non-zero TF-IDF weights for `text`, ordered by vocabulary column.
    pub fn transform(&self, text: &str) -> Vec<(String, f64)> {
        let tokens = self.tokenize(text);
        let mut counts: HashMap<String, (usize, u32)> = HashMap::new();
        for gram in self.ngrams(&tokens) {
            if let Some(&index) = self.vocabulary.get(&gram) {
                counts.entry(gram).or_insert((index, 0)).1 += 1;
            }
        }

        let mut weights: Vec<(usize, String, f64)> = counts
            .into_iter()
            .map(|(term, (index, count))| {
                let tf = if self.sublinear_tf {
                    1.0 + f64::from(count).ln()
                } else {
                    f64::from(count)
                };
                let idf = self.idf.get(index).copied().unwrap_or(0.0);
                (index, term, tf * idf)
            })
            .collect();
        weights.sort_by_key(|(index, _, _)| *index);

        let norm = match self.norm {
            Some(Norm::L2) => weights.iter().map(|(_, _, w)| w * w).sum::<f64>().sqrt(),
            Some(Norm::L1) => weights.iter().map(|(_, _, w)| w.abs()).sum::<f64>(),
            None => 1.0,
        };
        let scale = if norm > 0.0 { norm } else { 1.0 };

        weights
            .into_iter()
            .map(|(_, term, w)| (term, w / scale))
            .collect()
    }
}
