//! Loading of the persisted classifier artifacts.
//!
//! The bundle is read once at process start and then shared read-only with
//! every classification call. A missing or inconsistent artifact is fatal
//! for the caller.

use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use super::classifier::{LabelEncoder, LogisticModel, ProbabilityModel};
use super::features::FeatureOrder;
use super::vectorizer::TfidfVectorizer;

pub const MODEL_FILE: &str = "model.json";
pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const LABEL_ENCODER_FILE: &str = "label_encoder.json";
pub const FEATURE_ORDER_FILE: &str = "feature_order.json";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact file not found: {0}")]
    Missing(PathBuf),
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {artifact}: {reason}")]
    Invalid {
        artifact: &'static str,
        reason: String,
    },
    #[error("artifacts disagree: {0}")]
    Mismatch(String),
}

/// Everything the sentiment pipeline needs, immutable after construction.
#[derive(Clone)]
pub struct ArtifactBundle {
    pub model: Arc<dyn ProbabilityModel>,
    pub vectorizer: TfidfVectorizer,
    pub label_encoder: LabelEncoder,
    pub feature_order: FeatureOrder,
}

impl std::fmt::Debug for ArtifactBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactBundle")
            .field("n_features", &self.model.n_features())
            .field("n_classes", &self.model.n_classes())
            .field("vocabulary", &self.vectorizer.vocabulary.len())
            .field("classes", &self.label_encoder.classes)
            .finish()
    }
}

impl ArtifactBundle {
    /// Assemble a bundle from parts, checking they fit together.
    pub fn new(
        model: Arc<dyn ProbabilityModel>,
        vectorizer: TfidfVectorizer,
        label_encoder: LabelEncoder,
        feature_order: FeatureOrder,
    ) -> Result<Self, ArtifactError> {
        vectorizer.validate().map_err(|reason| ArtifactError::Invalid {
            artifact: "vectorizer",
            reason,
        })?;
        label_encoder
            .validate()
            .map_err(|reason| ArtifactError::Invalid {
                artifact: "label encoder",
                reason,
            })?;
        feature_order
            .validate()
            .map_err(|reason| ArtifactError::Invalid {
                artifact: "feature order",
                reason,
            })?;

        if model.n_features() != feature_order.len() {
            return Err(ArtifactError::Mismatch(format!(
                "model expects {} features, feature order lists {}",
                model.n_features(),
                feature_order.len()
            )));
        }
        if model.n_classes() != label_encoder.classes.len() {
            return Err(ArtifactError::Mismatch(format!(
                "model scores {} classes, label encoder has {}",
                model.n_classes(),
                label_encoder.classes.len()
            )));
        }

        let unused: Vec<&str> = vectorizer
            .feature_names()
            .into_iter()
            .filter(|term| !feature_order.contains(term))
            .collect();
        if !unused.is_empty() {
            warn!(
                "{} vocabulary term(s) missing from the feature order will be ignored (first: {:?})",
                unused.len(),
                unused[0]
            );
        }

        Ok(ArtifactBundle {
            model,
            vectorizer,
            label_encoder,
            feature_order,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let raw = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ArtifactError::Missing(path.to_path_buf())
        } else {
            ArtifactError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the four artifact files from `dir`.
pub fn load_artifacts(dir: &Path) -> Result<ArtifactBundle, ArtifactError> {
    let model: LogisticModel = read_json(&dir.join(MODEL_FILE))?;
    model.validate().map_err(|reason| ArtifactError::Invalid {
        artifact: "model",
        reason,
    })?;
    let vectorizer: TfidfVectorizer = read_json(&dir.join(VECTORIZER_FILE))?;
    let label_encoder: LabelEncoder = read_json(&dir.join(LABEL_ENCODER_FILE))?;
    let feature_order: FeatureOrder = read_json(&dir.join(FEATURE_ORDER_FILE))?;

    let bundle = ArtifactBundle::new(Arc::new(model), vectorizer, label_encoder, feature_order)?;
    info!(
        "Loaded sentiment artifacts from {} ({} features, {} vocabulary terms, classes {:?})",
        dir.display(),
        bundle.feature_order.len(),
        bundle.vectorizer.vocabulary.len(),
        bundle.label_encoder.classes
    );
    Ok(bundle)
}
