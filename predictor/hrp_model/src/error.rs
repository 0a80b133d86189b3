//! Error types for loading, scoring and training models.

use hrp_features::Domain;
use std::path::PathBuf;
use thiserror::Error;

/// A persisted artifact could not be turned into a usable model.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("no {domain} model found at {}; train the models first", path.display())]
    NotFound { domain: Domain, path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt model artifact {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("model artifact {} does not fit the {domain} schema: {reason}", path.display())]
    Mismatch {
        domain: Domain,
        path: PathBuf,
        reason: String,
    },
}

/// The classifier could not score a feature vector.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("the {model} model cannot score {features} features")]
    DomainMismatch { model: Domain, features: Domain },
    #[error("expected {expected} feature values, got {got}")]
    FeatureCount { expected: usize, got: usize },
    #[error("classifier returned a non-finite score")]
    NonFinite,
    #[error("classifier failure: {0}")]
    Backend(String),
}

/// The retrain pipeline failed; the previous model stays in service.
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("no training data for {domain}: {} not found", path.display())]
    DatasetMissing { domain: Domain, path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dataset {}: {reason}", path.display())]
    MalformedDataset { path: PathBuf, reason: String },
    #[error("{domain} dataset has too few usable rows ({rows})")]
    TooFewRows { domain: Domain, rows: usize },
    #[error("{domain} dataset contains a single outcome class")]
    SingleClass { domain: Domain },
    #[error("failed to fit the {domain} classifier")]
    Fit { domain: Domain },
    #[error("failed to serialize the {domain} artifact: {source}")]
    Serialize {
        domain: Domain,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to persist {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A multi-domain retrain stopped at `domain`; models in `replaced`
    /// were already swapped in before it failed.
    #[error("{domain} training failed ({}): {source}", replaced_note(.replaced))]
    Stopped {
        domain: Domain,
        replaced: Vec<Domain>,
        #[source]
        source: Box<TrainingError>,
    },
}

fn replaced_note(replaced: &[Domain]) -> String {
    if replaced.is_empty() {
        return "no model was replaced".to_string();
    }
    let names: Vec<&str> = replaced.iter().map(|d| d.as_str()).collect();
    format!("{} model already replaced", names.join(" and "))
}
