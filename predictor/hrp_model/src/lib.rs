//! Risk classifiers for the Health Risk Predictor.
//!
//! [`ModelRegistry`] owns one slot per [`Domain`](hrp_features::Domain). A slot
//! is filled lazily from the [`ArtifactStore`] on first use and replaced
//! atomically by [`ModelRegistry::retrain`]. [`predict`] scores a normalized
//! feature vector against whatever handle the caller obtained.

pub mod artifact;
pub mod classifier;
pub mod dataset;
pub mod error;
pub mod metadata;
pub mod metrics;
pub mod registry;
pub mod scaler;
pub mod service;
pub mod synthetic;
pub mod training;

pub use artifact::{ArtifactStore, ModelArtifact};
pub use classifier::{Classifier, FitParams, LogisticClassifier};
pub use dataset::{DataSource, Dataset, DatasetLocator};
pub use error::{InferenceError, ModelLoadError, TrainingError};
pub use metadata::ArtifactMetadata;
pub use metrics::{EvaluationMetrics, ValidationMetric};
pub use registry::{ModelHandle, ModelRegistry, TrainingSummary};
pub use service::{predict, PredictionResult, RiskLabel, RiskStratum};
pub use training::{train, TrainedModel, TrainingConfig, TrainingReport};
