//! Descriptive metadata stored alongside every trained model.

use crate::dataset::DataSource;
use crate::metrics::EvaluationMetrics;
use hrp_features::{schema_for, Domain};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub domain: Domain,
    /// Model family, e.g. `logistic_regression`.
    pub model_type: String,
    /// Input names in the order the classifier consumes them.
    pub feature_names: Vec<String>,
    /// Positive-class probability at or above which the label is "risk".
    pub threshold: f64,
    pub train_rows: usize,
    pub test_rows: usize,
    pub metrics: Option<EvaluationMetrics>,
    pub source: Option<DataSource>,
    /// RFC 3339 timestamp.
    pub trained_at: String,
}

impl ArtifactMetadata {
    pub fn new(domain: Domain, model_type: impl Into<String>) -> Self {
        Self {
            domain,
            model_type: model_type.into(),
            feature_names: schema_for(domain)
                .names()
                .into_iter()
                .map(String::from)
                .collect(),
            threshold: 0.5,
            train_rows: 0,
            test_rows: 0,
            metrics: None,
            source: None,
            trained_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_split(mut self, train_rows: usize, test_rows: usize) -> Self {
        self.train_rows = train_rows;
        self.test_rows = test_rows;
        self
    }

    pub fn with_metrics(mut self, metrics: EvaluationMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_source(mut self, source: DataSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Hold-out accuracy, if the model was evaluated.
    pub fn accuracy(&self) -> Option<f64> {
        self.metrics.map(|m| m.accuracy)
    }
}
