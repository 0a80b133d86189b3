//! The training routine: dataset in, evaluated model artifact out.

use crate::artifact::ModelArtifact;
use crate::classifier::{Classifier, FitParams, LogisticClassifier};
use crate::dataset::{DataSource, Dataset};
use crate::error::TrainingError;
use crate::metadata::ArtifactMetadata;
use crate::metrics::EvaluationMetrics;
use hrp_features::Domain;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub fit: FitParams,
    /// Share of rows held out for evaluation.
    pub test_fraction: f64,
    pub threshold: f64,
    /// Seeds both the split shuffle and the synthetic cohort.
    pub seed: u64,
    pub heart_synthetic_rows: usize,
    pub diabetes_synthetic_rows: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            fit: FitParams::default(),
            test_fraction: 0.2,
            threshold: 0.5,
            seed: 42,
            heart_synthetic_rows: 1000,
            diabetes_synthetic_rows: 2000,
        }
    }
}

impl TrainingConfig {
    pub fn synthetic_rows(&self, domain: Domain) -> usize {
        match domain {
            Domain::Heart => self.heart_synthetic_rows,
            Domain::Diabetes => self.diabetes_synthetic_rows,
        }
    }
}

/// Outcome of one retrain, as reported to the operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub domain: Domain,
    pub metrics: EvaluationMetrics,
    pub train_rows: usize,
    pub test_rows: usize,
    pub skipped_rows: usize,
    pub source: DataSource,
}

impl TrainingReport {
    pub fn accuracy(&self) -> f64 {
        self.metrics.accuracy
    }
}

#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub artifact: ModelArtifact,
    pub report: TrainingReport,
}

/// Shuffle, split, fit and evaluate.
pub fn train(dataset: &Dataset, config: &TrainingConfig) -> Result<TrainedModel, TrainingError> {
    let domain = dataset.domain;
    let n = dataset.len();
    if n < 2 {
        return Err(TrainingError::TooFewRows { domain, rows: n });
    }
    let positives = dataset.positives();
    if positives == 0 || positives == n {
        return Err(TrainingError::SingleClass { domain });
    }

    let (train_idx, test_idx) = split_indices(n, config.test_fraction, config.seed);
    let gather = |idx: &[usize]| -> (Vec<Vec<f64>>, Vec<bool>) {
        idx.iter()
            .map(|&i| (dataset.rows[i].clone(), dataset.labels[i]))
            .unzip()
    };
    let (train_x, train_y) = gather(&train_idx);
    let (test_x, test_y) = gather(&test_idx);

    let classifier = LogisticClassifier::fit(&train_x, &train_y, &config.fit)
        .ok_or(TrainingError::Fit { domain })?;

    let scores = test_x
        .iter()
        .map(|x| classifier.predict_proba(x))
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|e| {
            log::error!("{domain} evaluation failed: {e}");
            TrainingError::Fit { domain }
        })?;
    let metrics = EvaluationMetrics::evaluate(&scores, &test_y, config.threshold);

    log::info!(
        "trained {domain} model on {} rows ({}), hold-out accuracy {:.3}, auc {:.3}",
        train_x.len(),
        dataset.source,
        metrics.accuracy,
        metrics.roc_auc
    );

    let metadata = ArtifactMetadata::new(domain, classifier.kind())
        .with_threshold(config.threshold)
        .with_split(train_x.len(), test_x.len())
        .with_metrics(metrics)
        .with_source(dataset.source.clone());

    Ok(TrainedModel {
        artifact: ModelArtifact {
            metadata,
            classifier,
        },
        report: TrainingReport {
            domain,
            metrics,
            train_rows: train_x.len(),
            test_rows: test_x.len(),
            skipped_rows: dataset.skipped,
            source: dataset.source.clone(),
        },
    })
}

/// Seeded shuffle split; both sides get at least one row when `n >= 2`.
fn split_indices(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut idx: Vec<usize> = (0..n).collect();
    idx.shuffle(&mut StdRng::seed_from_u64(seed));
    let n_test = ((n as f64) * test_fraction.clamp(0.0, 1.0)).round() as usize;
    let n_test = n_test.clamp(1, n.saturating_sub(1).max(1));
    let test = idx.split_off(n - n_test);
    (idx, test)
}
