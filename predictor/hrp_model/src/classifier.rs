//! Binary classifiers behind a pluggable trait.

use crate::error::InferenceError;
use crate::scaler::StandardScaler;
use core::cmp::Ordering;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A trained binary classifier.
///
/// Implementations must be safe to share across request threads; scoring
/// never mutates the model.
pub trait Classifier: Send + Sync + fmt::Debug {
    /// Identifier of the model family, e.g. `logistic_regression`.
    fn kind(&self) -> &str;

    /// Number of values `predict_proba` expects.
    fn n_features(&self) -> usize;

    /// Probability of the positive (risk) class.
    fn predict_proba(&self, features: &[f64]) -> Result<f64, InferenceError>;
}

/// Hyperparameters for gradient-descent fitting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    pub learning_rate: f64,
    pub epochs: usize,
    pub l2: f64,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            epochs: 500,
            l2: 1e-3,
        }
    }
}

/// Logistic regression over standardized features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticClassifier {
    pub scalers: Vec<StandardScaler>,
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl LogisticClassifier {
    /// Fit on row-major `rows` with boolean outcomes.
    ///
    /// Returns `None` when the inputs are empty, ragged, disagree in length,
    /// or the hyperparameters are unusable.
    pub fn fit(rows: &[Vec<f64>], labels: &[bool], params: &FitParams) -> Option<Self> {
        if rows.is_empty() || rows.len() != labels.len() {
            return None;
        }
        if params.learning_rate.partial_cmp(&0.0) != Some(Ordering::Greater)
            || params.epochs == 0
            || params.l2 < 0.0
        {
            return None;
        }
        let width = rows[0].len();
        if width == 0 || rows.iter().any(|r| r.len() != width) {
            return None;
        }

        let scalers = StandardScaler::fit_columns(rows, width);
        let scaled: Vec<Vec<f64>> = rows
            .iter()
            .map(|r| r.iter().zip(&scalers).map(|(x, s)| s.transform(*x)).collect())
            .collect();

        let n = rows.len() as f64;
        let mut weights = vec![0.0; width];
        let mut bias = 0.0;
        let mut grad_w = vec![0.0; width];

        for _ in 0..params.epochs {
            grad_w.iter_mut().for_each(|g| *g = 0.0);
            let mut grad_b = 0.0;
            for (x, &y) in scaled.iter().zip(labels) {
                let p = sigmoid(dot(&weights, x) + bias);
                let diff = p - if y { 1.0 } else { 0.0 };
                for (g, xi) in grad_w.iter_mut().zip(x) {
                    *g += diff * xi;
                }
                grad_b += diff;
            }
            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= params.learning_rate * (g / n + params.l2 * *w);
            }
            bias -= params.learning_rate * grad_b / n;
        }

        let fitted = Self {
            scalers,
            weights,
            bias,
        };
        fitted.is_finite().then_some(fitted)
    }

    fn is_finite(&self) -> bool {
        self.bias.is_finite() && self.weights.iter().all(|w| w.is_finite())
    }

    /// Linear score before the logistic link.
    pub fn decision_function(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != self.weights.len() || self.scalers.len() != self.weights.len() {
            return Err(InferenceError::FeatureCount {
                expected: self.weights.len(),
                got: features.len(),
            });
        }
        let z = features
            .iter()
            .zip(&self.scalers)
            .zip(&self.weights)
            .map(|((x, s), w)| s.transform(*x) * w)
            .sum::<f64>()
            + self.bias;
        Ok(z)
    }
}

impl Classifier for LogisticClassifier {
    fn kind(&self) -> &str {
        "logistic_regression"
    }

    fn n_features(&self) -> usize {
        self.weights.len()
    }

    fn predict_proba(&self, features: &[f64]) -> Result<f64, InferenceError> {
        let p = sigmoid(self.decision_function(features)?);
        if p.is_finite() {
            Ok(p)
        } else {
            Err(InferenceError::NonFinite)
        }
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub(crate) fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable() -> (Vec<Vec<f64>>, Vec<bool>) {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..40 {
            let x = i as f64;
            rows.push(vec![x, 5.0]);
            labels.push(x >= 20.0);
        }
        (rows, labels)
    }

    #[test]
    fn learns_a_threshold() {
        let (rows, labels) = separable();
        let model = LogisticClassifier::fit(&rows, &labels, &FitParams::default()).unwrap();
        assert!(model.predict_proba(&[2.0, 5.0]).unwrap() < 0.2);
        assert!(model.predict_proba(&[38.0, 5.0]).unwrap() > 0.8);
        assert_eq!(model.n_features(), 2);
    }

    #[test]
    fn rejects_bad_inputs() {
        let params = FitParams::default();
        assert!(LogisticClassifier::fit(&[], &[], &params).is_none());
        assert!(LogisticClassifier::fit(&[vec![1.0], vec![1.0, 2.0]], &[true, false], &params)
            .is_none());
        assert!(LogisticClassifier::fit(&[vec![1.0]], &[true, false], &params).is_none());
        let zero_lr = FitParams {
            learning_rate: 0.0,
            ..params
        };
        assert!(LogisticClassifier::fit(&[vec![1.0]], &[true], &zero_lr).is_none());
    }

    #[test]
    fn wrong_width_is_an_inference_error() {
        let (rows, labels) = separable();
        let model = LogisticClassifier::fit(&rows, &labels, &FitParams::default()).unwrap();
        assert_eq!(
            model.predict_proba(&[1.0]),
            Err(InferenceError::FeatureCount {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn probabilities_stay_in_unit_interval_for_extreme_inputs() {
        let (rows, labels) = separable();
        let model = LogisticClassifier::fit(&rows, &labels, &FitParams::default()).unwrap();
        for x in [-1e12, -1.0, 0.0, 1e12] {
            let p = model.predict_proba(&[x, 5.0]).unwrap();
            assert!((0.0..=1.0).contains(&p));
        }
    }
}
