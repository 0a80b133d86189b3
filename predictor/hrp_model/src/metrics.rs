//! Hold-out evaluation metrics for binary classifiers.

use serde::{Deserialize, Serialize};

pub trait ValidationMetric {
    fn name(&self) -> &str;
    fn compute(&self, predictions: &[f64], labels: &[bool]) -> f64;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Confusion {
    tp: u64,
    fp: u64,
    tn: u64,
    fn_: u64,
}

impl Confusion {
    fn tally(predictions: &[f64], labels: &[bool], threshold: f64) -> Self {
        let mut c = Confusion::default();
        for (&p, &y) in predictions.iter().zip(labels) {
            match (p >= threshold, y) {
                (true, true) => c.tp += 1,
                (true, false) => c.fp += 1,
                (false, true) => c.fn_ += 1,
                (false, false) => c.tn += 1,
            }
        }
        c
    }

    fn total(&self) -> u64 {
        self.tp + self.fp + self.tn + self.fn_
    }
}

fn ratio(num: u64, denom: u64) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

pub struct Accuracy {
    pub threshold: f64,
}

impl ValidationMetric for Accuracy {
    fn name(&self) -> &str {
        "accuracy"
    }
    fn compute(&self, predictions: &[f64], labels: &[bool]) -> f64 {
        let c = Confusion::tally(predictions, labels, self.threshold);
        ratio(c.tp + c.tn, c.total())
    }
}

pub struct Precision {
    pub threshold: f64,
}

impl ValidationMetric for Precision {
    fn name(&self) -> &str {
        "precision"
    }
    fn compute(&self, predictions: &[f64], labels: &[bool]) -> f64 {
        let c = Confusion::tally(predictions, labels, self.threshold);
        ratio(c.tp, c.tp + c.fp)
    }
}

pub struct Recall {
    pub threshold: f64,
}

impl ValidationMetric for Recall {
    fn name(&self) -> &str {
        "recall"
    }
    fn compute(&self, predictions: &[f64], labels: &[bool]) -> f64 {
        let c = Confusion::tally(predictions, labels, self.threshold);
        ratio(c.tp, c.tp + c.fn_)
    }
}

pub struct F1 {
    pub threshold: f64,
}

impl ValidationMetric for F1 {
    fn name(&self) -> &str {
        "f1"
    }
    fn compute(&self, predictions: &[f64], labels: &[bool]) -> f64 {
        let t = self.threshold;
        let p = Precision { threshold: t }.compute(predictions, labels);
        let r = Recall { threshold: t }.compute(predictions, labels);
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

/// Rank-based ROC-AUC with average ranks for ties.
pub struct RocAuc;

impl ValidationMetric for RocAuc {
    fn name(&self) -> &str {
        "roc_auc"
    }
    fn compute(&self, predictions: &[f64], labels: &[bool]) -> f64 {
        let n = predictions.len().min(labels.len());
        let positives = labels[..n].iter().filter(|&&y| y).count();
        let negatives = n - positives;
        if positives == 0 || negatives == 0 {
            return 0.5;
        }

        let mut items: Vec<(f64, bool)> = predictions[..n]
            .iter()
            .copied()
            .zip(labels[..n].iter().copied())
            .collect();
        items.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut pos_rank_sum = 0.0;
        let mut i = 0;
        while i < n {
            let mut j = i + 1;
            while j < n && items[j].0 == items[i].0 {
                j += 1;
            }
            let avg_rank = (i + 1 + j) as f64 / 2.0;
            pos_rank_sum += avg_rank * items[i..j].iter().filter(|(_, y)| *y).count() as f64;
            i = j;
        }

        let p = positives as f64;
        (pos_rank_sum - p * (p + 1.0) / 2.0) / (p * negatives as f64)
    }
}

/// Metrics recorded for a trained model on its hold-out split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub roc_auc: f64,
}

impl EvaluationMetrics {
    pub fn evaluate(predictions: &[f64], labels: &[bool], threshold: f64) -> Self {
        Self {
            accuracy: Accuracy { threshold }.compute(predictions, labels),
            precision: Precision { threshold }.compute(predictions, labels),
            recall: Recall { threshold }.compute(predictions, labels),
            f1: F1 { threshold }.compute(predictions, labels),
            roc_auc: RocAuc.compute(predictions, labels),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn threshold_metrics() {
        let preds = [0.1, 0.4, 0.6, 0.9, 0.7];
        let labels = [false, true, true, true, false];
        let m = EvaluationMetrics::evaluate(&preds, &labels, 0.5);
        assert_abs_diff_eq!(m.accuracy, 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(m.precision, 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.recall, 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.f1, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn auc_perfect_and_tied() {
        assert_abs_diff_eq!(
            RocAuc.compute(&[0.1, 0.2, 0.8, 0.9], &[false, false, true, true]),
            1.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            RocAuc.compute(&[0.5, 0.5, 0.5, 0.5], &[false, true, false, true]),
            0.5,
            epsilon = 1e-12
        );
        assert_eq!(RocAuc.compute(&[0.3], &[true]), 0.5);
    }

    #[test]
    fn empty_inputs_do_not_divide_by_zero() {
        let m = EvaluationMetrics::evaluate(&[], &[], 0.5);
        assert_eq!(m.accuracy, 0.0);
        assert_eq!(m.f1, 0.0);
        assert_eq!(Accuracy { threshold: 0.5 }.name(), "accuracy");
    }
}
