//! Scoring a validated feature vector against a loaded model.

use crate::error::InferenceError;
use crate::registry::ModelHandle;
use hrp_features::{Domain, FeatureVector};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    Risk,
    NoRisk,
}

impl RiskLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLabel::Risk => "risk",
            RiskLabel::NoRisk => "no risk",
        }
    }

    pub fn is_risk(self) -> bool {
        self == RiskLabel::Risk
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse banding of the positive-class probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskStratum {
    Low,
    Moderate,
    High,
}

impl RiskStratum {
    pub fn from_probability(p: f64) -> Self {
        if p >= 0.7 {
            RiskStratum::High
        } else if p >= 0.3 {
            RiskStratum::Moderate
        } else {
            RiskStratum::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskStratum::Low => "Low",
            RiskStratum::Moderate => "Moderate",
            RiskStratum::High => "High",
        }
    }
}

impl fmt::Display for RiskStratum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub domain: Domain,
    pub label: RiskLabel,
    /// Probability of the returned label, in `[0, 1]`.
    pub confidence: f64,
    /// Probability of the risk class.
    pub probability: f64,
    pub stratum: RiskStratum,
}

impl PredictionResult {
    /// Confidence as a percentage with one decimal, e.g. `87.3%`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}

pub fn predict(
    model: &ModelHandle,
    features: &FeatureVector,
) -> Result<PredictionResult, InferenceError> {
    let domain = model.domain();
    if features.domain() != domain {
        return Err(InferenceError::DomainMismatch {
            model: domain,
            features: features.domain(),
        });
    }

    let input = features.to_model_input();
    let p = model.classifier().predict_proba(&input)?;
    if !p.is_finite() {
        return Err(InferenceError::NonFinite);
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(InferenceError::Backend(format!("probability {p} outside [0, 1]")));
    }

    let label = if p >= model.threshold() {
        RiskLabel::Risk
    } else {
        RiskLabel::NoRisk
    };
    let confidence = if label.is_risk() { p } else { 1.0 - p };
    log::debug!("{domain} prediction: {label} (p={p:.4})");

    Ok(PredictionResult {
        domain,
        label,
        confidence,
        probability: p,
        stratum: RiskStratum::from_probability(p),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;
    use crate::metadata::ArtifactMetadata;
    use hrp_features::{DiabetesFeatures, Gender, HeartFeatures, SmokingHistory};
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct Fixed(f64);

    impl Classifier for Fixed {
        fn kind(&self) -> &str {
            "fixed"
        }
        fn n_features(&self) -> usize {
            13
        }
        fn predict_proba(&self, _: &[f64]) -> Result<f64, InferenceError> {
            Ok(self.0)
        }
    }

    fn handle(p: f64) -> ModelHandle {
        ModelHandle::new(ArtifactMetadata::new(Domain::Heart, "fixed"), Box::new(Fixed(p)))
    }

    fn heart() -> FeatureVector {
        HeartFeatures {
            age: 63,
            sex: 1,
            chest_pain_type: 3,
            resting_bp: 145,
            cholesterol: 233,
            fasting_bs: 1,
            resting_ecg: 0,
            max_hr: 150,
            exercise_angina: 0,
            oldpeak: 2.3,
            st_segment: 0,
            major_vessels: 0,
            thal: 1,
        }
        .into()
    }

    #[test]
    fn label_and_confidence_follow_threshold() {
        let r = predict(&handle(0.82), &heart()).unwrap();
        assert_eq!(r.label, RiskLabel::Risk);
        assert_eq!(r.confidence, 0.82);
        assert_eq!(r.stratum, RiskStratum::High);
        assert_eq!(r.confidence_percent(), "82.0%");

        let r = predict(&handle(0.2), &heart()).unwrap();
        assert_eq!(r.label, RiskLabel::NoRisk);
        assert!((r.confidence - 0.8).abs() < 1e-12);
        assert_eq!(r.stratum, RiskStratum::Low);

        let r = predict(&handle(0.5), &heart()).unwrap();
        assert_eq!(r.label, RiskLabel::Risk);
        assert_eq!(r.stratum, RiskStratum::Moderate);
    }

    #[test]
    fn non_finite_and_out_of_range_are_errors() {
        assert_eq!(
            predict(&handle(f64::NAN), &heart()),
            Err(InferenceError::NonFinite)
        );
        assert!(matches!(
            predict(&handle(1.5), &heart()),
            Err(InferenceError::Backend(_))
        ));
    }

    #[test]
    fn domain_mismatch_is_rejected() {
        let diabetes: FeatureVector = DiabetesFeatures {
            gender: Gender::Female,
            age: 44.0,
            hypertension: 0,
            heart_disease: 0,
            smoking_history: SmokingHistory::Never,
            bmi: 19.31,
            HbA1c_level: 6.5,
            blood_glucose_level: 200,
        }
        .into();
        assert_eq!(
            predict(&handle(0.4), &diabetes),
            Err(InferenceError::DomainMismatch {
                model: Domain::Heart,
                features: Domain::Diabetes,
            })
        );
    }

    #[test]
    fn strata_boundaries() {
        assert_eq!(RiskStratum::from_probability(0.0), RiskStratum::Low);
        assert_eq!(RiskStratum::from_probability(0.2999), RiskStratum::Low);
        assert_eq!(RiskStratum::from_probability(0.3), RiskStratum::Moderate);
        assert_eq!(RiskStratum::from_probability(0.6999), RiskStratum::Moderate);
        assert_eq!(RiskStratum::from_probability(0.7), RiskStratum::High);
        assert_eq!(RiskLabel::NoRisk.to_string(), "no risk");
    }
}
