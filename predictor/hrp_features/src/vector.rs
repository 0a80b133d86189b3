//! Typed feature vectors for the two prediction domains.

use crate::domain::Domain;
use crate::schema::{GENDER_VOCAB, SMOKING_HISTORY_VOCAB};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single coerced form value.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
    Category { code: usize, label: &'static str },
}

impl FeatureValue {
    /// Numeric encoding handed to the classifier.
    pub fn as_f64(&self) -> f64 {
        match self {
            FeatureValue::Int(v) => *v as f64,
            FeatureValue::Float(v) => *v,
            FeatureValue::Category { code, .. } => *code as f64,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Int(v) => write!(f, "{v}"),
            FeatureValue::Float(v) => write!(f, "{v}"),
            FeatureValue::Category { label, .. } => f.write_str(label),
        }
    }
}

/// A value drawn from a fixed vocabulary, encoded by its index.
pub trait Categorical: Sized + Copy {
    const VOCAB: &'static [&'static str];

    fn from_code(code: usize) -> Option<Self>;

    fn code(&self) -> usize;

    fn label(&self) -> &'static str {
        Self::VOCAB[self.code()]
    }

    fn to_value(&self) -> FeatureValue {
        FeatureValue::Category {
            code: self.code(),
            label: self.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Categorical for Gender {
    const VOCAB: &'static [&'static str] = GENDER_VOCAB;

    fn from_code(code: usize) -> Option<Self> {
        match code {
            0 => Some(Gender::Female),
            1 => Some(Gender::Male),
            2 => Some(Gender::Other),
            _ => None,
        }
    }

    fn code(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmokingHistory {
    Never,
    NoInfo,
    Current,
    Former,
    Ever,
    NotCurrent,
}

impl Categorical for SmokingHistory {
    const VOCAB: &'static [&'static str] = SMOKING_HISTORY_VOCAB;

    fn from_code(code: usize) -> Option<Self> {
        match code {
            0 => Some(SmokingHistory::Never),
            1 => Some(SmokingHistory::NoInfo),
            2 => Some(SmokingHistory::Current),
            3 => Some(SmokingHistory::Former),
            4 => Some(SmokingHistory::Ever),
            5 => Some(SmokingHistory::NotCurrent),
            _ => None,
        }
    }

    fn code(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartFeatures {
    pub age: i64,
    pub sex: i64,
    pub chest_pain_type: i64,
    pub resting_bp: i64,
    pub cholesterol: i64,
    pub fasting_bs: i64,
    pub resting_ecg: i64,
    pub max_hr: i64,
    pub exercise_angina: i64,
    pub oldpeak: f64,
    pub st_segment: i64,
    pub major_vessels: i64,
    pub thal: i64,
}

impl HeartFeatures {
    pub fn entries(&self) -> Vec<(&'static str, FeatureValue)> {
        use FeatureValue::{Float, Int};
        vec![
            ("age", Int(self.age)),
            ("sex", Int(self.sex)),
            ("chest_pain_type", Int(self.chest_pain_type)),
            ("resting_bp", Int(self.resting_bp)),
            ("cholesterol", Int(self.cholesterol)),
            ("fasting_bs", Int(self.fasting_bs)),
            ("resting_ecg", Int(self.resting_ecg)),
            ("max_hr", Int(self.max_hr)),
            ("exercise_angina", Int(self.exercise_angina)),
            ("oldpeak", Float(self.oldpeak)),
            ("st_segment", Int(self.st_segment)),
            ("major_vessels", Int(self.major_vessels)),
            ("thal", Int(self.thal)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct DiabetesFeatures {
    pub gender: Gender,
    pub age: f64,
    pub hypertension: i64,
    pub heart_disease: i64,
    pub smoking_history: SmokingHistory,
    pub bmi: f64,
    pub HbA1c_level: f64,
    pub blood_glucose_level: i64,
}

impl DiabetesFeatures {
    pub fn entries(&self) -> Vec<(&'static str, FeatureValue)> {
        use FeatureValue::{Float, Int};
        vec![
            ("gender", self.gender.to_value()),
            ("age", Float(self.age)),
            ("hypertension", Int(self.hypertension)),
            ("heart_disease", Int(self.heart_disease)),
            ("smoking_history", self.smoking_history.to_value()),
            ("bmi", Float(self.bmi)),
            ("HbA1c_level", Float(self.HbA1c_level)),
            ("blood_glucose_level", Int(self.blood_glucose_level)),
        ]
    }
}

/// A fully typed input row, tagged by domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureVector {
    Heart(HeartFeatures),
    Diabetes(DiabetesFeatures),
}

impl FeatureVector {
    pub fn domain(&self) -> Domain {
        match self {
            FeatureVector::Heart(_) => Domain::Heart,
            FeatureVector::Diabetes(_) => Domain::Diabetes,
        }
    }

    /// Ordered `(field, value)` pairs, in schema order.
    pub fn entries(&self) -> Vec<(&'static str, FeatureValue)> {
        match self {
            FeatureVector::Heart(h) => h.entries(),
            FeatureVector::Diabetes(d) => d.entries(),
        }
    }

    /// Numeric row in the order the classifier expects.
    pub fn to_model_input(&self) -> Vec<f64> {
        self.entries().iter().map(|(_, v)| v.as_f64()).collect()
    }
}

impl From<HeartFeatures> for FeatureVector {
    fn from(value: HeartFeatures) -> Self {
        FeatureVector::Heart(value)
    }
}

impl From<DiabetesFeatures> for FeatureVector {
    fn from(value: DiabetesFeatures) -> Self {
        FeatureVector::Diabetes(value)
    }
}
