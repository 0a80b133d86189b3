//! Feature normalizer: raw form tokens in, typed feature vectors out.
//!
//! Each schema field is looked up and coerced to its declared type. The
//! first failure, in schema order, is reported. Values are not range checked.

use crate::domain::Domain;
use crate::error::ValidationError;
use crate::schema::{schema_for, FieldKind, FieldSpec, Schema};
use crate::vector::{Categorical, DiabetesFeatures, FeatureVector, HeartFeatures};
use std::collections::HashMap;

/// Field name to raw submitted token, as decoded from a form body.
pub type RawForm = HashMap<String, String>;

/// Coerce a raw form into the typed feature vector for `domain`.
pub fn normalize(domain: Domain, form: &RawForm) -> Result<FeatureVector, ValidationError> {
    let reader = FieldReader::new(schema_for(domain), form);
    let result = match domain {
        Domain::Heart => read_heart(&reader).map(FeatureVector::from),
        Domain::Diabetes => read_diabetes(&reader).map(FeatureVector::from),
    };
    if let Err(e) = &result {
        log::debug!("{domain} form rejected: {e}");
    }
    result
}

fn read_heart(r: &FieldReader<'_>) -> Result<HeartFeatures, ValidationError> {
    Ok(HeartFeatures {
        age: r.int("age")?,
        sex: r.int("sex")?,
        chest_pain_type: r.int("chest_pain_type")?,
        resting_bp: r.int("resting_bp")?,
        cholesterol: r.int("cholesterol")?,
        fasting_bs: r.int("fasting_bs")?,
        resting_ecg: r.int("resting_ecg")?,
        max_hr: r.int("max_hr")?,
        exercise_angina: r.int("exercise_angina")?,
        oldpeak: r.float("oldpeak")?,
        st_segment: r.int("st_segment")?,
        major_vessels: r.int("major_vessels")?,
        thal: r.int("thal")?,
    })
}

fn read_diabetes(r: &FieldReader<'_>) -> Result<DiabetesFeatures, ValidationError> {
    Ok(DiabetesFeatures {
        gender: r.category("gender")?,
        age: r.float("age")?,
        hypertension: r.int("hypertension")?,
        heart_disease: r.int("heart_disease")?,
        smoking_history: r.category("smoking_history")?,
        bmi: r.float("bmi")?,
        HbA1c_level: r.float("HbA1c_level")?,
        blood_glucose_level: r.int("blood_glucose_level")?,
    })
}

struct FieldReader<'a> {
    schema: &'static Schema,
    form: &'a RawForm,
}

impl<'a> FieldReader<'a> {
    fn new(schema: &'static Schema, form: &'a RawForm) -> Self {
        Self { schema, form }
    }

    fn lookup(&self, name: &str) -> Result<(&'static FieldSpec, &'a str), ValidationError> {
        let spec = self
            .schema
            .field(name)
            .ok_or_else(|| ValidationError::missing(name))?;
        let raw = self
            .form
            .get(name)
            .ok_or_else(|| ValidationError::missing(name))?;
        Ok((spec, raw.as_str()))
    }

    fn int(&self, name: &str) -> Result<i64, ValidationError> {
        let (spec, raw) = self.lookup(name)?;
        debug_assert_eq!(spec.kind, FieldKind::Integer);
        parse_int(raw).ok_or_else(|| ValidationError::invalid(name, raw, spec.kind.describe()))
    }

    fn float(&self, name: &str) -> Result<f64, ValidationError> {
        let (spec, raw) = self.lookup(name)?;
        debug_assert_eq!(spec.kind, FieldKind::Float);
        parse_float(raw).ok_or_else(|| ValidationError::invalid(name, raw, spec.kind.describe()))
    }

    fn category<T: Categorical>(&self, name: &str) -> Result<T, ValidationError> {
        let (spec, raw) = self.lookup(name)?;
        debug_assert!(matches!(spec.kind, FieldKind::Categorical(_)));
        parse_category::<T>(raw).ok_or_else(|| {
            ValidationError::invalid(name, raw, format!("one of {}", T::VOCAB.join(", ")))
        })
    }
}

pub(crate) fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

pub(crate) fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub(crate) fn parse_category<T: Categorical>(raw: &str) -> Option<T> {
    let raw = raw.trim();
    T::VOCAB
        .iter()
        .position(|v| v.eq_ignore_ascii_case(raw))
        .and_then(T::from_code)
}
