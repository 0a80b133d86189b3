//! Declarative field schemas for each prediction domain.
//!
//! The order of `Schema::fields` is the order the classifier consumes
//! values in; forms, the normalizer and training tables all follow it.

use crate::domain::Domain;

/// Declared type of a single clinical measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Float,
    /// Fixed vocabulary; the code of a value is its index.
    Categorical(&'static [&'static str]),
}

impl FieldKind {
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Integer => "an integer",
            FieldKind::Float => "a number",
            FieldKind::Categorical(_) => "one of the listed options",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Form field name.
    pub name: &'static str,
    /// Label shown next to the input.
    pub label: &'static str,
    pub kind: FieldKind,
    /// Alternative column headers accepted in training tables.
    pub aliases: &'static [&'static str],
}

impl FieldSpec {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            aliases: &[],
        }
    }

    const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// True if `header` names this field, by name or alias.
    pub fn matches_header(&self, header: &str) -> bool {
        let header = header.trim();
        header == self.name || self.aliases.iter().any(|a| *a == header)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub domain: Domain,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }
}

pub const GENDER_VOCAB: &[&str] = &["Female", "Male", "Other"];

pub const SMOKING_HISTORY_VOCAB: &[&str] = &[
    "never",
    "No Info",
    "current",
    "former",
    "ever",
    "not current",
];

static HEART_FIELDS: [FieldSpec; 13] = [
    FieldSpec::new("age", "Age (years)", FieldKind::Integer),
    FieldSpec::new("sex", "Sex (1 = male, 0 = female)", FieldKind::Integer),
    FieldSpec::new("chest_pain_type", "Chest pain type (0-3)", FieldKind::Integer)
        .with_aliases(&["cp"]),
    FieldSpec::new("resting_bp", "Resting blood pressure (mm Hg)", FieldKind::Integer)
        .with_aliases(&["trestbps"]),
    FieldSpec::new("cholesterol", "Serum cholesterol (mg/dl)", FieldKind::Integer)
        .with_aliases(&["chol"]),
    FieldSpec::new(
        "fasting_bs",
        "Fasting blood sugar > 120 mg/dl (1 = yes, 0 = no)",
        FieldKind::Integer,
    )
    .with_aliases(&["fbs"]),
    FieldSpec::new("resting_ecg", "Resting ECG result (0-2)", FieldKind::Integer)
        .with_aliases(&["restecg"]),
    FieldSpec::new("max_hr", "Maximum heart rate achieved", FieldKind::Integer)
        .with_aliases(&["thalach"]),
    FieldSpec::new(
        "exercise_angina",
        "Exercise induced angina (1 = yes, 0 = no)",
        FieldKind::Integer,
    )
    .with_aliases(&["exang"]),
    FieldSpec::new("oldpeak", "ST depression induced by exercise", FieldKind::Float),
    FieldSpec::new("st_segment", "Slope of peak exercise ST segment (0-2)", FieldKind::Integer)
        .with_aliases(&["slope"]),
    FieldSpec::new(
        "major_vessels",
        "Major vessels colored by fluoroscopy (0-3)",
        FieldKind::Integer,
    )
    .with_aliases(&["ca"]),
    FieldSpec::new("thal", "Thalassemia (0-3)", FieldKind::Integer),
];

static DIABETES_FIELDS: [FieldSpec; 8] = [
    FieldSpec::new("gender", "Gender", FieldKind::Categorical(GENDER_VOCAB)),
    FieldSpec::new("age", "Age (years)", FieldKind::Float),
    FieldSpec::new("hypertension", "Hypertension (1 = yes, 0 = no)", FieldKind::Integer),
    FieldSpec::new("heart_disease", "Heart disease (1 = yes, 0 = no)", FieldKind::Integer),
    FieldSpec::new(
        "smoking_history",
        "Smoking history",
        FieldKind::Categorical(SMOKING_HISTORY_VOCAB),
    ),
    FieldSpec::new("bmi", "Body mass index", FieldKind::Float),
    FieldSpec::new("HbA1c_level", "HbA1c level (%)", FieldKind::Float),
    FieldSpec::new("blood_glucose_level", "Blood glucose level (mg/dl)", FieldKind::Integer),
];

pub static HEART_SCHEMA: Schema = Schema {
    domain: Domain::Heart,
    fields: &HEART_FIELDS,
};

pub static DIABETES_SCHEMA: Schema = Schema {
    domain: Domain::Diabetes,
    fields: &DIABETES_FIELDS,
};

pub fn schema_for(domain: Domain) -> &'static Schema {
    match domain {
        Domain::Heart => &HEART_SCHEMA,
        Domain::Diabetes => &DIABETES_SCHEMA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_sizes() {
        assert_eq!(HEART_SCHEMA.len(), 13);
        assert_eq!(DIABETES_SCHEMA.len(), 8);
        assert_eq!(schema_for(Domain::Diabetes).domain, Domain::Diabetes);
    }

    #[test]
    fn aliases_match_public_dataset_headers() {
        let cp = HEART_SCHEMA.field("chest_pain_type").unwrap();
        assert!(cp.matches_header("cp"));
        assert!(cp.matches_header(" chest_pain_type "));
        assert!(!cp.matches_header("chol"));
    }
}
