//! Clinical feature schemas and the form normalizer for the Health Risk Predictor.
//!
//! A submitted HTML form arrives as untyped `name -> token` pairs. The
//! normalizer turns it into a [`FeatureVector`] whose values are typed and
//! ordered the way the trained classifier expects:
//!
//! ```
//! use hrp_features::{normalize, Domain, RawForm};
//! let mut form = RawForm::new();
//! for (k, v) in [
//!     ("gender", "Female"), ("age", "44"), ("hypertension", "0"),
//!     ("heart_disease", "0"), ("smoking_history", "never"), ("bmi", "19.3"),
//!     ("HbA1c_level", "6.5"), ("blood_glucose_level", "200"),
//! ] {
//!     form.insert(k.into(), v.into());
//! }
//! let features = normalize(Domain::Diabetes, &form).unwrap();
//! assert_eq!(features.to_model_input().len(), 8);
//! ```

pub mod domain;
pub mod error;
pub mod normalize;
pub mod schema;
pub mod vector;

pub use domain::Domain;
pub use error::ValidationError;
pub use normalize::{normalize, RawForm};
pub use schema::{schema_for, FieldKind, FieldSpec, Schema, DIABETES_SCHEMA, HEART_SCHEMA};
pub use vector::{
    Categorical, DiabetesFeatures, FeatureValue, FeatureVector, Gender, HeartFeatures,
    SmokingHistory,
};
