//! Prediction domains served by the application.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two risk domains a classifier can be trained for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Heart,
    Diabetes,
}

impl Domain {
    pub const ALL: [Domain; 2] = [Domain::Heart, Domain::Diabetes];

    /// Short machine name, also used in artifact metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Heart => "heart",
            Domain::Diabetes => "diabetes",
        }
    }

    /// Human readable condition name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Domain::Heart => "Heart Disease",
            Domain::Diabetes => "Diabetes",
        }
    }

    /// Path of the HTML input form for this domain.
    pub fn form_path(&self) -> &'static str {
        match self {
            Domain::Heart => "/heart_disease",
            Domain::Diabetes => "/diabetes",
        }
    }

    /// Path the input form posts to.
    pub fn predict_path(&self) -> &'static str {
        match self {
            Domain::Heart => "/predict_heart",
            Domain::Diabetes => "/predict_diabetes",
        }
    }

    pub fn artifact_file_name(&self) -> &'static str {
        match self {
            Domain::Heart => "heart_model.json",
            Domain::Diabetes => "diabetes_model.json",
        }
    }

    pub fn dataset_file_name(&self) -> &'static str {
        match self {
            Domain::Heart => "heart.csv",
            Domain::Diabetes => "diabetes.csv",
        }
    }

    /// Name of the 0/1 outcome column in a training table.
    pub fn target_column(&self) -> &'static str {
        match self {
            Domain::Heart => "target",
            Domain::Diabetes => "diabetes",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
