//! Deterministic synthetic cohorts, used when no training table is on disk.
//!
//! Rows are drawn from plausible clinical ranges and labelled by sampling a
//! logistic risk model, so a fitted classifier has a real signal to find.

use crate::classifier::sigmoid;
use crate::dataset::{DataSource, Dataset};
use hrp_features::{
    Categorical, DiabetesFeatures, Domain, FeatureVector, Gender, HeartFeatures, SmokingHistory,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn cohort(domain: Domain, rows: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut features = Vec::with_capacity(rows);
    let mut labels = Vec::with_capacity(rows);
    for _ in 0..rows {
        let (fv, logit) = match domain {
            Domain::Heart => heart_row(&mut rng),
            Domain::Diabetes => diabetes_row(&mut rng),
        };
        features.push(fv.to_model_input());
        labels.push(rng.gen::<f64>() < sigmoid(logit));
    }
    Dataset {
        domain,
        rows: features,
        labels,
        source: DataSource::Synthetic { rows, seed },
        skipped: 0,
    }
}

fn heart_row(rng: &mut StdRng) -> (FeatureVector, f64) {
    let h = HeartFeatures {
        age: rng.gen_range(29..=77),
        sex: rng.gen_bool(0.68) as i64,
        chest_pain_type: rng.gen_range(0..=3),
        resting_bp: rng.gen_range(94..=200),
        cholesterol: rng.gen_range(126..=420),
        fasting_bs: rng.gen_bool(0.15) as i64,
        resting_ecg: rng.gen_range(0..=2),
        max_hr: rng.gen_range(71..=202),
        exercise_angina: rng.gen_bool(0.33) as i64,
        oldpeak: (rng.gen_range(0.0..6.2_f64) * 10.0).round() / 10.0,
        st_segment: rng.gen_range(0..=2),
        major_vessels: rng.gen_range(0..=3),
        thal: rng.gen_range(0..=3),
    };
    let logit = 0.06 * (h.age - 54) as f64
        + 0.9 * (h.sex as f64 - 0.5)
        + 0.7 * (h.chest_pain_type as f64 - 1.5)
        + 0.02 * (h.resting_bp - 130) as f64
        + 0.006 * (h.cholesterol - 250) as f64
        + 0.3 * h.fasting_bs as f64
        - 0.035 * (h.max_hr - 150) as f64
        + 1.0 * h.exercise_angina as f64
        + 0.7 * (h.oldpeak - 1.5)
        + 0.8 * (h.major_vessels as f64 - 1.0)
        + 0.5 * (h.thal as f64 - 1.5)
        - 2.5;
    (h.into(), logit)
}

fn diabetes_row(rng: &mut StdRng) -> (FeatureVector, f64) {
    let gender = if rng.gen_bool(0.58) {
        Gender::Female
    } else if rng.gen_bool(0.995) {
        Gender::Male
    } else {
        Gender::Other
    };
    let smoking = SmokingHistory::from_code(rng.gen_range(0..SmokingHistory::VOCAB.len()))
        .unwrap_or(SmokingHistory::NoInfo);
    let age = rng.gen_range(1..=80) as f64;
    let d = DiabetesFeatures {
        gender,
        age,
        hypertension: rng.gen_bool(0.03 + age / 500.0) as i64,
        heart_disease: rng.gen_bool(0.01 + age / 1000.0) as i64,
        smoking_history: smoking,
        bmi: (rng.gen_range(15.0..45.0_f64) * 100.0).round() / 100.0,
        HbA1c_level: (rng.gen_range(3.5..9.0_f64) * 10.0).round() / 10.0,
        blood_glucose_level: rng.gen_range(80..=300),
    };
    let smoking_boost = match d.smoking_history {
        SmokingHistory::Current => 0.3,
        _ => 0.0,
    };
    let logit = 0.035 * (d.age - 45.0)
        + 0.7 * d.hypertension as f64
        + 0.7 * d.heart_disease as f64
        + 0.08 * (d.bmi - 28.0)
        + 1.6 * (d.HbA1c_level - 6.2)
        + 0.025 * (d.blood_glucose_level - 170) as f64
        + smoking_boost
        - 0.8;
    (d.into(), logit)
}
