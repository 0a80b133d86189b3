use hrp_features::{DiabetesFeatures, Domain, FeatureVector, Gender, HeartFeatures, SmokingHistory};
use hrp_model::{predict, synthetic, train, ModelHandle, RiskLabel, TrainingConfig};
use proptest::prelude::*;
use std::sync::OnceLock;

fn model(domain: Domain) -> &'static ModelHandle {
    static HEART: OnceLock<ModelHandle> = OnceLock::new();
    static DIABETES: OnceLock<ModelHandle> = OnceLock::new();
    let cell = match domain {
        Domain::Heart => &HEART,
        Domain::Diabetes => &DIABETES,
    };
    cell.get_or_init(|| {
        let config = TrainingConfig::default();
        let cohort = synthetic::cohort(domain, 400, config.seed);
        train(&cohort, &config).expect("train").artifact.into_handle()
    })
}

fn heart_features() -> impl Strategy<Value = FeatureVector> {
    (
        (any::<i64>(), 0i64..=1, -5i64..10, 0i64..400, 0i64..900, 0i64..=1),
        (0i64..=2, 0i64..250, 0i64..=1, -10.0f64..20.0, 0i64..=2, 0i64..=4, 0i64..=3),
    )
        .prop_map(
            |(
                (age, sex, chest_pain_type, resting_bp, cholesterol, fasting_bs),
                (resting_ecg, max_hr, exercise_angina, oldpeak, st_segment, major_vessels, thal),
            )| {
                HeartFeatures {
                    age,
                    sex,
                    chest_pain_type,
                    resting_bp,
                    cholesterol,
                    fasting_bs,
                    resting_ecg,
                    max_hr,
                    exercise_angina,
                    oldpeak,
                    st_segment,
                    major_vessels,
                    thal,
                }
                .into()
            },
        )
}

fn diabetes_features() -> impl Strategy<Value = FeatureVector> {
    (
        prop_oneof![Just(Gender::Female), Just(Gender::Male), Just(Gender::Other)],
        -1.0e3f64..1.0e3,
        0i64..=1,
        0i64..=1,
        prop_oneof![
            Just(SmokingHistory::Never),
            Just(SmokingHistory::NoInfo),
            Just(SmokingHistory::Current),
            Just(SmokingHistory::NotCurrent),
        ],
        0.0f64..100.0,
        0.0f64..20.0,
        any::<i64>(),
    )
        .prop_map(
            |(gender, age, hypertension, heart_disease, smoking_history, bmi, hba1c, glucose)| {
                DiabetesFeatures {
                    gender,
                    age,
                    hypertension,
                    heart_disease,
                    smoking_history,
                    bmi,
                    HbA1c_level: hba1c,
                    blood_glucose_level: glucose,
                }
                .into()
            },
        )
}

fn check(domain: Domain, fv: &FeatureVector) -> Result<(), TestCaseError> {
    let result = predict(model(domain), fv).map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert!((0.0..=1.0).contains(&result.probability));
    prop_assert!((0.5..=1.0).contains(&result.confidence));
    let expected = if result.probability >= 0.5 {
        RiskLabel::Risk
    } else {
        RiskLabel::NoRisk
    };
    prop_assert_eq!(result.label, expected);
    Ok(())
}

proptest! {
    #[test]
    fn heart_predictions_are_probabilities(fv in heart_features()) {
        check(Domain::Heart, &fv)?;
    }

    #[test]
    fn diabetes_predictions_are_probabilities(fv in diabetes_features()) {
        check(Domain::Diabetes, &fv)?;
    }
}
