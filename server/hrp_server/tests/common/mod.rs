#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, Response};
use axum::Router;
use hrp_model::{ArtifactStore, DatasetLocator, ModelRegistry, TrainingConfig};
use hrp_server::flash::{self, Flash, FLASH_COOKIE};
use hrp_server::{router, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

pub const HEART_SCENARIO: &[(&str, &str)] = &[
    ("age", "63"),
    ("sex", "1"),
    ("chest_pain_type", "3"),
    ("resting_bp", "145"),
    ("cholesterol", "233"),
    ("fasting_bs", "1"),
    ("resting_ecg", "0"),
    ("max_hr", "150"),
    ("exercise_angina", "0"),
    ("oldpeak", "2.3"),
    ("st_segment", "0"),
    ("major_vessels", "0"),
    ("thal", "1"),
];

pub const DIABETES_SCENARIO: &[(&str, &str)] = &[
    ("gender", "Female"),
    ("age", "44"),
    ("hypertension", "0"),
    ("heart_disease", "0"),
    ("smoking_history", "No Info"),
    ("bmi", "19.31"),
    ("HbA1c_level", "6.5"),
    ("blood_glucose_level", "200"),
];

pub struct TestApp {
    pub dir: TempDir,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().expect("tmpdir");
        let registry = ModelRegistry::new(
            ArtifactStore::new(dir.path().join("models")),
            DatasetLocator::new(dir.path().join("data"), true),
            TrainingConfig {
                heart_synthetic_rows: 300,
                diabetes_synthetic_rows: 400,
                ..TrainingConfig::default()
            },
        );
        Self {
            dir,
            state: AppState::new(registry),
        }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.state.registry
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router().oneshot(request).await.expect("infallible")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).expect("request"))
            .await
    }

    pub async fn get_with_flashes(&self, uri: &str, flashes: &[Flash]) -> Response<Body> {
        let cookie = format!("{FLASH_COOKIE}={}", flash::encode(flashes));
        self.send(
            Request::get(uri)
                .header(COOKIE, cookie)
                .body(Body::empty())
                .expect("request"),
        )
        .await
    }

    pub async fn post_form(&self, uri: &str, pairs: &[(&str, &str)]) -> Response<Body> {
        self.send(
            Request::post(uri)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form_body(pairs)))
                .expect("request"),
        )
        .await
    }
}

pub fn form_body(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(raw: &str) -> String {
    let mut out = String::new();
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' => out.push(b as char),
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

pub fn without(
    pairs: &[(&'static str, &'static str)],
    field: &str,
) -> Vec<(&'static str, &'static str)> {
    pairs.iter().copied().filter(|(k, _)| *k != field).collect()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Flash messages a response sets in its cookie.
pub fn set_flashes(response: &Response<Body>) -> Vec<Flash> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(&format!("{FLASH_COOKIE}=")).map(str::to_owned))
        .and_then(|rest| rest.split(';').next().map(str::to_owned))
        .map(|value| flash::decode(&value))
        .unwrap_or_default()
}
