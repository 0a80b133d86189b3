mod common;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use common::{body_text, set_flashes, without, TestApp, DIABETES_SCENARIO, HEART_SCENARIO};
use hrp_features::Domain;
use hrp_model::{ArtifactMetadata, Classifier, InferenceError, ModelHandle};
use hrp_server::flash::{Flash, FlashCategory};
use pretty_assertions::assert_eq;

#[derive(Debug)]
struct Broken;

impl Classifier for Broken {
    fn kind(&self) -> &str {
        "broken"
    }
    fn n_features(&self) -> usize {
        13
    }
    fn predict_proba(&self, _: &[f64]) -> Result<f64, InferenceError> {
        Err(InferenceError::Backend("weights unavailable".into()))
    }
}

#[derive(Debug)]
struct Crashing;

impl Classifier for Crashing {
    fn kind(&self) -> &str {
        "crashing"
    }
    fn n_features(&self) -> usize {
        13
    }
    fn predict_proba(&self, _: &[f64]) -> Result<f64, InferenceError> {
        panic!("weights table out of bounds")
    }
}

fn confidence_in(html: &str) -> f64 {
    let start = html.find("class=\"confidence\">").expect("confidence span") + 19;
    let rest = &html[start..];
    rest[..rest.find('<').expect("closing tag")]
        .parse()
        .expect("numeric confidence")
}

#[tokio::test]
async fn heart_scenario_renders_a_result() {
    let app = TestApp::new();
    app.registry().retrain(Domain::Heart).unwrap();

    let resp = app.post_form("/predict_heart", HEART_SCENARIO).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(
        html.contains("<strong class=\"label\">risk</strong>")
            || html.contains("<strong class=\"label\">no risk</strong>"),
        "{html}"
    );
    let confidence = confidence_in(&html);
    assert!((0.0..=1.0).contains(&confidence));
    assert!(html.contains("Chest pain type"));
}

#[tokio::test]
async fn model_loads_lazily_from_disk_once() {
    let app = TestApp::new();
    {
        // A previous process left artifacts behind.
        let other = TestApp::new();
        other.registry().retrain(Domain::Diabetes).unwrap();
        let from = other.registry().store().path_for(Domain::Diabetes);
        let to = app.registry().store().path_for(Domain::Diabetes);
        std::fs::create_dir_all(to.parent().unwrap()).unwrap();
        std::fs::copy(from, to).unwrap();
    }
    assert!(!app.registry().is_loaded(Domain::Diabetes));

    for _ in 0..2 {
        let resp = app.post_form("/predict_diabetes", DIABETES_SCENARIO).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    assert_eq!(app.registry().load_count(Domain::Diabetes), 1);
    assert!(!app.registry().is_loaded(Domain::Heart));
}

#[tokio::test]
async fn missing_bmi_redirects_without_touching_the_registry() {
    let app = TestApp::new();
    let form = without(DIABETES_SCENARIO, "bmi");

    let resp = app.post_form("/predict_diabetes", &form).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers()[LOCATION], "/diabetes");
    assert_eq!(
        set_flashes(&resp),
        vec![Flash::error("Error making prediction: missing field 'bmi'")]
    );
    assert!(!app.registry().is_loaded(Domain::Diabetes));
    assert_eq!(app.registry().load_count(Domain::Diabetes), 0);
}

#[tokio::test]
async fn non_numeric_value_names_the_field() {
    let app = TestApp::new();
    let mut form = HEART_SCENARIO.to_vec();
    form[0] = ("age", "sixty");
    let resp = app.post_form("/predict_heart", &form).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers()[LOCATION], "/heart_disease");
    let flashes = set_flashes(&resp);
    assert_eq!(flashes.len(), 1);
    assert!(flashes[0].message.contains("'age'"), "{:?}", flashes);
}

#[tokio::test]
async fn oversized_value_still_fits_in_the_flash_cookie() {
    let app = TestApp::new();
    let huge = "x".repeat(5000);
    let mut form = HEART_SCENARIO.to_vec();
    form[0] = ("age", huge.as_str());

    let resp = app.post_form("/predict_heart", &form).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers()[LOCATION], "/heart_disease");
    let cookie = resp.headers()[SET_COOKIE].to_str().unwrap().len();
    assert!(cookie <= 4096, "set-cookie is {cookie} bytes");

    let flashes = set_flashes(&resp);
    assert_eq!(flashes.len(), 1);
    assert_eq!(flashes[0].category, FlashCategory::Error);
    assert!(flashes[0].message.contains("'age'"), "{flashes:?}");
    assert!(flashes[0].message.contains('…'), "{flashes:?}");
}

#[tokio::test]
async fn untrained_model_is_flashed() {
    let app = TestApp::new();
    let resp = app.post_form("/predict_heart", HEART_SCENARIO).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    let flashes = set_flashes(&resp);
    assert_eq!(flashes[0].category, FlashCategory::Error);
    assert!(flashes[0]
        .message
        .starts_with("Error making prediction: no heart model found"));
}

#[tokio::test]
async fn inference_failure_is_flashed() {
    let app = TestApp::new();
    app.registry().publish(ModelHandle::new(
        ArtifactMetadata::new(Domain::Heart, "broken"),
        Box::new(Broken),
    ));

    let resp = app.post_form("/predict_heart", HEART_SCENARIO).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers()[LOCATION], "/heart_disease");
    assert_eq!(
        set_flashes(&resp),
        vec![Flash::error(
            "Error making prediction: classifier failure: weights unavailable"
        )]
    );
}

#[tokio::test]
async fn classifier_panic_is_flashed_without_internals() {
    let app = TestApp::new();
    app.registry().publish(ModelHandle::new(
        ArtifactMetadata::new(Domain::Heart, "crashing"),
        Box::new(Crashing),
    ));

    let resp = app.post_form("/predict_heart", HEART_SCENARIO).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers()[LOCATION], "/heart_disease");
    assert_eq!(
        set_flashes(&resp),
        vec![Flash::error(
            "Error making prediction: the request could not be completed"
        )]
    );

    // The server keeps serving afterwards.
    assert_eq!(app.get("/healthz").await.status(), StatusCode::OK);
    assert!(app.registry().is_loaded(Domain::Heart));
}

#[tokio::test]
async fn unreadable_body_is_an_empty_form() {
    let app = TestApp::new();
    let resp = app
        .send(
            Request::post("/predict_heart")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        set_flashes(&resp),
        vec![Flash::error("Error making prediction: missing field 'age'")]
    );
}

#[tokio::test]
async fn flash_is_shown_once_then_cleared() {
    let app = TestApp::new();
    let resp = app
        .get_with_flashes("/diabetes", &[Flash::error("Error making prediction: <oops>")])
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = resp.headers()[SET_COOKIE].to_str().unwrap().to_owned();
    assert!(cleared.starts_with("hrp_flash=;"));
    assert!(cleared.contains("Max-Age=0"));
    let html = body_text(resp).await;
    assert!(html.contains("Error making prediction: &lt;oops&gt;"));

    let resp = app.get("/diabetes").await;
    assert!(resp.headers().get(SET_COOKIE).is_none());
}
