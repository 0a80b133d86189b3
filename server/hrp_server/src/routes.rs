//! Request handlers.
//!
//! Prediction: form -> normalize -> registry -> predict -> result page, with
//! any failure flashed and redirected back to the form. Normalization runs
//! before the registry is touched, so an invalid form never loads a model.

use crate::error::AppError;
use crate::flash::{self, Flash};
use crate::state::AppState;
use crate::views;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::SecondsFormat;
use hrp_features::{normalize, Domain, FeatureVector, RawForm};
use hrp_model::{predict, ModelRegistry, PredictionResult, TrainingSummary};
use serde_json::json;
use std::sync::Arc;

/// Render an HTML page, consuming any pending flash messages.
fn page(headers: &HeaderMap, build: impl FnOnce(&[Flash]) -> String) -> Response {
    let flashes = flash::pending(headers);
    let mut response = Html(build(&flashes)).into_response();
    if flash::has_pending(headers) {
        response
            .headers_mut()
            .insert(SET_COOKIE, flash::clear_cookie());
    }
    response
}

pub async fn index(headers: HeaderMap) -> Response {
    page(&headers, views::index)
}

pub async fn about(headers: HeaderMap) -> Response {
    page(&headers, views::about)
}

pub async fn heart_form(headers: HeaderMap) -> Response {
    page(&headers, |f| views::form(Domain::Heart, f))
}

pub async fn diabetes_form(headers: HeaderMap) -> Response {
    page(&headers, |f| views::form(Domain::Diabetes, f))
}

pub async fn healthz() -> &'static str {
    "OK"
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": "Health Risk Predictor app is running",
        "timestamp": chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    }))
}

pub async fn status() -> Json<serde_json::Value> {
    Json(json!({
        "app": views::APP_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "home": "/",
            "heart_disease": Domain::Heart.form_path(),
            "diabetes": Domain::Diabetes.form_path(),
            "health": "/health",
            "healthz": "/healthz",
            "about": "/about",
        },
    }))
}

pub async fn predict_heart(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<RawForm>, FormRejection>,
) -> Response {
    predict_for(Domain::Heart, state, headers, form).await
}

pub async fn predict_diabetes(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<RawForm>, FormRejection>,
) -> Response {
    predict_for(Domain::Diabetes, state, headers, form).await
}

async fn predict_for(
    domain: Domain,
    state: AppState,
    headers: HeaderMap,
    form: Result<Form<RawForm>, FormRejection>,
) -> Response {
    let raw = match form {
        Ok(Form(raw)) => raw,
        Err(rejection) => {
            log::debug!("{}: unreadable form body: {rejection}", domain.predict_path());
            RawForm::new()
        }
    };

    let registry = Arc::clone(&state.registry);
    let outcome = tokio::task::spawn_blocking(move || run_prediction(&registry, domain, &raw))
        .await
        .unwrap_or_else(|e| {
            log::error!("{} worker failed: {e}", domain.predict_path());
            Err(AppError::from(e))
        });

    match outcome {
        Ok((features, result)) => page(&headers, |f| views::result(&features, &result, f)),
        Err(e) => {
            log::warn!("{} failed ({}): {e}", domain.predict_path(), e.kind());
            flash::redirect_with(
                &headers,
                domain.form_path(),
                vec![Flash::error(format!("Error making prediction: {e}"))],
            )
        }
    }
}

fn run_prediction(
    registry: &ModelRegistry,
    domain: Domain,
    raw: &RawForm,
) -> Result<(FeatureVector, PredictionResult), AppError> {
    let features = normalize(domain, raw)?;
    let model = registry.get(domain)?;
    let result = predict(&model, &features)?;
    Ok((features, result))
}

pub async fn train_models(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut flashes = vec![Flash::info("Training models... This may take a few minutes.")];

    let registry = Arc::clone(&state.registry);
    let outcome: Result<TrainingSummary, AppError> =
        match tokio::task::spawn_blocking(move || registry.retrain_all()).await {
            Ok(result) => result.map_err(AppError::from),
            Err(e) => {
                log::error!("/train_models worker failed: {e}");
                Err(AppError::from(e))
            }
        };

    match outcome {
        Ok(summary) => flashes.push(Flash::success(format!(
            "Models trained successfully! Heart Disease Accuracy: {:.3}, Diabetes Accuracy: {:.3}",
            summary.heart.accuracy(),
            summary.diabetes.accuracy()
        ))),
        Err(e) => {
            log::error!("/train_models failed ({}): {e}", e.kind());
            flashes.push(Flash::error(format!("Error training models: {e}")));
        }
    }
    flash::redirect_with(&headers, "/", flashes)
}

pub async fn not_found(uri: Uri) -> Response {
    (StatusCode::NOT_FOUND, Html(views::not_found(uri.path()))).into_response()
}
