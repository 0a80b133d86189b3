//! HTTP front end for the Health Risk Predictor.

pub mod config;
pub mod error;
pub mod flash;
pub mod routes;
pub mod state;
pub mod views;

use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;

pub use config::ServerConfig;
pub use error::AppError;
pub use state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/healthz", get(routes::healthz))
        .route("/health", get(routes::health))
        .route("/status", get(routes::status))
        .route("/heart_disease", get(routes::heart_form))
        .route("/diabetes", get(routes::diabetes_form))
        .route("/predict_heart", post(routes::predict_heart))
        .route("/predict_diabetes", post(routes::predict_diabetes))
        .route("/train_models", get(routes::train_models))
        .route("/about", get(routes::about))
        .fallback(routes::not_found)
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
