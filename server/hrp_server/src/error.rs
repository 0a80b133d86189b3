use hrp_features::ValidationError;
use hrp_model::{InferenceError, ModelLoadError, TrainingError};
use thiserror::Error;

/// Any failure a request handler turns into a flash message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    ModelLoad(#[from] ModelLoadError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error(transparent)]
    Training(#[from] TrainingError),
    #[error("the request could not be completed")]
    Worker(#[from] tokio::task::JoinError),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::ModelLoad(_) => "model_load",
            AppError::Inference(_) => "inference",
            AppError::Training(_) => "training",
            AppError::Worker(_) => "worker",
        }
    }
}
