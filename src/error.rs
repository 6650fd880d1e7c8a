use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use pantrypal_recipe::RecipeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("No usable ingredients in request")]
    NoUsableInput,

    #[error("Invalid image upload: {0}")]
    InvalidImage(String),

    #[error("Recipe dataset error: {0}")]
    DatasetError(#[from] RecipeError),

    #[error("Internal server error")]
    InternalError(String),
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

/// JSON error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn new(error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::ValidationError(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new("ValidationError", msg),
            ),
            AppError::NoUsableInput => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new(
                    "NoUsableInput",
                    "None of the ingredients could be recognized. Try names like \"chicken\" or \"tomatoes\".",
                ),
            ),
            AppError::InvalidImage(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("InvalidImage", msg),
            ),
            AppError::DatasetError(RecipeError::DatasetNotFound { tried }) => {
                tracing::error!(?tried, "Recipe dataset not found");
                let mut body =
                    ErrorResponse::new("DatasetUnavailable", "The recipe dataset is not available.");
                body.details = Some(serde_json::json!({
                    "tried": tried.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
                }));
                (StatusCode::SERVICE_UNAVAILABLE, body)
            }
            AppError::DatasetError(e) => {
                tracing::error!("Recipe dataset error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("DatasetError", "The recipe dataset could not be read."),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "InternalServerError",
                        "An unexpected error occurred. Please try again later.",
                    ),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
