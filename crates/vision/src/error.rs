use std::path::PathBuf;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Model inference failed: {0}")]
    Model(#[source] BoxError),

    #[error("Model predicted class {index} but the label map has {classes} labels")]
    UnknownClass { index: usize, classes: usize },

    #[error("Label for class {index} is empty")]
    EmptyLabel { index: usize },
}

impl PredictionError {
    pub fn model(err: impl Into<BoxError>) -> Self {
        PredictionError::Model(err.into())
    }
}

#[derive(Debug, Error)]
pub enum LabelMapError {
    #[error("Failed to read label map {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Label map is not a JSON array of strings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Label map contains no labels")]
    Empty,
}
