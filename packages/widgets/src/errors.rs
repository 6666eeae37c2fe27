use recipebook_common::CommonError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Element not found: {0}")]
    MissingElement(String),

    #[error("Event binding failed: {0}")]
    Binding(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Storage error: {0}")]
    Storage(#[from] CommonError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
