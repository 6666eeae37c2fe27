use recipebook_common::CommonError;
use recipebook_widgets::WidgetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] CommonError),

    #[error("Message queue error: {0}")]
    Messages(#[from] WidgetError),
}

pub type ApiResult<T> = Result<T, ApiError>;
