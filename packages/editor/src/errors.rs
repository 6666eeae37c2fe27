//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Element not found: {0}")]
    MissingElement(String),

    #[error("Missing attribute: {0}")]
    MissingAttribute(&'static str),

    #[error("Unknown block action: {0}")]
    UnknownAction(String),

    #[error("Invalid block id: {0}")]
    InvalidBlockId(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}
