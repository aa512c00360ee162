use thiserror::Error;

use crate::models::StatusFilter;

#[derive(Debug, Error)]
pub enum CosmicError {
    #[error("invalid extension URL: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{message}")]
    Api { message: String },
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("runtime initialization failed: {0}")]
    Runtime(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Core(#[from] CosmicError),
    #[error("{message}")]
    EmptyResult { message: String },
    #[error("not enough {title} objects with status {status} to build a CSV")]
    InsufficientData { title: String, status: StatusFilter },
    #[error("pagination stalled after {pages} consecutive pages without objects")]
    PaginationStalled { pages: u32 },
}
