//! Domain error type
//!
//! Plumbing code returns `anyhow::Result`; failures a caller can act on are
//! expressed as `LoomiError` so the API layer can map them to status codes.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoomiError {
    /// Seed list missing, empty or oversized
    #[error("{0}")]
    InvalidSeeds(String),

    /// Blank or malformed search term
    #[error("Invalid search query: {0}")]
    InvalidQuery(String),

    /// Request body failed validation
    #[error("{0}")]
    InvalidInput(String),

    /// Cart already holds the maximum number of songs
    #[error("Playlist is full ({0} songs max)")]
    CartFull(usize),

    /// Cart is too small to generate from
    #[error("Add at least {required} songs first (have {have})")]
    NotEnoughSeeds { required: usize, have: usize },

    /// External API answered with an error or garbage
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// LLM reply could not be turned into playlists
    #[error("Could not parse generated playlists: {0}")]
    MalformedReply(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience Result type using LoomiError
pub type Result<T> = std::result::Result<T, LoomiError>;

impl From<sqlx::Error> for LoomiError {
    fn from(err: sqlx::Error) -> Self {
        LoomiError::Internal(err.into())
    }
}

impl From<reqwest::Error> for LoomiError {
    fn from(err: reqwest::Error) -> Self {
        LoomiError::Upstream(err.to_string())
    }
}

impl ResponseError for LoomiError {
    fn status_code(&self) -> StatusCode {
        match self {
            LoomiError::InvalidSeeds(_)
            | LoomiError::InvalidQuery(_)
            | LoomiError::InvalidInput(_)
            | LoomiError::CartFull(_)
            | LoomiError::NotEnoughSeeds { .. } => StatusCode::BAD_REQUEST,
            LoomiError::Upstream(_) | LoomiError::MalformedReply(_) => StatusCode::BAD_GATEWAY,
            LoomiError::NotFound(_) => StatusCode::NOT_FOUND,
            LoomiError::Unauthorized => StatusCode::UNAUTHORIZED,
            LoomiError::Conflict(_) => StatusCode::CONFLICT,
            LoomiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}
