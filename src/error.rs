// error.rs
// Error types for fetching and validating remote payloads

use crate::card::CardId;
use thiserror::Error;

/// A payload that does not match the expected structure.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("payload does not match the expected schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("card {card_id} has an empty grid")]
    EmptyGrid { card_id: CardId },

    #[error("card {card_id}: row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        card_id: CardId,
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Failure of one fetch. Never retried automatically.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered {status} {reason}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("invalid payload from {url}: {source}")]
    Validation {
        url: String,
        #[source]
        source: ValidationError,
    },
}

impl FetchError {
    pub fn is_validation(&self) -> bool {
        matches!(self, FetchError::Validation { .. })
    }
}
