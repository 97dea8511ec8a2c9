//! Error types for Mindcards
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in Mindcards
#[derive(Debug, Error)]
pub enum MindcardsError {
    /// Rating outside 0-5 or not an integer
    #[error("Invalid rating: {0} (expected an integer from 0 to 5)")]
    InvalidRating(String),

    /// Card name not present in the catalog
    #[error("Card not found: {0}")]
    CardNotFound(String),

    /// A card with this name already exists
    #[error("Duplicate card: {0}")]
    DuplicateCard(String),

    /// Card is missing a required field
    #[error("Invalid card: {0}")]
    InvalidCard(String),

    /// Export format name not recognized
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    /// Storage/persistence error
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Mindcards operations
pub type Result<T> = std::result::Result<T, MindcardsError>;
