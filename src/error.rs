//! Error types for the vkquality library
//!
//! The matching engine itself never fails. These errors come from the edges:
//! loading rule tables, reading device properties and converting raw codes.

use std::io;
use thiserror::Error;

/// Main error type for vkquality operations
#[derive(Error, Debug)]
pub enum VkQualityError {
    /// Rule table is structurally invalid
    #[error("Rule table error: {0}")]
    RuleTable(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a rule table or property failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Raw value is not a known init result code
    #[error("Invalid result code: {0}")]
    InvalidResultCode(i32),

    /// Raw value is not a known recommendation
    #[error("Invalid recommendation: {0}")]
    InvalidRecommendation(i32),

    /// Required device property missing or unreadable
    #[error("Device property error: {0}")]
    Property(String),
}

/// Result type for vkquality operations
pub type Result<T> = std::result::Result<T, VkQualityError>;
