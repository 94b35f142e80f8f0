//! Error types for the sightwatch-core library.

use thiserror::Error;

/// Main error type for the sightwatch library.
#[derive(Error, Debug)]
pub enum SightwatchError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to monitor configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: String, value: String },

    /// A value is outside its allowed range.
    #[error("invalid {field}: {reason}")]
    Invalid { field: String, reason: String },

    /// The config file could not be decoded.
    #[error("failed to parse config file: {0}")]
    Parse(String),
}

/// Result type for the sightwatch library.
pub type Result<T> = std::result::Result<T, SightwatchError>;
