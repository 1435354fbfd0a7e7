//! Typed errors for the email-finder library.
//!
//! Malformed seed content is never an error (it becomes a diagnostic) and
//! lookup failures become failed `LookupResult`s. What is left here are the
//! conditions that stop an input or export operation outright.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinderError {
    /// Seed file with an extension other than `.csv` or `.txt`
    #[error("unsupported input file: {} (expected .csv or .txt)", .path.display())]
    UnsupportedInput { path: PathBuf },

    /// Reading input or writing exports failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON export/import failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for email-finder operations.
pub type Result<T> = std::result::Result<T, FinderError>;
