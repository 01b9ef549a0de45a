//! Error types for bookmodel operations.
//!
//! Builder operations never fail; these errors come from the outer layers
//! that load and replay event scripts.

use thiserror::Error;

/// Errors that can occur while loading or replaying an event script.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "cli")]
    #[error("Invalid event script: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
