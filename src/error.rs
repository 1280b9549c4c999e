//! Error types for panel layout analysis.
//!
//! The layout algorithms themselves never fail: empty or malformed pages fall
//! back to well-defined geometry. Errors only come from the document engine,
//! from building configuration, and from I/O in the command line tool.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while analyzing a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The engine has no page at this index
    #[error("Page not found: {0}")]
    PageNotFound(usize),

    /// The document engine failed to supply a page
    #[error("Document engine failed on page {page}: {reason}")]
    Engine {
        /// Zero-based page index
        page: usize,
        /// Reason reported by the engine
        reason: String,
    },

    /// Invalid analysis configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Worker pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
