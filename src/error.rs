//! Error types for rs-ninisite.
//!
//! Only thread-level structural failures are errors. Missing post fields
//! degrade to `None`/defaults and never surface here.

/// Error type for extraction, configuration and rendering operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No raw page was supplied to the assembler.
    #[error("Could not fetch any pages")]
    NoPagesFetched,

    /// The thread URL does not carry a recognizable topic identifier.
    #[error("No topic identifier in URL: {0}")]
    MalformedUrl(String),

    /// An options file could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Reading a page or options file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A rendering target could not be produced.
    #[error("Render target unavailable: {0}")]
    RenderTargetUnavailable(String),
}

/// Result type alias for rs-ninisite operations.
pub type Result<T> = std::result::Result<T, Error>;
