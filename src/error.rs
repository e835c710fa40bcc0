/// Error types for the geomark library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred while reading input or writing output.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// One of the address or port patterns failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The HTTP client could not be constructed.
    #[error("failed to build http client")]
    Client(#[source] reqwest::Error),
}

/// Convenience type alias for Results using the library error.
pub type Result<T> = std::result::Result<T, Error>;
