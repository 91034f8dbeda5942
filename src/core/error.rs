use std::path::PathBuf;

use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum FetchError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The provider answered with an explicit error object (e.g. unknown symbol).
    #[error("provider error: {code} - {description}")]
    Provider {
        /// Provider error code, e.g. `Not Found`.
        code: String,
        /// Human readable description supplied by the provider.
        description: String,
    },

    /// The data received from the API was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// Creating a directory or reading/writing a file failed.
    #[error("filesystem error at {}: {source}", .path.display())]
    Io {
        /// The path being created, read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Encoding or decoding CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A batch configuration or date argument was invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Coarse classification of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The market-data query failed or returned nothing usable.
    Upstream,
    /// Directory creation or a file read/write failed.
    Filesystem,
    /// Caller-supplied configuration was rejected before any request was made.
    Config,
}

impl FetchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns which side of the fetch-and-persist pipeline failed.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Http(_)
            | FetchError::Url(_)
            | FetchError::Status { .. }
            | FetchError::Provider { .. }
            | FetchError::Data(_) => ErrorKind::Upstream,
            FetchError::Io { .. } => ErrorKind::Filesystem,
            // csv errors only arise while reading or writing files.
            FetchError::Csv(_) => ErrorKind::Filesystem,
            FetchError::Config(_) => ErrorKind::Config,
        }
    }

    /// Shorthand for `self.kind() == ErrorKind::Upstream`.
    pub fn is_upstream(&self) -> bool {
        self.kind() == ErrorKind::Upstream
    }

    /// Shorthand for `self.kind() == ErrorKind::Filesystem`.
    pub fn is_filesystem(&self) -> bool {
        self.kind() == ErrorKind::Filesystem
    }
}
