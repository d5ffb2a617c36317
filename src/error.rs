//! Error types shared across repometa.
//!
//! Every stage returns its failure upward unchanged; only the binary's entry
//! point reports errors and chooses the exit status.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed source error for remote failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for repometa operations
#[derive(Error, Debug)]
pub enum Error {
    /// The metadata file is missing or could not be read.
    #[error("Failed to read metadata file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The metadata file is not valid YAML or does not match the expected shape.
    #[error("Failed to parse metadata file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Flags or environment did not yield a usable set of options.
    #[error("Usage error: {message}")]
    Usage { message: String },

    /// A GitHub API call failed (network, authentication, HTTP status).
    #[error("GitHub API call failed while {operation}: {source}")]
    Remote {
        operation: String,
        #[source]
        source: BoxError,
    },

    /// The report could not be written to its output stream.
    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    pub fn usage(message: impl Into<String>) -> Self {
        Error::Usage {
            message: message.into(),
        }
    }

    pub fn remote(operation: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Remote {
            operation: operation.into(),
            source: source.into(),
        }
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;
