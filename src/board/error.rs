//! Error types for board file operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Errors that can occur while loading or saving a board.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Failed to open or read the file.
    #[error("Failed to read file: {path}")]
    FileRead {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write the file.
    #[error("Failed to write file: {path}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The board JSON could not be parsed.
    #[error("Invalid board data: {message}")]
    Parse {
        /// Description of what's wrong.
        message: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The board could not be serialised.
    #[error("Failed to serialise board")]
    Serialize {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl BoardError {
    /// Creates a file read error.
    pub fn file_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a file write error.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            message: message.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_read_display() {
        let err = BoardError::file_read(
            "/tmp/board.json",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "Failed to read file: /tmp/board.json");
    }

    #[test]
    fn parse_error_display() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = BoardError::parse("line 1", source);
        assert_eq!(err.to_string(), "Invalid board data: line 1");
    }
}
