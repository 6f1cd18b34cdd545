use std::{fmt, path::PathBuf};
use thiserror::Error;

/// Coarse failure classification surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FetchFailed,
    ParseFailed,
    WriteFailed,
    ReadFailed,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::FetchFailed => "fetch_failed",
            ErrorKind::ParseFailed => "parse_failed",
            ErrorKind::WriteFailed => "write_failed",
            ErrorKind::ReadFailed => "read_failed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum KlineError {
    #[error("invalid API base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connect, timeout or body read failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Malformed JSON or a row that does not match the 12-element kline layout.
    #[error("invalid kline data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl KlineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KlineError::InvalidUrl(_) | KlineError::Http(_) | KlineError::Status { .. } => {
                ErrorKind::FetchFailed
            }
            KlineError::Parse(_) => ErrorKind::ParseFailed,
            KlineError::Write { .. } => ErrorKind::WriteFailed,
            KlineError::Read { .. } => ErrorKind::ReadFailed,
        }
    }
}
