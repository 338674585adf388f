//! Per-job error types.
//!
//! Every failure in the fetch → persist → probe pipeline is captured as a
//! `JobError` in the owning job's outcome; nothing here aborts the batch.

use std::io;
use std::path::PathBuf;

use crate::probe::ProbeError;

/// Failure returned by the fetch capability.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, timeout, ...).
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// Response arrived with a status outside 200..=299.
    #[error("unexpected status code: HTTP {0}")]
    Status(u32),
    /// Body grew past the configured `max_body_bytes`; the transfer was aborted.
    #[error("response body exceeds {limit} bytes")]
    BodyTooLarge { limit: u64 },
}

impl FetchError {
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Status(code) => Some(*code),
            FetchError::Transport(_) | FetchError::BodyTooLarge { .. } => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport(e) if e.is_operation_timedout())
    }

    /// True for failures that never reached an HTTP exchange.
    pub fn is_connection(&self) -> bool {
        match self {
            FetchError::Transport(e) => {
                e.is_couldnt_connect()
                    || e.is_couldnt_resolve_host()
                    || e.is_couldnt_resolve_proxy()
                    || e.is_ssl_connect_error()
                    || e.is_recv_error()
                    || e.is_send_error()
                    || e.is_got_nothing()
            }
            FetchError::Status(_) | FetchError::BodyTooLarge { .. } => false,
        }
    }
}

/// Coarse classification of a job failure; the structured replacement for exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Network,
    Filesystem,
    Decode,
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::Filesystem => "filesystem",
            ErrorKind::Decode => "decode",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Error recorded in a failed `DownloadOutcome`. First failing step wins.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("network: {0}")]
    Network(#[from] FetchError),
    #[error("filesystem: {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("decode: {0}")]
    Decode(#[from] ProbeError),
    /// The worker task died before producing an outcome (panic or runtime shutdown).
    #[error("internal: {0}")]
    Internal(String),
}

impl JobError {
    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        JobError::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            JobError::Network(_) => ErrorKind::Network,
            JobError::Filesystem { .. } => ErrorKind::Filesystem,
            JobError::Decode(_) => ErrorKind::Decode,
            JobError::Internal(_) => ErrorKind::Internal,
        }
    }
}
