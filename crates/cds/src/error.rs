//! Error types for the reforce-cds crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the reforce-cds crate.
///
/// Covers credential lookup, request validation, HTTP failures, archive-side
/// task failures and incomplete downloads. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum CdsError {
    /// Returned when no credentials could be found in the environment or an
    /// rc file.
    #[error("no CDS credentials: {reason}")]
    MissingCredentials {
        /// Where the lookup gave up.
        reason: String,
    },

    /// Returned when an API key is not of the form `UID:KEY`.
    #[error("invalid CDS API key: expected 'UID:KEY'")]
    InvalidKey,

    /// Returned when a retrieve request is internally inconsistent.
    #[error("invalid retrieve request: {reason}")]
    InvalidRequest {
        /// Description of the problem.
        reason: String,
    },

    /// Wraps a transport or HTTP status error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Returned when the archive reports the task as failed.
    #[error("request {request_id} failed: {message}")]
    TaskFailed {
        /// Archive-side request identifier.
        request_id: String,
        /// Message reported by the archive.
        message: String,
    },

    /// Returned when a reply lacks a field the protocol requires.
    #[error("unexpected reply from archive: {reason}")]
    UnexpectedReply {
        /// Description of what was missing or malformed.
        reason: String,
    },

    /// Returned when fewer bytes arrived than the archive announced.
    #[error("incomplete download: expected {expected} bytes, got {got}")]
    IncompleteDownload {
        /// Announced content length.
        expected: u64,
        /// Bytes written to disk.
        got: u64,
    },

    /// Wraps a local filesystem error.
    #[error("{action} {}: {source}", path.display())]
    Io {
        /// What was attempted.
        action: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_credentials() {
        let err = CdsError::MissingCredentials {
            reason: "~/.cdsapirc not found".to_string(),
        };
        assert_eq!(err.to_string(), "no CDS credentials: ~/.cdsapirc not found");
    }

    #[test]
    fn display_task_failed() {
        let err = CdsError::TaskFailed {
            request_id: "abc-123".to_string(),
            message: "no data".to_string(),
        };
        assert_eq!(err.to_string(), "request abc-123 failed: no data");
    }

    #[test]
    fn display_incomplete_download() {
        let err = CdsError::IncompleteDownload {
            expected: 1024,
            got: 512,
        };
        assert_eq!(
            err.to_string(),
            "incomplete download: expected 1024 bytes, got 512"
        );
    }

    #[test]
    fn display_io() {
        let err = CdsError::Io {
            action: "creating",
            path: PathBuf::from("/tmp/tmp_era5.nc"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        };
        assert_eq!(
            err.to_string(),
            "creating /tmp/tmp_era5.nc: no such directory"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<CdsError>();
    }
}
