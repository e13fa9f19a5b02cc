//! Review error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::profile::StoreError;

/// Errors that can occur while filing reviews.
#[derive(Error, Debug)]
pub enum ReviewError {
    /// One review per freelancer is required.
    #[error("Expected {expected} reviews (one per freelancer), got {actual}")]
    ReviewCountMismatch { expected: usize, actual: usize },

    /// The transaction names a freelancer missing from the profile store.
    #[error("Freelancer not found in profile store: {0}")]
    UnknownFreelancer(String),

    /// No transaction with this identifier.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    /// Failed to read the transaction store.
    #[error("Failed to read transaction store {path}: {source}")]
    TransactionRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the transaction store.
    #[error("Failed to parse transaction store {path}: {source}")]
    TransactionParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Profile store load or save failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors from the external review notary.
///
/// These are logged and dropped; they never fail a review submission.
#[derive(Error, Debug)]
pub enum NotaryError {
    #[error("Notary request failed: {0}")]
    RequestFailed(String),
    #[error("Failed to parse notary response: {0}")]
    ParseError(String),
    #[error("Notary request timed out")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_mismatch_display() {
        let err = ReviewError::ReviewCountMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "Expected 3 reviews (one per freelancer), got 2"
        );
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err: ReviewError = StoreError::Read {
            path: PathBuf::from("/data/freelancers.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        }
        .into();
        assert!(err.to_string().starts_with("Failed to read profile store"));
    }

    #[test]
    fn test_notary_timeout_display() {
        assert_eq!(NotaryError::Timeout.to_string(), "Notary request timed out");
    }
}
