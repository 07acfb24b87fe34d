//! # Storage Errors
//!
//! The four failure classes of the storage contract. Everything a backend
//! can report maps onto exactly one of these; callers branch on the variant,
//! never on message text.

use thiserror::Error;

/// Failure of a storage operation or of backend construction.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be constructed from the supplied configuration
    /// (malformed API URL, unsupported scheme, missing host). Raised at
    /// construction time, never on first use.
    #[error("invalid storage configuration: {reason}")]
    Configuration {
        /// What was wrong with the configuration.
        reason: String,
    },

    /// The daemon could not be reached or the exchange failed below the
    /// semantic level: connection refused, timeout, unexpected status,
    /// undecodable response.
    #[error("transport failure during {operation}: {reason}")]
    Transport {
        /// The storage operation that was underway.
        operation: String,
        /// Transport-level detail, including the daemon's message when one
        /// was returned.
        reason: String,
    },

    /// The daemon reported the named content unavailable or unresolvable.
    #[error("content not found: {address}")]
    NotFound {
        /// The address that failed to resolve.
        address: String,
    },

    /// The content was added and is retrievable, but the follow-up pin
    /// request failed. The bytes are on the daemon yet unprotected from
    /// garbage collection until a pin succeeds.
    #[error("content {address} added but not pinned: {reason}")]
    PinFailure {
        /// The address the add step returned.
        address: String,
        /// Why the pin step failed.
        reason: String,
    },
}

impl StorageError {
    /// Whether this is the not-found failure class.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether retrying the same operation could plausibly succeed.
    ///
    /// Transport failures and pin failures are retryable from the caller's
    /// side; configuration and not-found failures are deterministic.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::PinFailure { .. })
    }

    /// The content address involved, for the variants that carry one.
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::NotFound { address } | Self::PinFailure { address, .. } => Some(address),
            Self::Configuration { .. } | Self::Transport { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_predicates() {
        let not_found = StorageError::NotFound {
            address: "QmXYZ".to_string(),
        };
        assert!(not_found.is_not_found());
        assert!(!not_found.is_transient());

        let transport = StorageError::Transport {
            operation: "open".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(!transport.is_not_found());
        assert!(transport.is_transient());
    }

    #[test]
    fn pin_failure_carries_the_added_address() {
        let err = StorageError::PinFailure {
            address: "QmXYZ".to_string(),
            reason: "pin service unavailable".to_string(),
        };
        assert_eq!(err.address(), Some("QmXYZ"));
        assert!(err.is_transient());
        assert_eq!(
            err.to_string(),
            "content QmXYZ added but not pinned: pin service unavailable"
        );
    }

    #[test]
    fn display_messages_name_the_failure() {
        let err = StorageError::Configuration {
            reason: "API URL has no host".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid storage configuration: API URL has no host"
        );
        assert_eq!(err.address(), None);
    }
}
