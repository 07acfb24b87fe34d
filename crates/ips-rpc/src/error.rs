//! Control API client error types.

/// Errors from daemon control API calls.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The endpoint configuration could not produce a usable client.
    #[error("control API configuration error: {reason}")]
    Config {
        /// What made the configuration unusable.
        reason: String,
    },
    /// HTTP transport error (connect, timeout, body transfer).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The daemon returned a non-success status.
    #[error("control API {endpoint} returned {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },
    /// Response deserialization failed.
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The content source failed while being read for upload.
    #[error("content source read failed: {source}")]
    Read { source: std::io::Error },
}

impl RpcError {
    /// Whether the daemon is saying the requested content cannot be
    /// resolved (as opposed to the exchange itself failing).
    ///
    /// The daemon reports most lookup failures as status 500 with a
    /// descriptive message rather than 404, so classification falls back to
    /// the message phrasings it uses for unresolvable content.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api {
                status, message, ..
            } => {
                if *status == 404 {
                    return true;
                }
                let message = message.to_ascii_lowercase();
                message.contains("not found")
                    || message.contains("no link named")
                    || message.contains("not pinned")
            }
            _ => false,
        }
    }

    /// The daemon message for API-level failures, when one was returned.
    pub fn daemon_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16, message: &str) -> RpcError {
        RpcError::Api {
            endpoint: "POST /cat".to_string(),
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn not_found_classification_by_status() {
        assert!(api_error(404, "anything").is_not_found());
        assert!(!api_error(500, "context deadline exceeded").is_not_found());
    }

    #[test]
    fn not_found_classification_by_daemon_phrasing() {
        assert!(api_error(500, "merkledag: not found").is_not_found());
        assert!(api_error(500, "block was NOT FOUND locally (offline)").is_not_found());
        assert!(api_error(500, "not pinned or pinned indirectly").is_not_found());
        assert!(api_error(500, "no link named \"x\" under QmXYZ").is_not_found());
        assert!(!api_error(500, "invalid path \"QmXYZ\"").is_not_found());
    }

    #[test]
    fn only_api_errors_classify() {
        let read = RpcError::Read {
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"),
        };
        assert!(!read.is_not_found());
        assert_eq!(read.daemon_message(), None);
    }

    #[test]
    fn display_includes_endpoint_and_message() {
        let err = api_error(500, "merkledag: not found");
        assert_eq!(
            err.to_string(),
            "control API POST /cat returned 500: merkledag: not found"
        );
        assert_eq!(err.daemon_message(), Some("merkledag: not found"));
    }
}
