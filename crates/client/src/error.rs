//! Error types for backlog fetch operations.

/// Errors that can occur while fetching backlogs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or its body could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status} for {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The requested URL.
        url: String,
    },

    /// No server is configured.
    #[error("no backlog server configured")]
    NotConfigured,
}

/// A specialized Result type for backlog fetch operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_status() {
        let err = Error::Status {
            status: 503,
            url: "http://tracker/getProductJSON.action".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "server returned 503 for http://tracker/getProductJSON.action"
        );
    }

    #[test]
    fn error_display_not_configured() {
        assert_eq!(Error::NotConfigured.to_string(), "no backlog server configured");
    }
}
