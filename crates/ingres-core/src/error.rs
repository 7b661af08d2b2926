use core::result::Result as CoreResult;
use std::io::Error as IoError;

use thiserror::Error;
use toml::de::Error as TomlError;

/// Result type for INGRES operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors that can occur while handling a conversation turn.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// TOML deserialization failed.
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] TomlError),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The upstream classifier could not be reached or returned an error status.
    #[error("Upstream classifier error: {0}")]
    Upstream(String),

    /// The upstream classifier did not answer within its time budget.
    #[error("Upstream classifier timed out after {0}ms")]
    UpstreamTimeout(u64),

    /// Required API key was not found.
    #[error("API key not found: {0}")]
    MissingApiKey(String),

    /// The session store failed to load or persist a session.
    #[error("Session store error: {0}")]
    SessionStore(String),
}

impl Error {
    /// Determines whether the turn can continue on the rule-based path.
    ///
    /// Upstream failures never reach the user; everything else fails the turn.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Upstream(_) | Self::UpstreamTimeout(_) | Self::MissingApiKey(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let config = Error::Config("missing addr".to_owned());
        assert_eq!(config.to_string(), "Configuration error: missing addr");

        let timeout = Error::UpstreamTimeout(8000);
        assert_eq!(
            timeout.to_string(),
            "Upstream classifier timed out after 8000ms"
        );

        let store = Error::SessionStore("disk full".to_owned());
        assert_eq!(store.to_string(), "Session store error: disk full");
    }

    #[test]
    fn test_upstream_errors_are_recoverable() {
        assert!(Error::Upstream("503".to_owned()).is_upstream());
        assert!(Error::UpstreamTimeout(10).is_upstream());
        assert!(Error::MissingApiKey("GEMINI_API_KEY".to_owned()).is_upstream());

        assert!(!Error::SessionStore("gone".to_owned()).is_upstream());
        assert!(!Error::Config("bad".to_owned()).is_upstream());
    }

    #[test]
    fn test_error_from_io() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }
}
