use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the API client and the config/session loaders.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure: connection refused, timeout, TLS, body read.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status on a read.
    #[error("Server returned HTTP {0}")]
    Status(u16),

    /// The server refused a write and said why.
    #[error("{0}")]
    Rejected(String),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Status(404))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_only_for_404() {
        assert!(Error::Status(404).is_not_found());
        assert!(!Error::Status(500).is_not_found());
        assert!(!Error::Rejected("nope".into()).is_not_found());
    }

    #[test]
    fn test_rejected_displays_server_message_verbatim() {
        assert_eq!(
            Error::Rejected("Already applied".into()).to_string(),
            "Already applied"
        );
    }
}
