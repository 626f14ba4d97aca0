//! Error types for the simulation service boundary.

use std::path::PathBuf;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Everything that can go wrong between issuing a request and holding a
/// validated result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid service URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Could not reach simulation service: {message}")]
    Transport { message: String },

    #[error("Simulation request timed out: {message}")]
    Timeout { message: String },

    #[error("Simulation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed simulation response: {what}")]
    Malformed { what: String },

    #[error("Failed to read config file {path}: {message}")]
    ConfigRead { path: PathBuf, message: String },

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn malformed(what: impl Into<String>) -> Self {
        ClientError::Malformed { what: what.into() }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let message = error_chain(&err);
        if err.is_timeout() {
            ClientError::Timeout { message }
        } else if err.is_decode() {
            ClientError::Malformed { what: message }
        } else if let Some(status) = err.status() {
            ClientError::Status {
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            ClientError::Transport { message }
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Malformed {
            what: err.to_string(),
        }
    }
}

/// Render an error with all of its sources, e.g. "error sending request: connection refused".
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "error sending request")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn error_chain_includes_root_cause() {
        let err = Outer(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        assert_eq!(error_chain(&err), "error sending request: connection refused");
    }

    #[test]
    fn malformed_message_mentions_detail() {
        let err = ClientError::malformed("z_axis is empty");
        assert_eq!(
            err.to_string(),
            "Malformed simulation response: z_axis is empty"
        );
    }
}
