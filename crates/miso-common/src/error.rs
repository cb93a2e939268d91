//! Error types for the blog client layer.

use miette::Diagnostic;

/// Main error type for miso client operations.
///
/// Every variant is terminal for the user action that raised it: there is no
/// retry, the caller reports it and waits for the next click.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum MisoError {
    /// The auth check reported no session.
    #[error("not logged in")]
    #[diagnostic(
        code(miso::auth_required),
        help("log in first, or pass a session cookie with --session")
    )]
    AuthRequired,

    /// HTTP transport failure.
    #[error(transparent)]
    #[diagnostic(code(miso::network))]
    Network(#[from] reqwest::Error),

    /// Transport failure from a non-reqwest transport.
    #[error("request failed: {0}")]
    #[diagnostic(code(miso::network))]
    Transport(String),

    /// Non-success HTTP status.
    #[error("server answered {status} for {url}")]
    #[diagnostic(code(miso::status))]
    Status { status: u16, url: String },

    /// The server refused the action and said why.
    #[error("rejected: {0}")]
    #[diagnostic(code(miso::rejected))]
    Rejected(String),

    /// Response body was not the expected JSON.
    #[error(transparent)]
    #[diagnostic(code(miso::json))]
    Json(#[from] serde_json::Error),

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    #[diagnostic(code(miso::config))]
    Config(String),
}

impl MisoError {
    /// Failures of the request itself, as opposed to answers from the server.
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            MisoError::Network(_)
                | MisoError::Transport(_)
                | MisoError::Status { .. }
                | MisoError::Json(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_failure_kind() {
        assert!(MisoError::Transport("offline".into()).is_network_failure());
        assert!(
            MisoError::Status {
                status: 500,
                url: "/x".into()
            }
            .is_network_failure()
        );
        assert!(!MisoError::AuthRequired.is_network_failure());
        assert!(!MisoError::Rejected("no".into()).is_network_failure());
    }

    #[test]
    fn test_display() {
        let err = MisoError::Status {
            status: 403,
            url: "http://localhost:5000/article/1/like".into(),
        };
        assert_eq!(
            err.to_string(),
            "server answered 403 for http://localhost:5000/article/1/like"
        );
    }
}
