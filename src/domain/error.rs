use std::io;

use thiserror::Error;

/// Library-wide error type for notification operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// The trigger payload carries no pull request.
    #[error("No pull request found")]
    NoPullRequest,

    /// The pull request body has no thread timestamp marker.
    #[error("No Slack message_ts found in pull request description")]
    MissingThreadMarker,

    /// The pull request body already carries a thread timestamp marker.
    #[error("Pull request description already carries Slack message_ts {0}")]
    ThreadMarkerExists(String),

    /// Slack accepted the request but reported a failure.
    #[error("Failed to send Slack message: {0}")]
    NotificationSend(String),

    /// Non-success HTTP status from Slack or GitHub.
    #[error("{service} API request failed: {status} {reason} - {body}")]
    ExternalApi { service: String, status: u16, reason: String, body: String },

    /// The HTTP request did not complete.
    #[error("{service} request failed: {details}")]
    Transport { service: String, details: String },

    /// The event action has no handler.
    #[error("Unsupported pull request event action '{0}'")]
    UnsupportedAction(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn parse_error<W: Into<String>, D: ToString>(what: W, details: D) -> Self {
        AppError::ParseError { what: what.into(), details: details.to_string() }
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::UnsupportedAction(_)
            | AppError::ParseError { .. } => io::ErrorKind::InvalidInput,
            AppError::NoPullRequest | AppError::MissingThreadMarker => io::ErrorKind::NotFound,
            AppError::ThreadMarkerExists(_) => io::ErrorKind::AlreadyExists,
            AppError::NotificationSend(_)
            | AppError::ExternalApi { .. }
            | AppError::Transport { .. } => io::ErrorKind::Other,
        }
    }
}
