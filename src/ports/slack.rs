//! Slack messaging port definition.

use crate::domain::AppError;

/// A `chat.postMessage` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlackMessage {
    pub channel: String,
    pub text: String,
    /// Parent message timestamp when replying in a thread.
    pub thread_ts: Option<String>,
}

/// Slack's acknowledgement of a posted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub ts: Option<String>,
}

/// Port for posting Slack messages.
pub trait SlackPort {
    /// Post `message`.
    ///
    /// Fails with `ExternalApi` on a non-success HTTP status and with
    /// `NotificationSend` when Slack answers `ok: false`.
    fn post_message(&self, message: &SlackMessage) -> Result<PostedMessage, AppError>;
}
