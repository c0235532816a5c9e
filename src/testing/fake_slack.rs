use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::{PostedMessage, SlackMessage, SlackPort};

enum Reply {
    Ok(Option<String>),
    NotOk(String),
}

/// Records every posted message and answers with a fixed reply.
pub struct FakeSlack {
    pub sent: Mutex<Vec<SlackMessage>>,
    reply: Reply,
}

impl FakeSlack {
    /// Accepts every message and reports ts `12345`.
    pub fn new() -> Self {
        Self::with_ts(Some("12345"))
    }

    pub fn with_ts(ts: Option<&str>) -> Self {
        Self { sent: Mutex::new(Vec::new()), reply: Reply::Ok(ts.map(str::to_string)) }
    }

    /// Answers every message with `ok: false` and the given error code.
    pub fn rejecting(reason: &str) -> Self {
        Self { sent: Mutex::new(Vec::new()), reply: Reply::NotOk(reason.to_string()) }
    }

    pub fn sent(&self) -> Vec<SlackMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|m| m.text).collect()
    }
}

impl SlackPort for FakeSlack {
    fn post_message(&self, message: &SlackMessage) -> Result<PostedMessage, AppError> {
        self.sent.lock().unwrap().push(message.clone());
        match &self.reply {
            Reply::Ok(ts) => Ok(PostedMessage { ts: ts.clone() }),
            Reply::NotOk(reason) => Err(AppError::NotificationSend(reason.clone())),
        }
    }
}
