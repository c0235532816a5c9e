//! Slack Web API client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::http_response::{api_error, transport_error};
use crate::domain::configuration::notify_config::endpoint;
use crate::domain::{AppError, SlackSettings};
use crate::ports::{PostedMessage, SlackMessage, SlackPort};

const SERVICE: &str = "Slack";

/// HTTP client for Slack's `chat.postMessage`.
#[derive(Clone)]
pub struct HttpSlackClient {
    bot_token: String,
    api_url: Url,
    client: Client,
}

impl std::fmt::Debug for HttpSlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSlackClient")
            .field("api_url", &self.api_url)
            .field("bot_token", &"[REDACTED]")
            .finish()
    }
}

impl HttpSlackClient {
    /// Create a new HTTP client with the given Slack settings.
    pub fn new(settings: &SlackSettings, timeout_secs: u64) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { bot_token: settings.bot_token.clone(), api_url: settings.api_url.clone(), client })
    }
}

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_ts: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    ts: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl SlackPort for HttpSlackClient {
    fn post_message(&self, message: &SlackMessage) -> Result<PostedMessage, AppError> {
        let request = PostMessageRequest {
            channel: &message.channel,
            text: &message.text,
            thread_ts: message.thread_ts.as_deref(),
        };

        let response = self
            .client
            .post(endpoint(&self.api_url, "chat.postMessage"))
            .bearer_auth(&self.bot_token)
            .json(&request)
            .send()
            .map_err(|e| transport_error(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(api_error(SERVICE, response));
        }

        let api_response: PostMessageResponse = response
            .json()
            .map_err(|e| AppError::parse_error("Slack chat.postMessage response", e))?;

        if !api_response.ok {
            return Err(AppError::NotificationSend(
                api_response.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        debug!(ts = ?api_response.ts, threaded = message.thread_ts.is_some(), "posted Slack message");
        Ok(PostedMessage { ts: api_response.ts })
    }
}
