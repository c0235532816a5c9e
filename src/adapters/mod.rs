pub mod event_payload;
pub mod github_http;
mod http_response;
pub mod slack_http;
