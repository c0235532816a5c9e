//! Shared helpers for turning HTTP responses into `AppError`s.

use reqwest::blocking::Response;

use crate::domain::AppError;

/// Build an `ExternalApi` error from a non-success response.
///
/// JSON error bodies are re-serialized compactly; anything else is kept as text.
pub fn api_error(service: &str, response: Response) -> AppError {
    let status = response.status();
    let raw = response.text().unwrap_or_default();
    AppError::ExternalApi {
        service: service.to_string(),
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
        body: compact_body(&raw),
    }
}

pub fn transport_error(service: &str, err: reqwest::Error) -> AppError {
    AppError::Transport { service: service.to_string(), details: err.to_string() }
}

fn compact_body(raw: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => value.to_string(),
        Err(_) => raw.trim().to_string(),
    }
}
