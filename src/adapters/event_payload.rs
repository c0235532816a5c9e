//! Reader for the `pull_request` webhook payload GitHub Actions writes to
//! `GITHUB_EVENT_PATH`.

use std::path::Path;

use serde::Deserialize;

use crate::domain::{AppError, PullRequestEvent, PullRequestState, RepoId};

#[derive(Debug, Deserialize)]
struct EventDto {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    pull_request: Option<PullRequestDto>,
    #[serde(default)]
    repository: Option<RepositoryDto>,
}

#[derive(Debug, Deserialize)]
struct PullRequestDto {
    number: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    head: Option<BranchRef>,
    #[serde(default)]
    base: Option<BranchRef>,
    #[serde(default)]
    merged: Option<bool>,
    #[serde(default)]
    merged_by: Option<AccountRef>,
}

#[derive(Debug, Deserialize)]
struct BranchRef {
    #[serde(rename = "ref")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct AccountRef {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryDto {
    full_name: String,
}

impl From<PullRequestDto> for PullRequestState {
    fn from(dto: PullRequestDto) -> Self {
        PullRequestState {
            number: dto.number,
            title: dto.title,
            url: dto.html_url.unwrap_or_default(),
            source_branch: dto.head.map(|b| b.name).unwrap_or_default(),
            target_branch: dto.base.map(|b| b.name).unwrap_or_default(),
            body: dto.body.unwrap_or_default(),
            merged: dto.merged.unwrap_or(false),
            merged_by_login: dto.merged_by.map(|a| a.login),
        }
    }
}

/// Parse a webhook payload from its JSON text.
pub fn parse_event(content: &str) -> Result<PullRequestEvent, AppError> {
    let dto: EventDto =
        serde_json::from_str(content).map_err(|e| AppError::parse_error("event payload", e))?;

    let repository = dto.repository.map(|r| r.full_name.parse::<RepoId>()).transpose()?;

    Ok(PullRequestEvent {
        action: dto.action.unwrap_or_default(),
        pull_request: dto.pull_request.map(PullRequestState::from),
        repository,
    })
}

/// Read and parse the webhook payload at `path`.
pub fn load_event(path: &Path) -> Result<PullRequestEvent, AppError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AppError::config_error(format!("Failed to read event payload {}: {}", path.display(), e))
    })?;
    parse_event(&content)
}
