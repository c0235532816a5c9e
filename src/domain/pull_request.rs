//! Pull request and trigger event models.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::AppError;

/// Repository identifier (`owner/repo`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self { owner: owner.into(), name: name.into() }
    }
}

impl FromStr for RepoId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        match trimmed.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(AppError::parse_error(
                "repository",
                format!("expected 'owner/repo', got '{}'", trimmed),
            )),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Pull request state as delivered in the trigger payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestState {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub source_branch: String,
    pub target_branch: String,
    /// Description text; also carries the front-matter markers.
    pub body: String,
    pub merged: bool,
    pub merged_by_login: Option<String>,
}

/// Pull request event action that selects a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    Opened,
    Synchronize,
    Closed,
}

impl EventAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventAction::Opened => "opened",
            EventAction::Synchronize => "synchronize",
            EventAction::Closed => "closed",
        }
    }
}

impl FromStr for EventAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "opened" => Ok(EventAction::Opened),
            "synchronize" => Ok(EventAction::Synchronize),
            "closed" => Ok(EventAction::Closed),
            other => Err(AppError::UnsupportedAction(other.to_string())),
        }
    }
}

/// A `pull_request` trigger event.
#[derive(Debug, Clone)]
pub struct PullRequestEvent {
    /// Raw action string; unrecognized values are rejected at dispatch.
    pub action: String,
    pub pull_request: Option<PullRequestState>,
    pub repository: Option<RepoId>,
}
