//! slack-pr-notify: thread pull request lifecycle notifications into Slack.
//!
//! The Slack thread timestamp lives in the pull request description, so every
//! invocation is independent and needs nothing but the trigger payload.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use adapters::github_http::HttpGitHubClient;
use adapters::slack_http::HttpSlackClient;
use app::AppContext;
use app::commands::pr;

pub use adapters::event_payload::{load_event, parse_event};
pub use app::commands::pr::NotifyOutput;
pub use domain::{AppError, NotifyConfig, PullRequestEvent, RepoId};

/// Handle one trigger event against the live Slack and GitHub APIs.
///
/// `fallback_repository` (`owner/repo`) is used when the payload has no
/// `repository` object.
pub fn notify(
    config: NotifyConfig,
    event: &PullRequestEvent,
    fallback_repository: Option<&str>,
) -> Result<NotifyOutput, AppError> {
    config.validate()?;
    let repo = resolve_repository(event, fallback_repository)?;
    let slack = HttpSlackClient::new(&config.slack, config.timeout_secs)?;
    let github = HttpGitHubClient::new(&config.github, config.timeout_secs)?;

    let ctx = AppContext::new(slack, github, config, repo);
    pr::dispatch(&ctx, event)
}

fn resolve_repository(
    event: &PullRequestEvent,
    fallback: Option<&str>,
) -> Result<RepoId, AppError> {
    if let Some(repo) = &event.repository {
        return Ok(repo.clone());
    }
    match fallback.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => raw.parse(),
        None => Err(AppError::config_error(
            "Repository is unknown: the event payload has no repository and GITHUB_REPOSITORY is not set",
        )),
    }
}
