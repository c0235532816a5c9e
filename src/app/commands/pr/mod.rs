//! Pull request lifecycle notification handlers.
//!
//! Each handler runs once per trigger event and talks to Slack and GitHub
//! strictly in sequence. The thread timestamp is persisted in the pull
//! request description before anything else is posted into the thread.

pub mod closed;
pub mod opened;
pub mod updated;

use serde::Serialize;
use tracing::info;

use crate::app::AppContext;
use crate::domain::{AppError, EventAction, PullRequestEvent};
use crate::ports::{GitHubPort, SlackPort};

pub const SCHEMA_VERSION: u32 = 1;

/// Output of a handler run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyOutput {
    pub schema_version: u32,
    pub action: EventAction,
    pub pr_number: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
    pub messages_sent: usize,
    pub body_updates: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped_reason: Option<String>,
}

impl NotifyOutput {
    fn new(action: EventAction, pr_number: u64) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            action,
            pr_number,
            thread_ts: None,
            messages_sent: 0,
            body_updates: 0,
            skipped_reason: None,
        }
    }

    fn skipped(mut self, reason: impl Into<String>) -> Self {
        self.skipped_reason = Some(reason.into());
        self
    }
}

/// Route `event` to the handler for its action.
pub fn dispatch<S: SlackPort, G: GitHubPort>(
    ctx: &AppContext<S, G>,
    event: &PullRequestEvent,
) -> Result<NotifyOutput, AppError> {
    let action: EventAction = event.action.parse()?;
    let pr = event.pull_request.as_ref();
    info!(
        action = action.as_str(),
        pr = ?pr.map(|p| p.number),
        repository = %ctx.repo(),
        "handling pull request event"
    );

    match action {
        EventAction::Opened => opened::execute(ctx, pr),
        EventAction::Synchronize => updated::execute(ctx, pr),
        EventAction::Closed => closed::execute(ctx, pr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::configuration::notify_config::test_config;
    use crate::domain::{PullRequestState, RepoId};
    use crate::testing::{FakeGitHub, FakeSlack};

    fn event(action: &str, body: &str) -> PullRequestEvent {
        PullRequestEvent {
            action: action.to_string(),
            pull_request: Some(PullRequestState {
                number: 5,
                title: "Test PR".to_string(),
                url: "http://example.com".to_string(),
                source_branch: "feature-branch".to_string(),
                target_branch: "main".to_string(),
                body: body.to_string(),
                merged: false,
                merged_by_login: None,
            }),
            repository: Some(RepoId::new("owner", "repo")),
        }
    }

    fn ctx() -> AppContext<FakeSlack, FakeGitHub> {
        AppContext::new(
            FakeSlack::new(),
            FakeGitHub::new(),
            test_config("https://slack.test/api", "https://api.github.test"),
            RepoId::new("owner", "repo"),
        )
    }

    #[test]
    fn routes_closed_to_close_handler() {
        let ctx = ctx();
        let out = dispatch(&ctx, &event("closed", "")).unwrap();
        assert_eq!(out.action, EventAction::Closed);
        assert_eq!(out.skipped_reason.as_deref(), Some("pull request was closed without merging"));
    }

    #[test]
    fn routes_opened_to_open_handler() {
        let ctx = ctx();
        let out = dispatch(&ctx, &event("opened", "body")).unwrap();
        assert_eq!(out.action, EventAction::Opened);
        assert_eq!(out.thread_ts.as_deref(), Some("12345"));
    }

    #[test]
    fn rejects_unknown_actions_without_calls() {
        let ctx = ctx();
        let err = dispatch(&ctx, &event("labeled", "")).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedAction(ref a) if a == "labeled"));
        assert!(ctx.slack().sent().is_empty());
        assert_eq!(ctx.github().commit_request_count(), 0);
    }

    #[test]
    fn output_serializes_as_single_line_json() {
        let mut out = NotifyOutput::new(EventAction::Synchronize, 9);
        out.thread_ts = Some("12345".to_string());
        out.messages_sent = 2;
        out.body_updates = 1;
        let json = serde_json::to_string(&out).unwrap();
        assert_eq!(
            json,
            r#"{"schema_version":1,"action":"synchronize","pr_number":9,"thread_ts":"12345","messages_sent":2,"body_updates":1}"#
        );
    }
}
