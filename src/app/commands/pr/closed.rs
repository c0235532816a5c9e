//! `closed` handler: announce merges in the pull request thread.

use tracing::info;

use super::NotifyOutput;
use crate::app::AppContext;
use crate::domain::messages::close_message;
use crate::domain::{AppError, EventAction, PrBody, PullRequestState};
use crate::ports::{GitHubPort, SlackPort};

/// Execute the `closed` handler. Closing without merging makes no calls.
pub fn execute<S: SlackPort, G: GitHubPort>(
    ctx: &AppContext<S, G>,
    pr: Option<&PullRequestState>,
) -> Result<NotifyOutput, AppError> {
    let pr = pr.ok_or(AppError::NoPullRequest)?;
    let mut output = NotifyOutput::new(EventAction::Closed, pr.number);

    if !pr.merged {
        info!(pr = pr.number, "pull request closed without merging; nothing to announce");
        return Ok(output.skipped("pull request was closed without merging"));
    }

    let body = PrBody::parse(&pr.body);
    let ts = body.require_thread_ts()?;

    ctx.post(close_message(&ctx.config().templates.close, pr), Some(ts))?;
    output.messages_sent += 1;
    output.thread_ts = Some(ts.to_string());

    info!(pr = pr.number, merged_by = ?pr.merged_by_login, "posted merge notification");
    Ok(output)
}
