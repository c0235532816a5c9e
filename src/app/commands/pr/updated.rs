//! `synchronize` handler: report commits pushed since the last run.

use tracing::{info, warn};

use super::NotifyOutput;
use crate::app::AppContext;
use crate::domain::messages::update_message;
use crate::domain::{AppError, Commit, EventAction, PrBody, PullRequestState};
use crate::ports::{GitHubPort, SlackPort};

/// Execute the `synchronize` handler.
pub fn execute<S: SlackPort, G: GitHubPort>(
    ctx: &AppContext<S, G>,
    pr: Option<&PullRequestState>,
) -> Result<NotifyOutput, AppError> {
    let pr = pr.ok_or(AppError::NoPullRequest)?;
    let mut body = PrBody::parse(&pr.body);
    let ts = body.require_thread_ts()?.to_string();

    let mut output = NotifyOutput::new(EventAction::Synchronize, pr.number);
    output.thread_ts = Some(ts.clone());

    let commits = ctx.github().list_pull_request_commits(ctx.repo(), pr.number)?;
    let fresh = new_commits(&commits, body.last_processed_commit());
    let Some(last) = fresh.last() else {
        info!(pr = pr.number, "no new commits since last notification");
        return Ok(output.skipped("no new commits"));
    };

    let config = ctx.config();
    let linker = ctx.linker();
    for commit in fresh {
        let text = update_message(&config.templates.update, commit, &linker, &config.identities);
        ctx.post(text, Some(&ts))?;
        output.messages_sent += 1;
    }

    body.set_last_processed_commit(&last.sha);
    ctx.github().update_pull_request_body(ctx.repo(), pr.number, &body.render())?;
    output.body_updates += 1;

    info!(pr = pr.number, commits = output.messages_sent, "posted commit updates");
    Ok(output)
}

/// Commits listed after `marker`, or all of them when the marker is unknown.
fn new_commits<'a>(commits: &'a [Commit], marker: Option<&str>) -> &'a [Commit] {
    let Some(marker) = marker else {
        if !commits.is_empty() {
            warn!("no last processed commit recorded; reporting every commit");
        }
        return commits;
    };
    match commits.iter().position(|c| c.sha == marker) {
        Some(index) => &commits[index + 1..],
        None => {
            warn!(marker, "last processed commit is no longer on the branch; reporting every commit");
            commits
        }
    }
}
