//! `opened` handler: start the Slack thread and post the commit list into it.

use tracing::{debug, info};

use super::NotifyOutput;
use crate::app::AppContext;
use crate::domain::messages::{CommitListOptions, commit_list_messages, initial_message};
use crate::domain::{AppError, EventAction, PrBody, PullRequestState};
use crate::ports::{GitHubPort, SlackPort};

/// Execute the `opened` handler.
///
/// Order: initial message, thread marker written to the description, commit
/// list fetched and posted into the thread, last processed commit recorded.
pub fn execute<S: SlackPort, G: GitHubPort>(
    ctx: &AppContext<S, G>,
    pr: Option<&PullRequestState>,
) -> Result<NotifyOutput, AppError> {
    let pr = pr.ok_or(AppError::NoPullRequest)?;
    let mut output = NotifyOutput::new(EventAction::Opened, pr.number);
    let config = ctx.config();

    let mut body = PrBody::parse(&pr.body);
    if let Some(existing) = body.thread_ts() {
        return Err(AppError::ThreadMarkerExists(existing.to_string()));
    }

    let posted = ctx.post(initial_message(&config.templates.initial, pr), None)?;
    output.messages_sent += 1;
    let ts = posted.ts.ok_or_else(|| {
        AppError::NotificationSend("Slack response did not include a message ts".to_string())
    })?;
    info!(pr = pr.number, ts = %ts, "posted initial notification");

    body.set_thread_ts(&ts)?;
    ctx.github().update_pull_request_body(ctx.repo(), pr.number, &body.render())?;
    output.body_updates += 1;
    output.thread_ts = Some(ts.clone());

    let commits = ctx.github().list_pull_request_commits(ctx.repo(), pr.number)?;
    let Some(last) = commits.last() else {
        return Ok(output.skipped("pull request has no commits"));
    };

    let linker = ctx.linker();
    let messages = commit_list_messages(
        &config.templates.commit_list,
        &commits,
        pr,
        CommitListOptions {
            linker: &linker,
            identities: &config.identities,
            categorized: config.sort_commits,
        },
    )?;
    debug!(commits = commits.len(), chunks = messages.len(), "rendered commit list");

    for text in messages {
        ctx.post(text, Some(&ts))?;
        output.messages_sent += 1;
    }

    body.set_last_processed_commit(&last.sha);
    ctx.github().update_pull_request_body(ctx.repo(), pr.number, &body.render())?;
    output.body_updates += 1;

    info!(pr = pr.number, commits = commits.len(), "posted commit list");
    Ok(output)
}
