//! Notification text for each pull request lifecycle message.

use crate::domain::chunking::{CHUNK_SOFT_LIMIT, SLACK_MESSAGE_LIMIT, char_len, chunk_lines, chunk_lines_keeping};
use crate::domain::commit_list::{
    CommitLinker, is_scope_heading, render_categorized_commit_list, render_commit_list,
};
use crate::domain::template::{Substitutions, format_template, split_at_placeholder};
use crate::domain::{AppError, Commit, PullRequestState, UserIdentityMap};

const COMMIT_LIST_PLACEHOLDER: &str = "commitListMessage";
const UNKNOWN_MERGER: &str = "unknown";

/// Top-level message announcing a newly opened pull request.
pub fn initial_message(template: &str, pr: &PullRequestState) -> String {
    let mut subs = pr_substitutions(pr);
    subs.insert("branchName", pr.source_branch.clone());
    subs.insert("targetBranch", pr.target_branch.clone());
    format_template(template, &subs)
}

/// Thread reply announcing a merge.
pub fn close_message(template: &str, pr: &PullRequestState) -> String {
    let mut subs = pr_substitutions(pr);
    subs.insert(
        "mergedBy",
        pr.merged_by_login.clone().unwrap_or_else(|| UNKNOWN_MERGER.to_string()),
    );
    format_template(template, &subs)
}

/// Thread reply announcing one pushed commit.
pub fn update_message(
    template: &str,
    commit: &Commit,
    linker: &CommitLinker,
    identities: &UserIdentityMap,
) -> String {
    let subs: Substitutions<'_> = [
        ("commitUrl", linker.commit_url(&commit.sha)),
        ("commitSha", commit.sha.clone()),
        ("commitMessage", commit.message.trim_end().to_string()),
        ("commitSubject", commit.subject().to_string()),
        ("githubUser", commit.author_handle().to_string()),
        ("userMention", identities.mention(commit)),
    ]
    .into_iter()
    .collect();
    format_template(template, &subs)
}

/// Options for rendering the commit list thread replies.
#[derive(Debug, Clone, Copy)]
pub struct CommitListOptions<'a> {
    pub linker: &'a CommitLinker,
    pub identities: &'a UserIdentityMap,
    /// Group by conventional-commit scope instead of listing in push order.
    pub categorized: bool,
}

/// Thread replies listing every commit, split to respect Slack's length limit.
///
/// A message that fits in one post is returned whole. Otherwise the commit
/// lines are chunked at line boundaries (a scope heading always opens its
/// chunk, and a single overlong line is cut); the rendered template text before
/// `${commitListMessage}` leads the first chunk and the text after it (which
/// carries the changelog link) trails the last one.
pub fn commit_list_messages(
    template: &str,
    commits: &[Commit],
    pr: &PullRequestState,
    options: CommitListOptions<'_>,
) -> Result<Vec<String>, AppError> {
    let list = if options.categorized {
        render_categorized_commit_list(commits, options.linker, options.identities)
    } else {
        render_commit_list(commits, options.linker, options.identities)
    };

    let mut subs: Substitutions<'_> = [
        ("changelogUrl", options.linker.compare_url(&pr.target_branch, &pr.source_branch)),
        ("branchName", pr.source_branch.clone()),
        ("targetBranch", pr.target_branch.clone()),
    ]
    .into_iter()
    .collect();

    let Some((head, tail)) = split_at_placeholder(template, COMMIT_LIST_PLACEHOLDER) else {
        let full = format_template(template, &subs);
        if char_len(&full) <= SLACK_MESSAGE_LIMIT {
            return Ok(vec![full]);
        }
        return Ok(chunk_lines(&full, CHUNK_SOFT_LIMIT));
    };

    let prefix = format_template(head, &subs);
    let suffix = format_template(tail, &subs);
    let overhead = char_len(&prefix) + char_len(&suffix);

    if overhead + char_len(&list) <= SLACK_MESSAGE_LIMIT {
        subs.insert(COMMIT_LIST_PLACEHOLDER, list);
        return Ok(vec![format_template(template, &subs)]);
    }

    if overhead >= SLACK_MESSAGE_LIMIT {
        return Err(AppError::config_error(format!(
            "commit-list-message-template leaves no room for commits ({} characters of {})",
            overhead, SLACK_MESSAGE_LIMIT
        )));
    }
    let budget = CHUNK_SOFT_LIMIT.min(SLACK_MESSAGE_LIMIT - overhead);

    let mut messages = if options.categorized {
        chunk_lines_keeping(&list, budget, is_scope_heading)
    } else {
        chunk_lines(&list, budget)
    };
    if messages.is_empty() {
        messages.push(String::new());
    }
    if let Some(first) = messages.first_mut() {
        first.insert_str(0, &prefix);
    }
    if let Some(last) = messages.last_mut() {
        last.push_str(&suffix);
    }
    Ok(messages)
}

fn pr_substitutions(pr: &PullRequestState) -> Substitutions<'static> {
    [
        ("prUrl", pr.url.clone()),
        ("prTitle", pr.title.clone()),
        ("prNumber", pr.number.to_string()),
    ]
    .into_iter()
    .collect()
}
