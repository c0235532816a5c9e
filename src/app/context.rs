use crate::domain::commit_list::CommitLinker;
use crate::domain::{AppError, NotifyConfig, RepoId};
use crate::ports::{GitHubPort, PostedMessage, SlackMessage, SlackPort};

/// Application context holding dependencies for one handler invocation.
pub struct AppContext<S: SlackPort, G: GitHubPort> {
    slack: S,
    github: G,
    config: NotifyConfig,
    repo: RepoId,
}

impl<S: SlackPort, G: GitHubPort> AppContext<S, G> {
    /// Create a new application context.
    pub fn new(slack: S, github: G, config: NotifyConfig, repo: RepoId) -> Self {
        Self { slack, github, config, repo }
    }

    /// Get a reference to the Slack client.
    pub fn slack(&self) -> &S {
        &self.slack
    }

    /// Get a reference to the GitHub client.
    pub fn github(&self) -> &G {
        &self.github
    }

    pub fn config(&self) -> &NotifyConfig {
        &self.config
    }

    /// Repository the triggering pull request belongs to.
    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    pub fn linker(&self) -> CommitLinker {
        CommitLinker::new(self.config.repo_web_url(&self.repo))
    }

    /// Post `text` to the configured channel, optionally as a thread reply.
    pub fn post(&self, text: String, thread_ts: Option<&str>) -> Result<PostedMessage, AppError> {
        let message = SlackMessage {
            channel: self.config.slack.channel.clone(),
            text,
            thread_ts: thread_ts.map(str::to_string),
        };
        self.slack.post_message(&message)
    }
}
