//! Notification configuration domain models.

use url::Url;

use crate::domain::{AppError, UserIdentityMap};

pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GITHUB_SERVER_URL: &str = "https://github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_INITIAL_TEMPLATE: &str =
    "PR opened: <${prUrl}|${prTitle}> (`${branchName}` into `${targetBranch}`)";
pub const DEFAULT_COMMIT_LIST_TEMPLATE: &str =
    "Commits:\\n${commitListMessage}\\nCompare changes: ${changelogUrl}";
pub const DEFAULT_UPDATE_TEMPLATE: &str =
    "New commit: <${commitUrl}|${commitSubject}> by ${userMention}";
pub const DEFAULT_CLOSE_TEMPLATE: &str = "PR merged: <${prUrl}|${prTitle}> by ${mergedBy}";

/// Slack Web API settings.
#[derive(Clone)]
pub struct SlackSettings {
    pub bot_token: String,
    pub channel: String,
    pub api_url: Url,
}

impl std::fmt::Debug for SlackSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackSettings")
            .field("bot_token", &"[REDACTED]")
            .field("channel", &self.channel)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// GitHub REST API settings.
#[derive(Clone)]
pub struct GitHubSettings {
    pub token: String,
    pub api_url: Url,
    /// Web host used for commit and compare links.
    pub server_url: Url,
}

impl std::fmt::Debug for GitHubSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubSettings")
            .field("token", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .field("server_url", &self.server_url)
            .finish()
    }
}

/// Message templates, one per notification kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplates {
    pub initial: String,
    pub commit_list: String,
    pub update: String,
    pub close: String,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            initial: DEFAULT_INITIAL_TEMPLATE.to_string(),
            commit_list: DEFAULT_COMMIT_LIST_TEMPLATE.to_string(),
            update: DEFAULT_UPDATE_TEMPLATE.to_string(),
            close: DEFAULT_CLOSE_TEMPLATE.to_string(),
        }
    }
}

/// Fully resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub slack: SlackSettings,
    pub github: GitHubSettings,
    pub templates: MessageTemplates,
    pub identities: UserIdentityMap,
    /// Group the commit list by conventional-commit scope.
    pub sort_commits: bool,
    pub timeout_secs: u64,
}

impl NotifyConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.slack.bot_token.trim().is_empty() {
            return Err(AppError::config_error("slack-bot-token must not be empty"));
        }
        if self.slack.channel.trim().is_empty() {
            return Err(AppError::config_error("slack-channel must not be empty"));
        }
        if self.github.token.trim().is_empty() {
            return Err(AppError::config_error("github-token must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("timeout-secs must be greater than 0"));
        }
        Ok(())
    }

    /// Web URL of `repo` on the configured GitHub host.
    pub fn repo_web_url(&self, repo: &crate::domain::RepoId) -> String {
        endpoint(&self.github.server_url, &format!("{}/{}", repo.owner, repo.name))
    }
}

/// Parse a base URL, naming the option in the error.
pub fn parse_base_url(option: &str, value: &str) -> Result<Url, AppError> {
    Url::parse(value.trim()).map_err(|e| {
        AppError::config_error(format!("{} is not a valid URL ('{}'): {}", option, value, e))
    })
}

/// Join `path` onto a base URL without dropping the base path.
pub fn endpoint(base: &Url, path: &str) -> String {
    format!("{}/{}", base.as_str().trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
pub(crate) fn test_config(slack_api: &str, github_api: &str) -> NotifyConfig {
    NotifyConfig {
        slack: SlackSettings {
            bot_token: "slack-token".to_string(),
            channel: "slack-channel".to_string(),
            api_url: Url::parse(slack_api).unwrap(),
        },
        github: GitHubSettings {
            token: "github-token".to_string(),
            api_url: Url::parse(github_api).unwrap(),
            server_url: Url::parse(DEFAULT_GITHUB_SERVER_URL).unwrap(),
        },
        templates: MessageTemplates::default(),
        identities: UserIdentityMap::default(),
        sort_commits: false,
        timeout_secs: 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RepoId;

    #[test]
    fn debug_output_redacts_tokens() {
        let config = test_config("https://slack.test/api", "https://api.github.test");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("slack-token"));
        assert!(!rendered.contains("github-token"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn validate_rejects_blank_channel_and_zero_timeout() {
        let mut config = test_config("https://slack.test/api", "https://api.github.test");
        assert!(config.validate().is_ok());

        config.slack.channel = "  ".to_string();
        assert!(matches!(config.validate(), Err(AppError::Configuration(_))));

        config.slack.channel = "C123".to_string();
        config.timeout_secs = 0;
        assert!(config.validate().unwrap_err().to_string().contains("timeout-secs"));
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let base = Url::parse("https://slack.com/api").unwrap();
        assert_eq!(endpoint(&base, "chat.postMessage"), "https://slack.com/api/chat.postMessage");
        let base = Url::parse("http://127.0.0.1:1234/").unwrap();
        assert_eq!(endpoint(&base, "/repos/o/r"), "http://127.0.0.1:1234/repos/o/r");
    }

    #[test]
    fn repo_web_url_uses_server_host() {
        let config = test_config("https://slack.test/api", "https://api.github.test");
        assert_eq!(
            config.repo_web_url(&RepoId::new("owner", "repo")),
            "https://github.com/owner/repo"
        );
    }

    #[test]
    fn parse_base_url_names_the_option() {
        let err = parse_base_url("slack-api-url", "not a url").unwrap_err();
        assert!(err.to_string().contains("slack-api-url"));
    }
}
