//! CLI Adapter.
//!
//! Every option doubles as the environment variable GitHub Actions sets for
//! the matching action input (`INPUT_<NAME>`), so the binary runs unchanged
//! as an action step or from a shell.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::adapters::event_payload::load_event;
use crate::app::commands::output::write_workflow_output;
use crate::domain::configuration::notify_config::{
    DEFAULT_CLOSE_TEMPLATE, DEFAULT_COMMIT_LIST_TEMPLATE, DEFAULT_GITHUB_API_URL,
    DEFAULT_GITHUB_SERVER_URL, DEFAULT_INITIAL_TEMPLATE, DEFAULT_SLACK_API_URL,
    DEFAULT_TIMEOUT_SECS, DEFAULT_UPDATE_TEMPLATE, parse_base_url,
};
use crate::domain::{
    AppError, GitHubSettings, MessageTemplates, NotifyConfig, SlackSettings, UserIdentityMap,
};

#[derive(Parser)]
#[command(name = "slack-pr-notify")]
#[command(version)]
#[command(
    about = "Thread pull request lifecycle notifications into a Slack channel",
    long_about = None
)]
struct Cli {
    /// Slack bot token used for chat.postMessage
    #[arg(long, env = "INPUT_SLACK-BOT-TOKEN", hide_env_values = true)]
    slack_bot_token: String,

    /// Slack channel id to post into
    #[arg(long, env = "INPUT_SLACK-CHANNEL")]
    slack_channel: String,

    /// GitHub token with pull request write access
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    github_token: String,

    /// Template for the message that starts the thread
    #[arg(long, env = "INPUT_INITIAL-MESSAGE-TEMPLATE", default_value = DEFAULT_INITIAL_TEMPLATE)]
    initial_message_template: String,

    /// Template for each commit pushed to an open pull request
    #[arg(long, env = "INPUT_UPDATE-MESSAGE-TEMPLATE", default_value = DEFAULT_UPDATE_TEMPLATE)]
    update_message_template: String,

    /// Template for the merge announcement
    #[arg(long, env = "INPUT_CLOSE-MESSAGE-TEMPLATE", default_value = DEFAULT_CLOSE_TEMPLATE)]
    close_message_template: String,

    /// Template wrapping the commit list posted when the pull request opens
    #[arg(
        long,
        env = "INPUT_COMMIT-LIST-MESSAGE-TEMPLATE",
        default_value = DEFAULT_COMMIT_LIST_TEMPLATE
    )]
    commit_list_message_template: String,

    /// JSON object mapping GitHub logins to Slack user ids
    #[arg(long, env = "INPUT_GITHUB-TO-SLACK-MAP", default_value = "")]
    github_to_slack_map: String,

    /// Group the commit list by conventional-commit scope
    #[arg(
        long,
        env = "INPUT_SORT-COMMITS",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    sort_commits: bool,

    /// Path to the pull_request event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: PathBuf,

    /// `owner/repo`, used when the payload carries no repository
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_GITHUB_API_URL)]
    github_api_url: String,

    #[arg(long, env = "GITHUB_SERVER_URL", default_value = DEFAULT_GITHUB_SERVER_URL)]
    github_server_url: String,

    #[arg(long, env = "SLACK_API_URL", default_value = DEFAULT_SLACK_API_URL)]
    slack_api_url: String,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

impl Cli {
    fn config(&self) -> Result<NotifyConfig, AppError> {
        let config = NotifyConfig {
            slack: SlackSettings {
                bot_token: self.slack_bot_token.clone(),
                channel: self.slack_channel.clone(),
                api_url: parse_base_url("slack-api-url", &self.slack_api_url)?,
            },
            github: GitHubSettings {
                token: self.github_token.clone(),
                api_url: parse_base_url("github-api-url", &self.github_api_url)?,
                server_url: parse_base_url("github-server-url", &self.github_server_url)?,
            },
            templates: MessageTemplates {
                initial: self.initial_message_template.clone(),
                commit_list: self.commit_list_message_template.clone(),
                update: self.update_message_template.clone(),
                close: self.close_message_template.clone(),
            },
            identities: UserIdentityMap::from_json(&self.github_to_slack_map)?,
            sort_commits: self.sort_commits,
            timeout_secs: self.timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Entry point for the CLI.
pub fn run() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = execute(&cli) {
        error!(error = %e, "notification failed");
        eprintln!("Error: {}", e);
        println!("::error::{}", escape_workflow_data(&e.to_string()));
        std::process::exit(1);
    }
}

fn execute(cli: &Cli) -> Result<(), AppError> {
    let config = cli.config()?;
    let event = load_event(&cli.event_path)?;
    let output = crate::notify(config, &event, cli.repository.as_deref())?;
    write_workflow_output(&output)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Escape text for a `::error::` workflow command.
fn escape_workflow_data(text: &str) -> String {
    text.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}
