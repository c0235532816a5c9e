//! Shared testing utilities for slack-pr-notify CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Inputs and GitHub-provided variables the binary reads from the environment.
const INHERITED_ENV: &[&str] = &[
    "INPUT_SLACK-BOT-TOKEN",
    "INPUT_SLACK-CHANNEL",
    "INPUT_GITHUB-TOKEN",
    "INPUT_INITIAL-MESSAGE-TEMPLATE",
    "INPUT_UPDATE-MESSAGE-TEMPLATE",
    "INPUT_CLOSE-MESSAGE-TEMPLATE",
    "INPUT_COMMIT-LIST-MESSAGE-TEMPLATE",
    "INPUT_GITHUB-TO-SLACK-MAP",
    "INPUT_SORT-COMMITS",
    "GITHUB_EVENT_PATH",
    "GITHUB_REPOSITORY",
    "GITHUB_API_URL",
    "GITHUB_SERVER_URL",
    "GITHUB_OUTPUT",
    "SLACK_API_URL",
];

/// Isolated environment: a temp dir for the event payload and `GITHUB_OUTPUT`.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    pub fn event_path(&self) -> PathBuf {
        self.root.path().join("event.json")
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.path().join("github_output")
    }

    /// Write the trigger payload.
    pub fn write_event(&self, payload: &serde_json::Value) {
        fs::write(self.event_path(), payload.to_string()).expect("Failed to write event payload");
    }

    /// Lines appended to `GITHUB_OUTPUT`, empty when nothing was written.
    pub fn output_lines(&self) -> Vec<String> {
        fs::read_to_string(self.output_path())
            .map(|content| content.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Build a command with credentials set and both APIs pointed at mock servers.
    pub fn cli(&self, slack_url: &str, github_url: &str) -> Command {
        let mut cmd = Command::cargo_bin("slack-pr-notify").expect("Failed to locate binary");
        for name in INHERITED_ENV {
            cmd.env_remove(name);
        }
        cmd.current_dir(self.root.path())
            .env("GITHUB_OUTPUT", self.output_path())
            .env("RUST_LOG", "slack_pr_notify=debug")
            .args(["--slack-bot-token", "slackToken"])
            .args(["--slack-channel", "slackChannelId"])
            .args(["--github-token", "githubToken"])
            .args(["--slack-api-url", slack_url])
            .args(["--github-api-url", github_url])
            .args(["--github-server-url", "https://github.com"])
            .arg("--event-path")
            .arg(self.event_path());
        cmd
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }
}

/// Payload for a pull request event on `owner/repo`.
#[allow(dead_code)]
pub fn pull_request_event(action: &str, body: &str, merged: bool) -> serde_json::Value {
    serde_json::json!({
        "action": action,
        "pull_request": {
            "number": 1,
            "title": "Test PR",
            "html_url": "http://example.com",
            "head": {"ref": "feature-branch"},
            "base": {"ref": "main"},
            "body": body,
            "commits_url": "https://api.github.com/repos/owner/repo/pulls/1/commits",
            "merged": merged,
            "merged_by": if merged { serde_json::json!({"login": "user"}) } else { serde_json::Value::Null }
        },
        "repository": {"full_name": "owner/repo"}
    })
}
