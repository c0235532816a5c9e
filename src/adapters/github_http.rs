//! GitHub REST client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, LINK, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use super::http_response::{api_error, transport_error};
use crate::domain::configuration::notify_config::endpoint;
use crate::domain::{AppError, Commit, GitHubSettings, RepoId};
use crate::ports::GitHubPort;

const SERVICE: &str = "GitHub";
const PAGE_SIZE: u32 = 100;
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// HTTP client for the GitHub REST API.
#[derive(Clone)]
pub struct HttpGitHubClient {
    token: String,
    api_url: Url,
    client: Client,
}

impl std::fmt::Debug for HttpGitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGitHubClient")
            .field("api_url", &self.api_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl HttpGitHubClient {
    pub fn new(settings: &GitHubSettings, timeout_secs: u64) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { token: settings.token.clone(), api_url: settings.api_url.clone(), client })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, AppError> {
        self.client
            .get(url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, env!("CARGO_PKG_NAME"))
            .send()
            .map_err(|e| transport_error(SERVICE, e))
    }
}

#[derive(Debug, Deserialize)]
struct CommitEntry {
    sha: String,
    commit: CommitDetail,
    #[serde(default)]
    author: Option<AccountRef>,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
    #[serde(default)]
    author: Option<GitAuthor>,
}

#[derive(Debug, Deserialize)]
struct GitAuthor {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccountRef {
    #[serde(default)]
    login: Option<String>,
}

impl From<CommitEntry> for Commit {
    fn from(entry: CommitEntry) -> Self {
        Commit {
            sha: entry.sha,
            message: entry.commit.message,
            author_login: entry.author.and_then(|a| a.login),
            author_name: entry.commit.author.and_then(|a| a.name).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct UpdateBodyRequest<'a> {
    body: &'a str,
}

impl GitHubPort for HttpGitHubClient {
    fn list_pull_request_commits(
        &self,
        repo: &RepoId,
        pr_number: u64,
    ) -> Result<Vec<Commit>, AppError> {
        let mut commits = Vec::new();
        let mut next = Some(endpoint(
            &self.api_url,
            &format!(
                "repos/{}/{}/pulls/{}/commits?per_page={}",
                repo.owner, repo.name, pr_number, PAGE_SIZE
            ),
        ));
        let mut pages = 0;

        while let Some(url) = next.take() {
            let response = self.get(&url)?;
            if !response.status().is_success() {
                return Err(api_error(SERVICE, response));
            }
            pages += 1;

            let link = response
                .headers()
                .get(LINK)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);

            let page: serde_json::Value = response
                .json()
                .map_err(|e| AppError::parse_error("GitHub commits page", e))?;
            let serde_json::Value::Array(entries) = page else {
                warn!(page = pages, "commit page is not a list; stopping");
                break;
            };
            if entries.is_empty() {
                break;
            }
            for entry in entries {
                let entry: CommitEntry = serde_json::from_value(entry)
                    .map_err(|e| AppError::parse_error("GitHub commit entry", e))?;
                commits.push(Commit::from(entry));
            }

            next = link.as_deref().and_then(next_page_url);
        }

        debug!(pages, commits = commits.len(), "fetched pull request commits");
        Ok(commits)
    }

    fn update_pull_request_body(
        &self,
        repo: &RepoId,
        pr_number: u64,
        body: &str,
    ) -> Result<(), AppError> {
        let url =
            endpoint(&self.api_url, &format!("repos/{}/{}/pulls/{}", repo.owner, repo.name, pr_number));
        let response = self
            .client
            .patch(url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, env!("CARGO_PKG_NAME"))
            .json(&UpdateBodyRequest { body })
            .send()
            .map_err(|e| transport_error(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(api_error(SERVICE, response));
        }
        Ok(())
    }
}

/// Extract the `rel="next"` target from an RFC 8288 `Link` header.
pub fn next_page_url(link_header: &str) -> Option<String> {
    link_header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let url = target.strip_prefix('<')?.strip_suffix('>')?;
        let is_next = parts.any(|param| {
            let Some((key, value)) = param.split_once('=') else {
                return false;
            };
            key.trim().eq_ignore_ascii_case("rel")
                && value.trim().trim_matches('"').split_whitespace().any(|rel| rel == "next")
        });
        is_next.then(|| url.to_string())
    })
}
