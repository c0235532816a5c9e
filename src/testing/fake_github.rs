use std::sync::Mutex;

use crate::domain::{AppError, Commit, RepoId};
use crate::ports::GitHubPort;

/// Serves a fixed commit list and records body updates.
#[derive(Default)]
pub struct FakeGitHub {
    pub commits: Vec<Commit>,
    pub body_updates: Mutex<Vec<(u64, String)>>,
    pub commit_requests: Mutex<Vec<(RepoId, u64)>>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_commits(commits: Vec<Commit>) -> Self {
        Self { commits, ..Self::default() }
    }

    pub fn body_updates(&self) -> Vec<String> {
        self.body_updates.lock().unwrap().iter().map(|(_, body)| body.clone()).collect()
    }

    pub fn last_body(&self) -> Option<String> {
        self.body_updates().pop()
    }

    pub fn commit_request_count(&self) -> usize {
        self.commit_requests.lock().unwrap().len()
    }
}

impl GitHubPort for FakeGitHub {
    fn list_pull_request_commits(
        &self,
        repo: &RepoId,
        pr_number: u64,
    ) -> Result<Vec<Commit>, AppError> {
        self.commit_requests.lock().unwrap().push((repo.clone(), pr_number));
        Ok(self.commits.clone())
    }

    fn update_pull_request_body(
        &self,
        _repo: &RepoId,
        pr_number: u64,
        body: &str,
    ) -> Result<(), AppError> {
        self.body_updates.lock().unwrap().push((pr_number, body.to_string()));
        Ok(())
    }
}

/// Commit authored by a linked GitHub account.
pub fn commit(sha: &str, message: &str, login: &str) -> Commit {
    Commit {
        sha: sha.to_string(),
        message: message.to_string(),
        author_login: Some(login.to_string()),
        author_name: login.to_string(),
    }
}
