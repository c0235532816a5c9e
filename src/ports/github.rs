use crate::domain::{AppError, Commit, RepoId};

/// Port for GitHub pull request operations.
pub trait GitHubPort {
    /// List every commit on the pull request, following pagination to the end.
    fn list_pull_request_commits(
        &self,
        repo: &RepoId,
        pr_number: u64,
    ) -> Result<Vec<Commit>, AppError>;

    /// Replace the pull request description.
    fn update_pull_request_body(
        &self,
        repo: &RepoId,
        pr_number: u64,
        body: &str,
    ) -> Result<(), AppError>;
}
