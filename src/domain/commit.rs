//! Commit model and author identity mapping.

use std::collections::BTreeMap;

use crate::domain::AppError;

/// A commit on the pull request head, in the order GitHub lists them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub sha: String,
    /// Full message; the first line is the subject.
    pub message: String,
    pub author_login: Option<String>,
    /// Git author name, used when the commit is not linked to a GitHub account.
    pub author_name: String,
}

impl Commit {
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or_default().trim_end()
    }

    /// GitHub login when linked, otherwise the git author name.
    pub fn author_handle(&self) -> &str {
        self.author_login.as_deref().unwrap_or(&self.author_name)
    }
}

/// Mapping from GitHub login to Slack user id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserIdentityMap {
    entries: BTreeMap<String, String>,
}

impl UserIdentityMap {
    /// Parse the JSON object form supplied as an action input.
    ///
    /// An empty or whitespace-only input yields an empty map.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let entries: BTreeMap<String, String> = serde_json::from_str(raw).map_err(|e| {
            AppError::config_error(format!(
                "github-to-slack-map must be a JSON object of string values: {}",
                e
            ))
        })?;
        Ok(Self { entries })
    }

    pub fn slack_id(&self, login: &str) -> Option<&str> {
        self.entries.get(login).map(String::as_str)
    }

    /// Slack mention for the commit author.
    ///
    /// Mapped logins render as `<@ID>`, unmapped logins as `@login`, and
    /// commits without a linked account as the bare author name.
    pub fn mention(&self, commit: &Commit) -> String {
        match commit.author_login.as_deref() {
            Some(login) => match self.slack_id(login) {
                Some(id) => format!("<@{}>", id),
                None => format!("@{}", login),
            },
            None => commit.author_name.clone(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UserIdentityMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}
