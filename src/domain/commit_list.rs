//! Commit list rendering for the opened-thread summary.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Commit, UserIdentityMap};

/// Bucket for commits whose subject carries no conventional scope.
pub const OTHER_SCOPE: &str = "other";

static CONVENTIONAL_SUBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>[A-Za-z][\w-]*)\((?P<scopes>[^)]*)\)!?:\s*\S").expect("valid regex")
});

/// Builds commit links on the repository web host.
#[derive(Debug, Clone)]
pub struct CommitLinker {
    repo_url: String,
}

impl CommitLinker {
    /// `repo_url` is the repository web URL, e.g. `https://github.com/owner/repo`.
    pub fn new(repo_url: impl Into<String>) -> Self {
        Self { repo_url: repo_url.into().trim_end_matches('/').to_string() }
    }

    pub fn commit_url(&self, sha: &str) -> String {
        format!("{}/commit/{}", self.repo_url, sha)
    }

    pub fn compare_url(&self, target: &str, source: &str) -> String {
        format!("{}/compare/{}...{}", self.repo_url, target, source)
    }
}

/// Render one `- <url|subject> by mention` line.
pub fn commit_line(commit: &Commit, linker: &CommitLinker, identities: &UserIdentityMap) -> String {
    format!(
        "- <{}|{}> by {}",
        linker.commit_url(&commit.sha),
        commit.subject(),
        identities.mention(commit)
    )
}

/// Render commits in the order given, one line each.
pub fn render_commit_list(
    commits: &[Commit],
    linker: &CommitLinker,
    identities: &UserIdentityMap,
) -> String {
    commits.iter().map(|c| commit_line(c, linker, identities)).collect::<Vec<_>>().join("\n")
}

/// Render commits grouped under a bold heading per scope.
///
/// A commit touching several scopes is listed once, under its first scope.
/// Scopes appear in lexical order; within a scope commits are sorted by type
/// and then by subject. Unscoped commits land in the `other` bucket.
pub fn render_categorized_commit_list(
    commits: &[Commit],
    linker: &CommitLinker,
    identities: &UserIdentityMap,
) -> String {
    let mut scopes: BTreeMap<String, Vec<(String, &Commit)>> = BTreeMap::new();
    for commit in commits {
        let (scope, kind) = classify(commit.subject());
        scopes.entry(scope).or_default().push((kind, commit));
    }

    let mut lines = Vec::new();
    for (scope, mut entries) in scopes {
        entries.sort_by(|(a_kind, a), (b_kind, b)| {
            a_kind.cmp(b_kind).then_with(|| a.subject().cmp(b.subject()))
        });
        lines.push(format!("*{}*", capitalize(&scope)));
        lines.extend(entries.into_iter().map(|(_, c)| commit_line(c, linker, identities)));
    }
    lines.join("\n")
}

/// True for the bold scope heading lines of a categorized list.
pub fn is_scope_heading(line: &str) -> bool {
    line.len() > 2 && line.starts_with('*') && line.ends_with('*')
}

/// Returns `(first scope, type)` for a conventional subject.
fn classify(subject: &str) -> (String, String) {
    let Some(caps) = CONVENTIONAL_SUBJECT.captures(subject) else {
        return (OTHER_SCOPE.to_string(), String::new());
    };
    let kind = caps["type"].to_lowercase();
    let scope = caps["scopes"].split(',').map(str::trim).find(|s| !s.is_empty());
    match scope {
        Some(scope) => (scope.to_lowercase(), kind),
        None => (OTHER_SCOPE.to_string(), kind),
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(sha: &str, message: &str, login: Option<&str>) -> Commit {
        Commit {
            sha: sha.to_string(),
            message: message.to_string(),
            author_login: login.map(str::to_string),
            author_name: "author".to_string(),
        }
    }

    fn linker() -> CommitLinker {
        CommitLinker::new("https://github.com/owner/repo")
    }

    #[test]
    fn renders_link_subject_and_mention() {
        let identities: UserIdentityMap = [("githubUser", "slackUser")].into_iter().collect();
        let commits = vec![commit("commit1", "Initial commit\nwith newline", Some("githubUser"))];
        assert_eq!(
            render_commit_list(&commits, &linker(), &identities),
            "- <https://github.com/owner/repo/commit/commit1|Initial commit> by <@slackUser>"
        );
    }

    #[test]
    fn builds_compare_url() {
        assert_eq!(
            linker().compare_url("main", "feature-branch"),
            "https://github.com/owner/repo/compare/main...feature-branch"
        );
    }

    #[test]
    fn multi_scope_commit_is_filed_once_under_first_scope() {
        let commits = vec![commit("s1", "fix(a,b): shared change", None)];
        let out = render_categorized_commit_list(&commits, &linker(), &UserIdentityMap::default());
        assert_eq!(out.matches("shared change").count(), 1);
        assert_eq!(
            out,
            "*A*\n- <https://github.com/owner/repo/commit/s1|fix(a,b): shared change> by author"
        );
    }

    #[test]
    fn groups_by_scope_and_sorts_by_type_then_subject() {
        let commits = vec![
            commit("1", "fix(ui): zebra", None),
            commit("2", "feat(api): add route", None),
            commit("3", "chore: bump deps", None),
            commit("4", "feat(ui): button", None),
            commit("5", "fix(ui): alignment", None),
        ];
        let out = render_categorized_commit_list(&commits, &linker(), &UserIdentityMap::default());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "*Api*");
        assert!(lines[1].contains("feat(api): add route"));
        assert_eq!(lines[2], "*Other*");
        assert!(lines[3].contains("chore: bump deps"));
        assert_eq!(lines[4], "*Ui*");
        assert!(lines[5].contains("feat(ui): button"));
        assert!(lines[6].contains("fix(ui): alignment"));
        assert!(lines[7].contains("fix(ui): zebra"));
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn empty_scope_list_falls_back_to_other() {
        assert_eq!(classify("feat(): nothing"), ("other".to_string(), "feat".to_string()));
        assert_eq!(classify("Merge branch main"), ("other".to_string(), String::new()));
    }

    #[test]
    fn scope_headings_are_recognized() {
        assert!(is_scope_heading("*Api*"));
        assert!(!is_scope_heading("*"));
        assert!(!is_scope_heading("- <https://github.com/owner/repo/commit/1|fix> by dev"));
    }
}
