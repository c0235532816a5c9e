//! Front-matter markers stored in the pull request description.
//!
//! Grammar:
//!
//! ```text
//! body         := front-matter? rest
//! front-matter := (marker-line NEWLINE)+ (NEWLINE | EOF)
//! marker-line  := KEY ": " VALUE
//! KEY          := "Slack message_ts" | "Last processed commit"
//! ```
//!
//! Only the leading block is inspected, so marker-like text further down the
//! description is left alone. `NEWLINE` is `\n` or `\r\n`. The rest of the
//! body is preserved byte for byte.

use crate::domain::AppError;

pub const THREAD_TS_KEY: &str = "Slack message_ts";
pub const LAST_COMMIT_KEY: &str = "Last processed commit";

/// Parsed description: known markers plus the untouched remainder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrBody {
    thread_ts: Option<String>,
    last_processed_commit: Option<String>,
    rest: String,
}

impl PrBody {
    pub fn parse(body: &str) -> Self {
        let mut parsed = PrBody::default();
        let mut offset = 0;
        let mut saw_marker = false;

        for line in body.split_inclusive('\n') {
            let content = line.trim_end_matches('\n').trim_end_matches('\r');
            if content.is_empty() {
                if saw_marker {
                    offset += line.len();
                }
                break;
            }
            match parse_marker_line(content) {
                Some((key, value)) => {
                    match key {
                        THREAD_TS_KEY => parsed.thread_ts = Some(value.to_string()),
                        _ => parsed.last_processed_commit = Some(value.to_string()),
                    }
                    saw_marker = true;
                    offset += line.len();
                }
                None => break,
            }
        }

        parsed.rest = body[offset..].to_string();
        parsed
    }

    pub fn thread_ts(&self) -> Option<&str> {
        self.thread_ts.as_deref()
    }

    /// Thread timestamp, or `MissingThreadMarker` when absent.
    pub fn require_thread_ts(&self) -> Result<&str, AppError> {
        self.thread_ts().ok_or(AppError::MissingThreadMarker)
    }

    pub fn last_processed_commit(&self) -> Option<&str> {
        self.last_processed_commit.as_deref()
    }

    /// Description text below the front matter.
    #[cfg(test)]
    pub(crate) fn rest(&self) -> &str {
        &self.rest
    }

    /// Record the thread timestamp. It is written once and never replaced.
    pub fn set_thread_ts(&mut self, ts: &str) -> Result<(), AppError> {
        if let Some(existing) = &self.thread_ts {
            return Err(AppError::ThreadMarkerExists(existing.clone()));
        }
        self.thread_ts = Some(ts.to_string());
        Ok(())
    }

    pub fn set_last_processed_commit(&mut self, sha: &str) {
        self.last_processed_commit = Some(sha.to_string());
    }

    pub fn render(&self) -> String {
        let mut markers = Vec::new();
        if let Some(ts) = &self.thread_ts {
            markers.push(format!("{}: {}", THREAD_TS_KEY, ts));
        }
        if let Some(sha) = &self.last_processed_commit {
            markers.push(format!("{}: {}", LAST_COMMIT_KEY, sha));
        }
        if markers.is_empty() {
            return self.rest.clone();
        }
        format!("{}\n\n{}", markers.join("\n"), self.rest)
    }
}

fn parse_marker_line(line: &str) -> Option<(&'static str, &str)> {
    [THREAD_TS_KEY, LAST_COMMIT_KEY].into_iter().find_map(|key| {
        let value = line.strip_prefix(key)?.strip_prefix(':')?.trim();
        (!value.is_empty()).then_some((key, value))
    })
}
