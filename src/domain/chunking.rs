//! Line-preserving message chunking for Slack's single-message limit.

use tracing::warn;

/// Hard per-message character limit enforced by Slack.
pub const SLACK_MESSAGE_LIMIT: usize = 4000;

/// Soft budget for each chunk of an oversized commit list.
pub const CHUNK_SOFT_LIMIT: usize = 3800;

/// Split `text` into chunks of at most `limit` characters.
///
/// Breaks between lines and trims each chunk. A line longer than `limit` is
/// cut at character boundaries so no chunk ever exceeds the limit.
pub fn chunk_lines(text: &str, limit: usize) -> Vec<String> {
    chunk_lines_keeping(text, limit, |_| false)
}

/// Like [`chunk_lines`], but a line matching `keep_with_next` is never left
/// as the last line of a chunk; it moves to the start of the next one.
pub fn chunk_lines_keeping(
    text: &str,
    limit: usize,
    keep_with_next: impl Fn(&str) -> bool,
) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;

    for line in text.lines() {
        let line_len = char_len(line);
        if line_len > limit {
            warn!(length = line_len, limit, "line exceeds the chunk budget; splitting it");
        }

        for piece in split_at_char_limit(line, limit) {
            let piece_len = char_len(piece);
            if !current.is_empty() && current_len + 1 + piece_len > limit {
                let carry =
                    current.len() > 1 && current.last().is_some_and(|&last| keep_with_next(last));
                let carried = if carry { current.pop() } else { None };
                push_trimmed(&mut chunks, &current.join("\n"));
                current.clear();
                current_len = 0;

                if let Some(heading) = carried {
                    let heading_len = char_len(heading);
                    if heading_len + 1 + piece_len <= limit {
                        current.push(heading);
                        current_len = heading_len;
                    } else {
                        push_trimmed(&mut chunks, heading);
                    }
                }
            }

            if !current.is_empty() {
                current_len += 1;
            }
            current.push(piece);
            current_len += piece_len;
        }
    }
    push_trimmed(&mut chunks, &current.join("\n"));
    chunks
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Cut `line` into pieces of at most `limit` characters.
fn split_at_char_limit(line: &str, limit: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in line.char_indices() {
        if count == limit {
            pieces.push(&line[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    pieces.push(&line[start..]);
    pieces
}

fn push_trimmed(chunks: &mut Vec<String>, chunk: &str) {
    let trimmed = chunk.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
