//! Delimited-text record parser.
//!
//! Turns a comma-separated export (header line first) into [`Post`]s using
//! standard CSV quoting: a `"` toggles the quoted state and `""` inside a
//! quoted region is a literal quote. Rows end at `\n`, `\r\n` or `\r`
//! outside quotes.
//!
//! Complete rows take the first field as content and the **last** field as
//! the timestamp. A final row without a closing newline takes the first
//! **two** fields instead. Rows whose timestamp does not parse are dropped.

use std::path::Path;

use vibeboard_core::Post;

use crate::error::FeedError;

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Parses delimited text into posts. Never fails; malformed rows are skipped.
///
/// Output order follows the input; callers sort with
/// [`vibeboard_core::sort_by_recency`].
#[must_use]
pub fn parse_posts_csv(text: &str) -> Vec<Post> {
    let body = match text.find('\n') {
        Some(idx) => &text[idx + 1..],
        None => text,
    };

    let mut posts = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            QUOTE => {
                if in_quotes && chars.peek() == Some(&QUOTE) {
                    cell.push(QUOTE);
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            DELIMITER if !in_quotes => row.push(std::mem::take(&mut cell)),
            '\r' | '\n' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut cell));
                posts.extend(complete_row(std::mem::take(&mut row)));
            }
            _ => cell.push(ch),
        }
    }

    if !cell.is_empty() {
        row.push(cell);
        posts.extend(trailing_row(row));
    }

    tracing::debug!(count = posts.len(), "parsed delimited records");
    posts
}

/// Reads and parses a delimited file.
///
/// # Errors
///
/// Returns [`FeedError::Io`] if the file cannot be read. Content problems
/// never error.
pub async fn read_posts_csv(path: impl AsRef<Path>) -> Result<Vec<Post>, FeedError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FeedError::Io {
            path: path.display().to_string(),
            source,
        })?;
    Ok(parse_posts_csv(&text))
}

/// First field is content, last field is the timestamp.
fn complete_row(mut fields: Vec<String>) -> Option<Post> {
    if fields.len() < 2 {
        return None;
    }
    let timestamp = fields.pop()?;
    let content = fields.swap_remove(0);
    accept(content, timestamp)
}

/// Unterminated final row: first field is content, second is the timestamp.
fn trailing_row(fields: Vec<String>) -> Option<Post> {
    let mut fields = fields.into_iter();
    let content = fields.next()?;
    let timestamp = fields.next()?;
    accept(content, timestamp)
}

fn accept(content: String, timestamp: String) -> Option<Post> {
    let post = Post::from_raw(content, timestamp.clone());
    if post.is_none() {
        tracing::debug!(timestamp = %timestamp, "dropping record with unparseable timestamp");
    }
    post
}
