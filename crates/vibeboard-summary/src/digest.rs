//! Digest and prompt construction for the summarizer.

use vibeboard_core::Post;

/// Maximum number of posts included in a digest.
pub const DIGEST_LIMIT: usize = 150;

/// Renders the first [`DIGEST_LIMIT`] posts as `YYYY-MM-DD: content`, one per line.
///
/// `posts` is expected most-recent-first, so the digest covers the latest
/// activity. Dates are UTC calendar dates.
#[must_use]
pub fn build_digest(posts: &[Post]) -> String {
    posts
        .iter()
        .take(DIGEST_LIMIT)
        .map(|p| format!("{}: {}", p.date.format("%Y-%m-%d"), p.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wraps `digest` in the fixed instruction template.
#[must_use]
pub fn build_prompt(author_name: &str, digest: &str) -> String {
    format!(
        "You are a creative social media analyst specializing in stylish web aesthetics.

Analyze the following social media posts from a user named \"{author_name}\".

Generate a profile summary in JSON format with the following fields:
- bio: A creative, slightly tech-savvy biography (2-3 sentences) in Japanese.
- tags: A list of 5-7 short hashtags or keywords (without \"#\") representing their interests.
- vibe: A short, catchy phrase describing their overall \"feel\" in Japanese (2-3 words and emojis).
- themeColor: A hex color code that matches their vibe (pastel or vibrant).

Posts:
{digest}"
    )
}
