//! Markdown rendering of the dashboard.

use std::fmt::Write as _;
use std::sync::LazyLock;

use chrono::FixedOffset;
use regex::Regex;
use vibeboard_core::{HourlyActivity, Post, Summary};
use vibeboard_summary::SummaryState;

/// Widest bar in the hourly chart, in cells.
const BAR_WIDTH: usize = 30;

const UNAVAILABLE_MESSAGE: &str = "Analysis unavailable. Check API Key.";

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s]+").expect("valid regex"));

/// What the summary card shows.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SummaryCard {
    Pending,
    Ready(Summary),
    Unavailable,
}

impl SummaryCard {
    /// Maps a session's state and cached summary onto a card. A session that
    /// never started (no posts) shows as unavailable.
    pub(crate) fn from_session(state: SummaryState, summary: Option<&Summary>) -> Self {
        match (state, summary) {
            (SummaryState::Pending, _) => Self::Pending,
            (_, Some(summary)) => Self::Ready(summary.clone()),
            _ => Self::Unavailable,
        }
    }
}

/// Everything the dashboard displays.
#[derive(Debug)]
pub(crate) struct Dashboard {
    pub author_name: String,
    /// Avatar from the author's profile metadata, when known.
    pub avatar_url: Option<String>,
    pub offset: FixedOffset,
    /// Most recent first.
    pub posts: Vec<Post>,
    pub activity: HourlyActivity,
    pub card: SummaryCard,
}

pub(crate) fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", dashboard.author_name);
    out.push('\n');
    if let Some(url) = &dashboard.avatar_url {
        let _ = writeln!(out, "![avatar]({url})");
        out.push('\n');
    }

    render_card(&mut out, &dashboard.card);
    render_stats(&mut out, dashboard);
    render_timeline(&mut out, dashboard);
    out
}

fn render_card(out: &mut String, card: &SummaryCard) {
    out.push_str("## Gemini Analysis ✨\n\n");
    match card {
        SummaryCard::Pending => out.push_str("_AI is thinking..._\n"),
        SummaryCard::Unavailable => {
            let _ = writeln!(out, "{UNAVAILABLE_MESSAGE}");
        }
        SummaryCard::Ready(summary) => {
            if !summary.tags.is_empty() {
                let tags: Vec<String> = summary.tags.iter().map(|t| format!("`#{t}`")).collect();
                let _ = writeln!(out, "{}", tags.join(" "));
                out.push('\n');
            }
            let _ = writeln!(out, "{}", summary.bio);
            out.push('\n');
            let _ = writeln!(out, "**CURRENT FEEL**: {}", summary.feel);
            let _ = writeln!(out, "**Theme color**: `{}`", summary.theme_color);
        }
    }
    out.push('\n');
}

fn render_stats(out: &mut String, dashboard: &Dashboard) {
    let activity = &dashboard.activity;
    let _ = writeln!(out, "**Total posts**: {}", dashboard.posts.len());
    out.push('\n');
    let _ = writeln!(out, "## Activity by hour (UTC{})", dashboard.offset);
    out.push('\n');

    let max = activity.buckets().iter().map(|b| b.count).max().unwrap_or(0);
    out.push_str("```\n");
    for bucket in activity.buckets() {
        let _ = writeln!(
            out,
            "{:02}:00 | {:<width$} {}",
            bucket.hour,
            bar(bucket.count, max),
            bucket.count,
            width = BAR_WIDTH
        );
    }
    out.push_str("```\n");

    if let Some(peak) = activity.peak().filter(|p| p.count > 0) {
        out.push('\n');
        let _ = writeln!(out, "Peak hour: {:02}:00 ({} posts)", peak.hour, peak.count);
    }
    out.push('\n');
}

/// Bar scaled against `max`. Non-zero counts get at least one cell.
fn bar(count: usize, max: usize) -> String {
    if count == 0 || max == 0 {
        return String::new();
    }
    let cells = (count * BAR_WIDTH / max).max(1);
    "█".repeat(cells)
}

fn render_timeline(out: &mut String, dashboard: &Dashboard) {
    out.push_str("## Timeline\n\n");
    if dashboard.posts.is_empty() {
        out.push_str("_No posts yet._\n");
        return;
    }
    for post in &dashboard.posts {
        let when = post.date.with_timezone(&dashboard.offset).format("%m/%d %H:%M");
        let body = linkify(post.display_content()).replace('\n', "\n  ");
        let _ = writeln!(out, "- **{when}** {body}");
    }
}

/// Replaces each `http(s)://` URL with a Markdown `link ↗` anchor.
pub(crate) fn linkify(text: &str) -> String {
    URL_RE.replace_all(text, "[link ↗]($0)").into_owned()
}
