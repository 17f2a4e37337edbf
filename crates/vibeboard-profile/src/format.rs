use vibeboard_core::Summary;

/// Renders a summary as the text block published to the profile.
///
/// ```
/// # use vibeboard_core::Summary;
/// let summary = Summary {
///     bio: "Rust好き".into(),
///     tags: vec!["Rust".into(), "VRChat".into()],
///     feel: "ねむい".into(),
///     theme_color: "#ffb7b2".into(),
/// };
/// assert_eq!(
///     vibeboard_profile::format_profile_bio(&summary),
///     "Rust好き\nCurrent feel: ねむい\nTags: #Rust #VRChat"
/// );
/// ```
#[must_use]
pub fn format_profile_bio(summary: &Summary) -> String {
    let tags = summary
        .tags
        .iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{}\nCurrent feel: {}\nTags: {tags}",
        summary.bio, summary.feel
    )
}

/// Full bio text: the fixed prefix line, a blank line, then the analysis.
#[must_use]
pub fn compose_bio(prefix: &str, text: &str) -> String {
    format!("{prefix}\n\n# Todays Gemini Analysis\n{text}")
}
