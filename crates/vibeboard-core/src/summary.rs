//! Result record of the external summarizer.

use serde::{Deserialize, Serialize};

/// Colour used when the summarizer returns no usable theme colour.
pub const DEFAULT_THEME_COLOR: &str = "#ffb7b2";

/// Structured profile summary produced from a digest of recent posts.
///
/// Lives only in memory for the duration of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Short catch-phrase. Older responses call this field `vibe`.
    #[serde(default, alias = "vibe")]
    pub feel: String,
    #[serde(default)]
    pub theme_color: String,
}

impl Summary {
    /// Returns the summary with tags trimmed of whitespace and any leading `#`,
    /// empty tags removed, and the theme colour normalised.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.tags = self
            .tags
            .into_iter()
            .map(|t| t.trim().trim_start_matches('#').trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self.theme_color = normalize_theme_color(&self.theme_color);
        self
    }
}

/// Normalises `#rgb` / `#rrggbb` (with or without the `#`) to lower-case
/// `#`-prefixed form. Anything else yields [`DEFAULT_THEME_COLOR`].
#[must_use]
pub fn normalize_theme_color(raw: &str) -> String {
    let hex = raw.trim().trim_start_matches('#');
    let valid = matches!(hex.len(), 3 | 6) && hex.bytes().all(|b| b.is_ascii_hexdigit());
    if valid {
        format!("#{}", hex.to_ascii_lowercase())
    } else {
        DEFAULT_THEME_COLOR.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_with_vibe_alias() {
        let json = r##"{"bio":"b","tags":["Rust"],"vibe":"chill","themeColor":"#AABBCC"}"##;
        let summary: Summary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.feel, "chill");
        assert_eq!(summary.theme_color, "#AABBCC");
    }

    #[test]
    fn deserializes_feel_field() {
        let json = r#"{"bio":"b","tags":[],"feel":"sleepy","themeColor":"fff"}"#;
        let summary: Summary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.feel, "sleepy");
    }

    #[test]
    fn missing_tags_and_color_default() {
        let json = r#"{"bio":"b","feel":"f"}"#;
        let summary = serde_json::from_str::<Summary>(json).unwrap().normalized();
        assert!(summary.tags.is_empty());
        assert_eq!(summary.theme_color, DEFAULT_THEME_COLOR);
    }

    #[test]
    fn partial_response_keeps_present_fields() {
        let json = r##"{"bio":"b","tags":["x"],"themeColor":"#fff"}"##;
        let summary = serde_json::from_str::<Summary>(json).unwrap().normalized();
        assert_eq!(summary.bio, "b");
        assert_eq!(summary.tags, ["x"]);
        assert!(summary.feel.is_empty());
        assert_eq!(summary.theme_color, "#fff");
    }

    #[test]
    fn normalized_cleans_tags() {
        let summary = Summary {
            bio: "b".into(),
            tags: vec!["#Rust".into(), "  Nostr ".into(), "#".into(), String::new()],
            feel: "f".into(),
            theme_color: "#ABC".into(),
        }
        .normalized();
        assert_eq!(summary.tags, ["Rust", "Nostr"]);
        assert_eq!(summary.theme_color, "#abc");
    }

    #[test]
    fn theme_color_accepts_missing_hash() {
        assert_eq!(normalize_theme_color("FFB7B2"), "#ffb7b2");
    }

    #[test]
    fn theme_color_rejects_invalid() {
        assert_eq!(normalize_theme_color("pink"), DEFAULT_THEME_COLOR);
        assert_eq!(normalize_theme_color("#12345"), DEFAULT_THEME_COLOR);
        assert_eq!(normalize_theme_color("#ggghhh"), DEFAULT_THEME_COLOR);
        assert_eq!(normalize_theme_color(""), DEFAULT_THEME_COLOR);
    }
}
