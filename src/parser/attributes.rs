//! `key="value"` attribute extraction for `#EXTINF` and header lines
//!
//! Keys are matched case-insensitively and anchored: on the left to the start
//! of the segment, whitespace or a comma, on the right to `=`. This keeps
//! `tvg-id` from matching inside `x-tvg-id` or `tvg-identifier`.

use regex::Regex;
use std::sync::OnceLock;

/// Attributes recognised on `#EXTINF` lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    TvgId,
    TvgName,
    TvgLogo,
    TvgLanguage,
    GroupTitle,
    Resolution,
    Bandwidth,
    Codecs,
}

impl AttributeKey {
    pub const ALL: [AttributeKey; 8] = [
        AttributeKey::TvgId,
        AttributeKey::TvgName,
        AttributeKey::TvgLogo,
        AttributeKey::TvgLanguage,
        AttributeKey::GroupTitle,
        AttributeKey::Resolution,
        AttributeKey::Bandwidth,
        AttributeKey::Codecs,
    ];

    /// Attribute name as written in playlists
    pub fn name(&self) -> &'static str {
        match self {
            AttributeKey::TvgId => "tvg-id",
            AttributeKey::TvgName => "tvg-name",
            AttributeKey::TvgLogo => "tvg-logo",
            AttributeKey::TvgLanguage => "tvg-language",
            AttributeKey::GroupTitle => "group-title",
            AttributeKey::Resolution => "RESOLUTION",
            AttributeKey::Bandwidth => "BANDWIDTH",
            AttributeKey::Codecs => "CODECS",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

fn build_pattern(name: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r#"(?i)(?:^|[\s,]){}\s*=\s*"([^"]*)""#,
        regex::escape(name)
    ))
}

fn known_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        AttributeKey::ALL
            .iter()
            .map(|key| build_pattern(key.name()).expect("attribute pattern is a valid regex"))
            .collect()
    })
}

/// Extract a recognised attribute. Empty or whitespace-only values count as absent.
pub fn extract(segment: &str, key: AttributeKey) -> Option<String> {
    let pattern = &known_patterns()[key.index()];
    capture_value(pattern, segment)
}

/// Extract an arbitrary attribute by name, with the same anchoring rules as [`extract`]
pub fn extract_attribute(segment: &str, name: &str) -> Option<String> {
    let pattern = build_pattern(name).ok()?;
    capture_value(&pattern, segment)
}

fn capture_value(pattern: &Regex, segment: &str) -> Option<String> {
    let captures = pattern.captures(segment)?;
    let value = captures.get(1)?.as_str().trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Keep only ASCII digits and read them as an integer (`"1280000 bps"` -> `1280000`)
pub fn digits_only(value: &str) -> Option<u64> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Split an `#EXTINF` payload into its attribute section and trailing label.
///
/// The separator is the last comma outside a double-quoted value, so commas
/// inside `group-title="News, World"` never split. When quotes are unbalanced
/// the plain last comma is used instead.
pub fn split_trailing_label(payload: &str) -> (&str, Option<&str>) {
    let mut in_quotes = false;
    let mut separator = None;

    for (idx, ch) in payload.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => separator = Some(idx),
            _ => {}
        }
    }

    if in_quotes {
        separator = payload.rfind(',');
    }

    match separator {
        Some(idx) => (&payload[..idx], Some(&payload[idx + 1..])),
        None => (payload, None),
    }
}

/// Clean a trailing label: trim, strip one pair of surrounding double quotes
pub fn clean_label(label: &str) -> Option<String> {
    let trimmed = label.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .trim();

    if unquoted.is_empty() {
        None
    } else {
        Some(unquoted.to_string())
    }
}

/// Leading numeric duration of an attribute section (`-1`, `0`, `10.5`)
pub fn leading_duration(section: &str) -> Option<f64> {
    let token = section.split_whitespace().next()?;
    let looks_numeric = token
        .chars()
        .all(|c| c.is_ascii_digit() || c == '-' || c == '+' || c == '.');
    if !looks_numeric {
        return None;
    }
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}
