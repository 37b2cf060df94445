//! M3U playlist generation
//!
//! Writes parsed channels back out as extended M3U. Output produced here
//! parses back to the same names and URLs.
//!
//! Every written value is kept on a single line. Entries whose URL cannot be
//! written as a URL line (empty, or starting with `#`) are skipped.

use std::borrow::Cow;
use std::fmt::Write as _;
use tracing::debug;

use crate::models::{ChannelEntry, PlaylistResult};
use crate::parser::attributes;

const HEADER: &str = "#EXTM3U";
const EXTINF_PREFIX: &str = "#EXTINF:";
const LIVE_DURATION: &str = "-1";

/// Extended M3U writer
#[derive(Debug, Clone, Copy, Default)]
pub struct M3uGenerator;

impl M3uGenerator {
    pub fn new() -> Self {
        Self
    }

    /// `#EXTM3U` followed by a bare `#EXTINF:-1,<name>` and URL per entry
    pub fn minimal(&self, entries: &[ChannelEntry]) -> String {
        let mut m3u = String::with_capacity(entries.len() * 64 + HEADER.len() + 1);
        m3u.push_str(HEADER);
        m3u.push('\n');

        for entry in entries {
            let Some(url) = url_line(&entry.url) else {
                continue;
            };
            let mut extinf = format!("{EXTINF_PREFIX}{LIVE_DURATION}");
            push_label(&mut extinf, &entry.name);
            m3u.push_str(&extinf);
            m3u.push('\n');
            m3u.push_str(&url);
            m3u.push('\n');
        }

        m3u
    }

    /// Full re-serialization including title, durations and every known attribute
    pub fn generate(&self, result: &PlaylistResult) -> String {
        let mut m3u = String::with_capacity(result.entries.len() * 160 + HEADER.len() + 1);
        m3u.push_str(HEADER);
        if let Some(epg_url) = &result.metadata.epg_url {
            push_attribute(&mut m3u, "x-tvg-url", epg_url);
        }
        m3u.push('\n');

        if let Some(title) = &result.playlist_title {
            let _ = writeln!(m3u, "#PLAYLIST:{}", single_line(title).trim());
        }

        for entry in &result.entries {
            let Some(url) = url_line(&entry.url) else {
                debug!("Skipping entry '{}' without a writable URL", entry.name);
                continue;
            };
            m3u.push_str(&extinf_line(entry));
            m3u.push('\n');
            m3u.push_str(&url);
            m3u.push('\n');
        }

        m3u
    }
}

fn extinf_line(entry: &ChannelEntry) -> String {
    let mut extinf = String::from(EXTINF_PREFIX);

    match entry.duration_seconds {
        Some(duration) if duration.is_finite() => {
            let _ = write!(extinf, "{}", duration);
        }
        _ => extinf.push_str(LIVE_DURATION),
    }

    // A quote in the name cannot survive inside an attribute; the label carries it instead
    let tvg_name = Some(entry.name.as_str()).filter(|name| !name.contains('"'));

    let attributes = [
        ("tvg-id", entry.id.as_deref()),
        ("tvg-name", tvg_name),
        ("tvg-logo", entry.logo_url.as_deref()),
        ("tvg-language", entry.language.as_deref()),
        ("group-title", entry.group_title.as_deref()),
        ("RESOLUTION", entry.resolution.as_deref()),
        ("CODECS", entry.codecs.as_deref()),
    ];

    for (key, value) in attributes {
        if let Some(value) = value {
            push_attribute(&mut extinf, key, value);
        }
    }

    if let Some(bandwidth) = entry.bandwidth_bits {
        let _ = write!(extinf, " BANDWIDTH=\"{}\"", bandwidth);
    }

    push_label(&mut extinf, &entry.name);
    extinf
}

fn push_attribute(target: &mut String, key: &str, value: &str) {
    let value = single_line(value);
    if value.trim().is_empty() {
        return;
    }
    let _ = write!(target, " {}=\"{}\"", key, value.replace('"', "'"));
}

/// Append `,<label>` choosing the first spelling that parses back to `name`.
///
/// The parser splits on the last comma outside double quotes and strips one
/// pair of surrounding quotes, so the name is tried as-is, then quoted. Names
/// mixing quotes and commas that neither spelling preserves get their quotes
/// replaced by `'` inside a quoted label.
fn push_label(extinf: &mut String, name: &str) {
    let name = single_line(name);
    let name = name.trim();
    let payload_start = EXTINF_PREFIX.len();

    let candidates = [
        Cow::Borrowed(name),
        Cow::Owned(format!("\"{name}\"")),
    ];

    for candidate in candidates {
        let line = format!("{extinf},{candidate}");
        if reads_back_as(&line[payload_start..], name) {
            *extinf = line;
            return;
        }
    }

    let _ = write!(extinf, ",\"{}\"", name.replace('"', "'"));
}

fn reads_back_as(payload: &str, name: &str) -> bool {
    let (_, label) = attributes::split_trailing_label(payload);
    label.and_then(attributes::clean_label).as_deref() == Some(name)
}

fn url_line(url: &str) -> Option<String> {
    let url = single_line(url);
    let trimmed = url.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    Some(trimmed.to_string())
}

/// Replace CR and LF so a value can never start a new playlist line
fn single_line(value: &str) -> Cow<'_, str> {
    let is_break = |c: char| c == '\r' || c == '\n';
    if value.contains(is_break) {
        Cow::Owned(value.replace(is_break, " "))
    } else {
        Cow::Borrowed(value)
    }
}
