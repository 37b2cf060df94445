//! M3U/M3U8 channel playlist parser
//!
//! Consumes already-decoded playlist text and enumerates its channels. The
//! parser is best effort: it never fails, it skips what it cannot use and
//! returns every well-formed entry in file order.
//!
//! An entry is one `#EXTINF` metadata block closed by the next URL line. The
//! entry is emitted as soon as its URL is seen, so a block that never reaches
//! a URL (end of input, or another `#EXTINF` first) leaves no trace.

use super::attributes::{self, AttributeKey};
use super::line::{self, LineKind};
use crate::models::{ChannelEntry, PlaylistFormat, PlaylistMetadata, PlaylistResult};

/// Prefix of names synthesized for entries without any name source
pub const FALLBACK_NAME_PREFIX: &str = "Channel";

/// Stateless M3U parser
#[derive(Debug, Clone, Copy, Default)]
pub struct M3uParser;

impl M3uParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse playlist text. `source_id` is only echoed back in the result.
    pub fn parse(&self, text: &str, source_id: &str) -> PlaylistResult {
        let mut entries: Vec<ChannelEntry> = Vec::new();
        let mut pending: Option<PendingEntry> = None;
        let mut playlist_title: Option<String> = None;
        let mut format = PlaylistFormat::Unknown;
        let mut metadata = PlaylistMetadata::default();

        for raw in line::lines(text) {
            let Some(kind) = line::classify(raw) else {
                continue;
            };

            match kind {
                LineKind::ExtInf(payload) => {
                    // Any block still pending here never got a URL and is dropped
                    pending = Some(PendingEntry::from_extinf(payload));
                }
                LineKind::Url(url) => {
                    let position = entries.len() + 1;
                    let entry = pending.take().unwrap_or_default().finish(url, position);
                    entries.push(entry);
                }
                LineKind::PlaylistTitle(title) => {
                    playlist_title = Some(title.to_string());
                }
                LineKind::Header(payload) => {
                    format = detect_format(format, payload);
                    if metadata.epg_url.is_none() {
                        metadata.epg_url = attributes::extract_attribute(payload, "x-tvg-url")
                            .or_else(|| attributes::extract_attribute(payload, "url-tvg"));
                    }
                }
                LineKind::PlaylistInfo(payload) => {
                    if metadata.author.is_none() {
                        metadata.author = attributes::extract_attribute(payload, "AUTHOR");
                    }
                    if metadata.copyright.is_none() {
                        metadata.copyright = attributes::extract_attribute(payload, "COPYRIGHT");
                    }
                }
                LineKind::Directive(_) => {}
            }
        }

        PlaylistResult {
            source_id: source_id.to_string(),
            playlist_title,
            entry_count: entries.len(),
            entries,
            format,
            metadata,
        }
    }
}

/// Parse playlist text with the default parser
pub fn parse(text: &str, source_id: &str) -> PlaylistResult {
    M3uParser::new().parse(text, source_id)
}

fn detect_format(current: PlaylistFormat, header_payload: &str) -> PlaylistFormat {
    if header_payload.starts_with('8') {
        PlaylistFormat::M3u8
    } else if current == PlaylistFormat::Unknown {
        PlaylistFormat::M3u
    } else {
        current
    }
}

/// Metadata collected from an `#EXTINF` line while waiting for its URL
#[derive(Debug, Default)]
struct PendingEntry {
    id: Option<String>,
    tvg_name: Option<String>,
    label: Option<String>,
    logo_url: Option<String>,
    group_title: Option<String>,
    language: Option<String>,
    duration_seconds: Option<f64>,
    resolution: Option<String>,
    bandwidth_bits: Option<u64>,
    codecs: Option<String>,
}

impl PendingEntry {
    fn from_extinf(payload: &str) -> Self {
        let (section, label) = attributes::split_trailing_label(payload);

        Self {
            id: attributes::extract(section, AttributeKey::TvgId),
            tvg_name: attributes::extract(section, AttributeKey::TvgName),
            label: label.and_then(attributes::clean_label),
            logo_url: attributes::extract(section, AttributeKey::TvgLogo),
            group_title: attributes::extract(section, AttributeKey::GroupTitle),
            language: attributes::extract(section, AttributeKey::TvgLanguage),
            duration_seconds: attributes::leading_duration(section),
            resolution: attributes::extract(section, AttributeKey::Resolution),
            bandwidth_bits: attributes::extract(section, AttributeKey::Bandwidth)
                .as_deref()
                .and_then(attributes::digits_only),
            codecs: attributes::extract(section, AttributeKey::Codecs),
        }
    }

    /// Close the block with its URL. `position` is the 1-based output index.
    fn finish(self, url: &str, position: usize) -> ChannelEntry {
        let name = self
            .tvg_name
            .or(self.label)
            .unwrap_or_else(|| format!("{FALLBACK_NAME_PREFIX} {position}"));

        ChannelEntry {
            id: self.id,
            name,
            url: url.trim().to_string(),
            logo_url: self.logo_url,
            group_title: self.group_title,
            language: self.language,
            duration_seconds: self.duration_seconds,
            resolution: self.resolution,
            bandwidth_bits: self.bandwidth_bits,
            codecs: self.codecs,
        }
    }
}
