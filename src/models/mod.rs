use serde::{Deserialize, Serialize};

/// A single channel parsed from an `#EXTINF` block and the URL line that closes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelEntry {
    /// `tvg-id` attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resolved display name (`tvg-name`, then trailing label, then `Channel <n>`)
    pub name: String,
    /// Stream URL, never empty
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Literal `#EXTINF` duration; `-1` marks a live stream and is kept as-is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_bits: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codecs: Option<String>,
}

/// Playlist flavour as announced by its header directive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistFormat {
    M3u,
    M3u8,
    #[default]
    Unknown,
}

impl PlaylistFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaylistFormat::M3u => "m3u",
            PlaylistFormat::M3u8 => "m3u8",
            PlaylistFormat::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PlaylistFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Playlist-level information found in header and info directives
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    /// EPG location from `x-tvg-url` / `url-tvg` on the `#EXTM3U` line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epg_url: Option<String>,
}

impl PlaylistMetadata {
    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.copyright.is_none() && self.epg_url.is_none()
    }
}

/// Result of parsing one playlist text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistResult {
    /// Caller supplied identifier, echoed verbatim
    #[serde(default)]
    pub source_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_title: Option<String>,
    #[serde(default)]
    pub entries: Vec<ChannelEntry>,
    /// Always `entries.len()`
    #[serde(default)]
    pub entry_count: usize,
    #[serde(default)]
    pub format: PlaylistFormat,
    #[serde(default, skip_serializing_if = "PlaylistMetadata::is_empty")]
    pub metadata: PlaylistMetadata,
}

impl PlaylistResult {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Storable shape of a channel for the playback layer.
///
/// `priority` is the 0-based position in the source playlist and drives
/// fallback ordering when several streams serve the same channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamRecord {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_title: Option<String>,
    pub priority: u32,
}
