//! Line classification for M3U playlists
//!
//! Every trimmed, non-blank playlist line falls into exactly one [`LineKind`].
//! Directive prefixes are matched ASCII case-insensitively since producers
//! disagree on casing (`#EXTINF:` vs `#extinf:`).

const EXTINF_PREFIX: &str = "#EXTINF:";
const PLAYLIST_PREFIX: &str = "#PLAYLIST:";
const HEADER_PREFIX: &str = "#EXTM3U";
const PLAYLIST_INFO_PREFIX: &str = "#EXT-X-PLAYLIST-INFO:";

/// Classified playlist line, borrowing the relevant payload from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `#EXTM3U` header; payload is whatever follows the tag (e.g. `8` or header attributes)
    Header(&'a str),
    /// `#EXTINF:` metadata; payload is everything after the colon
    ExtInf(&'a str),
    /// `#PLAYLIST:` title directive; payload is the trimmed title
    PlaylistTitle(&'a str),
    /// `#EXT-X-PLAYLIST-INFO:` directive; payload is the attribute list
    PlaylistInfo(&'a str),
    /// Any other `#` line, kept whole
    Directive(&'a str),
    /// Anything that is not a comment: a stream location
    Url(&'a str),
}

/// Classify a single raw line. Returns `None` for blank lines.
pub fn classify(raw: &str) -> Option<LineKind<'_>> {
    let line = raw.trim();
    if line.is_empty() {
        return None;
    }

    if !line.starts_with('#') {
        return Some(LineKind::Url(line));
    }

    let kind = if let Some(payload) = strip_prefix_ignore_case(line, EXTINF_PREFIX) {
        LineKind::ExtInf(payload)
    } else if let Some(payload) = strip_prefix_ignore_case(line, PLAYLIST_PREFIX) {
        LineKind::PlaylistTitle(payload.trim())
    } else if let Some(payload) = strip_prefix_ignore_case(line, PLAYLIST_INFO_PREFIX) {
        LineKind::PlaylistInfo(payload.trim())
    } else if let Some(payload) = strip_prefix_ignore_case(line, HEADER_PREFIX) {
        LineKind::Header(payload)
    } else {
        LineKind::Directive(line)
    };

    Some(kind)
}

/// Split playlist text into lines on `\n` or `\r\n`, dropping a leading BOM
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.strip_prefix('\u{feff}').unwrap_or(text).lines()
}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&line[prefix.len()..])
    } else {
        None
    }
}
