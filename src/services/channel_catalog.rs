//! Display, filtering and storage helpers over parsed channels
//!
//! These operate on parser output and never touch the network. Matching is
//! case-insensitive throughout.

use crate::models::{ChannelEntry, PlaylistResult, StreamRecord};
use crate::parser::FALLBACK_NAME_PREFIX;

/// Name to show for an entry, falling back to `Channel <id>` when blank
pub fn display_name(entry: &ChannelEntry) -> String {
    let name = entry.name.trim();
    if !name.is_empty() {
        return name.to_string();
    }

    match entry.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => format!("{FALLBACK_NAME_PREFIX} {id}"),
        None => FALLBACK_NAME_PREFIX.to_string(),
    }
}

/// Display name with a 1-based priority suffix, `priority` being 0-based
pub fn display_name_with_priority(entry: &ChannelEntry, priority: u32) -> String {
    format!("{} (priority {})", display_name(entry), priority.saturating_add(1))
}

/// Entries whose group title contains `group` (trimmed, case-insensitive).
///
/// An empty filter keeps every entry, including ungrouped ones.
pub fn filter_by_group<'a>(entries: &'a [ChannelEntry], group: &str) -> Vec<&'a ChannelEntry> {
    let needle = group.trim().to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            entry
                .group_title
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_lowercase()
                .contains(&needle)
        })
        .collect()
}

/// Entries whose name contains `query` (case-insensitive)
pub fn search<'a>(entries: &'a [ChannelEntry], query: &str) -> Vec<&'a ChannelEntry> {
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&needle))
        .collect()
}

/// Distinct group titles in first-seen order
pub fn group_titles(entries: &[ChannelEntry]) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    for group in entries.iter().filter_map(|entry| entry.group_title.as_deref()) {
        if !groups.iter().any(|seen| seen == group) {
            groups.push(group.to_string());
        }
    }
    groups
}

/// Storage records for a parsed playlist; priority follows playlist order
pub fn to_stream_records(result: &PlaylistResult) -> Vec<StreamRecord> {
    result
        .entries
        .iter()
        .enumerate()
        .map(|(index, entry)| StreamRecord {
            name: display_name(entry),
            url: entry.url.clone(),
            logo_url: entry.logo_url.clone(),
            group_title: entry.group_title.clone(),
            priority: u32::try_from(index).unwrap_or(u32::MAX),
        })
        .collect()
}
