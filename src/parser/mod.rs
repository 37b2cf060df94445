//! Playlist parsing
//!
//! - [`line`] classifies raw lines
//! - [`attributes`] pulls `key="value"` pairs and trailing labels out of `#EXTINF` payloads
//! - [`m3u_parser`] drives both and builds [`crate::models::ChannelEntry`] values

pub mod attributes;
pub mod line;
pub mod m3u_parser;

pub use m3u_parser::{parse, M3uParser, FALLBACK_NAME_PREFIX};
