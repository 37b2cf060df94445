//! Service layer
//!
//! Helpers that sit between parsed playlists and whatever consumes them
//! (display, search, persistence).

pub mod channel_catalog;
