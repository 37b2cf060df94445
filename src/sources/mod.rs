//! Playlist sources
//!
//! A source handler turns a playlist location into a [`crate::models::PlaylistResult`]:
//! it retrieves the text (HTTP through a [`crate::utils::TextFetcher`], or a
//! local file) and hands it to the parser.

pub mod m3u;

pub use m3u::M3uSourceHandler;
