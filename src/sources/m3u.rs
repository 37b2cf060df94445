//! M3U source handler implementation
//!
//! Connects the text retrieval side (HTTP or local files) to the parser. The
//! parser never fails; everything that can go wrong here is about getting the
//! text in the first place.

use bytes::Bytes;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::defaults::DEFAULT_MAX_BODY_BYTES;
use crate::errors::{AppError, AppResult, SourceError, SourceResult};
use crate::models::PlaylistResult;
use crate::parser::M3uParser;
use crate::utils::{CompressionFormat, DecompressionService, TextFetcher, UrlUtils};

/// M3U source handler
///
/// # Features
/// - HTTP/HTTPS playlist fetching through any [`TextFetcher`]
/// - Local playlist files, plain or gzip compressed
/// - Best-effort EXTINF parsing with per-playlist summary logging
#[derive(Clone)]
pub struct M3uSourceHandler {
    fetcher: Arc<dyn TextFetcher>,
    parser: M3uParser,
    max_file_bytes: usize,
}

impl M3uSourceHandler {
    /// Create a new M3U source handler on top of a fetcher
    pub fn new(fetcher: Arc<dyn TextFetcher>) -> Self {
        Self {
            fetcher,
            parser: M3uParser::new(),
            max_file_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Limit the decompressed size of local playlist files
    pub fn with_max_file_bytes(mut self, max_file_bytes: usize) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    /// Parse already retrieved playlist text
    pub fn parse_content(&self, content: &str, source_id: &str) -> PlaylistResult {
        let result = self.parser.parse(content, source_id);
        debug!(
            "Parsed {} entries from {} bytes (format: {})",
            result.entry_count,
            content.len(),
            result.format
        );
        result
    }

    /// Fetch a remote playlist and parse it, attributing entries to `url`
    pub async fn fetch_and_parse(&self, url: &str) -> SourceResult<PlaylistResult> {
        let safe_url = UrlUtils::obfuscate_credentials(url);
        info!("Fetching M3U playlist: {}", safe_url);

        let content = self.fetcher.fetch_text(url).await.map_err(|e| {
            warn!("Failed to fetch M3U playlist '{}': {}", safe_url, e);
            e
        })?;

        let result = self.parse_content(&content, url);
        Self::log_summary(&safe_url, &result);
        Ok(result)
    }

    /// Read a playlist file from disk and parse it, attributing entries to the path
    pub async fn load_file(&self, path: &Path) -> AppResult<PlaylistResult> {
        let display_path = path.display().to_string();
        info!("Loading M3U playlist file: {}", display_path);

        let file_size = tokio::fs::metadata(path).await?.len();
        if file_size > self.max_file_bytes as u64 {
            return Err(SourceError::TooLarge {
                size: usize::try_from(file_size).unwrap_or(usize::MAX),
                max_size: self.max_file_bytes,
            }
            .into());
        }

        let raw = tokio::fs::read(path).await?;
        let bytes = match DecompressionService::detect_compression_format(&raw) {
            CompressionFormat::Uncompressed => raw,
            _ => DecompressionService::decompress(Bytes::from(raw), self.max_file_bytes)
                .map_err(|e| SourceError::decode(format!("{display_path}: {e}")))?,
        };

        let content = String::from_utf8_lossy(&bytes);
        let result = self.parse_content(&content, &display_path);
        Self::log_summary(&display_path, &result);
        Ok(result)
    }

    /// Load from a URL or a file path, whichever `location` looks like
    pub async fn load(&self, location: &str) -> AppResult<PlaylistResult> {
        let location = location.trim();
        if location.is_empty() {
            return Err(AppError::validation("playlist location is empty"));
        }

        if UrlUtils::is_remote(location) {
            Ok(self.fetch_and_parse(location).await?)
        } else {
            self.load_file(Path::new(location)).await
        }
    }

    fn log_summary(source: &str, result: &PlaylistResult) {
        if result.is_empty() {
            warn!("M3U playlist '{}' contained no usable entries", source);
        } else {
            info!(
                "Parsed {} channels from M3U playlist '{}'",
                result.entry_count, source
            );
        }
    }
}
