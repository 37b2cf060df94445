//! Utility modules for the M3U catalog
//!
//! - `http_client`: playlist retrieval ([`TextFetcher`] and its reqwest implementations)
//! - `decompression`: magic-byte detection and gzip decoding of fetched bodies
//! - `url`: URL checks and credential obfuscation for logs

pub mod decompression;
pub mod http_client;
pub mod url;

pub use decompression::{CompressionFormat, DecompressionService};
pub use http_client::{build_text_fetcher, FallbackHttpClient, StandardHttpClient, TextFetcher};
pub use url::UrlUtils;
