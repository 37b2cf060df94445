use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::{header, Client, Response};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::HttpConfig;
use crate::errors::{AppResult, SourceError, SourceResult};
use crate::utils::decompression::{CompressionFormat, DecompressionService};
use crate::utils::url::UrlUtils;

/// Retrieves playlist text from a location.
///
/// This is the only capability the parsing pipeline needs from the outside
/// world; the parser itself only ever sees the returned text.
#[async_trait]
pub trait TextFetcher: Send + Sync {
    /// Fetch `url` and return its body as decoded text
    async fn fetch_text(&self, url: &str) -> SourceResult<String>;
}

/// reqwest-backed fetcher with size limits and automatic decompression
#[derive(Clone)]
pub struct StandardHttpClient {
    client: Client,
    accept: String,
    max_body_bytes: usize,
}

impl StandardHttpClient {
    /// Create a client from the `[http]` configuration section
    pub fn new(config: &HttpConfig) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            accept: config.accept.clone(),
            max_body_bytes: config.max_body_bytes,
        })
    }

    fn map_request_error(url: &str, error: reqwest::Error) -> SourceError {
        let safe_url = UrlUtils::obfuscate_credentials(url);
        if error.is_timeout() {
            SourceError::Timeout { url: safe_url }
        } else {
            let message = UrlUtils::obfuscate_credentials(&error.to_string());
            SourceError::connection(safe_url, message)
        }
    }

    /// Check status and size, then return the decompressed body bytes
    async fn process_response_to_bytes(&self, response: Response, url: &str) -> SourceResult<Vec<u8>> {
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                message: format!(
                    "{} - URL: {}",
                    status.canonical_reason().unwrap_or("Unknown"),
                    UrlUtils::obfuscate_credentials(url)
                ),
            });
        }

        if let Some(length) = response.content_length() {
            if length as usize > self.max_body_bytes {
                return Err(SourceError::TooLarge {
                    size: length as usize,
                    max_size: self.max_body_bytes,
                });
            }
        }

        // Enforce the limit while reading; chunked bodies carry no Content-Length
        let mut body = Vec::with_capacity(
            response
                .content_length()
                .map_or(0, |length| length as usize)
                .min(self.max_body_bytes),
        );
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| Self::map_request_error(url, e))?;
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(SourceError::TooLarge {
                    size: body.len() + chunk.len(),
                    max_size: self.max_body_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        debug!("Fetched {} bytes of raw content", body.len());

        let compression_format = DecompressionService::detect_compression_format(&body);
        debug!("Detected compression format: {:?}", compression_format);

        match compression_format {
            CompressionFormat::Uncompressed => Ok(body),
            _ => DecompressionService::decompress(Bytes::from(body), self.max_body_bytes)
                .map_err(|e| SourceError::decode(format!("Failed to decompress content: {e}"))),
        }
    }
}

#[async_trait]
impl TextFetcher for StandardHttpClient {
    async fn fetch_text(&self, url: &str) -> SourceResult<String> {
        let safe_url = UrlUtils::obfuscate_credentials(url);
        let parsed = UrlUtils::parse_http(url).ok_or_else(|| SourceError::UnsupportedScheme {
            url: safe_url.clone(),
        })?;

        debug!("Fetching playlist text from: {}", safe_url);

        let response = self
            .client
            .get(parsed)
            .header(header::ACCEPT, self.accept.as_str())
            .send()
            .await
            .map_err(|e| Self::map_request_error(url, e))?;

        let body = self.process_response_to_bytes(response, url).await?;

        let content = match String::from_utf8(body) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "Playlist from {} is not valid UTF-8 ({}), replacing invalid sequences",
                    safe_url,
                    e.utf8_error()
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        debug!("Successfully fetched {} characters of text content", content.len());
        Ok(content)
    }
}

/// Fetcher that retries a failed `https://` request over plain `http://`.
///
/// Only transport failures (timeouts, TLS or connection errors) trigger the
/// retry; an HTTP error status from the server is returned as-is.
pub struct FallbackHttpClient<F> {
    base_client: F,
}

impl<F: TextFetcher> FallbackHttpClient<F> {
    pub fn new(base_client: F) -> Self {
        Self { base_client }
    }
}

#[async_trait]
impl<F: TextFetcher> TextFetcher for FallbackHttpClient<F> {
    async fn fetch_text(&self, url: &str) -> SourceResult<String> {
        match self.base_client.fetch_text(url).await {
            Ok(text) => Ok(text),
            Err(e) if e.is_transport_failure() => {
                let Some(http_url) = UrlUtils::downgrade_to_http(url) else {
                    return Err(e);
                };
                debug!(
                    "HTTPS fetch failed ({}), trying HTTP fallback",
                    UrlUtils::obfuscate_credentials(&e.to_string())
                );
                self.base_client.fetch_text(&http_url).await
            }
            Err(e) => Err(e),
        }
    }
}

/// Build the fetcher described by the configuration
pub fn build_text_fetcher(config: &HttpConfig) -> AppResult<Arc<dyn TextFetcher>> {
    let client = StandardHttpClient::new(config)?;
    if config.https_fallback {
        Ok(Arc::new(FallbackHttpClient::new(client)))
    } else {
        Ok(Arc::new(client))
    }
}
