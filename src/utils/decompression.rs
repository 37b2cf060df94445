use anyhow::{bail, Context, Result};
use bytes::Bytes;
use flate2::read::GzDecoder;
use std::io::Read;

/// Compression formats recognised by magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    Gzip,
    Bzip2,
    Xz,
    Zip,
    Uncompressed,
}

/// Magic byte detection and decompression for fetched playlist bodies.
///
/// Some providers serve `.m3u.gz` files or gzip the body without setting
/// `Content-Encoding`, so detection works on the bytes themselves.
pub struct DecompressionService;

impl DecompressionService {
    /// Detect compression format using magic bytes
    pub fn detect_compression_format(data: &[u8]) -> CompressionFormat {
        match infer::get(data).map(|kind| kind.mime_type()) {
            Some("application/gzip") => CompressionFormat::Gzip,
            Some("application/x-bzip2") => CompressionFormat::Bzip2,
            Some("application/x-xz") => CompressionFormat::Xz,
            Some("application/zip") => CompressionFormat::Zip,
            _ => CompressionFormat::Uncompressed,
        }
    }

    /// Decompress data based on detected format.
    ///
    /// `max_size` bounds the decompressed output; larger bodies are rejected.
    pub fn decompress(data: Bytes, max_size: usize) -> Result<Vec<u8>> {
        match Self::detect_compression_format(&data) {
            CompressionFormat::Gzip => Self::decompress_gzip(data, max_size),
            CompressionFormat::Uncompressed => Ok(data.to_vec()),
            other => bail!("Unsupported compression format: {:?}", other),
        }
    }

    fn decompress_gzip(data: Bytes, max_size: usize) -> Result<Vec<u8>> {
        let decoder = GzDecoder::new(data.as_ref());
        let mut decompressed = Vec::new();
        // One extra byte tells "exactly at the limit" apart from "over it"
        decoder
            .take(max_size as u64 + 1)
            .read_to_end(&mut decompressed)
            .context("Failed to decompress gzip data")?;

        if decompressed.len() > max_size {
            bail!("Decompressed content exceeds {} bytes", max_size);
        }
        Ok(decompressed)
    }
}
