//! Centralized error handling for the M3U catalog
//!
//! # Error Categories
//!
//! - **Source Errors**: playlist retrieval over HTTP (the parser itself never fails)
//! - **Validation Errors**: bad input at the API or CLI boundary
//! - **Web Errors**: HTTP request handling issues
//!
//! # Usage
//!
//! ```rust
//! use m3u_catalog::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::validation("playlist location is empty"))
//! }
//! assert!(example_function().is_err());
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;
