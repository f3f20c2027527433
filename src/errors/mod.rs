//! Centralized error handling for the catalog handlers
//!
//! Every failure a request can hit maps to one of four categories. None of
//! them are retried; each ends the current request.
//!
//! # Error Categories
//!
//! - **Fetch Errors**: the upstream GET could not be built, sent, or read
//! - **Decode Errors**: the upstream body is not the expected JSON array
//! - **Render Errors**: XMLTV or JSON serialization failed
//! - **Config Errors**: a required setting is missing or malformed
//!
//! # Usage
//!
//! ```rust
//! use m3u_xmltv::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     // Any of the category errors converts into AppError with `?`
//!     Ok("success".to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for upstream fetch Results
pub type FetchResult<T> = Result<T, FetchError>;
