//! Utility functions shared across the handlers

pub mod url;

pub use self::url::UrlUtils;
