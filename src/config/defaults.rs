//! Configuration default values
//!
//! This module contains all the default values for configuration options,
//! making them easily changeable in one central location.

// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

// Upstream defaults
/// Environment variable naming the upstream catalog URL
pub const MEDIA_URL_ENV: &str = "MEDIA_URL";
pub const DEFAULT_CHECK_STATUS: bool = false;

// Playlist defaults
pub const DEFAULT_GROUP_TITLE: &str = "TVJ";
pub const DEFAULT_INCLUDE_HEADER: bool = false;
pub const DEFAULT_REQUIRE_UPSTREAM_URL: bool = false;

// Guide defaults
pub const DEFAULT_GENERATOR_INFO_NAME: &str = "MyGoEPGGenerator";
pub const DEFAULT_SOURCE_INFO_NAME: &str = "EPG Data from Go Application";
pub const DEFAULT_GUIDE_LANGUAGE: &str = "en";
pub const DEFAULT_RATING_SYSTEM: &str = "MPAA";
