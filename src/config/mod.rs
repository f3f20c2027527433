use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

pub mod defaults;
pub mod duration_serde;
pub mod field_selection;

use defaults::*;
use field_selection::FieldSelectionConfig;

use crate::errors::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub playlist: PlaylistConfig,
    #[serde(default)]
    pub guide: GuideConfig,
    #[serde(default)]
    pub fields: FieldSelectionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Catalog URL. `MEDIA_URL` in the environment takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Treat non-2xx upstream responses as fetch failures
    #[serde(default = "default_check_status")]
    pub check_status: bool,
    /// Total request timeout; unset leaves the transport default
    #[serde(
        default,
        with = "duration_serde::option_duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistConfig {
    #[serde(default = "default_group_title")]
    pub group_title: String,
    /// Prepend `#EXTM3U` to the playlist body
    #[serde(default = "default_include_header")]
    pub include_header: bool,
    /// Answer 500 instead of attempting the fetch when no upstream URL is set
    #[serde(default = "default_require_upstream_url")]
    pub require_upstream_url: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideConfig {
    #[serde(default = "default_generator_info_name")]
    pub generator_info_name: String,
    #[serde(default = "default_source_info_name")]
    pub source_info_name: String,
    #[serde(default = "default_guide_language")]
    pub language: String,
    #[serde(default = "default_rating_system")]
    pub rating_system: String,
}

// Web defaults
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

// Upstream defaults
fn default_check_status() -> bool {
    DEFAULT_CHECK_STATUS
}

// Playlist defaults
fn default_group_title() -> String {
    DEFAULT_GROUP_TITLE.to_string()
}

fn default_include_header() -> bool {
    DEFAULT_INCLUDE_HEADER
}

fn default_require_upstream_url() -> bool {
    DEFAULT_REQUIRE_UPSTREAM_URL
}

// Guide defaults
fn default_generator_info_name() -> String {
    DEFAULT_GENERATOR_INFO_NAME.to_string()
}

fn default_source_info_name() -> String {
    DEFAULT_SOURCE_INFO_NAME.to_string()
}

fn default_guide_language() -> String {
    DEFAULT_GUIDE_LANGUAGE.to_string()
}

fn default_rating_system() -> String {
    DEFAULT_RATING_SYSTEM.to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: None,
            check_status: default_check_status(),
            timeout: None,
        }
    }
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            group_title: default_group_title(),
            include_header: default_include_header(),
            require_upstream_url: default_require_upstream_url(),
        }
    }
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            generator_info_name: default_generator_info_name(),
            source_info_name: default_source_info_name(),
            language: default_guide_language(),
            rating_system: default_rating_system(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist.
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if std::path::Path::new(config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            info!("Config file {} not found, using defaults", config_file);
            Ok(Self::default())
        }
    }

    /// Apply environment overrides. `lookup` is usually `std::env::var(..).ok()`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(MEDIA_URL_ENV).filter(|url| !url.is_empty()) {
            self.upstream.url = Some(url);
        }
    }

    /// Configured upstream URL; an empty string counts as unset
    pub fn upstream_url(&self) -> Option<&str> {
        self.upstream.url.as_deref().filter(|url| !url.is_empty())
    }

    /// Configured upstream URL, or the error handlers report when it is missing
    pub fn require_upstream_url(&self) -> Result<&str, ConfigError> {
        self.upstream_url()
            .ok_or_else(|| ConfigError::missing_upstream_url(MEDIA_URL_ENV))
    }
}
