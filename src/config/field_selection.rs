//! Field-selection policy
//!
//! Upstream schema revisions disagree on which asset carries the playable
//! stream. Instead of one handler per revision, every output role reads its
//! URL through a [`FieldPath`]. A [`SchemaRevision`] preset supplies all
//! roles at once and individual roles can be overridden in `[fields]`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;
use crate::models::catalog::{AssetUrl, MediaAsset};

/// Location of one URL inside a channel record.
///
/// Written as `<Asset>.<variant>` (for example `HLSBlockedStream.streamingUrl`)
/// or as the plain `logoLarge` string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldPath {
    Asset { asset: MediaAsset, url: AssetUrl },
    LogoLarge,
}

impl FieldPath {
    pub const fn asset(asset: MediaAsset, url: AssetUrl) -> Self {
        Self::Asset { asset, url }
    }
}

impl FromStr for FieldPath {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value == "logoLarge" {
            return Ok(Self::LogoLarge);
        }

        let (asset_key, url_key) = value.split_once('.').ok_or_else(|| {
            ConfigError::invalid_field(value, "expected '<Asset>.<downloadUrl|streamingUrl|url>' or 'logoLarge'")
        })?;

        let asset = MediaAsset::from_key(asset_key)
            .ok_or_else(|| ConfigError::invalid_field(value, format!("unknown asset '{asset_key}'")))?;
        let url = AssetUrl::from_key(url_key)
            .ok_or_else(|| ConfigError::invalid_field(value, format!("unknown URL variant '{url_key}'")))?;

        Ok(Self::Asset { asset, url })
    }
}

impl TryFrom<String> for FieldPath {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset { asset, url } => write!(f, "{}.{}", asset.key(), url.key()),
            Self::LogoLarge => f.write_str("logoLarge"),
        }
    }
}

/// Known upstream schema revisions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaRevision {
    /// Streams published under `HLSBlockedStream`
    #[default]
    Hls,
    /// Streams published under `AndroidStream`
    Android,
}

impl SchemaRevision {
    pub fn field_selection(self) -> FieldSelection {
        let tablet_download = FieldPath::asset(MediaAsset::ChannelLogoTablets, AssetUrl::DownloadUrl);
        let tablet_streaming = FieldPath::asset(MediaAsset::ChannelLogoTablets, AssetUrl::StreamingUrl);
        let guide_stream = FieldPath::asset(MediaAsset::HlsStream, AssetUrl::StreamingUrl);
        let stream = match self {
            Self::Hls => FieldPath::asset(MediaAsset::HlsBlockedStream, AssetUrl::StreamingUrl),
            Self::Android => FieldPath::asset(MediaAsset::AndroidStream, AssetUrl::StreamingUrl),
        };

        FieldSelection {
            playlist_logo: tablet_download,
            playlist_stream: stream,
            guide_icon: tablet_download,
            guide_stream,
            stream_list_image: tablet_streaming,
            stream_list_stream: stream,
        }
    }
}

/// Resolved field path for every output role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSelection {
    pub playlist_logo: FieldPath,
    pub playlist_stream: FieldPath,
    pub guide_icon: FieldPath,
    pub guide_stream: FieldPath,
    pub stream_list_image: FieldPath,
    pub stream_list_stream: FieldPath,
}

impl Default for FieldSelection {
    fn default() -> Self {
        SchemaRevision::default().field_selection()
    }
}

/// `[fields]` configuration section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSelectionConfig {
    pub revision: SchemaRevision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_logo: Option<FieldPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_stream: Option<FieldPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guide_icon: Option<FieldPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guide_stream: Option<FieldPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_list_image: Option<FieldPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_list_stream: Option<FieldPath>,
}

impl FieldSelectionConfig {
    /// Apply per-role overrides on top of the revision preset
    pub fn resolve(&self) -> FieldSelection {
        let preset = self.revision.field_selection();
        FieldSelection {
            playlist_logo: self.playlist_logo.unwrap_or(preset.playlist_logo),
            playlist_stream: self.playlist_stream.unwrap_or(preset.playlist_stream),
            guide_icon: self.guide_icon.unwrap_or(preset.guide_icon),
            guide_stream: self.guide_stream.unwrap_or(preset.guide_stream),
            stream_list_image: self.stream_list_image.unwrap_or(preset.stream_list_image),
            stream_list_stream: self.stream_list_stream.unwrap_or(preset.stream_list_stream),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("HLSBlockedStream.streamingUrl", FieldPath::asset(MediaAsset::HlsBlockedStream, AssetUrl::StreamingUrl))]
    #[case("AndroidStream.url", FieldPath::asset(MediaAsset::AndroidStream, AssetUrl::Url))]
    #[case("ChannelLogoTablets.downloadUrl", FieldPath::asset(MediaAsset::ChannelLogoTablets, AssetUrl::DownloadUrl))]
    #[case("PosterF.downloadUrl", FieldPath::asset(MediaAsset::PosterF, AssetUrl::DownloadUrl))]
    #[case(" logoLarge ", FieldPath::LogoLarge)]
    fn test_parse_field_path(#[case] input: &str, #[case] expected: FieldPath) {
        assert_eq!(input.parse::<FieldPath>().unwrap(), expected);
    }

    #[rstest]
    #[case("HLSBlockedStream")]
    #[case("HlsStream.streamingUrl")]
    #[case("HLSStream.playbackUrl")]
    #[case("")]
    fn test_parse_invalid_field_path(#[case] input: &str) {
        let err = input.parse::<FieldPath>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidField { .. }));
    }

    #[test]
    fn test_display_matches_parse_input() {
        for asset in MediaAsset::ALL {
            let path = FieldPath::asset(asset, AssetUrl::StreamingUrl);
            assert_eq!(path.to_string().parse::<FieldPath>().unwrap(), path);
        }
    }

    #[test]
    fn test_revisions_differ_only_in_stream_roles() {
        let hls = SchemaRevision::Hls.field_selection();
        let android = SchemaRevision::Android.field_selection();

        assert_eq!(hls.playlist_logo, android.playlist_logo);
        assert_eq!(hls.guide_stream, android.guide_stream);
        assert_eq!(hls.playlist_stream.to_string(), "HLSBlockedStream.streamingUrl");
        assert_eq!(android.playlist_stream.to_string(), "AndroidStream.streamingUrl");
        assert_eq!(android.stream_list_stream.to_string(), "AndroidStream.streamingUrl");
    }

    #[test]
    fn test_overrides_apply_on_top_of_revision() {
        let config = FieldSelectionConfig {
            revision: SchemaRevision::Android,
            guide_icon: Some(FieldPath::LogoLarge),
            ..Default::default()
        };
        let resolved = config.resolve();
        assert_eq!(resolved.guide_icon, FieldPath::LogoLarge);
        assert_eq!(resolved.playlist_stream.to_string(), "AndroidStream.streamingUrl");
    }
}
