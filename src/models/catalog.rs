//! Upstream channel catalog schema
//!
//! Mirrors the JSON served by the media API. Every field is optional on the
//! wire: a missing key or an explicit `null` decodes to the type's zero value,
//! while a value of the wrong type fails decoding.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::field_selection::FieldPath;

/// Decode `null` as the type's default instead of failing.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry of the upstream channel catalog
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChannelRecord {
    #[serde(rename = "_id", alias = "_ID", alias = "_Id", deserialize_with = "nullable")]
    pub id: String,
    #[serde(alias = "Title", alias = "TITLE", deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub series_id: String,
    #[serde(deserialize_with = "nullable")]
    pub aired_date: i64,
    #[serde(deserialize_with = "nullable")]
    pub vod_category: Vec<CategoryEntry>,
    #[serde(alias = "Categories", deserialize_with = "nullable")]
    pub categories: Vec<CategoryEntry>,
    #[serde(rename = "allowedCountries")]
    pub allowed_countries: Option<AllowedCountries>,
    #[serde(rename = "adPolicyId")]
    pub ad_policy_id: Option<AdPolicyId>,
    #[serde(alias = "EPG", alias = "Epg", deserialize_with = "nullable")]
    pub epg: EpgSchedule,
    #[serde(deserialize_with = "nullable")]
    pub rating: String,
    #[serde(rename = "mediaType", deserialize_with = "nullable")]
    pub media_type: String,
    #[serde(deserialize_with = "nullable")]
    pub order: i64,
    #[serde(rename = "commerceType", deserialize_with = "nullable")]
    pub commerce_type: String,
    #[serde(rename = "paidType", deserialize_with = "nullable")]
    pub paid_type: String,
    #[serde(rename = "subscriptionsCategories", deserialize_with = "nullable")]
    pub subscriptions_categories: Vec<String>,
    #[serde(rename = "HLSStream", alias = "hlsStream", alias = "HlsStream", deserialize_with = "nullable")]
    pub hls_stream: AssetUrls,
    #[serde(rename = "HLSBlockedStream", alias = "hlsBlockedStream", alias = "HlsBlockedStream", deserialize_with = "nullable")]
    pub hls_blocked_stream: AssetUrls,
    #[serde(rename = "AndroidStream", alias = "androidStream", deserialize_with = "nullable")]
    pub android_stream: AssetUrls,
    #[serde(rename = "AndroidBlockedStream", alias = "androidBlockedStream", deserialize_with = "nullable")]
    pub android_blocked_stream: AssetUrls,
    #[serde(rename = "logoLarge", alias = "LogoLarge", deserialize_with = "nullable")]
    pub logo_large: String,
    #[serde(rename = "ChannelLogoLarge", alias = "channelLogoLarge", deserialize_with = "nullable")]
    pub channel_logo_large: AssetUrls,
    #[serde(rename = "ChannelLogoTablets", alias = "channelLogoTablets", deserialize_with = "nullable")]
    pub channel_logo_tablets: AssetUrls,
    #[serde(rename = "PosterH", alias = "posterH", deserialize_with = "nullable")]
    pub poster_h: AssetUrls,
    #[serde(rename = "PosterF", alias = "posterF", deserialize_with = "nullable")]
    pub poster_f: AssetUrls,
}

/// URL variants published for a single stream or image asset
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetUrls {
    #[serde(rename = "downloadUrl", alias = "downloadURL", alias = "DownloadUrl", alias = "DownloadURL", deserialize_with = "nullable")]
    pub download_url: String,
    #[serde(rename = "streamingUrl", alias = "streamingURL", alias = "StreamingUrl", alias = "StreamingURL", deserialize_with = "nullable")]
    pub streaming_url: String,
    #[serde(alias = "Url", alias = "URL", deserialize_with = "nullable")]
    pub url: String,
}

/// Embedded electronic programme guide block
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EpgSchedule {
    #[serde(alias = "Events", deserialize_with = "nullable")]
    pub events: Vec<EpgEvent>,
}

/// A single scheduled event as published upstream
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EpgEvent {
    #[serde(alias = "Title", deserialize_with = "nullable")]
    pub title: String,
    #[serde(alias = "Start")]
    pub start: Option<DateTime<FixedOffset>>,
    #[serde(alias = "End")]
    pub end: Option<DateTime<FixedOffset>>,
    #[serde(alias = "Custom", deserialize_with = "nullable")]
    pub custom: EventDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EventDetails {
    /// Length in minutes
    #[serde(deserialize_with = "nullable")]
    pub duration: i64,
    #[serde(deserialize_with = "nullable")]
    pub rating: String,
    #[serde(deserialize_with = "nullable")]
    pub image: EventImage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EventImage {
    #[serde(deserialize_with = "nullable")]
    pub width: String,
    #[serde(deserialize_with = "nullable")]
    pub height: String,
    #[serde(rename = "downloadUrl", alias = "downloadURL", alias = "DownloadUrl", alias = "DownloadURL", deserialize_with = "nullable")]
    pub download_url: String,
}

/// Category list entry. Only plain names are used for guide categories.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CategoryEntry {
    Name(String),
    Other(serde_json::Value),
}

impl CategoryEntry {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Other(_) => None,
        }
    }
}

/// Country availability, published either as a list or a single code
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AllowedCountries {
    List(Vec<String>),
    Code(String),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AdPolicyId {
    Text(String),
    Number(i64),
    Other(serde_json::Value),
}

/// Stream and image assets a field path can point into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaAsset {
    HlsStream,
    HlsBlockedStream,
    AndroidStream,
    AndroidBlockedStream,
    ChannelLogoLarge,
    ChannelLogoTablets,
    PosterH,
    PosterF,
}

impl MediaAsset {
    pub const ALL: [MediaAsset; 8] = [
        Self::HlsStream,
        Self::HlsBlockedStream,
        Self::AndroidStream,
        Self::AndroidBlockedStream,
        Self::ChannelLogoLarge,
        Self::ChannelLogoTablets,
        Self::PosterH,
        Self::PosterF,
    ];

    /// JSON key of the asset in the upstream schema
    pub fn key(self) -> &'static str {
        match self {
            Self::HlsStream => "HLSStream",
            Self::HlsBlockedStream => "HLSBlockedStream",
            Self::AndroidStream => "AndroidStream",
            Self::AndroidBlockedStream => "AndroidBlockedStream",
            Self::ChannelLogoLarge => "ChannelLogoLarge",
            Self::ChannelLogoTablets => "ChannelLogoTablets",
            Self::PosterH => "PosterH",
            Self::PosterF => "PosterF",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|asset| asset.key() == key)
    }
}

/// Which URL variant of an asset to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetUrl {
    DownloadUrl,
    StreamingUrl,
    Url,
}

impl AssetUrl {
    pub fn key(self) -> &'static str {
        match self {
            Self::DownloadUrl => "downloadUrl",
            Self::StreamingUrl => "streamingUrl",
            Self::Url => "url",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        [Self::DownloadUrl, Self::StreamingUrl, Self::Url]
            .into_iter()
            .find(|variant| variant.key() == key)
    }
}

impl AssetUrls {
    pub fn get(&self, variant: AssetUrl) -> &str {
        match variant {
            AssetUrl::DownloadUrl => &self.download_url,
            AssetUrl::StreamingUrl => &self.streaming_url,
            AssetUrl::Url => &self.url,
        }
    }
}

impl ChannelRecord {
    pub fn asset(&self, asset: MediaAsset) -> &AssetUrls {
        match asset {
            MediaAsset::HlsStream => &self.hls_stream,
            MediaAsset::HlsBlockedStream => &self.hls_blocked_stream,
            MediaAsset::AndroidStream => &self.android_stream,
            MediaAsset::AndroidBlockedStream => &self.android_blocked_stream,
            MediaAsset::ChannelLogoLarge => &self.channel_logo_large,
            MediaAsset::ChannelLogoTablets => &self.channel_logo_tablets,
            MediaAsset::PosterH => &self.poster_h,
            MediaAsset::PosterF => &self.poster_f,
        }
    }

    /// Read the URL a field path points at. Missing data reads as "".
    pub fn resolve(&self, path: &FieldPath) -> &str {
        match path {
            FieldPath::Asset { asset, url } => self.asset(*asset).get(*url),
            FieldPath::LogoLarge => &self.logo_large,
        }
    }

    /// Guide category for this channel.
    ///
    /// `vod_category` wins whenever it has entries; `categories` is only
    /// consulted when `vod_category` is empty. The first entry must be a
    /// plain string, otherwise there is no category.
    pub fn primary_category(&self) -> Option<&str> {
        let first = if let Some(first) = self.vod_category.first() {
            first
        } else {
            self.categories.first()?
        };
        first.as_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> ChannelRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_fields_default_to_zero_values() {
        let channel = record(json!({"_id": "1"}));
        assert_eq!(channel.id, "1");
        assert_eq!(channel.title, "");
        assert_eq!(channel.order, 0);
        assert!(channel.epg.events.is_empty());
        assert_eq!(channel.hls_blocked_stream, AssetUrls::default());
    }

    #[test]
    fn test_null_fields_decode_as_zero_values() {
        let channel = record(json!({
            "_id": null,
            "title": null,
            "epg": null,
            "HLSStream": {"streamingUrl": null},
            "vod_category": null
        }));
        assert_eq!(channel.id, "");
        assert_eq!(channel.hls_stream.streaming_url, "");
        assert!(channel.vod_category.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let channel = record(json!({"_id": "9", "keywords": "a,b", "extra": {"nested": true}}));
        assert_eq!(channel.id, "9");
    }

    #[test]
    fn test_wrong_type_fails() {
        let result = serde_json::from_value::<ChannelRecord>(json!({"order": "first"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_loose_fields_become_variants() {
        let channel = record(json!({
            "allowedCountries": ["JM", "US"],
            "adPolicyId": 42,
            "categories": [{"id": 3}, "News"]
        }));
        assert_eq!(
            channel.allowed_countries,
            Some(AllowedCountries::List(vec!["JM".to_string(), "US".to_string()]))
        );
        assert_eq!(channel.ad_policy_id, Some(AdPolicyId::Number(42)));
        assert!(matches!(channel.categories[0], CategoryEntry::Other(_)));
        assert_eq!(channel.categories[1].as_name(), Some("News"));
    }

    #[test]
    fn test_event_times_keep_offset() {
        let channel = record(json!({
            "epg": {"events": [{
                "title": "Morning Show",
                "start": "2024-03-01T06:00:00-05:00",
                "end": "2024-03-01T07:30:00-05:00",
                "custom": {"duration": 90, "rating": "PG"}
            }]}
        }));
        let event = &channel.epg.events[0];
        let start = event.start.unwrap();
        assert_eq!(start.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(event.custom.duration, 90);
    }

    #[test]
    fn test_primary_category_prefers_vod_category() {
        let channel = record(json!({"vod_category": ["Sports"], "categories": ["News"]}));
        assert_eq!(channel.primary_category(), Some("Sports"));

        let channel = record(json!({"categories": ["News", "Talk"]}));
        assert_eq!(channel.primary_category(), Some("News"));
    }

    #[test]
    fn test_primary_category_does_not_fall_back_past_non_string() {
        let channel = record(json!({"vod_category": [7], "categories": ["News"]}));
        assert_eq!(channel.primary_category(), None);
    }

    #[test]
    fn test_resolve_field_paths() {
        let channel = record(json!({
            "logoLarge": "http://img/large.png",
            "AndroidStream": {"streamingUrl": "http://android/live.m3u8"},
            "ChannelLogoTablets": {"downloadUrl": "http://img/tablet.png"}
        }));
        let android = FieldPath::Asset {
            asset: MediaAsset::AndroidStream,
            url: AssetUrl::StreamingUrl,
        };
        let tablet = FieldPath::Asset {
            asset: MediaAsset::ChannelLogoTablets,
            url: AssetUrl::DownloadUrl,
        };
        assert_eq!(channel.resolve(&android), "http://android/live.m3u8");
        assert_eq!(channel.resolve(&tablet), "http://img/tablet.png");
        assert_eq!(channel.resolve(&FieldPath::LogoLarge), "http://img/large.png");
    }

    #[test]
    fn test_alternate_key_casings() {
        let channel = record(json!({
            "_ID": "1",
            "Title": "A",
            "hlsBlockedStream": {"StreamingURL": "http://hls/a.m3u8"},
            "channelLogoTablets": {"downloadURL": "http://img/a.png"},
            "EPG": {"Events": [{"Title": "Show", "Start": "2024-03-01T06:00:00Z"}]}
        }));
        assert_eq!(channel.id, "1");
        assert_eq!(channel.title, "A");
        assert_eq!(channel.hls_blocked_stream.streaming_url, "http://hls/a.m3u8");
        assert_eq!(channel.channel_logo_tablets.download_url, "http://img/a.png");
        assert_eq!(channel.epg.events[0].title, "Show");
        assert!(channel.epg.events[0].start.is_some());
    }
}
