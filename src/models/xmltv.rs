//! XMLTV document model
//!
//! Field names follow quick-xml's serde conventions: `@name` becomes an
//! attribute, `$text` becomes element text, and a `Vec` field repeats the
//! element once per item.

use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};

/// Timestamp layout used by XMLTV `start`/`stop` attributes
pub const XMLTV_TIME_FORMAT: &str = "%Y%m%d%H%M%S %z";

/// Format an instant as `YYYYMMDDHHMMSS ±ZZZZ`, keeping its own offset.
pub fn format_xmltv_time(time: &DateTime<FixedOffset>) -> String {
    time.format(XMLTV_TIME_FORMAT).to_string()
}

fn xmltv_time<S: Serializer>(time: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_xmltv_time(time))
}

/// Root `<tv>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename = "tv")]
pub struct Tv {
    #[serde(rename = "@date")]
    pub date: String,
    #[serde(rename = "@generator-info-name")]
    pub generator_info_name: String,
    #[serde(rename = "@source-info-name")]
    pub source_info_name: String,
    #[serde(rename = "channel")]
    pub channels: Vec<GuideChannel>,
    #[serde(rename = "programme")]
    pub programmes: Vec<GuideEvent>,
}

/// `<channel>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideChannel {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "display-name")]
    pub display_names: Vec<LangText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    pub url: String,
}

/// `<icon src="..."/>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    #[serde(rename = "@src")]
    pub src: String,
}

/// Language-tagged text such as `<title lang="en">...</title>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LangText {
    #[serde(rename = "@lang")]
    pub lang: String,
    #[serde(rename = "$text")]
    pub text: String,
}

impl LangText {
    pub fn new(lang: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            text: text.into(),
        }
    }
}

/// `<programme>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideEvent {
    #[serde(rename = "@start", serialize_with = "xmltv_time")]
    pub start: DateTime<FixedOffset>,
    #[serde(rename = "@stop", serialize_with = "xmltv_time")]
    pub stop: DateTime<FixedOffset>,
    #[serde(rename = "@channel")]
    pub channel: String,
    #[serde(rename = "title")]
    pub titles: Vec<LangText>,
    #[serde(rename = "desc")]
    pub descriptions: Vec<LangText>,
    #[serde(rename = "category", skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<LangText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<GuideRating>,
}

/// `<rating system="..."><value>...</value></rating>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuideRating {
    #[serde(rename = "@system", skip_serializing_if = "String::is_empty")]
    pub system: String,
    pub value: String,
}
