//! XMLTV guide generation
//!
//! Channels come straight from the catalog. Programmes come from each
//! record's embedded EPG events; records without events get a short run of
//! placeholder programmes so every channel shows up in guide grids.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::GuideConfig;
use crate::config::field_selection::FieldSelection;
use crate::errors::RenderError;
use crate::models::{ChannelRecord, EpgEvent, GuideChannel, GuideEvent, GuideRating, Icon, LangText, Tv};

pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
pub const XMLTV_DOCTYPE: &str = "<!DOCTYPE tv SYSTEM \"xmltv.dtd\">\n";

/// Placeholder programmes generated for a channel without EPG events
pub const PLACEHOLDER_PROGRAMMES: i32 = 3;
/// Length of each placeholder programme, in hours
pub const PLACEHOLDER_HOURS: i64 = 1;

/// EPG generator that builds an XMLTV document from the channel catalog
pub struct EpgGenerator {
    config: GuideConfig,
    fields: FieldSelection,
}

impl EpgGenerator {
    pub fn new(config: &GuideConfig, fields: FieldSelection) -> Self {
        Self {
            config: config.clone(),
            fields,
        }
    }

    /// Build and serialize the guide using the current time
    pub fn generate(&self, channels: &[ChannelRecord]) -> Result<String, RenderError> {
        let tv = self.project(channels, Utc::now());
        debug!(
            "XMLTV projection completed: channels={} programmes={}",
            tv.channels.len(),
            tv.programmes.len()
        );
        render_xmltv(&tv)
    }

    /// Build the guide document. `now` anchors placeholder programmes and
    /// the document date.
    pub fn project(&self, channels: &[ChannelRecord], now: DateTime<Utc>) -> Tv {
        let mut tv = Tv {
            date: now.with_timezone(&Local).format("%Y%m%d").to_string(),
            generator_info_name: self.config.generator_info_name.clone(),
            source_info_name: self.config.source_info_name.clone(),
            channels: Vec::with_capacity(channels.len()),
            programmes: Vec::new(),
        };

        for channel in channels {
            tv.channels.push(self.guide_channel(channel));

            if channel.epg.events.is_empty() {
                tv.programmes.extend(self.placeholder_events(channel, now));
            } else {
                tv.programmes.extend(
                    channel
                        .epg
                        .events
                        .iter()
                        .map(|event| self.guide_event(channel, event)),
                );
            }
        }

        tv
    }

    fn guide_channel(&self, channel: &ChannelRecord) -> GuideChannel {
        let icon_url = channel.resolve(&self.fields.guide_icon);
        GuideChannel {
            id: channel.id.clone(),
            display_names: vec![self.lang_text(&channel.title)],
            icon: (!icon_url.is_empty()).then(|| Icon {
                src: icon_url.to_string(),
            }),
            url: channel.resolve(&self.fields.guide_stream).to_string(),
        }
    }

    fn guide_event(&self, channel: &ChannelRecord, event: &EpgEvent) -> GuideEvent {
        let details = &event.custom;

        GuideEvent {
            start: event.start.unwrap_or_else(zero_time),
            stop: event.end.unwrap_or_else(zero_time),
            channel: channel.id.clone(),
            titles: vec![self.lang_text(&event.title)],
            descriptions: vec![self.lang_text(format!(
                "Duration: {} minutes. Rating: {}.",
                details.duration, details.rating
            ))],
            categories: channel
                .primary_category()
                .map(|category| vec![self.lang_text(category)])
                .unwrap_or_default(),
            rating: (!details.rating.is_empty()).then(|| GuideRating {
                system: self.config.rating_system.clone(),
                value: details.rating.clone(),
            }),
        }
    }

    fn placeholder_events(&self, channel: &ChannelRecord, now: DateTime<Utc>) -> Vec<GuideEvent> {
        let start_of_run: DateTime<FixedOffset> = now.fixed_offset();
        let length = TimeDelta::hours(PLACEHOLDER_HOURS);

        (0..PLACEHOLDER_PROGRAMMES)
            .map(|index| {
                let start = start_of_run + length * index;
                let show = format!("Dummy Show {} on {}", index + 1, channel.title);
                GuideEvent {
                    start,
                    stop: start + length,
                    channel: channel.id.clone(),
                    titles: vec![self.lang_text(&show)],
                    descriptions: vec![self.lang_text(format!("This is a placeholder description for {show}."))],
                    categories: Vec::new(),
                    rating: None,
                }
            })
            .collect()
    }

    fn lang_text(&self, text: impl Into<String>) -> LangText {
        LangText::new(&self.config.language, text)
    }
}

/// Time rendered for an event without a start or stop: 0001-01-01 00:00:00 UTC
pub fn zero_time() -> DateTime<FixedOffset> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::default())
        .and_utc()
        .fixed_offset()
}

/// Serialize a guide document with the XML declaration and XMLTV doctype,
/// indented by two spaces.
pub fn render_xmltv(tv: &Tv) -> Result<String, RenderError> {
    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::new(&mut body);
    serializer.indent(' ', 2);
    serializer.expand_empty_elements(true);
    tv.serialize(serializer)
        .map_err(|e| RenderError::xml(e.to_string()))?;

    let mut xml = String::with_capacity(XML_DECLARATION.len() + XMLTV_DOCTYPE.len() + body.len());
    xml.push_str(XML_DECLARATION);
    xml.push_str(XMLTV_DOCTYPE);
    xml.push_str(&body);
    Ok(xml)
}
