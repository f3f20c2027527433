//! Compact JSON stream list

use crate::config::field_selection::FieldSelection;
use crate::errors::RenderError;
use crate::models::{ChannelRecord, StreamListItem};

pub struct StreamListGenerator {
    fields: FieldSelection,
}

impl StreamListGenerator {
    pub fn new(fields: FieldSelection) -> Self {
        Self { fields }
    }

    pub fn project(&self, channels: &[ChannelRecord]) -> Vec<StreamListItem> {
        channels
            .iter()
            .map(|channel| StreamListItem {
                title: channel.title.clone(),
                channel_img_url: channel.resolve(&self.fields.stream_list_image).to_string(),
                hls_stream_url: channel.resolve(&self.fields.stream_list_stream).to_string(),
                // upstream keywords are not consumed
                keywords: Vec::new(),
            })
            .collect()
    }

    pub fn generate(&self, channels: &[ChannelRecord]) -> Result<String, RenderError> {
        Ok(serde_json::to_string(&self.project(channels))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::decode_channels;

    #[test]
    fn test_stream_list_projection() {
        let channels = decode_channels(
            br#"[{"_id":"1","title":"News 24",
                 "HLSBlockedStream":{"streamingUrl":"http://x/y.m3u8"},
                 "ChannelLogoTablets":{"streamingUrl":"http://img/news.png","downloadUrl":"http://dl/news.png"},
                 "keywords":["ignored"]}]"#,
        )
        .unwrap();

        let items = StreamListGenerator::new(FieldSelection::default()).project(&channels);
        assert_eq!(
            items,
            vec![StreamListItem {
                title: "News 24".to_string(),
                channel_img_url: "http://img/news.png".to_string(),
                hls_stream_url: "http://x/y.m3u8".to_string(),
                keywords: vec![],
            }]
        );
    }

    #[test]
    fn test_empty_catalog_is_empty_array() {
        let json = StreamListGenerator::new(FieldSelection::default()).generate(&[]).unwrap();
        assert_eq!(json, "[]");
    }
}
