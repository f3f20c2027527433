//! M3U playlist generation
//!
//! Every catalog record becomes one `#EXTINF` block numbered by its position
//! in the catalog. The projected list holds `Option`s: absent entries are
//! skipped when rendering and the remaining entries keep their numbers.

use tracing::debug;

use crate::config::PlaylistConfig;
use crate::config::field_selection::FieldSelection;
use crate::models::{ChannelRecord, PlaylistEntry};

/// Header line some IPTV players expect before the first entry
pub const M3U_HEADER: &str = "#EXTM3U\n";

pub struct M3uGenerator {
    group_title: String,
    include_header: bool,
    fields: FieldSelection,
}

impl M3uGenerator {
    pub fn new(config: &PlaylistConfig, fields: FieldSelection) -> Self {
        Self {
            group_title: config.group_title.clone(),
            include_header: config.include_header,
            fields,
        }
    }

    /// Project records into playlist entries, numbered `0..N-1` in input order.
    pub fn project(&self, channels: &[ChannelRecord]) -> Vec<Option<PlaylistEntry>> {
        channels
            .iter()
            .enumerate()
            .map(|(number, channel)| {
                Some(PlaylistEntry {
                    number,
                    id: channel.id.clone(),
                    name: channel.title.clone(),
                    logo: channel.resolve(&self.fields.playlist_logo).to_string(),
                    group: self.group_title.clone(),
                    url: channel.resolve(&self.fields.playlist_stream).to_string(),
                })
            })
            .collect()
    }

    /// Build the full playlist body for a catalog
    pub fn generate(&self, channels: &[ChannelRecord]) -> String {
        let entries = self.project(channels);
        let body = render_m3u(&entries);
        debug!(
            "M3U generation completed: channels={} bytes={} header={}",
            entries.len(),
            body.len(),
            self.include_header
        );

        if self.include_header {
            format!("{M3U_HEADER}{body}")
        } else {
            body
        }
    }
}

/// Render entries as `#EXTINF` blocks separated by a blank line.
///
/// The display name is the channel title verbatim. No `#EXTM3U` header is
/// written here.
pub fn render_m3u(entries: &[Option<PlaylistEntry>]) -> String {
    let blocks: Vec<String> = entries
        .iter()
        .flatten()
        .map(|entry| {
            format!(
                "#EXTINF:-1 tvg-chno=\"{}\" tvg-id=\"{}\" tvg-name=\"{}\" tvg-logo=\"{}\" group-title=\"{}\", {} \n{}\n",
                entry.number, entry.id, entry.name, entry.logo, entry.group, entry.name, entry.url,
            )
        })
        .collect();

    blocks.join("\n")
}
