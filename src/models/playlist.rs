//! Playlist-side projections of channel records

use serde::{Deserialize, Serialize};

/// One `#EXTINF` block of the generated M3U playlist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistEntry {
    /// Written as `tvg-chno`; the position of the record in the catalog
    pub number: usize,
    pub id: String,
    pub name: String,
    pub logo: String,
    pub group: String,
    pub url: String,
}

/// Compact JSON view of a channel served by the stream list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamListItem {
    pub title: String,
    pub channel_img_url: String,
    pub hls_stream_url: String,
    pub keywords: Vec<String>,
}
