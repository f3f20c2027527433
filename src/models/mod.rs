//! Data models
//!
//! `catalog` mirrors the upstream JSON schema. `playlist` and `xmltv` hold
//! the per-request projections that the generators render.

pub mod catalog;
pub mod playlist;
pub mod xmltv;

pub use catalog::{AssetUrl, AssetUrls, CategoryEntry, ChannelRecord, EpgEvent, MediaAsset};
pub use playlist::{PlaylistEntry, StreamListItem};
pub use xmltv::{GuideChannel, GuideEvent, GuideRating, Icon, LangText, Tv};
