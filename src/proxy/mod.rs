//! Output generators
//!
//! Each generator turns the decoded catalog into one output format:
//! - `generator`: M3U playlist
//! - `epg_generator`: XMLTV guide
//! - `stream_list`: compact JSON stream list

pub mod epg_generator;
pub mod generator;
pub mod stream_list;

pub use epg_generator::EpgGenerator;
pub use generator::{M3uGenerator, render_m3u};
pub use stream_list::StreamListGenerator;
