//! m3u-xmltv: serves a JSON channel catalog as an M3U playlist, an XMLTV
//! guide and a compact JSON stream list.

pub mod config;
pub mod errors;
pub mod models;
pub mod proxy;
pub mod sources;
pub mod utils;
pub mod web;
