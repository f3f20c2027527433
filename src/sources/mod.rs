//! Upstream data sources

pub mod catalog;

pub use catalog::{CatalogClient, CatalogSource, HttpCatalogClient, decode_channels};
