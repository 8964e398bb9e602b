//! Shared utilities.

pub mod download;

pub use download::{default_cache_dir, download_file, hub_url, model_cache_dir};
