//! Telegraph feed module for telewatch.
//!
//! This module provides the upstream data model and the HTTP fetcher.

pub mod fetcher;
pub mod types;

pub use fetcher::{FetchError, SnapshotSource, TelegraphFetcher};
pub use types::{TelegraphItem, TelegraphSnapshot};
