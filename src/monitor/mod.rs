//! Monitoring module for telewatch.
//!
//! This module provides the poll/change-detection/render loop: deciding
//! when new content exists and how to present it.

pub mod detector;
pub mod formatter;
pub mod poller;

pub use detector::{evaluate, Decision};
pub use formatter::{render_idle_status, render_item, render_update_header};
pub use poller::Poller;
