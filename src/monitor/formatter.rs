//! Console rendering of telegraph items.
//!
//! Pure functions from items to text; writing to a sink is the polling
//! loop's responsibility.

use chrono::{DateTime, Local, TimeZone};

use crate::feed::TelegraphItem;

/// Width of the separator line printed after each rendered item.
const SEPARATOR_WIDTH: usize = 100;

/// Width of the banner padding around the update header.
const HEADER_PAD_WIDTH: usize = 30;

/// Timestamp format used for item times and banners.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format an epoch timestamp in the host's local timezone.
///
/// The timezone is the running machine's — no zone is carried through the
/// system. A timestamp outside the representable range falls back to the
/// raw epoch value.
fn format_ctime(ctime: i64) -> String {
    match Local.timestamp_opt(ctime, 0).single() {
        Some(dt) => dt.format(TIME_FORMAT).to_string(),
        None => ctime.to_string(),
    }
}

/// Render one telegraph item as a labeled block.
///
/// The Title and Importance lines are included only when the item carries
/// a non-empty value for them. The block ends with a fixed-width separator
/// line.
pub fn render_item(item: &TelegraphItem) -> String {
    let mut out = String::new();
    out.push_str("Time: ");
    out.push_str(&format_ctime(item.ctime));
    out.push('\n');
    if let Some(title) = item.title() {
        out.push_str("Title: ");
        out.push_str(title);
        out.push('\n');
    }
    out.push_str("Content: ");
    out.push_str(&item.content);
    out.push('\n');
    out.push_str("Category: ");
    out.push_str(&item.category_name);
    out.push('\n');
    if let Some(level) = item.level() {
        out.push_str("Importance: ");
        out.push_str(level);
        out.push('\n');
    }
    out.push_str(&"-".repeat(SEPARATOR_WIDTH));
    out
}

/// Render the banner printed above a newly displayed item.
pub fn render_update_header(now: DateTime<Local>) -> String {
    let pad = "=".repeat(HEADER_PAD_WIDTH);
    format!("{pad} update at {} {pad}", now.format(TIME_FORMAT))
}

/// Render the status line for a cycle with nothing new to show.
pub fn render_idle_status(now: DateTime<Local>) -> String {
    format!("no new content as of {}", now.format(TIME_FORMAT))
}
