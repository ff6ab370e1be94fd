//! Change detection for the polling loop.
//!
//! Pure comparison of a snapshot against the last displayed item id; no
//! I/O, deterministic given its inputs.

use crate::feed::TelegraphSnapshot;

/// Outcome of comparing a snapshot against the last displayed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Whether the newest item should be displayed.
    pub display: bool,
    /// The "last seen" id to carry into the next cycle.
    pub last_seen: Option<String>,
}

/// Decide whether a snapshot contains new content.
///
/// An empty snapshot never displays and carries the previous state over
/// unchanged. Otherwise the newest item displays on the first poll and
/// whenever its id differs from the last displayed one.
///
/// The upstream item id is trusted as a stable unique key: if the upstream
/// reuses an id for materially different content, this reads as "no new
/// content". Known limitation, not corrected here.
pub fn evaluate(snapshot: &TelegraphSnapshot, last_seen: Option<&str>) -> Decision {
    let Some(latest) = snapshot.latest() else {
        return Decision {
            display: false,
            last_seen: last_seen.map(ToString::to_string),
        };
    };

    Decision {
        display: last_seen != Some(latest.id.as_str()),
        last_seen: Some(latest.id.clone()),
    }
}
