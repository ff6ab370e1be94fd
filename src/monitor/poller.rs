//! Polling loop for telewatch.
//!
//! The loop is the only scheduling entity: fetch, evaluate, render and
//! sleep run strictly in sequence, with no concurrent fetches in flight.

use std::io::Write;
use std::time::Duration;

use chrono::Local;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::feed::SnapshotSource;
use crate::monitor::{detector, formatter};

/// Periodic poller that surfaces newly published telegraph items.
///
/// Owns the last-seen id, which starts as `None` on every process start
/// and is never persisted.
pub struct Poller<S> {
    source: S,
    interval: Duration,
    last_seen: Option<String>,
}

impl<S: SnapshotSource> Poller<S> {
    /// Create a new poller over the given snapshot source.
    pub fn new(source: S, interval: Duration) -> Self {
        Self {
            source,
            interval,
            last_seen: None,
        }
    }

    /// The id of the most recently displayed item, if any.
    pub fn last_seen(&self) -> Option<&str> {
        self.last_seen.as_deref()
    }

    /// Run one poll cycle, writing operator output to `sink`.
    ///
    /// Fetch failures are transient: they are reported to the sink and the
    /// log, leave the last-seen state untouched, and never abort the loop.
    /// Only sink write failures propagate.
    pub async fn poll_once<W: Write>(&mut self, sink: &mut W) -> std::io::Result<()> {
        match self.source.fetch().await {
            Ok(snapshot) => {
                let decision = detector::evaluate(&snapshot, self.last_seen.as_deref());
                if decision.display {
                    if let Some(item) = snapshot.latest() {
                        writeln!(sink, "{}", formatter::render_update_header(Local::now()))?;
                        writeln!(sink, "{}", formatter::render_item(item))?;
                        info!("new telegraph item {}", item.id);
                    }
                } else {
                    writeln!(sink, "{}", formatter::render_idle_status(Local::now()))?;
                    debug!("no new content");
                }
                self.last_seen = decision.last_seen;
            }
            Err(e) => {
                warn!("fetch failed: {e}");
                writeln!(sink, "fetch failed: {e}")?;
            }
        }
        sink.flush()
    }

    /// Run the polling loop until the shutdown channel signals cancellation.
    ///
    /// The first poll happens immediately; after that the loop sleeps for
    /// the configured interval between cycles. Cancellation is observed
    /// during the sleep; a fetch already in flight completes (or times out)
    /// before the loop checks the channel again, so the network request is
    /// never dropped mid-flight.
    pub async fn run<W: Write>(
        &mut self,
        sink: &mut W,
        mut shutdown: watch::Receiver<bool>,
    ) -> std::io::Result<()> {
        info!(
            "telegraph poller started (interval: {} seconds)",
            self.interval.as_secs()
        );

        let mut timer = interval(self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    // A closed channel counts as cancellation; a plain
                    // re-send of `false` does not.
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = timer.tick() => self.poll_once(sink).await?,
            }
        }

        info!("telegraph poller stopped");
        Ok(())
    }
}
