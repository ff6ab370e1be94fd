//! telewatch - Console watcher for the Cailianpress telegraph newswire
//!
//! Polls the telegraph list endpoint on a fixed interval and prints only
//! newly published entries, suppressing repeats across polls.

pub mod config;
pub mod error;
pub mod feed;
pub mod logging;
pub mod monitor;

pub use config::Config;
pub use error::{Result, TelewatchError};
pub use feed::{
    FetchError, SnapshotSource, TelegraphFetcher, TelegraphItem, TelegraphSnapshot,
};
pub use monitor::{evaluate, Decision, Poller};
