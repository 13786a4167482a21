//! `notapro-stats` — periodic refresh of dashboard statistics.
//!
//! Stale-while-revalidate: the last successful snapshot stays visible while a
//! refresh is in flight or failed; a failure only raises an inline error flag.

pub mod poller;

pub use poller::{POLL_INTERVAL, StatsHandle, StatsPoller, StatsSnapshot, StatsSource};
