//! Cassettes: recorded port interactions used for deterministic replay.

pub mod format;
pub mod replayer;
