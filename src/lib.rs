//! Restaker - automated claim-and-restake across delegated staking networks
//!
//! Restaker sequences per-network autostake runs: networks are processed
//! strictly one at a time, failed attempts are retried with a fixed delay
//! while narrowing the retry scope to the targets that failed, and every
//! completed run is summarized to an external health sink.

pub mod config;
pub mod error;
pub mod health;
pub mod retry;
pub mod runner;
pub mod scheduler;
pub mod summary;

pub use error::{RestakerError, Result};
