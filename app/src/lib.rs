//! Senior Spark community core.
//!
//! A directory of clubs and events for older adults with age-gated
//! membership, capacity limits and per-group chat. The persisted session
//! lives in a local key-value store; everything else lasts one session.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod telemetry;
