//! Outbound adapters: persistence and catalog seeding.

pub mod seed;
pub mod storage;
