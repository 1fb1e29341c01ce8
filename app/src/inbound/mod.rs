//! Inbound adapters translating user input into domain operations.

pub mod cli;
