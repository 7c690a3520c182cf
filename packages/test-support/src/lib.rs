//! Shared test utilities.
//!
//! Currently a single concern: unified logging initialization usable from
//! both unit tests and integration tests.

pub mod logging;
