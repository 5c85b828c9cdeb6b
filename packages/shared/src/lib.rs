//! Shared utilities for Hiroba binaries and tests.

pub mod logger;
pub mod time;
