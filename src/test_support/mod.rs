//! Shared helpers for unit tests.

pub mod progress;
pub mod socket_guard;
