//! Logging setup for wayfinder binaries and tests.
//!
//! Everything in the workspace logs through the `tracing` ecosystem; this
//! crate owns the one place a global subscriber is installed. Hosts pick an
//! output shape with [`logging::LogFormat`] and call [`logging::init`] once
//! at startup.

pub mod logging;
