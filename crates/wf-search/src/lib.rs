//! Search command resolution and asynchronous execution.
//!
//! - `command`: typed route operations and immutable command descriptors
//! - `resolver`: exact-match mapping from a panel selection to a command
//! - `provider`: collaborator traits for the navigation service, ship
//!   telemetry and the invoking surface
//! - `state_machine`: per-invocation lifecycle machine
//! - `controller`: single-slot dispatch onto worker tasks with deadlines and
//!   exactly-once result delivery
//! - `sink`: terminal results and the destination channel
//! - `coordinator`: facade wiring selection, resolver and controller together

pub mod command;
pub mod controller;
pub mod coordinator;
pub mod provider;
pub mod resolver;
pub mod sink;
pub mod state_machine;
