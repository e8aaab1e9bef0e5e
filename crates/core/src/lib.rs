//! Domain core for the eduportal scheduling engine.
//!
//! This crate has zero internal deps and no I/O: clock arithmetic, the
//! join time-window policy, role handling, schedule-request validation,
//! and attendance-status derivation all live here so the storage and API
//! layers can share one definition of the rules.

pub mod attendance;
pub mod clock;
pub mod error;
pub mod roles;
pub mod session;
pub mod types;
