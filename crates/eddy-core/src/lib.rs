//! Core types, traits, errors, config, progress events, and tracing for Eddy.
//!
//! Eddy discovers activity-identifying event definitions in a meta-model store
//! (objects, object versions, attribute values, relations) and materializes
//! them into an event log. This crate holds everything the storage and event
//! crates share; it performs no I/O beyond config loading.

pub mod config;
pub mod constants;
pub mod errors;
pub mod progress;
pub mod tracing;
pub mod traits;
pub mod types;
