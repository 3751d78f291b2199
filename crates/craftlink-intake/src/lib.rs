//! Pre-launch lead intake engine for the CraftLink marketplace.
//!
//! The [`intake`] module holds the core: field validators, role profiles,
//! the form state store, the validity aggregator, and the submission
//! controller that relays accepted records to the external intake endpoint.

pub mod config;
pub mod error;
pub mod intake;
pub mod telemetry;
