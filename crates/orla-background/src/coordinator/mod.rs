//! Background coordinator.
//!
//! Routes typed requests between the sidebar UI and the content runtime of
//! the active tab, and reacts to browser events (icon click, navigation,
//! tab activation, install).

mod coordinator_core;
mod coordinator_events;
mod coordinator_requests;
mod transaction;

pub use coordinator_core::Coordinator;
pub use transaction::{Phase, Transaction};

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
