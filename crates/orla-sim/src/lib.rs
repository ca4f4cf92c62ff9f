//! # Orla Sim
//!
//! An in-memory browser that implements every capability the Orla core
//! consumes. Tabs hold a [`MemoryDocument`](orla_content::MemoryDocument);
//! injecting the content script starts a real
//! [`ContentRuntime`](orla_content::ContentRuntime) inside it, and the
//! sidebar frame's window is a real [`SidebarBridge`](orla_content::SidebarBridge).
//! The background coordinator can therefore be driven end to end.

mod browser;
mod capabilities;
mod scenario;
mod store;

pub use browser::{PageSpec, SimBrowser};
pub use scenario::{SimulationReport, simulate_icon_click};
pub use store::MemoryStore;
