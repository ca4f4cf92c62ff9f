//! # Orla Background
//!
//! The DOM-less side of the extension: the content injector, the background
//! coordinator and the event loop that feeds it.
//!
//! ## Architecture
//!
//! ```text
//!  browser events ──► EventLoop ──spawn per event──► Coordinator
//!  UI requests ─────► EventLoopHandle::request          │
//!                                                       ├─ TabQuery      (resolve tab)
//!                                                       ├─ ContentInjector (ping, inject)
//!                                                       ├─ TabMessenger  (forward)
//!                                                       └─ Broadcaster   (notify UI)
//! ```
//!
//! The coordinator keeps no state between requests. Every request runs as an
//! independent [`Transaction`] that moves through
//! `RECEIVED → RESOLVING_TAB → INJECTING → FORWARDING → COMPLETED | FAILED`.

mod coordinator;
mod error;
mod event_loop;
mod injector;

#[cfg(test)]
mod test_support;

pub use coordinator::{Coordinator, Phase, Transaction};
pub use error::RequestError;
pub use event_loop::{BackgroundEvent, EventLoop, EventLoopHandle};
pub use injector::{ContentInjector, Injection};
