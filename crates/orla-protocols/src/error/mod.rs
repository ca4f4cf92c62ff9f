//! Error types for the Orla protocol layer.
//!
//! Every error here is caught at the boundary that detects it and converted
//! into an [`ErrorTag`](crate::page::ErrorTag) before crossing into another
//! execution context.

mod channel;
mod host;
mod injection;
mod page;
mod storage;

pub use channel::*;
pub use host::*;
pub use injection::*;
pub use page::*;
pub use storage::*;
