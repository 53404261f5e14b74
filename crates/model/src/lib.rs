//! Plain data shared by the chat widget and its rendering layers.
//!
//! Nothing in this crate has behavior beyond parsing and formatting. The
//! widget produces [`ChatEvent`]s built from these types, and a rendering
//! layer (terminal, webview, tests) consumes them.

#![deny(missing_docs)]

mod entry;
mod event;
mod input;
mod page;
mod topic;

pub use entry::*;
pub use event::*;
pub use input::*;
pub use page::*;
pub use topic::*;
