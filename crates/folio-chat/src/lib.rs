//! The portfolio chat widget, ready to mount.
//!
//! Besides re-exporting the widget, this crate provides the process-wide
//! [`registry`] through which host glue reaches the one widget instance,
//! the [`global`] entry points that legacy page handlers call, environment
//! driven [`Settings`], a C ABI for webview hosts and a terminal front end.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

#[cfg(feature = "ffi")]
pub mod ffi;
pub mod global;
pub mod registry;
mod settings;

pub use folio_chat_catalogue::{Catalogue, ResponsePair};
pub use settings::{CatalogueError, Settings, load_catalogue};

/// Re-exports of [`folio_chat_core`] crate.
pub mod core {
    pub use folio_chat_core::*;
}

/// Re-exports of [`folio_chat_model`] crate.
pub mod model {
    pub use folio_chat_model::*;
}
