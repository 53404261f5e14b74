//! The scripted chat widget of the portfolio page.
//!
//! The widget answers a fixed set of topics with canned replies after a
//! simulated typing delay, and answers any free text with one fallback
//! message. It has no view of its own: every visible change is reported
//! as a [`ChatEvent`](folio_chat_model::ChatEvent) for a rendering layer
//! to apply.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod bindings;
mod config;
pub mod transcript;
mod widget;

pub use config::{
    DEFAULT_FALLBACK_DELAY, DEFAULT_REPLY_DELAY, DEFAULT_WELCOME_DELAY,
    Dispatch, Timings, TimingsBuilder,
};
pub use widget::{ChatWidget, ChatWidgetBuilder, WidgetSnapshot};
