//! A single-threaded mailbox runtime for UI-side state machines.
//!
//! Each actor owns its state inside one tokio task and handles messages
//! strictly one after another, so the state never needs a lock. Delayed
//! work is expressed as a message that a one-shot timer posts back to the
//! actor's mailbox.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod error;
mod handle;
mod mailbox;
mod scheduler;
mod timer;

pub use error::ActorDeadError;
pub use handle::Actor;
pub use mailbox::Message;
