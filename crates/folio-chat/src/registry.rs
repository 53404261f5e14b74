//! The process-wide handle to the page's chat widget.
//!
//! A page mounts exactly one widget. Host glue registers it once after
//! building it, and every later caller looks it up here instead of holding
//! a reference of its own.

use std::error::Error;
use std::fmt;
use std::sync::OnceLock;

use folio_chat_core::ChatWidget;

static GLOBAL: Registry = Registry::new();

/// Returned when a widget is registered while another one already is.
pub struct AlreadyRegistered;

impl fmt::Debug for AlreadyRegistered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AlreadyRegistered")
    }
}

impl fmt::Display for AlreadyRegistered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a chat widget has already been registered")
    }
}

impl Error for AlreadyRegistered {}

/// A write-once slot for a widget handle.
pub struct Registry {
    slot: OnceLock<ChatWidget>,
}

impl Registry {
    /// Creates an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Stores `widget`. Fails if a widget is already stored; the existing
    /// one is kept.
    pub fn register(
        &self,
        widget: ChatWidget,
    ) -> Result<(), AlreadyRegistered> {
        self.slot.set(widget).map_err(|_| AlreadyRegistered)
    }

    /// Returns the stored widget, if any.
    #[inline]
    pub fn get(&self) -> Option<&ChatWidget> {
        self.slot.get()
    }
}

impl Default for Registry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Registers the page's widget.
#[inline]
pub fn register(widget: ChatWidget) -> Result<(), AlreadyRegistered> {
    GLOBAL.register(widget)?;
    debug!("chat widget registered");
    Ok(())
}

/// Returns the page's widget, if one has been registered.
#[inline]
pub fn registered() -> Option<&'static ChatWidget> {
    GLOBAL.get()
}
