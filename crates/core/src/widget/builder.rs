use folio_chat_catalogue::Catalogue;
use folio_chat_model::{ChatEvent, PageLayout};

use super::{ChatWidget, EventFn, IdleFn};
use crate::config::{Dispatch, Timings};

/// [`ChatWidget`] builder.
pub struct ChatWidgetBuilder {
    pub(crate) catalogue: Catalogue,
    pub(crate) page: PageLayout,
    pub(crate) timings: Timings,
    pub(crate) dispatch: Dispatch,
    pub(crate) on_event: Option<EventFn>,
    pub(crate) on_idle: Option<IdleFn>,
}

impl ChatWidgetBuilder {
    /// Creates a builder for the portfolio page with the compiled-in
    /// catalogue and default timings.
    #[inline]
    pub fn new() -> Self {
        Self {
            catalogue: Catalogue::portfolio(),
            page: PageLayout::portfolio(),
            timings: Timings::default(),
            dispatch: Dispatch::default(),
            on_event: None,
            on_idle: None,
        }
    }

    /// Uses another response catalogue.
    #[inline]
    pub fn with_catalogue(mut self, catalogue: Catalogue) -> Self {
        self.catalogue = catalogue;
        self
    }

    /// Describes the page the widget is mounted on.
    #[inline]
    pub fn with_page(mut self, page: PageLayout) -> Self {
        self.page = page;
        self
    }

    /// Overrides the timer delays.
    #[inline]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Selects how overlapping requests are handled.
    #[inline]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Attaches the callback receiving every view mutation.
    #[inline]
    pub fn on_event(
        mut self,
        on_event: impl Fn(&ChatEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_event = Some(Box::new(on_event));
        self
    }

    /// Attaches a callback invoked whenever the last pending reply has
    /// been delivered.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Spawns the widget.
    ///
    /// The widget starts uninitialized; call [`ChatWidget::initialize`].
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    #[inline]
    pub fn build(self) -> ChatWidget {
        ChatWidget::spawn_from_builder(self)
    }
}

impl Default for ChatWidgetBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
