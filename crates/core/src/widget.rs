mod builder;
mod state;
#[cfg(test)]
mod tests;

use std::collections::VecDeque;
use std::sync::Arc;

use folio_chat_actor::{Actor, Message};
use folio_chat_catalogue::Catalogue;
use folio_chat_model::{
    ChatEvent, Container, Emphasis, EntryId, Key, PageLayout, TopicKey,
    TranscriptEntry,
};
use serde::Serialize;
use tokio::sync::oneshot;

use crate::bindings::Bindings;
use crate::config::{Dispatch, Timings};
use crate::transcript::Transcript;
pub use builder::ChatWidgetBuilder;
use state::*;

type EventFn = Box<dyn Fn(&ChatEvent) + Send + Sync>;
type IdleFn = Box<dyn Fn() + Send + Sync>;

/// The state owned by the widget task.
///
/// Only the task ever touches it, so handlers run one at a time and
/// need no locking.
pub struct WidgetState {
    catalogue: Arc<Catalogue>,
    initialized: bool,
    page: PageLayout,
    bindings: Bindings,
    timings: Timings,
    dispatch: Dispatch,

    // `None` once the matching container is missing from the page.
    transcript: Option<Transcript>,
    input: Option<String>,
    emphasis: Option<Emphasis>,

    in_flight: usize,
    topics_in_flight: usize,
    queued: VecDeque<Request>,

    on_event: Option<EventFn>,
    on_idle: Option<IdleFn>,
}

/// A point-in-time copy of the widget's view state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WidgetSnapshot {
    /// Transcript entries in display order, `None` without a transcript
    /// container.
    pub transcript: Option<Vec<(EntryId, TranscriptEntry)>>,
    /// Quick-action emphasis, `None` without a quick-action set.
    pub emphasis: Option<Emphasis>,
    /// Current input text, `None` without an input control.
    pub input: Option<String>,
    /// Replies whose timer has not fired yet.
    pub in_flight: usize,
    /// Requests waiting for their turn under [`Dispatch::Queued`].
    pub queued: usize,
}

/// Handle to a running chat widget.
///
/// Handles are cheap to clone and all of them drive the same widget. Every
/// operation is fire-and-forget: failures such as an unknown topic or a
/// missing container degrade to doing nothing.
#[derive(Clone)]
pub struct ChatWidget {
    handle: Actor<WidgetState>,
}

impl ChatWidget {
    /// Installs the catalogue, binds the quick-action controls and
    /// schedules the welcome message.
    ///
    /// Calling it again has no effect.
    pub fn initialize(&self) {
        self.post(Initialize);
    }

    /// Asks about the topic named by `topic`, e.g. `"skills"`.
    ///
    /// Strings that name no topic are ignored.
    pub fn ask_question(&self, topic: &str) {
        match topic.parse::<TopicKey>() {
            Ok(topic) => self.ask_topic(topic),
            Err(err) => debug!("{err}, ignored"),
        }
    }

    /// Asks about `topic`.
    pub fn ask_topic(&self, topic: TopicKey) {
        self.post(AskTopic(topic));
    }

    /// Replaces the text of the input control.
    pub fn set_input<S: Into<String>>(&self, text: S) {
        self.post(SetInput(text.into()));
    }

    /// Submits the text currently in the input control.
    pub fn send_message(&self) {
        self.post(SendMessage);
    }

    /// Types `raw` into the input control and submits it.
    pub fn send_text<S: Into<String>>(&self, raw: S) {
        self.set_input(raw);
        self.send_message();
    }

    /// Handles a key pressed inside the input control.
    pub fn handle_key_press(&self, key: Key) {
        if key == Key::Enter {
            self.send_message();
        }
    }

    /// Handles a click on the quick-action control with id `control_id`.
    pub fn click_control<S: Into<String>>(&self, control_id: S) {
        self.post(ClickControl(control_id.into()));
    }

    /// Handles a key pressed while the control `control_id` has focus.
    ///
    /// Enter and Space activate the control like a click.
    pub fn activate_control<S: Into<String>>(&self, control_id: S, key: Key) {
        if key.activates() {
            self.click_control(control_id);
        }
    }

    /// Reports that `container` has been removed from the page.
    pub fn detach(&self, container: Container) {
        self.post(Detach(container));
    }

    /// Returns a copy of the current view state, or `None` if the widget
    /// has stopped.
    pub async fn snapshot(&self) -> Option<WidgetSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.handle.send(TakeSnapshot(tx)).ok()?;
        rx.await.ok()
    }

    /// Stops the widget. Pending timers fire into the void.
    pub fn shutdown(&self) {
        self.handle.try_kill();
    }

    fn post<M: Message<WidgetState>>(&self, msg: M) {
        if let Err(err) = self.handle.send(msg) {
            warn!("chat widget is unavailable: {err}");
        }
    }
}

impl ChatWidget {
    fn spawn_from_builder(builder: ChatWidgetBuilder) -> Self {
        let ChatWidgetBuilder {
            catalogue,
            page,
            timings,
            dispatch,
            on_event,
            on_idle,
        } = builder;

        let state = WidgetState {
            catalogue: Arc::new(catalogue),
            initialized: false,
            bindings: Bindings::default(),
            timings,
            dispatch,
            transcript: page.transcript.then(Transcript::new),
            input: page.input.then(String::new),
            emphasis: page.quick_actions.then_some(Emphasis::Full),
            page,
            in_flight: 0,
            topics_in_flight: 0,
            queued: VecDeque::new(),
            on_event,
            on_idle,
        };
        Self {
            handle: Actor::spawn(state, Some("chat widget")),
        }
    }
}
