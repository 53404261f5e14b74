use std::fmt::{self, Debug};

use folio_chat_actor::{Actor, Message};
use folio_chat_model::{
    ChatEvent, Container, Emphasis, EntryId, TopicKey, TranscriptEntry,
};
use tokio::sync::oneshot;

use super::{WidgetSnapshot, WidgetState};
use crate::config::Dispatch;

/// A request that produces one delayed reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Topic(TopicKey),
    FreeText(String),
}

impl WidgetState {
    fn emit(&self, event: ChatEvent) {
        trace!("emit {event:?}");
        if let Some(on_event) = &self.on_event {
            on_event(&event);
        }
    }

    /// Appends an entry if the transcript container exists.
    fn append(&mut self, entry: TranscriptEntry) -> Option<EntryId> {
        let Some(transcript) = &mut self.transcript else {
            debug!("no transcript container, entry skipped");
            return None;
        };
        let id = transcript.append(entry.clone());
        self.emit(ChatEvent::EntryAppended { id, entry });
        Some(id)
    }

    fn remove_placeholder(&mut self, id: EntryId) {
        let Some(transcript) = &mut self.transcript else {
            return;
        };
        if transcript.remove_placeholder(id) {
            self.emit(ChatEvent::EntryRemoved { id });
        }
    }

    fn set_emphasis(&mut self, emphasis: Emphasis) {
        let Some(current) = &mut self.emphasis else {
            return;
        };
        if *current != emphasis {
            *current = emphasis;
            self.emit(ChatEvent::EmphasisChanged(emphasis));
        }
    }

    fn initialize(&mut self, handle: &Actor<Self>) {
        if self.initialized {
            debug!("already initialized, ignored");
            return;
        }
        self.initialized = true;

        self.bindings.bind(&self.page.controls);
        handle.send_after(self.timings.welcome, ShowWelcome);
        self.emit(ChatEvent::Initialized);
        info!(
            topics = self.catalogue.topics().count(),
            controls = self.bindings.len(),
            "chat widget initialized"
        );
    }

    fn ask_topic(&mut self, topic: TopicKey, handle: &Actor<Self>) {
        if !self.initialized {
            debug!("asked about {topic} before initialization, ignored");
            return;
        }
        if self.catalogue.get(topic).is_none() {
            debug!("no response for {topic}, ignored");
            return;
        }
        self.submit(Request::Topic(topic), handle);
    }

    fn send_message(&mut self, handle: &Actor<Self>) {
        let Some(input) = &mut self.input else {
            debug!("no input control, nothing to send");
            return;
        };
        let text = input.trim();
        if text.is_empty() {
            return;
        }
        let text = text.to_owned();
        input.clear();
        self.emit(ChatEvent::InputCleared);
        self.submit(Request::FreeText(text), handle);
    }

    fn submit(&mut self, request: Request, handle: &Actor<Self>) {
        if self.dispatch == Dispatch::Queued && self.in_flight > 0 {
            trace!("reply in flight, queued {request:?}");
            self.queued.push_back(request);
            return;
        }
        self.start(request, handle);
    }

    /// Appends the synchronous part of a request and arms its reply timer.
    fn start(&mut self, request: Request, handle: &Actor<Self>) {
        let (prompt, reply, delay, is_topic) = match request {
            Request::Topic(topic) => {
                // Checked when the request was accepted; the catalogue
                // never changes afterwards.
                let Some(pair) = self.catalogue.get(topic) else {
                    return;
                };
                (
                    pair.prompt.clone(),
                    pair.reply.clone(),
                    self.timings.reply,
                    true,
                )
            }
            Request::FreeText(text) => (
                text,
                self.catalogue.fallback().to_owned(),
                self.timings.fallback,
                false,
            ),
        };

        self.append(TranscriptEntry::user(prompt));
        if is_topic {
            self.topics_in_flight += 1;
            self.set_emphasis(Emphasis::Reduced);
        }
        let placeholder = self.append(TranscriptEntry::placeholder());
        self.in_flight += 1;

        handle.send_after(
            delay,
            DeliverReply {
                placeholder,
                reply,
                is_topic,
            },
        );
    }

    fn deliver_reply(&mut self, msg: DeliverReply, handle: &Actor<Self>) {
        if let Some(id) = msg.placeholder {
            self.remove_placeholder(id);
        }
        self.append(TranscriptEntry::bot(msg.reply));

        self.in_flight = self.in_flight.saturating_sub(1);
        if msg.is_topic {
            self.topics_in_flight = self.topics_in_flight.saturating_sub(1);
            if self.topics_in_flight == 0 {
                self.set_emphasis(Emphasis::Full);
            }
        }

        if self.in_flight == 0 {
            if let Some(next) = self.queued.pop_front() {
                self.start(next, handle);
            } else if let Some(on_idle) = &self.on_idle {
                on_idle();
            }
        }
    }

    fn show_welcome(&mut self) {
        let welcome = self.catalogue.welcome().to_owned();
        self.append(TranscriptEntry::bot(welcome));
    }

    fn detach(&mut self, container: Container) {
        debug!("{} detached", container.element_id());
        match container {
            Container::Transcript => self.transcript = None,
            Container::Input => self.input = None,
            Container::QuickActions => self.emphasis = None,
        }
    }

    fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot {
            transcript: self
                .transcript
                .as_ref()
                .map(|transcript| transcript.entries().to_vec()),
            emphasis: self.emphasis,
            input: self.input.clone(),
            in_flight: self.in_flight,
            queued: self.queued.len(),
        }
    }
}

#[derive(Debug)]
pub struct Initialize;

impl Message<WidgetState> for Initialize {
    fn handle(self, state: &mut WidgetState, handle: &Actor<WidgetState>) {
        state.initialize(handle);
    }
}

#[derive(Debug)]
pub struct AskTopic(pub TopicKey);

impl Message<WidgetState> for AskTopic {
    fn handle(self, state: &mut WidgetState, handle: &Actor<WidgetState>) {
        state.ask_topic(self.0, handle);
    }
}

#[derive(Debug)]
pub struct SetInput(pub String);

impl Message<WidgetState> for SetInput {
    fn handle(self, state: &mut WidgetState, _handle: &Actor<WidgetState>) {
        match &mut state.input {
            Some(input) => *input = self.0,
            None => debug!("no input control, text dropped"),
        }
    }
}

#[derive(Debug)]
pub struct SendMessage;

impl Message<WidgetState> for SendMessage {
    fn handle(self, state: &mut WidgetState, handle: &Actor<WidgetState>) {
        state.send_message(handle);
    }
}

#[derive(Debug)]
pub struct ClickControl(pub String);

impl Message<WidgetState> for ClickControl {
    fn handle(self, state: &mut WidgetState, handle: &Actor<WidgetState>) {
        match state.bindings.topic_for(&self.0) {
            Some(topic) => state.ask_topic(topic, handle),
            None => debug!("control `{}` is not bound, ignored", self.0),
        }
    }
}

#[derive(Debug)]
pub struct Detach(pub Container);

impl Message<WidgetState> for Detach {
    #[inline]
    fn handle(self, state: &mut WidgetState, _handle: &Actor<WidgetState>) {
        state.detach(self.0);
    }
}

#[derive(Debug)]
pub struct TakeSnapshot(pub oneshot::Sender<WidgetSnapshot>);

impl Message<WidgetState> for TakeSnapshot {
    fn handle(self, state: &mut WidgetState, _handle: &Actor<WidgetState>) {
        self.0.send(state.snapshot()).ok();
    }
}

#[derive(Debug)]
struct ShowWelcome;

impl Message<WidgetState> for ShowWelcome {
    #[inline]
    fn handle(self, state: &mut WidgetState, _handle: &Actor<WidgetState>) {
        state.show_welcome();
    }
}

struct DeliverReply {
    placeholder: Option<EntryId>,
    reply: String,
    is_topic: bool,
}

impl Debug for DeliverReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeliverReply")
            .field("placeholder", &self.placeholder)
            .field("is_topic", &self.is_topic)
            .finish_non_exhaustive()
    }
}

impl Message<WidgetState> for DeliverReply {
    fn handle(self, state: &mut WidgetState, handle: &Actor<WidgetState>) {
        state.deliver_reply(self, handle);
    }
}
