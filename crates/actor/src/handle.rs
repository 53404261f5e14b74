use std::fmt::{self, Debug};
use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;

use crate::mailbox::{Mailbox, MailboxParts};
use crate::scheduler::run_actor;
use crate::timer::fire_after;
use crate::{ActorDeadError, Message};

/// Cloneable handle to a running actor.
///
/// The actor task lives until it is killed, or until no handle, pending
/// timer or queued message refers to it anymore.
pub struct Actor<S> {
    mailbox: Arc<Mailbox<S>>,
}

impl<S: Send + 'static> Actor<S> {
    /// Spawns a new actor owning `state` on the current tokio runtime.
    ///
    /// The optional `label` is attached to the tracing span of the actor
    /// task.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn spawn(state: S, label: Option<&str>) -> Self {
        let MailboxParts {
            mailbox,
            msg_rx,
            kill_rx,
        } = Mailbox::new();
        let mailbox = Arc::new(mailbox);
        tokio::spawn(
            run_actor(Arc::downgrade(&mailbox), state, msg_rx, kill_rx)
                .instrument(trace_span!("actor", label = label)),
        );
        Self { mailbox }
    }

    #[inline]
    pub(crate) fn from_mailbox(mailbox: Arc<Mailbox<S>>) -> Self {
        Self { mailbox }
    }

    /// Posts a message to the actor.
    ///
    /// The message is handled even if every handle is dropped before the
    /// actor gets to it.
    #[inline]
    pub fn send<M: Message<S>>(&self, msg: M) -> Result<(), ActorDeadError> {
        self.mailbox.send(Box::new(Envelope {
            msg,
            _sender: self.clone(),
        }))
    }

    /// Posts a message to the actor once `delay` has elapsed.
    ///
    /// The timer cannot be cancelled. It keeps the actor alive until it
    /// fires; a message for an actor that was killed in the meantime is
    /// dropped.
    #[inline]
    pub fn send_after<M: Message<S>>(&self, delay: Duration, msg: M) {
        fire_after(self.clone(), delay, msg);
    }

    /// Returns `true` if the actor task is still accepting messages.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.mailbox.is_open()
    }

    /// Asks the actor to stop.
    ///
    /// Messages already in the mailbox may not be handled.
    #[inline]
    pub fn try_kill(&self) {
        self.mailbox.try_kill();
    }
}

/// A queued message. It owns a handle until it is handled, which keeps
/// the mailbox open while anything is still waiting in it.
struct Envelope<S, M> {
    msg: M,
    _sender: Actor<S>,
}

impl<S, M: Debug> Debug for Envelope<S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.msg.fmt(f)
    }
}

impl<S: Send + 'static, M: Message<S>> Message<S> for Envelope<S, M> {
    #[inline]
    fn handle(self, state: &mut S, handle: &Actor<S>) {
        self.msg.handle(state, handle);
    }
}

impl<S> Clone for Actor<S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            mailbox: Arc::clone(&self.mailbox),
        }
    }
}
