use std::time::Duration;

/// Delay before the welcome message appears.
pub const DEFAULT_WELCOME_DELAY: Duration = Duration::from_millis(800);
/// Simulated typing time before a topic reply.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1500);
/// Simulated typing time before the free-text fallback reply.
pub const DEFAULT_FALLBACK_DELAY: Duration = Duration::from_millis(2000);

/// Builder for [`Timings`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TimingsBuilder {
    welcome: Option<Duration>,
    reply: Option<Duration>,
    fallback: Option<Duration>,
}

impl TimingsBuilder {
    /// Creates a builder with every delay at its default.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the welcome delay.
    #[inline]
    pub fn with_welcome(mut self, delay: Duration) -> Self {
        self.welcome = Some(delay);
        self
    }

    /// Sets the topic reply delay.
    #[inline]
    pub fn with_reply(mut self, delay: Duration) -> Self {
        self.reply = Some(delay);
        self
    }

    /// Sets the fallback reply delay.
    #[inline]
    pub fn with_fallback(mut self, delay: Duration) -> Self {
        self.fallback = Some(delay);
        self
    }

    /// Builds the timings.
    #[inline]
    pub fn build(self) -> Timings {
        Timings {
            welcome: self.welcome.unwrap_or(DEFAULT_WELCOME_DELAY),
            reply: self.reply.unwrap_or(DEFAULT_REPLY_DELAY),
            fallback: self.fallback.unwrap_or(DEFAULT_FALLBACK_DELAY),
        }
    }
}

/// The fixed delays of the widget's one-shot timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Timings {
    pub(crate) welcome: Duration,
    pub(crate) reply: Duration,
    pub(crate) fallback: Duration,
}

impl Timings {
    /// Delay before the welcome message.
    #[inline]
    pub fn welcome(&self) -> Duration {
        self.welcome
    }

    /// Delay before a topic reply.
    #[inline]
    pub fn reply(&self) -> Duration {
        self.reply
    }

    /// Delay before the fallback reply.
    #[inline]
    pub fn fallback(&self) -> Duration {
        self.fallback
    }
}

impl Default for Timings {
    #[inline]
    fn default() -> Self {
        TimingsBuilder::new().build()
    }
}

/// What happens when a request arrives while another reply is pending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dispatch {
    /// Every request starts immediately with its own placeholder and
    /// timer, so overlapping requests interleave in the transcript.
    #[default]
    Concurrent,
    /// One reply in flight at a time. Later requests wait in FIFO order and
    /// touch the transcript only once they start.
    Queued,
}
