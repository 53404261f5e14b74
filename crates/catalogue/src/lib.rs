//! The canned responses the chat widget answers with.
//!
//! A [`Catalogue`] maps every [`TopicKey`] to one [`ResponsePair`] and
//! carries the two texts that are not tied to a topic: the welcome message
//! and the fallback reply to free-text input. It is built once and never
//! mutated afterwards.

#![deny(missing_docs)]

mod portfolio;

use std::collections::BTreeMap;

use folio_chat_model::TopicKey;
use serde::{Deserialize, Serialize};

/// The prompt shown as the visitor's message and the reply that follows.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResponsePair {
    /// Text of the user entry.
    pub prompt: String,
    /// Text of the bot entry.
    pub reply: String,
}

impl ResponsePair {
    /// Creates a pair.
    #[inline]
    pub fn new<S1: Into<String>, S2: Into<String>>(
        prompt: S1,
        reply: S2,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            reply: reply.into(),
        }
    }
}

/// A read-only table of canned responses.
///
/// Topics may be left out, in which case asking about them does nothing.
///
/// # Example
///
/// ```
/// use folio_chat_catalogue::Catalogue;
/// use folio_chat_model::TopicKey;
///
/// let catalogue = Catalogue::new("Hi!", "No idea, sorry.")
///     .with_topic(TopicKey::Skills, "Skills?", "Rust, mostly.");
/// assert_eq!(catalogue.get(TopicKey::Skills).unwrap().reply, "Rust, mostly.");
/// assert!(catalogue.get(TopicKey::Contact).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogue {
    #[serde(default)]
    topics: BTreeMap<TopicKey, ResponsePair>,
    welcome: String,
    fallback: String,
}

impl Catalogue {
    /// Creates a catalogue without topics.
    #[inline]
    pub fn new<S1: Into<String>, S2: Into<String>>(
        welcome: S1,
        fallback: S2,
    ) -> Self {
        Self {
            topics: BTreeMap::new(),
            welcome: welcome.into(),
            fallback: fallback.into(),
        }
    }

    /// Returns the compiled-in catalogue of the portfolio site.
    #[inline]
    pub fn portfolio() -> Self {
        portfolio::catalogue()
    }

    /// Adds or replaces the responses for `topic`.
    #[inline]
    pub fn with_topic<S1: Into<String>, S2: Into<String>>(
        mut self,
        topic: TopicKey,
        prompt: S1,
        reply: S2,
    ) -> Self {
        self.topics.insert(topic, ResponsePair::new(prompt, reply));
        self
    }

    /// Looks up the responses for `topic`.
    #[inline]
    pub fn get(&self, topic: TopicKey) -> Option<&ResponsePair> {
        self.topics.get(&topic)
    }

    /// Iterates over the topics this catalogue answers, in key order.
    pub fn topics(&self) -> impl Iterator<Item = (TopicKey, &ResponsePair)> {
        self.topics.iter().map(|(topic, pair)| (*topic, pair))
    }

    /// The message shown once when the widget starts.
    #[inline]
    pub fn welcome(&self) -> &str {
        &self.welcome
    }

    /// The reply to any free-text message.
    #[inline]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Parses a catalogue from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the catalogue as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for Catalogue {
    #[inline]
    fn default() -> Self {
        Self::portfolio()
    }
}
