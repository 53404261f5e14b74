use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Who a transcript entry is attributed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    /// The visitor.
    User,
    /// The scripted assistant.
    Bot,
}

/// Identifies an entry within one transcript.
///
/// Ids grow monotonically in append order and are never reused, so they
/// double as the display order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    /// Wraps a raw id.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "entry:{}", self.0)
    }
}

/// One rendered line of the chat transcript.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Who said it.
    pub author: Author,
    /// The message text. Empty for placeholders.
    pub text: String,
    /// Marks the transient "typing" entry standing in for a pending reply.
    pub is_placeholder: bool,
}

impl TranscriptEntry {
    /// A committed entry typed or asked by the visitor.
    #[inline]
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self {
            author: Author::User,
            text: text.into(),
            is_placeholder: false,
        }
    }

    /// A committed entry from the assistant.
    #[inline]
    pub fn bot<S: Into<String>>(text: S) -> Self {
        Self {
            author: Author::Bot,
            text: text.into(),
            is_placeholder: false,
        }
    }

    /// The "typing" placeholder shown while a reply is pending.
    #[inline]
    pub fn placeholder() -> Self {
        Self {
            author: Author::Bot,
            text: String::new(),
            is_placeholder: true,
        }
    }
}
