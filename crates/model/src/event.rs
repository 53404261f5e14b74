use serde::{Deserialize, Serialize};

use crate::{EntryId, TranscriptEntry};

/// Visual state of the quick-action control set.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    /// Normal affordance.
    #[default]
    Full,
    /// Dimmed while a topic reply is pending.
    Reduced,
}

impl Emphasis {
    /// The opacity a web renderer applies to the control set.
    #[inline]
    pub fn opacity(self) -> f32 {
        match self {
            Emphasis::Full => 1.0,
            Emphasis::Reduced => 0.5,
        }
    }
}

/// A view mutation emitted by the widget, in the order it happened.
///
/// Rendering layers replay these events to keep their presentation in sync
/// with the widget; they never read widget state directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ChatEvent {
    /// The widget finished initialization.
    Initialized,
    /// An entry was appended to the transcript.
    EntryAppended {
        /// Id of the new entry.
        id: EntryId,
        /// The entry itself.
        entry: TranscriptEntry,
    },
    /// A placeholder entry was removed.
    EntryRemoved {
        /// Id of the removed placeholder.
        id: EntryId,
    },
    /// The quick-action set changed emphasis.
    EmphasisChanged(Emphasis),
    /// The text input was cleared after a submission.
    InputCleared,
}
