//! The ordered log of chat entries.

use folio_chat_model::{EntryId, TranscriptEntry};

/// Append-only list of entries. The only removal allowed is dropping a
/// placeholder once its reply has arrived.
#[derive(Clone, Default, Debug)]
pub struct Transcript {
    entries: Vec<(EntryId, TranscriptEntry)>,
    next_id: u64,
}

impl Transcript {
    /// Creates an empty transcript.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and returns its id.
    pub fn append(&mut self, entry: TranscriptEntry) -> EntryId {
        let id = EntryId::new(self.next_id);
        self.next_id += 1;
        self.entries.push((id, entry));
        id
    }

    /// Removes the placeholder with the given id.
    ///
    /// Returns `false` without touching the transcript if there is no such
    /// entry or if it is a committed entry.
    pub fn remove_placeholder(&mut self, id: EntryId) -> bool {
        // Ids are pushed in ascending order.
        let Ok(idx) = self.entries.binary_search_by_key(&id, |(id, _)| *id)
        else {
            return false;
        };
        if !self.entries[idx].1.is_placeholder {
            return false;
        }
        self.entries.remove(idx);
        true
    }

    /// Entries in display order.
    #[inline]
    pub fn entries(&self) -> &[(EntryId, TranscriptEntry)] {
        &self.entries
    }

    /// Number of entries, placeholders included.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been appended yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of placeholders currently shown.
    pub fn placeholders(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_placeholder)
            .count()
    }
}
