use std::collections::HashMap;
use std::collections::hash_map::Entry;

use folio_chat_model::{QuickActionControl, TopicKey};

/// Quick-action controls resolved to the topic they ask about.
#[derive(Default, Debug)]
pub(crate) struct Bindings {
    by_control: HashMap<String, TopicKey>,
}

impl Bindings {
    /// Binds every control not bound yet and returns how many were added.
    ///
    /// Each control id is bound at most once. Controls whose source names
    /// no known topic stay unbound.
    pub fn bind(&mut self, controls: &[QuickActionControl]) -> usize {
        let mut bound = 0;
        for control in controls {
            let Some(topic) = control.source.topic() else {
                warn!(
                    "control `{}` names no known topic ({:?}), left unbound",
                    control.id, control.source
                );
                continue;
            };
            match self.by_control.entry(control.id.clone()) {
                Entry::Occupied(_) => {
                    debug!("control `{}` is already bound", control.id);
                }
                Entry::Vacant(slot) => {
                    trace!("bound control `{}` to {topic}", control.id);
                    slot.insert(topic);
                    bound += 1;
                }
            }
        }
        bound
    }

    #[inline]
    pub fn topic_for(&self, control_id: &str) -> Option<TopicKey> {
        self.by_control.get(control_id).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_control.len()
    }
}
