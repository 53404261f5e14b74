/// A key press forwarded from the page's input glue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Return / Enter.
    Enter,
    /// The space bar.
    Space,
    /// Escape.
    Escape,
    /// Any other printable character.
    Char(char),
    /// Keys the widget has no use for.
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other,
                }
            }
        }
    }

    /// Returns `true` for the keys that activate a focused button.
    #[inline]
    pub fn activates(self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}
