//! Entry points for page glue that has no handle to the widget.
//!
//! These mirror the page's legacy global handlers: inline `onclick`
//! attributes ask about a topic, the send button submits the input and the
//! input's key handler forwards Enter. Each call is forwarded to the
//! [registered](crate::registry) widget and does nothing when none is.

use folio_chat_core::ChatWidget;
use folio_chat_model::Key;

use crate::registry;

fn with_widget(f: impl FnOnce(&ChatWidget)) {
    match registry::registered() {
        Some(widget) => f(widget),
        None => debug!("no chat widget registered, call ignored"),
    }
}

/// Asks the registered widget about `topic`.
pub fn ask_question(topic: &str) {
    with_widget(|widget| widget.ask_question(topic));
}

/// Submits the registered widget's current input.
pub fn send_message() {
    with_widget(ChatWidget::send_message);
}

/// Forwards a key press from the input control. Only Enter has an effect.
pub fn handle_key_press(key: Key) {
    if key == Key::Enter {
        send_message();
    }
}
