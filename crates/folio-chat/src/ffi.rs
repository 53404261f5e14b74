//! FFI bindings for webview and browser-shell hosts.
//!
//! The host calls [`fc_initialize`] once when the page is ready. After that,
//! its legacy global handlers map one-to-one onto the `fc_*` functions,
//! which forward to the [registered](crate::registry) widget.

use std::ffi::{CStr, c_char, c_void};
use std::ops::Deref;
use std::sync::{Arc, LazyLock};

use folio_chat_model::{Author, ChatEvent, Emphasis, Key};
use tokio::runtime::{Builder as RuntimeBuilder, Runtime};

use crate::{Settings, global, registry};

static TOKIO_RUNTIME: LazyLock<Runtime> = LazyLock::new(|| {
    RuntimeBuilder::new_multi_thread()
        .enable_all()
        .worker_threads(1)
        .thread_name("folio-chat")
        .build()
        .expect("failed to build the widget runtime")
});

/// Error codes returned by the C APIs.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// No error occurred.
    Ok = 0,
    /// Invalid parameters or strings.
    Invalid = 1,
    /// [`fc_initialize`] has not been called yet.
    NotRegistered = 2,
    /// [`fc_initialize`] has already been called.
    AlreadyRegistered = 3,
}

/// Kind of a [`FcEvent`].
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FcEventKind {
    /// The widget finished initialization.
    Initialized = 0,
    /// An entry was appended; `entry_id`, `author`, `is_placeholder` and
    /// `text` are set.
    EntryAppended = 1,
    /// A placeholder was removed; `entry_id` is set.
    EntryRemoved = 2,
    /// The quick-action set changed emphasis; `opacity` is set.
    EmphasisChanged = 3,
    /// The input field should be cleared.
    InputCleared = 4,
}

/// A view mutation, flattened for C.
///
/// Fields not listed for the event's kind are zeroed. `text` is not
/// nul-terminated and is only valid for the duration of the callback.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct FcEvent {
    /// What happened.
    pub kind: FcEventKind,
    /// Id of the affected entry.
    pub entry_id: u64,
    /// 0 for the visitor, 1 for the bot.
    pub author: u32,
    /// Whether the appended entry is a typing placeholder.
    pub is_placeholder: bool,
    /// Entry text.
    pub text: *const c_char,
    /// Length of `text` in bytes.
    pub text_len: usize,
    /// Opacity of the quick-action set.
    pub opacity: f32,
}

impl FcEvent {
    fn empty(kind: FcEventKind) -> Self {
        Self {
            kind,
            entry_id: 0,
            author: 0,
            is_placeholder: false,
            text: std::ptr::null(),
            text_len: 0,
            opacity: 0.0,
        }
    }

    /// Borrows `event`; the result must not outlive it.
    fn borrowed(event: &ChatEvent) -> Self {
        match event {
            ChatEvent::Initialized => Self::empty(FcEventKind::Initialized),
            ChatEvent::EntryAppended { id, entry } => Self {
                entry_id: id.get(),
                author: match entry.author {
                    Author::User => 0,
                    Author::Bot => 1,
                },
                is_placeholder: entry.is_placeholder,
                text: entry.text.as_ptr() as *const c_char,
                text_len: entry.text.len(),
                ..Self::empty(FcEventKind::EntryAppended)
            },
            ChatEvent::EntryRemoved { id } => Self {
                entry_id: id.get(),
                ..Self::empty(FcEventKind::EntryRemoved)
            },
            ChatEvent::EmphasisChanged(emphasis) => Self {
                opacity: Emphasis::opacity(*emphasis),
                ..Self::empty(FcEventKind::EmphasisChanged)
            },
            ChatEvent::InputCleared => Self::empty(FcEventKind::InputCleared),
        }
    }
}

/// Callbacks receiving the widget's output.
///
/// Callbacks are invoked on the widget's runtime thread. They and
/// `user_info` are assumed to be safe to use from that thread.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct FcCallbacks {
    /// User-defined data passed to the callbacks.
    pub user_info: *mut c_void,
    /// Called for every view mutation.
    pub on_event: Option<unsafe extern "C" fn(*mut c_void, *const FcEvent)>,
    /// Called when the last pending reply has been delivered.
    pub on_idle: Option<unsafe extern "C" fn(*mut c_void)>,
    /// Called to free `user_info` once the widget no longer needs it.
    pub free: Option<unsafe extern "C" fn(*mut c_void)>,
}

// SAFETY: `FcCallbacks` is guaranteed to be thread-safe by users.
unsafe impl Send for FcCallbacks {}
unsafe impl Sync for FcCallbacks {}

/// Frees `user_info` when the last callback referencing it goes away.
struct CallbacksGuard {
    callbacks: FcCallbacks,
}

impl Deref for CallbacksGuard {
    type Target = FcCallbacks;

    fn deref(&self) -> &Self::Target {
        &self.callbacks
    }
}

impl Drop for CallbacksGuard {
    fn drop(&mut self) {
        if let Some(free) = self.callbacks.free {
            // SAFETY: Assume the callback is valid.
            unsafe { free(self.callbacks.user_info) };
        }
    }
}

/// Builds the portfolio widget from the environment settings, registers
/// it and initializes it.
///
/// `callbacks` may be null when the host only drives the widget.
///
/// # Safety
///
/// `callbacks` must be null or point to a valid `FcCallbacks` value whose
/// function pointers are either valid or null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fc_initialize(
    callbacks: *const FcCallbacks,
) -> ErrorCode {
    if registry::registered().is_some() {
        return ErrorCode::AlreadyRegistered;
    }

    // Spawning the widget requires a runtime context.
    let _enter = TOKIO_RUNTIME.enter();

    let mut builder = Settings::from_env().into_builder();
    if !callbacks.is_null() {
        // SAFETY: Checked for null, and assume it points to a valid value.
        let callbacks = unsafe { *callbacks };
        let guard = Arc::new(CallbacksGuard { callbacks });
        if let Some(on_event) = callbacks.on_event {
            let guard = Arc::clone(&guard);
            builder = builder.on_event(move |event| {
                let event = FcEvent::borrowed(event);
                // SAFETY: Assume the callback is valid.
                unsafe { on_event(guard.user_info, &event) };
            });
        }
        if let Some(on_idle) = callbacks.on_idle {
            let guard = Arc::clone(&guard);
            builder = builder.on_idle(move || {
                // SAFETY: Assume the callback is valid.
                unsafe { on_idle(guard.user_info) };
            });
        }
    }

    let widget = builder.build();
    if registry::register(widget.clone()).is_err() {
        // Lost a race against another initializer.
        widget.shutdown();
        return ErrorCode::AlreadyRegistered;
    }
    widget.initialize();

    ErrorCode::Ok
}

/// Reads a nul-terminated UTF-8 string.
///
/// # Safety
///
/// `ptr` must be null or point to a nul-terminated string.
unsafe fn read_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: Checked for null, the rest is up to the caller.
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

fn check_registered() -> Result<(), ErrorCode> {
    match registry::registered() {
        Some(_) => Ok(()),
        None => Err(ErrorCode::NotRegistered),
    }
}

/// Asks about a topic, as the legacy `askQuestion('topic')` handler does.
/// Unknown topics are accepted and ignored.
///
/// # Safety
///
/// `topic` must point to a nul-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fc_ask_question(topic: *const c_char) -> ErrorCode {
    let Some(topic) = (unsafe { read_str(topic) }) else {
        return ErrorCode::Invalid;
    };
    if let Err(code) = check_registered() {
        return code;
    }
    global::ask_question(topic);
    ErrorCode::Ok
}

/// Replaces the text of the input control.
///
/// # Safety
///
/// `text` must point to a nul-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fc_set_input(text: *const c_char) -> ErrorCode {
    let Some(text) = (unsafe { read_str(text) }) else {
        return ErrorCode::Invalid;
    };
    match registry::registered() {
        Some(widget) => {
            widget.set_input(text);
            ErrorCode::Ok
        }
        None => ErrorCode::NotRegistered,
    }
}

/// Submits the current input, as the send button does.
#[unsafe(no_mangle)]
pub extern "C" fn fc_send_message() -> ErrorCode {
    if let Err(code) = check_registered() {
        return code;
    }
    global::send_message();
    ErrorCode::Ok
}

/// Forwards a key press from the input control. `key` is a DOM
/// `KeyboardEvent.key` value such as `"Enter"`.
///
/// # Safety
///
/// `key` must point to a nul-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fc_handle_key_press(key: *const c_char) -> ErrorCode {
    let Some(key) = (unsafe { read_str(key) }) else {
        return ErrorCode::Invalid;
    };
    if let Err(code) = check_registered() {
        return code;
    }
    global::handle_key_press(Key::from_dom_key(key));
    ErrorCode::Ok
}

/// Clicks the quick-action control with the given element id.
///
/// # Safety
///
/// `control_id` must point to a nul-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fc_click_control(
    control_id: *const c_char,
) -> ErrorCode {
    let Some(control_id) = (unsafe { read_str(control_id) }) else {
        return ErrorCode::Invalid;
    };
    match registry::registered() {
        Some(widget) => {
            widget.click_control(control_id);
            ErrorCode::Ok
        }
        None => ErrorCode::NotRegistered,
    }
}
