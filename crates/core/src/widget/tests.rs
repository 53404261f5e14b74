use std::time::Duration;

use folio_chat_catalogue::Catalogue;
use folio_chat_model::{
    ChatEvent, Container, Emphasis, EntryId, Key, PageLayout,
    QuickActionControl, TopicKey, TranscriptEntry,
};
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep, timeout};

use crate::{ChatWidget, ChatWidgetBuilder, Dispatch, WidgetSnapshot};

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn spawn_widget(
    builder: ChatWidgetBuilder,
) -> (ChatWidget, mpsc::UnboundedReceiver<ChatEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let widget = builder
        .on_event(move |event| {
            tx.send(event.clone()).ok();
        })
        .build();
    (widget, rx)
}

/// Builds and initializes a widget, then waits until the welcome message
/// has been shown.
async fn ready(
    builder: ChatWidgetBuilder,
) -> (ChatWidget, mpsc::UnboundedReceiver<ChatEvent>) {
    let (widget, mut events) = spawn_widget(builder);
    widget.initialize();
    sleep(ms(900)).await;
    drain(&mut events);
    (widget, events)
}

fn drain(events: &mut mpsc::UnboundedReceiver<ChatEvent>) -> Vec<ChatEvent> {
    let mut drained = vec![];
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}

fn entries(snapshot: &WidgetSnapshot) -> Vec<TranscriptEntry> {
    snapshot
        .transcript
        .as_ref()
        .unwrap()
        .iter()
        .map(|(_, entry)| entry.clone())
        .collect()
}

async fn transcript(widget: &ChatWidget) -> Vec<TranscriptEntry> {
    entries(&widget.snapshot().await.unwrap())
}

fn pair(topic: TopicKey) -> (String, String) {
    let catalogue = Catalogue::portfolio();
    let pair = catalogue.get(topic).unwrap();
    (pair.prompt.clone(), pair.reply.clone())
}

#[tokio::test(start_paused = true)]
async fn test_single_welcome_message() {
    let (widget, _events) = spawn_widget(ChatWidgetBuilder::new());
    widget.initialize();
    widget.initialize();

    sleep(ms(799)).await;
    assert!(transcript(&widget).await.is_empty());

    sleep(ms(2)).await;
    let welcome = TranscriptEntry::bot(Catalogue::portfolio().welcome());
    assert_eq!(transcript(&widget).await, [welcome.clone()]);

    widget.initialize();
    sleep(ms(2000)).await;
    assert_eq!(transcript(&widget).await, [welcome]);
}

#[tokio::test(start_paused = true)]
async fn test_ask_question() {
    let (widget, _events) = ready(ChatWidgetBuilder::new()).await;
    let (prompt, reply) = pair(TopicKey::Experience);
    let before = transcript(&widget).await.len();

    widget.ask_question("experience");
    let snapshot = widget.snapshot().await.unwrap();
    let now = entries(&snapshot);
    assert_eq!(now.len(), before + 2);
    assert_eq!(now[before], TranscriptEntry::user(prompt.as_str()));
    assert_eq!(now[before + 1], TranscriptEntry::placeholder());
    assert_eq!(snapshot.emphasis, Some(Emphasis::Reduced));
    assert_eq!(snapshot.in_flight, 1);

    sleep(ms(1499)).await;
    assert!(transcript(&widget).await[before + 1].is_placeholder);

    sleep(ms(2)).await;
    let snapshot = widget.snapshot().await.unwrap();
    let now = entries(&snapshot);
    assert_eq!(now.len(), before + 2);
    assert_eq!(now[before], TranscriptEntry::user(prompt));
    assert_eq!(now[before + 1], TranscriptEntry::bot(reply));
    assert!(now.iter().all(|entry| !entry.is_placeholder));
    assert_eq!(snapshot.emphasis, Some(Emphasis::Full));
    assert_eq!(snapshot.in_flight, 0);
}

#[tokio::test(start_paused = true)]
async fn test_ask_question_events() {
    let (widget, mut events) = ready(ChatWidgetBuilder::new()).await;
    let (prompt, reply) = pair(TopicKey::Contact);

    widget.ask_topic(TopicKey::Contact);
    widget.snapshot().await.unwrap();
    let started = drain(&mut events);
    let [
        ChatEvent::EntryAppended { entry: user, .. },
        ChatEvent::EmphasisChanged(Emphasis::Reduced),
        ChatEvent::EntryAppended {
            id: placeholder_id,
            entry: placeholder,
        },
    ] = started.as_slice()
    else {
        panic!("unexpected events: {started:?}");
    };
    assert_eq!(user, &TranscriptEntry::user(prompt));
    assert!(placeholder.is_placeholder);

    sleep(ms(1501)).await;
    assert_eq!(
        drain(&mut events),
        [
            ChatEvent::EntryRemoved {
                id: *placeholder_id
            },
            ChatEvent::EntryAppended {
                id: EntryId::new(placeholder_id.get() + 1),
                entry: TranscriptEntry::bot(reply),
            },
            ChatEvent::EmphasisChanged(Emphasis::Full),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_unknown_topic_is_ignored() {
    let catalogue = Catalogue::new("Hello", "Sorry").with_topic(
        TopicKey::Skills,
        "Skills?",
        "Rust.",
    );
    let (widget, mut events) =
        ready(ChatWidgetBuilder::new().with_catalogue(catalogue)).await;
    let before = widget.snapshot().await.unwrap();

    widget.ask_question("hobbies");
    widget.ask_question("");
    widget.ask_question(" SKILLS ");
    widget.ask_question("Skills");
    widget.ask_topic(TopicKey::Contact);
    sleep(ms(3000)).await;

    assert_eq!(widget.snapshot().await.unwrap(), before);
    assert!(drain(&mut events).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_ask_before_initialize_is_ignored() {
    let (widget, _events) = spawn_widget(ChatWidgetBuilder::new());
    widget.ask_topic(TopicKey::Skills);
    sleep(ms(2000)).await;
    assert!(transcript(&widget).await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_send_message() {
    let (widget, mut events) = ready(ChatWidgetBuilder::new()).await;
    let fallback = Catalogue::portfolio().fallback().to_owned();
    let before = transcript(&widget).await.len();

    widget.send_text("");
    widget.send_text("   ");
    let snapshot = widget.snapshot().await.unwrap();
    assert_eq!(entries(&snapshot).len(), before);
    assert_eq!(snapshot.in_flight, 0);
    assert!(drain(&mut events).is_empty());

    widget.send_text("  what is your favourite model?  ");
    let snapshot = widget.snapshot().await.unwrap();
    assert_eq!(snapshot.input.as_deref(), Some(""));
    let now = entries(&snapshot);
    assert_eq!(
        now[before..],
        [
            TranscriptEntry::user("what is your favourite model?"),
            TranscriptEntry::placeholder(),
        ]
    );
    assert_eq!(drain(&mut events)[0], ChatEvent::InputCleared);
    // Free text never dims the quick actions.
    assert_eq!(snapshot.emphasis, Some(Emphasis::Full));

    sleep(ms(1999)).await;
    assert!(transcript(&widget).await[before + 1].is_placeholder);
    sleep(ms(2)).await;
    assert_eq!(
        transcript(&widget).await[before + 1],
        TranscriptEntry::bot(fallback.as_str())
    );

    widget.send_text("something else entirely");
    sleep(ms(2001)).await;
    let now = transcript(&widget).await;
    assert_eq!(now.len(), before + 4);
    assert_eq!(now[before + 3], TranscriptEntry::bot(fallback));
}

#[tokio::test(start_paused = true)]
async fn test_enter_key_sends_input() {
    let (widget, _events) = ready(ChatWidgetBuilder::new()).await;
    let before = transcript(&widget).await.len();

    widget.set_input("hello");
    widget.handle_key_press(Key::Char('a'));
    widget.handle_key_press(Key::Escape);
    let snapshot = widget.snapshot().await.unwrap();
    assert_eq!(entries(&snapshot).len(), before);
    assert_eq!(snapshot.input.as_deref(), Some("hello"));

    widget.handle_key_press(Key::Enter);
    let now = transcript(&widget).await;
    assert_eq!(now[before], TranscriptEntry::user("hello"));
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_asks_interleave() {
    let (widget, _events) = ready(ChatWidgetBuilder::new()).await;
    let (skills_prompt, skills_reply) = pair(TopicKey::Skills);
    let (contact_prompt, contact_reply) = pair(TopicKey::Contact);
    let before = transcript(&widget).await.len();

    widget.ask_topic(TopicKey::Skills);
    sleep(ms(100)).await;
    widget.ask_topic(TopicKey::Contact);
    let snapshot = widget.snapshot().await.unwrap();
    assert_eq!(snapshot.in_flight, 2);
    assert_eq!(
        entries(&snapshot)[before..],
        [
            TranscriptEntry::user(skills_prompt.as_str()),
            TranscriptEntry::placeholder(),
            TranscriptEntry::user(contact_prompt.as_str()),
            TranscriptEntry::placeholder(),
        ]
    );

    // The first reply is in, the second one is still pending.
    sleep(ms(1450)).await;
    let snapshot = widget.snapshot().await.unwrap();
    assert_eq!(
        entries(&snapshot)[before..],
        [
            TranscriptEntry::user(skills_prompt.as_str()),
            TranscriptEntry::user(contact_prompt.as_str()),
            TranscriptEntry::placeholder(),
            TranscriptEntry::bot(skills_reply.as_str()),
        ]
    );
    assert_eq!(snapshot.emphasis, Some(Emphasis::Reduced));

    sleep(ms(100)).await;
    let snapshot = widget.snapshot().await.unwrap();
    assert_eq!(
        entries(&snapshot)[before..],
        [
            TranscriptEntry::user(skills_prompt),
            TranscriptEntry::user(contact_prompt),
            TranscriptEntry::bot(skills_reply),
            TranscriptEntry::bot(contact_reply),
        ]
    );
    assert_eq!(snapshot.emphasis, Some(Emphasis::Full));
}

#[tokio::test(start_paused = true)]
async fn test_replies_follow_timer_order() {
    let (widget, _events) = ready(ChatWidgetBuilder::new()).await;
    let (_, projects_reply) = pair(TopicKey::Projects);
    let fallback = Catalogue::portfolio().fallback().to_owned();
    let before = transcript(&widget).await.len();

    widget.send_text("hi");
    widget.ask_topic(TopicKey::Projects);
    sleep(ms(2001)).await;

    let now = transcript(&widget).await;
    assert_eq!(now.len(), before + 4);
    assert_eq!(now[before + 2], TranscriptEntry::bot(projects_reply));
    assert_eq!(now[before + 3], TranscriptEntry::bot(fallback));
}

#[tokio::test(start_paused = true)]
async fn test_queued_dispatch() {
    let builder = ChatWidgetBuilder::new().with_dispatch(Dispatch::Queued);
    let (widget, _events) = ready(builder).await;
    let (skills_prompt, skills_reply) = pair(TopicKey::Skills);
    let (contact_prompt, contact_reply) = pair(TopicKey::Contact);
    let fallback = Catalogue::portfolio().fallback().to_owned();
    let before = transcript(&widget).await.len();

    widget.ask_topic(TopicKey::Skills);
    widget.ask_topic(TopicKey::Contact);
    widget.send_text("hi");
    let snapshot = widget.snapshot().await.unwrap();
    assert_eq!(snapshot.queued, 2);
    assert_eq!(snapshot.input.as_deref(), Some(""));
    assert_eq!(
        entries(&snapshot)[before..],
        [
            TranscriptEntry::user(skills_prompt.as_str()),
            TranscriptEntry::placeholder(),
        ]
    );

    sleep(ms(1501)).await;
    let snapshot = widget.snapshot().await.unwrap();
    assert_eq!(snapshot.queued, 1);
    assert_eq!(
        entries(&snapshot)[before..],
        [
            TranscriptEntry::user(skills_prompt.as_str()),
            TranscriptEntry::bot(skills_reply.as_str()),
            TranscriptEntry::user(contact_prompt.as_str()),
            TranscriptEntry::placeholder(),
        ]
    );

    sleep(ms(1500)).await;
    let now = transcript(&widget).await;
    assert_eq!(now.iter().filter(|entry| entry.is_placeholder).count(), 1);
    assert_eq!(now.last(), Some(&TranscriptEntry::placeholder()));

    sleep(ms(2000)).await;
    let snapshot = widget.snapshot().await.unwrap();
    assert_eq!((snapshot.in_flight, snapshot.queued), (0, 0));
    assert_eq!(
        entries(&snapshot)[before..],
        [
            TranscriptEntry::user(skills_prompt),
            TranscriptEntry::bot(skills_reply),
            TranscriptEntry::user(contact_prompt),
            TranscriptEntry::bot(contact_reply),
            TranscriptEntry::user("hi"),
            TranscriptEntry::bot(fallback),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_detached_transcript_skips_pending_reply() {
    let (widget, mut events) = ready(ChatWidgetBuilder::new()).await;

    widget.ask_topic(TopicKey::Skills);
    widget.detach(Container::Transcript);
    widget.snapshot().await.unwrap();
    drain(&mut events);

    sleep(ms(1501)).await;
    let snapshot = widget.snapshot().await.unwrap();
    assert_eq!(snapshot.transcript, None);
    assert_eq!(snapshot.in_flight, 0);
    assert_eq!(snapshot.emphasis, Some(Emphasis::Full));
    assert_eq!(
        drain(&mut events),
        [ChatEvent::EmphasisChanged(Emphasis::Full)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_missing_containers() {
    let page = PageLayout {
        quick_actions: false,
        input: false,
        ..PageLayout::portfolio()
    };
    let (widget, _events) =
        ready(ChatWidgetBuilder::new().with_page(page)).await;
    let before = transcript(&widget).await.len();
    assert_eq!(before, 1);

    widget.send_text("anyone there?");
    widget.click_control("qa-skills");
    let snapshot = widget.snapshot().await.unwrap();
    assert_eq!(snapshot.emphasis, None);
    assert_eq!(snapshot.input, None);
    assert_eq!(entries(&snapshot).len(), before + 2);

    sleep(ms(1501)).await;
    let (_, reply) = pair(TopicKey::Skills);
    assert_eq!(
        transcript(&widget).await[before + 1],
        TranscriptEntry::bot(reply)
    );

    // No chat markup at all: nothing to write to, nothing breaks.
    let (bare, _events) =
        ready(ChatWidgetBuilder::new().with_page(PageLayout::empty())).await;
    bare.ask_topic(TopicKey::Skills);
    bare.send_text("hello");
    sleep(ms(2500)).await;
    let snapshot = bare.snapshot().await.unwrap();
    assert_eq!(snapshot.transcript, None);
    assert_eq!(snapshot.in_flight, 0);
}

#[tokio::test(start_paused = true)]
async fn test_quick_action_controls() {
    let page = PageLayout {
        controls: vec![
            QuickActionControl::data_action("qa-skills", "Skills", "skills"),
            QuickActionControl::inline_handler(
                "legacy-contact",
                "Contact",
                "contact",
            ),
            QuickActionControl::inline_handler("qa-skills", "Dup", "projects"),
            QuickActionControl::data_action("broken", "?", "hobbies"),
        ],
        ..PageLayout::portfolio()
    };
    let (widget, _events) =
        ready(ChatWidgetBuilder::new().with_page(page)).await;
    let (skills_prompt, _) = pair(TopicKey::Skills);
    let (contact_prompt, _) = pair(TopicKey::Contact);
    let before = transcript(&widget).await.len();

    widget.click_control("qa-skills");
    widget.click_control("broken");
    widget.click_control("missing");
    let now = transcript(&widget).await;
    assert_eq!(
        now[before..],
        [
            TranscriptEntry::user(skills_prompt.as_str()),
            TranscriptEntry::placeholder(),
        ]
    );

    widget.click_control("legacy-contact");
    widget.activate_control("qa-skills", Key::Char('x'));
    widget.activate_control("qa-skills", Key::Space);
    let now = transcript(&widget).await;
    assert_eq!(now.len(), before + 6);
    assert_eq!(now[before + 2], TranscriptEntry::user(contact_prompt));
    assert_eq!(now[before + 4], TranscriptEntry::user(skills_prompt));
}

#[tokio::test(start_paused = true)]
async fn test_idle_callback() {
    let (idle_tx, mut idle_rx) = watch::channel(0u32);
    let builder = ChatWidgetBuilder::new().on_idle(move || {
        idle_tx.send_modify(|count| *count += 1);
    });
    let (widget, _events) = ready(builder).await;

    widget.ask_topic(TopicKey::Projects);
    widget.send_text("hey");
    timeout(ms(2500), idle_rx.wait_for(|count| *count > 0))
        .await
        .unwrap()
        .unwrap();
    // Only the last of the two replies makes the widget idle.
    assert_eq!(*idle_rx.borrow(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown() {
    let (widget, _events) = ready(ChatWidgetBuilder::new()).await;
    widget.ask_topic(TopicKey::Skills);
    widget.shutdown();
    sleep(ms(2000)).await;
    assert!(widget.snapshot().await.is_none());
    widget.ask_topic(TopicKey::Contact);
}

#[tokio::test(start_paused = true)]
async fn test_reply_delivered_after_handle_dropped() {
    let (widget, mut events) = ready(ChatWidgetBuilder::new()).await;
    let (_, reply) = pair(TopicKey::Skills);

    widget.ask_topic(TopicKey::Skills);
    drop(widget);
    sleep(ms(1600)).await;

    let events = drain(&mut events);
    let [
        ChatEvent::EntryAppended { .. },
        ChatEvent::EmphasisChanged(Emphasis::Reduced),
        ChatEvent::EntryAppended { id: placeholder, .. },
        ChatEvent::EntryRemoved { id: removed },
        ChatEvent::EntryAppended { entry, .. },
        ChatEvent::EmphasisChanged(Emphasis::Full),
    ] = events.as_slice()
    else {
        panic!("unexpected events: {events:?}");
    };
    assert_eq!(placeholder, removed);
    assert_eq!(entry, &TranscriptEntry::bot(reply));
}
