//! A terminal front end for the portfolio chat widget.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::time::Duration;

use folio_chat::core::WidgetSnapshot;
use folio_chat::model::{
    Author, ChatEvent, Emphasis, Key, PageLayout, TopicKey,
};
use folio_chat::{Settings, global, registry};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{AnsiColors, OwoColorize};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::sleep;

enum UiEvent {
    Chat(ChatEvent),
    Idle,
}

enum Command<'a> {
    Empty,
    Quit,
    Export,
    Ask(&'a str),
    Say(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        match line.strip_prefix('/') {
            _ if line.is_empty() => Command::Empty,
            Some("quit") => Command::Quit,
            Some("export") => Command::Export,
            Some(topic) => Command::Ask(topic),
            None => Command::Say(line),
        }
    }
}

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let widget = Settings::from_env()
        .into_builder()
        .on_event({
            let event_tx = event_tx.clone();
            move |event| {
                event_tx.send(UiEvent::Chat(event.clone())).ok();
            }
        })
        .on_idle(move || {
            event_tx.send(UiEvent::Idle).ok();
        })
        .build();
    if let Err(err) = registry::register(widget.clone()) {
        eprintln!("{err}");
        return;
    }
    widget.initialize();

    let page = PageLayout::portfolio();
    let mut stdin = BufReader::new(io::stdin()).lines();
    let mut view = View::new();
    print_quick_actions(Emphasis::Full);

    // Wait for the welcome message before the first prompt.
    let welcomed = view
        .pump(&mut event_rx, |event| {
            matches!(
                event,
                UiEvent::Chat(ChatEvent::EntryAppended { entry, .. })
                    if entry.author == Author::Bot
            )
        })
        .await;
    if !welcomed {
        return;
    }

    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = read_line(&mut stdin).await else {
            break;
        };
        match Command::parse(&line) {
            Command::Empty => continue,
            Command::Quit => break,
            Command::Export => {
                export(widget.snapshot().await);
                continue;
            }
            Command::Ask(topic) => {
                let control = topic
                    .parse::<TopicKey>()
                    .ok()
                    .and_then(|topic| page.control_for(topic));
                let Some(control) = control else {
                    eprintln!(
                        "unknown command, try {}",
                        topic_commands().join(" ")
                    );
                    continue;
                };
                widget.click_control(control.id.as_str());
            }
            Command::Say(text) => {
                widget.set_input(text);
                global::handle_key_press(Key::Enter);
            }
        }

        // Requests are handled in order, so the snapshot already accounts
        // for the one just sent.
        match widget.snapshot().await {
            Some(snapshot) if snapshot.in_flight + snapshot.queued > 0 => {}
            Some(_) => continue,
            None => break,
        }
        if !view
            .pump(&mut event_rx, |event| matches!(event, UiEvent::Idle))
            .await
        {
            break;
        }
    }
}

/// Renders widget events to the terminal.
struct View {
    progress_style: ProgressStyle,
    typing: usize,
}

impl View {
    fn new() -> Self {
        let progress_style =
            ProgressStyle::with_template("{spinner} {wide_msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        Self {
            progress_style,
            typing: 0,
        }
    }

    /// Renders events until `done` accepts one. Returns `false` if the
    /// widget went away first.
    async fn pump(
        &mut self,
        event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
        done: impl Fn(&UiEvent) -> bool,
    ) -> bool {
        let mut progress_bar: Option<ProgressBar> = None;

        loop {
            if self.typing > 0 {
                progress_bar
                    .get_or_insert_with(|| {
                        let progress_bar = ProgressBar::new_spinner();
                        progress_bar.set_style(self.progress_style.clone());
                        progress_bar.set_message("💬 Typing...");
                        progress_bar
                    })
                    .inc(1);
            }

            let sleep = sleep(Duration::from_millis(100));
            let event = select! {
                event = event_rx.recv() => {
                    let Some(event) = event else {
                        return false;
                    };
                    event
                },
                _ = sleep => {
                    continue;
                }
            };

            // Finish the progress bar before printing anything else.
            if let Some(progress_bar) = progress_bar.take() {
                progress_bar.finish_and_clear();
            }

            let done = done(&event);
            if let UiEvent::Chat(event) = event {
                self.render(event);
            }
            if done {
                return true;
            }
        }
    }

    fn render(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::EntryAppended { entry, .. } if entry.is_placeholder => {
                self.typing += 1;
            }
            ChatEvent::EntryAppended { entry, .. } => {
                let (color, icon) = author_style(entry.author);
                let bar = BAR_CHAR.color(color);
                let mut lines = entry.text.lines();
                if let Some(first) = lines.next() {
                    println!("{bar}{icon} {}", first.bright_white());
                }
                for line in lines {
                    println!("{bar}   {}", line.bright_white());
                }
            }
            ChatEvent::EntryRemoved { .. } => {
                self.typing = self.typing.saturating_sub(1);
            }
            ChatEvent::EmphasisChanged(emphasis) => {
                print_quick_actions(emphasis);
            }
            ChatEvent::Initialized | ChatEvent::InputCleared => {}
        }
    }
}

fn author_style(author: Author) -> (AnsiColors, &'static str) {
    match author {
        Author::User => (AnsiColors::BrightGreen, "🙂"),
        Author::Bot => (AnsiColors::BrightCyan, "🤖"),
    }
}

fn print_quick_actions(emphasis: Emphasis) {
    let actions = topic_commands().join("  ");
    match emphasis {
        Emphasis::Full => println!("{}", actions.bright_yellow()),
        Emphasis::Reduced => println!("{}", actions.dimmed()),
    }
}

fn topic_commands() -> Vec<String> {
    TopicKey::ALL.iter().map(|topic| format!("/{topic}")).collect()
}

fn export(snapshot: Option<WidgetSnapshot>) {
    let Some(transcript) = snapshot.and_then(|snapshot| snapshot.transcript)
    else {
        eprintln!("no transcript to export");
        return;
    };
    match serde_json::to_string_pretty(&transcript) {
        Ok(json) => println!("{json}"),
        Err(err) => error!("failed to export the transcript: {err}"),
    }
}

async fn read_line<R: AsyncBufRead + Unpin>(
    lines: &mut Lines<R>,
) -> Option<String> {
    match lines.next_line().await {
        Ok(line) => line,
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
