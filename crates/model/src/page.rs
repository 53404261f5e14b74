use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TopicKey;

/// A view container the widget may write to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Container {
    /// The scrollable transcript.
    Transcript,
    /// The free-text input field.
    Input,
    /// The quick-action control set.
    QuickActions,
}

impl Container {
    /// The stable element id the page uses for this container.
    #[inline]
    pub fn element_id(self) -> &'static str {
        match self {
            Container::Transcript => "chatMessages",
            Container::Input => "chatInput",
            Container::QuickActions => "quickActions",
        }
    }
}

/// How a quick-action control names its topic.
///
/// Pages carry two conventions. Both are resolved to a [`TopicKey`] once,
/// when the control is bound.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "topic", rename_all = "snake_case")]
pub enum ActionSource {
    /// A declarative `data-action` attribute.
    DataAction(String),
    /// A legacy inline handler. The host extracts the topic argument into
    /// an attribute when it builds the page description.
    InlineHandler(String),
}

impl ActionSource {
    /// Resolves the topic this control asks about, if it names one.
    pub fn topic(&self) -> Option<TopicKey> {
        let raw = match self {
            ActionSource::DataAction(raw) => raw,
            ActionSource::InlineHandler(raw) => raw,
        };
        TopicKey::from_str(raw).ok()
    }
}

/// A button that asks about one fixed topic.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuickActionControl {
    /// Element id, unique within the page.
    pub id: String,
    /// Text shown on the button.
    pub label: String,
    /// Where the control's topic comes from.
    pub source: ActionSource,
}

impl QuickActionControl {
    /// A control using the declarative attribute.
    pub fn data_action<S1, S2, S3>(id: S1, label: S2, topic: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self {
            id: id.into(),
            label: label.into(),
            source: ActionSource::DataAction(topic.into()),
        }
    }

    /// A control using the legacy inline-handler convention.
    pub fn inline_handler<S1, S2, S3>(id: S1, label: S2, topic: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self {
            id: id.into(),
            label: label.into(),
            source: ActionSource::InlineHandler(topic.into()),
        }
    }
}

/// Describes which parts of the chat view exist on the page.
///
/// Any container may be missing; operations depending on it are skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Whether the transcript container exists.
    pub transcript: bool,
    /// Whether the text input exists.
    pub input: bool,
    /// Whether the quick-action set exists.
    pub quick_actions: bool,
    /// Quick-action controls found on the page.
    pub controls: Vec<QuickActionControl>,
}

impl PageLayout {
    /// A page without any chat markup.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The portfolio page: every container and one control per topic.
    pub fn portfolio() -> Self {
        let controls = [
            ("Experience", TopicKey::Experience),
            ("Skills", TopicKey::Skills),
            ("Projects", TopicKey::Projects),
            ("Contact", TopicKey::Contact),
        ]
        .into_iter()
        .map(|(label, topic)| {
            QuickActionControl::data_action(
                format!("qa-{topic}"),
                label,
                topic.as_str(),
            )
        })
        .collect();
        Self {
            transcript: true,
            input: true,
            quick_actions: true,
            controls,
        }
    }

    /// Returns the first control asking about `topic`.
    pub fn control_for(
        &self,
        topic: TopicKey,
    ) -> Option<&QuickActionControl> {
        self.controls
            .iter()
            .find(|control| control.source.topic() == Some(topic))
    }

    /// Returns whether `container` exists on this page.
    #[inline]
    pub fn has(&self, container: Container) -> bool {
        match container {
            Container::Transcript => self.transcript,
            Container::Input => self.input,
            Container::QuickActions => self.quick_actions,
        }
    }
}
