use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A canned conversation topic.
///
/// The set of topics is fixed at build time. Parsing accepts exactly the
/// lowercase keys; any other spelling names no topic.
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
#[serde(rename_all = "lowercase")]
pub enum TopicKey {
    /// Work and internship experience.
    Experience,
    /// Technical skills.
    Skills,
    /// Selected projects.
    Projects,
    /// Contact details.
    Contact,
}

impl TopicKey {
    /// Every topic, in the order the quick actions present them.
    pub const ALL: [TopicKey; 4] = [
        TopicKey::Experience,
        TopicKey::Skills,
        TopicKey::Projects,
        TopicKey::Contact,
    ];

    /// Returns the lowercase key used by page attributes and catalogues.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            TopicKey::Experience => "experience",
            TopicKey::Skills => "skills",
            TopicKey::Projects => "projects",
            TopicKey::Contact => "contact",
        }
    }
}

impl Display for TopicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopicKey {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|topic| topic.as_str() == s)
            .ok_or_else(|| UnknownTopic(s.to_owned()))
    }
}

/// A string that does not name any [`TopicKey`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownTopic(pub String);

impl Display for UnknownTopic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "unknown topic `{}`", self.0)
    }
}

impl Error for UnknownTopic {}
