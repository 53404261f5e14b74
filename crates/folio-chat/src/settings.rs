use std::error::Error;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use std::{env, fs, io};

use folio_chat_catalogue::Catalogue;
use folio_chat_core::{ChatWidgetBuilder, Dispatch, Timings, TimingsBuilder};

const WELCOME_DELAY_VAR: &str = "FOLIO_CHAT_WELCOME_DELAY_MS";
const REPLY_DELAY_VAR: &str = "FOLIO_CHAT_REPLY_DELAY_MS";
const FALLBACK_DELAY_VAR: &str = "FOLIO_CHAT_FALLBACK_DELAY_MS";
const CATALOGUE_VAR: &str = "FOLIO_CHAT_CATALOGUE";
const QUEUED_VAR: &str = "FOLIO_CHAT_QUEUED";

/// Error loading a catalogue file.
#[derive(Debug)]
pub enum CatalogueError {
    /// The file could not be read.
    Io(io::Error),
    /// The file is not a valid catalogue.
    Parse(serde_json::Error),
}

impl fmt::Display for CatalogueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogueError::Io(err) => {
                write!(f, "cannot read catalogue: {err}")
            }
            CatalogueError::Parse(err) => {
                write!(f, "invalid catalogue: {err}")
            }
        }
    }
}

impl Error for CatalogueError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CatalogueError::Io(err) => Some(err),
            CatalogueError::Parse(err) => Some(err),
        }
    }
}

/// Reads a JSON catalogue from `path`.
pub fn load_catalogue<P: AsRef<Path>>(
    path: P,
) -> Result<Catalogue, CatalogueError> {
    let json = fs::read_to_string(path).map_err(CatalogueError::Io)?;
    Catalogue::from_json(&json).map_err(CatalogueError::Parse)
}

/// Parses a boolean environment value. Empty means unset, i.e. `false`.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Widget settings taken from the environment.
///
/// | variable | effect |
/// |---|---|
/// | `FOLIO_CHAT_WELCOME_DELAY_MS` | welcome delay |
/// | `FOLIO_CHAT_REPLY_DELAY_MS` | topic reply delay |
/// | `FOLIO_CHAT_FALLBACK_DELAY_MS` | fallback reply delay |
/// | `FOLIO_CHAT_CATALOGUE` | path of a JSON catalogue |
/// | `FOLIO_CHAT_QUEUED` | boolean, `true` serializes overlapping requests |
///
/// Unparsable values are logged and replaced by the defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Timer delays.
    pub timings: Timings,
    /// Overlapping request policy.
    pub dispatch: Dispatch,
    /// The response catalogue.
    pub catalogue: Catalogue,
}

impl Settings {
    /// Reads the settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the settings through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let delay = |name: &str| {
            let value = lookup(name)?;
            match value.trim().parse::<u64>() {
                Ok(millis) => Some(Duration::from_millis(millis)),
                Err(err) => {
                    warn!("ignoring {name}={value:?}: {err}");
                    None
                }
            }
        };

        let mut timings = TimingsBuilder::new();
        if let Some(welcome) = delay(WELCOME_DELAY_VAR) {
            timings = timings.with_welcome(welcome);
        }
        if let Some(reply) = delay(REPLY_DELAY_VAR) {
            timings = timings.with_reply(reply);
        }
        if let Some(fallback) = delay(FALLBACK_DELAY_VAR) {
            timings = timings.with_fallback(fallback);
        }

        let queued = lookup(QUEUED_VAR).and_then(|value| {
            let flag = parse_flag(&value);
            if flag.is_none() {
                warn!("ignoring {QUEUED_VAR}={value:?}: not a boolean");
            }
            flag
        });
        let dispatch = match queued {
            Some(true) => Dispatch::Queued,
            Some(false) | None => Dispatch::Concurrent,
        };

        let catalogue = match lookup(CATALOGUE_VAR) {
            Some(path) => load_catalogue(&path).unwrap_or_else(|err| {
                warn!("{path}: {err}, using the built-in catalogue");
                Catalogue::portfolio()
            }),
            None => Catalogue::portfolio(),
        };

        Self {
            timings: timings.build(),
            dispatch,
            catalogue,
        }
    }

    /// Returns a widget builder for the portfolio page using these
    /// settings.
    pub fn into_builder(self) -> ChatWidgetBuilder {
        ChatWidgetBuilder::new()
            .with_catalogue(self.catalogue)
            .with_timings(self.timings)
            .with_dispatch(self.dispatch)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
