use std::error::Error;
use std::fmt;

/// Returned when a message is posted to an actor whose task has already
/// terminated.
pub struct ActorDeadError;

impl fmt::Debug for ActorDeadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ActorDeadError")
    }
}

impl fmt::Display for ActorDeadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the actor is no longer running")
    }
}

impl Error for ActorDeadError {}
