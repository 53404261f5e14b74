use std::time::Duration;

use tokio::time::sleep;
use tracing::Instrument;

use crate::{Actor, Message};

/// Spawns a one-shot timer that posts `msg` to `actor` after `delay`.
pub(crate) fn fire_after<S, M>(actor: Actor<S>, delay: Duration, msg: M)
where
    S: Send + 'static,
    M: Message<S>,
{
    let delay_ms = delay.as_millis() as u64;
    tokio::spawn(
        async move {
            sleep(delay).await;
            if actor.send(msg).is_err() {
                trace!("actor has terminated, timer message dropped");
            }
        }
        .instrument(trace_span!("timer", delay_ms)),
    );
}
