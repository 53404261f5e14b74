use std::sync::Weak;

use tokio::select;
use tokio::sync::{mpsc, watch};

use crate::mailbox::{BoxedMessage, Mailbox};
use crate::{Actor, Message};

pub async fn run_actor<S: Send + 'static>(
    mailbox: Weak<Mailbox<S>>,
    mut state: S,
    mut msg_rx: mpsc::UnboundedReceiver<BoxedMessage<S>>,
    mut kill_rx: watch::Receiver<bool>,
) {
    debug!("started");
    // The kill switch closes together with the last handle. Messages still
    // queued at that point are handled before the loop ends.
    let mut kill_open = true;
    loop {
        let msg = select! {
            biased;

            changed = kill_rx.changed(), if kill_open => {
                if changed.is_err() {
                    kill_open = false;
                    continue;
                }
                if *kill_rx.borrow_and_update() {
                    debug!("killed");
                    break;
                }
                continue;
            }
            msg = msg_rx.recv() => {
                let Some(msg) = msg else {
                    break;
                };
                msg
            }
        };
        trace!("received message: {msg:?}");

        let Some(mailbox) = mailbox.upgrade() else {
            warn!("every handle has been dropped, discard the message");
            break;
        };
        let handle = Actor::from_mailbox(mailbox);
        trace_span!("handle msg").in_scope(|| {
            msg.handle(&mut state, &handle);
        });
    }
    // Closing the receiver makes `Actor::is_alive` report `false` and
    // rejects any further sends.
    msg_rx.close();
    debug!("terminated");
}
