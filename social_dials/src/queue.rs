//! Bounded control queue between device listeners and the frame loop.
//!
//! Any number of producers (one per device thread) share clones of the
//! [`ControlSender`]; the frame loop is the single consumer.  A full queue
//! drops the incoming sample rather than blocking a device thread.

use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};

use tracing::{debug, warn};

use crate::sample::ControlSample;

/// Default queue depth; a few seconds of dial chatter at 30 fps.
pub const DEFAULT_QUEUE_DEPTH: usize = 256;

/// Producer half of the control queue.
#[derive(Clone, Debug)]
pub struct ControlSender {
    tx: SyncSender<ControlSample>,
}

/// Consumer half of the control queue.
#[derive(Debug)]
pub struct ControlReceiver {
    rx: Receiver<ControlSample>,
}

/// Create a control queue holding at most `depth` pending samples.
pub fn control_queue(depth: usize) -> (ControlSender, ControlReceiver) {
    let (tx, rx) = mpsc::sync_channel(depth.max(1));
    (ControlSender { tx }, ControlReceiver { rx })
}

impl ControlSender {
    /// Queue a sample without blocking.  Returns `false` if it was dropped.
    pub fn offer(&self, sample: ControlSample) -> bool {
        match self.tx.try_send(sample) {
            Ok(()) => true,
            Err(TrySendError::Full(sample)) => {
                warn!(?sample, "control queue full; dropping sample");
                false
            }
            Err(TrySendError::Disconnected(sample)) => {
                debug!(?sample, "control queue closed");
                false
            }
        }
    }
}

impl ControlReceiver {
    /// Take the next pending sample, if any.  `None` once the queue is empty
    /// or every sender has gone away.
    pub fn try_next(&self) -> Option<ControlSample> {
        match self.rx.try_recv() {
            Ok(sample)                      => Some(sample),
            Err(TryRecvError::Empty)        => None,
            Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drain everything currently queued, in arrival order.
    pub fn drain(&self) -> Vec<ControlSample> {
        let mut out = Vec::new();
        while let Some(s) = self.try_next() { out.push(s); }
        out
    }
}
