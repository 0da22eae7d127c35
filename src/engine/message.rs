use std::collections::VecDeque;

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer};

use super::{ScheduledTone, ToneHandle};

/// Commands from the control side to the renderer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ToneMessage {
    Start { handle: ToneHandle, tone: ScheduledTone },
    /// Silence every tone the renderer holds, sounding or pending.
    StopAll,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ToneMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ToneMessage> {
    fn pop(&mut self) -> Option<ToneMessage> {
        Consumer::pop(self).ok()
    }
}

impl MessageReceiver for VecDeque<ToneMessage> {
    fn pop(&mut self) -> Option<ToneMessage> {
        self.pop_front()
    }
}

/// Control-side end of the bounded command queue.
///
/// A `Start` is only queued if it leaves a free slot behind it, so a
/// `StopAll` always fits after any accepted tone. When `StopAll` itself does
/// not fit, the queue already ends in a `StopAll` and every tone ahead of it
/// is covered.
#[cfg(feature = "rtrb")]
pub struct CommandSender {
    tx: Producer<ToneMessage>,
}

#[cfg(feature = "rtrb")]
impl CommandSender {
    pub fn new(tx: Producer<ToneMessage>) -> Self {
        Self { tx }
    }

    /// Queue a tone. `false` if the queue is too full to take it.
    pub fn start(&mut self, handle: ToneHandle, tone: ScheduledTone) -> bool {
        if self.tx.slots() < 2 {
            return false;
        }
        self.tx.push(ToneMessage::Start { handle, tone }).is_ok()
    }

    /// Queue a `StopAll`. `false` if one is already the last queued message.
    pub fn stop_all(&mut self) -> bool {
        self.tx.push(ToneMessage::StopAll).is_ok()
    }
}
