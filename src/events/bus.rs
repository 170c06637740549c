//! # Observability bus.
//!
//! Components and sessions report what happens to them on a [`Bus`]; the hub
//! is normally its only reader.
//!
//! ```text
//!   Component::transition ──┐
//!   Session (inside poll) ──┼──► Bus ──► hub listener ──► SubscriberSet
//!   subscriber workers    ──┘
//! ```
//!
//! ## Rules
//! - Publishing never blocks and never fails; sessions call it from `poll`.
//! - Events published while nobody listens are gone.
//! - One ring buffer is shared by all readers; a reader that falls behind
//!   sees `Lagged(n)` and loses the `n` oldest events.

use tokio::sync::broadcast;

use super::event::Event;

/// Fire-and-forget broadcast of [`Event`]s. Clones share one channel.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a bus holding at most `capacity` unread events (at least 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Sends `ev` to every current reader.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// True if at least one reader would receive a published event.
    ///
    /// Lets publishers skip building events nobody will see.
    pub fn is_observed(&self) -> bool {
        self.tx.receiver_count() > 0
    }

    /// New reader; it sees only events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
