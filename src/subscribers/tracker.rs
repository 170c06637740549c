//! # Live session tracker with sequence-based ordering.
//!
//! Maintains which binding sessions are still live, using event sequence
//! numbers to tolerate out-of-order delivery. A live session after every
//! component has ended is a leaked binding.
//!
//! ## Architecture
//! ```text
//! Session ──► Bus ──► hub listener ──► SubscriberSet ──► SessionTracker::update()
//!                                                               │
//!                                                               ▼
//!                                                 HashMap<SessionId, Entry>
//!                                               (id → {seq, status, component})
//! ```
//!
//! ## Rules
//! - `SessionBound` → armed; `SessionDetached` → detached;
//!   `SessionTerminated` / `SessionFailed` / `SessionCancelled` → released
//! - Other session events **update seq** only
//! - Events with `seq <= last_seq` are **rejected** (stale)
//! - Reads are **eventually consistent** with the bus

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::events::{Event, EventKind};
use crate::session::SessionId;

use super::Subscribe;

/// Status of a tracked session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Observing its lifecycle.
    Armed,
    /// Lifecycle ended; the source still runs.
    Detached,
    /// Released.
    Released,
}

#[derive(Debug, Clone)]
struct Entry {
    last_seq: Option<u64>,
    status: Option<SessionStatus>,
    component: Option<Arc<str>>,
}

impl Entry {
    fn is_live(&self) -> bool {
        matches!(
            self.status,
            Some(SessionStatus::Armed | SessionStatus::Detached)
        )
    }
}

/// Tracks binding sessions by id.
pub struct SessionTracker {
    state: RwLock<HashMap<SessionId, Entry>>,
    capacity: usize,
}

impl SessionTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(HashMap::new()),
            capacity: 2048,
        }
    }

    /// Configures the queue capacity for this subscriber.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Applies `ev` if it is newer than the last one seen for its session.
    ///
    /// Returns `true` if the session status changed.
    /// ```text
    /// update(SessionTerminated, seq=10) → released, last_seq=10
    /// update(SessionBound, seq=9)       → rejected (stale)
    /// ```
    pub async fn update(&self, ev: &Event) -> bool {
        let Some(id) = ev.session else {
            return false;
        };

        let mut state = self.state.write().await;
        let entry = state.entry(id).or_insert(Entry {
            last_seq: None,
            status: None,
            component: None,
        });
        if entry.last_seq.is_some_and(|last| ev.seq <= last) {
            return false;
        }
        entry.last_seq = Some(ev.seq);
        if entry.component.is_none() {
            entry.component = ev.component.clone();
        }

        let next = match ev.kind {
            EventKind::SessionBound => SessionStatus::Armed,
            EventKind::SessionDetached => SessionStatus::Detached,
            EventKind::SessionTerminated | EventKind::SessionFailed | EventKind::SessionCancelled => {
                SessionStatus::Released
            }
            _ => return false,
        };
        let changed = entry.status != Some(next);
        entry.status = Some(next);
        changed
    }

    /// Status of `id`, if it was ever seen.
    pub async fn status(&self, id: SessionId) -> Option<SessionStatus> {
        self.state.read().await.get(&id).and_then(|e| e.status)
    }

    /// True if `id` is armed or detached.
    pub async fn is_live(&self, id: SessionId) -> bool {
        self.state.read().await.get(&id).is_some_and(Entry::is_live)
    }

    /// Sorted ids of sessions that are armed or detached.
    pub async fn live(&self) -> Vec<SessionId> {
        let state = self.state.read().await;
        let mut live: Vec<SessionId> = state
            .iter()
            .filter(|(_, e)| e.is_live())
            .map(|(id, _)| *id)
            .collect();
        live.sort_unstable();
        live
    }

    /// Sorted ids of live sessions bound to `component`.
    pub async fn live_for(&self, component: &str) -> Vec<SessionId> {
        let state = self.state.read().await;
        let mut live: Vec<SessionId> = state
            .iter()
            .filter(|(_, e)| e.is_live() && e.component.as_deref() == Some(component))
            .map(|(id, _)| *id)
            .collect();
        live.sort_unstable();
        live
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Subscribe for SessionTracker {
    async fn on_event(&self, ev: &Event) {
        self.update(ev).await;
    }

    fn name(&self) -> &'static str {
        "session-tracker"
    }

    fn queue_capacity(&self) -> usize {
        self.capacity
    }
}
