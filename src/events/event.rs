//! # Observability events emitted by components and binding sessions.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Lifecycle events**: a component changed stage or its lifecycle ended
//! - **Session events**: a binding session was created, resolved, or released
//! - **Subscriber events**: delivery problems inside the subscriber set
//!
//! The [`Event`] struct carries additional metadata such as timestamps, the
//! component name, the session id, the lifecycle event label and a reason.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use lifebound::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::LifecycleTransition)
//!     .with_component("main")
//!     .with_lifecycle("Resume");
//!
//! assert_eq!(ev.kind, EventKind::LifecycleTransition);
//! assert_eq!(ev.component.as_deref(), Some("main"));
//! assert_eq!(ev.lifecycle.as_deref(), Some("Resume"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::session::SessionId;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of observability events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `component`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `component`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    SubscriberOverflow,

    // === Lifecycle events ===
    /// A component moved to a new lifecycle stage.
    ///
    /// Sets:
    /// - `component`: component name
    /// - `lifecycle`: stage label
    LifecycleTransition,

    /// A component's lifecycle source completed or failed.
    ///
    /// Sets:
    /// - `component`: component name
    /// - `reason`: failure message (only when the source failed)
    LifecycleEnded,

    // === Session events ===
    /// A binding session was created and subscribed to the lifecycle.
    ///
    /// Sets:
    /// - `component`: component name
    /// - `session`: session id
    /// - `reason`: rule label (`any_event`, `until_event`, `corresponding`)
    /// - `lifecycle`: explicit terminal event (only for `until_event`)
    SessionBound,

    /// The corresponding terminal event was resolved from the first observed event.
    ///
    /// Sets:
    /// - `component`, `session`
    /// - `lifecycle`: resolved terminal event label
    TerminalResolved,

    /// The lifecycle ended and the session stopped observing it; the source keeps running.
    ///
    /// Sets:
    /// - `component`, `session`
    SessionDetached,

    /// The session was released: the source is cut or finished.
    ///
    /// Sets:
    /// - `component`, `session`
    /// - `reason`: release reason label
    /// - `lifecycle`: the observed event that ended it (if any)
    SessionTerminated,

    /// The session failed (lifecycle failure or unresolved terminal event).
    ///
    /// Sets:
    /// - `component`, `session`
    /// - `reason`: error message
    SessionFailed,

    /// The caller dropped or cancelled the bound source while the session was live.
    ///
    /// Sets:
    /// - `component`, `session`
    SessionCancelled,
}

/// Observability event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the component (or subscriber), if applicable.
    pub component: Option<Arc<str>>,
    /// Binding session, if applicable.
    pub session: Option<SessionId>,
    /// Lifecycle event label, if applicable.
    pub lifecycle: Option<Arc<str>>,
    /// Human-readable reason (release reason, errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            component: None,
            session: None,
            lifecycle: None,
            reason: None,
        }
    }

    /// Attaches a component name.
    #[inline]
    pub fn with_component(mut self, component: impl Into<Arc<str>>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Attaches a session id.
    #[inline]
    pub fn with_session(mut self, session: SessionId) -> Self {
        self.session = Some(session);
        self
    }

    /// Attaches a lifecycle event label.
    #[inline]
    pub fn with_lifecycle(mut self, label: impl Into<Arc<str>>) -> Self {
        self.lifecycle = Some(label.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_component(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_component(subscriber)
            .with_reason(info)
    }

    /// True for events that release a session for good.
    #[inline]
    pub fn is_session_end(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SessionTerminated | EventKind::SessionFailed | EventKind::SessionCancelled
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic() {
        let a = Event::new(EventKind::SessionBound);
        let b = Event::new(EventKind::SessionBound);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_session_end_kinds() {
        assert!(Event::new(EventKind::SessionTerminated).is_session_end());
        assert!(Event::new(EventKind::SessionFailed).is_session_end());
        assert!(Event::new(EventKind::SessionCancelled).is_session_end());
        assert!(!Event::new(EventKind::SessionDetached).is_session_end());
        assert!(!Event::new(EventKind::TerminalResolved).is_session_end());
    }

    #[test]
    fn test_overflow_event_carries_subscriber_name() {
        let ev = Event::subscriber_overflow("tracker", "full");
        assert_eq!(ev.kind, EventKind::SubscriberOverflow);
        assert_eq!(ev.component.as_deref(), Some("tracker"));
        assert_eq!(ev.reason.as_deref(), Some("subscriber=tracker reason=full"));
    }
}
