//! # Lifecycle-bound binding sessions.
//!
//! A [`Session`] is the shape-independent core of every binding: it owns one
//! lifecycle subscription and one [`Rule`], and decides when the bound source
//! must be severed. The shape adapters (`BoundStream`, `Bound`) only translate
//! its [`Outcome`] into what a stream, single, maybe or completable returns.
//!
//! ## State machine
//! ```text
//!             lifecycle ends (EndPolicy::Detach)
//!   Armed ────────────────────────────────────────► Detached
//!     │                                                │
//!     │ terminal match / outside lifecycle             │ source finished
//!     │ lifecycle completed / failed                   │ cancel / drop
//!     │ resolve failure / source finished              │
//!     │ cancel / drop                                  │
//!     ▼                                                ▼
//!   Terminated(Outcome) ◄──────────────────────────────┘
//! ```
//!
//! ## Rules
//! - The terminal event is fixed at creation (`Until`) or resolved exactly once,
//!   from the first observed event (`Corresponding`).
//! - Pending lifecycle events are drained **before** the source is polled.
//! - A session is released exactly once; later calls are no-ops.

mod rule;
mod state;

pub use rule::Rule;
pub use state::{Observer, Session};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::error::BindError;

static SESSION_SEQ: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a binding session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub(crate) fn next() -> Self {
        SessionId(SESSION_SEQ.fetch_add(1, AtomicOrdering::Relaxed))
    }

    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why a session released its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    /// The lifecycle reached the session's terminal event.
    TerminalEvent,
    /// The component is past the last stage where the binding makes sense.
    OutsideLifecycle,
    /// The lifecycle stream completed.
    LifecycleCompleted,
    /// The source itself finished.
    SourceFinished,
    /// The caller cancelled or dropped the bound source.
    Cancelled,
}

impl Reason {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            Reason::TerminalEvent => "terminal_event",
            Reason::OutsideLifecycle => "outside_lifecycle",
            Reason::LifecycleCompleted => "lifecycle_completed",
            Reason::SourceFinished => "source_finished",
            Reason::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Released without error; the source is severed (or already finished).
    Cut(Reason),
    /// Released because of a lifecycle or resolve failure.
    Failed(BindError),
}

impl Outcome {
    /// The release reason, if the session was not failed.
    pub fn reason(&self) -> Option<Reason> {
        match self {
            Outcome::Cut(reason) => Some(*reason),
            Outcome::Failed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_are_unique_and_increasing() {
        let a = SessionId::next();
        let b = SessionId::next();
        assert!(b > a);
        assert_ne!(a, b);
        assert_eq!(format!("{a}"), format!("#{}", a.get()));
    }

    #[test]
    fn test_reason_labels() {
        assert_eq!(Reason::TerminalEvent.to_string(), "terminal_event");
        assert_eq!(Reason::LifecycleCompleted.as_label(), "lifecycle_completed");
        assert_eq!(Outcome::Cut(Reason::Cancelled).reason(), Some(Reason::Cancelled));
    }
}
