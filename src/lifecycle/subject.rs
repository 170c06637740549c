//! # Replaying lifecycle source.
//!
//! [`LifecycleSubject`] is the event source behind every [`Component`](crate::Component).
//! It multicasts lifecycle transitions to any number of observers and replays
//! the latest transition to new ones, so a binding made mid-lifecycle knows
//! where the component currently is.
//!
//! ## Architecture
//! ```text
//! emit(ev) ──► lock ──► current = ev
//!                  └──► for each observer: unbounded_send(Ok(ev))
//!                             │            (closed → pruned)
//!                             ▼
//!              [queue 1]  [queue 2]  ...  [queue N]
//!                  │          │               │
//!            LifecycleEvents (one per subscribe())
//! ```
//!
//! ## Rules
//! - **Replay**: `subscribe()` on an open subject first yields the current event.
//! - **Completion**: after `complete()` (or once the last handle is dropped)
//!   observers see end-of-stream; new subscribers see it immediately.
//! - **Failure**: after `fail()` every observer, current and future, gets the
//!   error once and then end-of-stream.
//! - **Short lock**: the lock is held only to record and fan out; observer
//!   queues are unbounded so `emit` never waits.

use std::sync::Arc;

use futures::channel::mpsc;
use parking_lot::Mutex;

use crate::error::LifecycleError;

use super::{LifecycleEvents, LifecycleSource};

type ObserverTx<E> = mpsc::UnboundedSender<Result<E, LifecycleError>>;

enum Phase {
    Open,
    Completed,
    Failed(LifecycleError),
}

struct Shared<E> {
    current: Option<E>,
    phase: Phase,
    observers: Vec<ObserverTx<E>>,
}

/// Multicast lifecycle source with replay of the latest event.
///
/// Cloning yields another handle to the same subject.
///
/// # Example
/// ```
/// use futures::{FutureExt, StreamExt};
/// use lifebound::{ActivityEvent, LifecycleSubject};
///
/// let subject = LifecycleSubject::new();
/// subject.emit(ActivityEvent::Create);
/// subject.emit(ActivityEvent::Start);
///
/// let mut events = subject.subscribe();
/// let first = events.next().now_or_never().flatten();
/// assert_eq!(first, Some(Ok(ActivityEvent::Start)));
/// ```
pub struct LifecycleSubject<E> {
    shared: Arc<Mutex<Shared<E>>>,
}

impl<E> Clone for LifecycleSubject<E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<E: Clone + Send + 'static> LifecycleSubject<E> {
    /// Creates an open subject with no current event.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                current: None,
                phase: Phase::Open,
                observers: Vec::new(),
            })),
        }
    }

    /// Records `event` as current and delivers it to every observer.
    ///
    /// Returns `false` (and does nothing) once the subject is completed or failed.
    pub fn emit(&self, event: E) -> bool {
        let mut shared = self.shared.lock();
        if !matches!(shared.phase, Phase::Open) {
            return false;
        }
        shared
            .observers
            .retain(|tx| tx.unbounded_send(Ok(event.clone())).is_ok());
        shared.current = Some(event);
        true
    }

    /// Ends the lifecycle. Returns `false` if it had already ended.
    pub fn complete(&self) -> bool {
        let mut shared = self.shared.lock();
        if !matches!(shared.phase, Phase::Open) {
            return false;
        }
        shared.phase = Phase::Completed;
        shared.observers.clear();
        true
    }

    /// Fails the lifecycle. Returns `false` if it had already ended.
    pub fn fail(&self, reason: impl Into<Arc<str>>) -> bool {
        let mut shared = self.shared.lock();
        if !matches!(shared.phase, Phase::Open) {
            return false;
        }
        let err = LifecycleError::failed(reason);
        for tx in shared.observers.drain(..) {
            let _ = tx.unbounded_send(Err(err.clone()));
        }
        shared.phase = Phase::Failed(err);
        true
    }

    /// The latest emitted event.
    pub fn current(&self) -> Option<E> {
        self.shared.lock().current.clone()
    }

    /// True once completed or failed.
    pub fn is_closed(&self) -> bool {
        !matches!(self.shared.lock().phase, Phase::Open)
    }

    /// Subscribes a new observer.
    pub fn subscribe(&self) -> LifecycleEvents<E> {
        let (tx, rx) = mpsc::unbounded();
        let mut shared = self.shared.lock();
        match &shared.phase {
            Phase::Open => {
                if let Some(current) = shared.current.clone() {
                    let _ = tx.unbounded_send(Ok(current));
                }
                shared.observers.push(tx);
            }
            Phase::Completed => {}
            Phase::Failed(err) => {
                let _ = tx.unbounded_send(Err(err.clone()));
            }
        }
        LifecycleEvents::new(rx)
    }

    /// Number of live observers (dropped observers are pruned first).
    pub fn subscriber_count(&self) -> usize {
        let mut shared = self.shared.lock();
        shared.observers.retain(|tx| !tx.is_closed());
        shared.observers.len()
    }
}

impl<E: Clone + Send + 'static> Default for LifecycleSubject<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone + Send + 'static> LifecycleSource<E> for LifecycleSubject<E> {
    fn lifecycle(&self) -> LifecycleEvents<E> {
        self.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::ActivityEvent;
    use futures::{FutureExt, StreamExt};

    fn next<E>(events: &mut LifecycleEvents<E>) -> Option<Option<Result<E, LifecycleError>>> {
        events.next().now_or_never()
    }

    #[test]
    fn test_new_observer_gets_latest_event_then_live_ones() {
        let subject = LifecycleSubject::new();
        subject.emit(ActivityEvent::Create);
        subject.emit(ActivityEvent::Start);

        let mut events = subject.subscribe();
        assert_eq!(next(&mut events), Some(Some(Ok(ActivityEvent::Start))));
        assert_eq!(next(&mut events), None);

        subject.emit(ActivityEvent::Resume);
        assert_eq!(next(&mut events), Some(Some(Ok(ActivityEvent::Resume))));
    }

    #[test]
    fn test_complete_ends_observers_and_rejects_emits() {
        let subject = LifecycleSubject::new();
        subject.emit(ActivityEvent::Create);
        let mut events = subject.subscribe();

        assert!(subject.complete());
        assert!(!subject.complete());
        assert!(!subject.emit(ActivityEvent::Start));

        assert_eq!(next(&mut events), Some(Some(Ok(ActivityEvent::Create))));
        assert_eq!(next(&mut events), Some(None));

        let mut late = subject.subscribe();
        assert_eq!(next(&mut late), Some(None));
        assert_eq!(subject.current(), Some(ActivityEvent::Create));
    }

    #[test]
    fn test_failure_reaches_current_and_late_observers() {
        let subject = LifecycleSubject::<ActivityEvent>::new();
        let mut events = subject.subscribe();
        assert!(subject.fail("owner crashed"));

        let expected = Err(LifecycleError::failed("owner crashed"));
        assert_eq!(next(&mut events), Some(Some(expected.clone())));
        assert_eq!(next(&mut events), Some(None));

        let mut late = subject.subscribe();
        assert_eq!(next(&mut late), Some(Some(expected)));
        assert!(subject.is_closed());
    }

    #[test]
    fn test_dropped_observers_are_pruned() {
        let subject = LifecycleSubject::<ActivityEvent>::new();
        let a = subject.subscribe();
        let _b = subject.subscribe();
        assert_eq!(subject.subscriber_count(), 2);

        drop(a);
        assert_eq!(subject.subscriber_count(), 1);
    }

    #[test]
    fn test_dropping_last_handle_completes_observers() {
        let subject = LifecycleSubject::new();
        subject.emit(ActivityEvent::Start);
        let mut events = subject.subscribe();
        drop(subject);

        assert_eq!(next(&mut events), Some(Some(Ok(ActivityEvent::Start))));
        assert_eq!(next(&mut events), Some(None));
    }
}
