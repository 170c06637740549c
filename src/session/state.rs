use std::sync::Arc;
use std::task::{Context, Poll};

use futures::StreamExt;

use crate::config::EndPolicy;
use crate::error::{BindError, ResolveError};
use crate::events::{Bus, Event, EventKind};
use crate::lifecycle::{LifecycleEvent, LifecycleEvents};

use super::{Outcome, Reason, Rule, SessionId};

/// Publishes session events on a [`Bus`], tagged with a component name.
#[derive(Clone, Debug)]
pub struct Observer {
    bus: Bus,
    component: Option<Arc<str>>,
}

impl Observer {
    /// Creates an observer publishing to `bus`.
    pub fn new(bus: Bus) -> Self {
        Self {
            bus,
            component: None,
        }
    }

    /// Tags every published event with `component`.
    pub fn with_component(mut self, component: impl Into<Arc<str>>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub(crate) fn is_observed(&self) -> bool {
        self.bus.is_observed()
    }

    pub(crate) fn publish(&self, ev: Event) {
        let ev = match &self.component {
            Some(name) => ev.with_component(Arc::clone(name)),
            None => ev,
        };
        self.bus.publish(ev);
    }
}

#[derive(Debug)]
enum State {
    Armed,
    Detached,
    Terminated(Outcome),
}

/// One lifecycle subscription governed by one [`Rule`].
///
/// Created by a [`Binding`](crate::Binding); owned by the shape adapter that
/// wraps the source. Dropping a live session cancels it.
pub struct Session<E: LifecycleEvent> {
    id: SessionId,
    rule: Rule<E>,
    terminal: Option<E>,
    lifecycle: Option<LifecycleEvents<E>>,
    end_policy: EndPolicy,
    observer: Option<Observer>,
    state: State,
}

impl<E: LifecycleEvent> Session<E> {
    /// Subscribes to `lifecycle` and consumes every event that is already available.
    ///
    /// A session bound to a component that is already past its terminal event is
    /// therefore terminated before the caller gets it back.
    pub fn new(
        lifecycle: LifecycleEvents<E>,
        rule: Rule<E>,
        end_policy: EndPolicy,
        observer: Option<Observer>,
    ) -> Self {
        let terminal = match &rule {
            Rule::Until(event) => Some(event.clone()),
            _ => None,
        };
        let mut session = Self {
            id: SessionId::next(),
            rule,
            terminal,
            lifecycle: Some(lifecycle),
            end_policy,
            observer,
            state: State::Armed,
        };

        session.publish(|| {
            let bound = Event::new(EventKind::SessionBound)
                .with_session(session.id)
                .with_reason(session.rule.as_label());
            match &session.terminal {
                Some(terminal) => bound.with_lifecycle(terminal.label()),
                None => bound,
            }
        });

        session.prime();
        session
    }

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The terminal event, once fixed or resolved.
    pub fn terminal(&self) -> Option<&E> {
        self.terminal.as_ref()
    }

    /// True while the session still observes the lifecycle.
    pub fn is_armed(&self) -> bool {
        matches!(self.state, State::Armed)
    }

    /// True if the lifecycle ended and the source was left running.
    pub fn is_detached(&self) -> bool {
        matches!(self.state, State::Detached)
    }

    /// True once the session has been released.
    pub fn is_terminated(&self) -> bool {
        matches!(self.state, State::Terminated(_))
    }

    /// How the session ended, if it has.
    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.state {
            State::Terminated(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Drains pending lifecycle events.
    ///
    /// Returns `Ready(outcome)` once the session is released (and on every call
    /// after that), `Pending` while the source may keep running.
    pub fn poll_end(&mut self, cx: &mut Context<'_>) -> Poll<Outcome> {
        loop {
            match &self.state {
                State::Terminated(outcome) => return Poll::Ready(outcome.clone()),
                State::Detached => return Poll::Pending,
                State::Armed => {}
            }
            let Some(lifecycle) = self.lifecycle.as_mut() else {
                return Poll::Pending;
            };
            match lifecycle.poll_next_unpin(cx) {
                Poll::Ready(Some(Ok(event))) => self.observe(event),
                Poll::Ready(Some(Err(err))) => self.fail(BindError::Lifecycle(err)),
                Poll::Ready(None) => self.lifecycle_ended(),
                Poll::Pending => return Poll::Pending,
            }
        }
    }

    /// Marks the source as finished on its own.
    pub fn finish(&mut self) {
        if !self.is_terminated() {
            self.release(Reason::SourceFinished, None);
        }
    }

    /// Cancels the session. Idempotent.
    pub fn cancel(&mut self) {
        if !self.is_terminated() {
            self.release(Reason::Cancelled, None);
        }
    }

    fn prime(&mut self) {
        let mut cx = Context::from_waker(futures::task::noop_waker_ref());
        let _ = self.poll_end(&mut cx);
    }

    fn observe(&mut self, event: E) {
        if let Rule::AnyEvent = self.rule {
            self.release(Reason::TerminalEvent, Some(&event));
            return;
        }

        if self.terminal.is_none() {
            if let Rule::Corresponding(map) = &self.rule {
                let map = Arc::clone(map);
                match map.corresponding(&event) {
                    Ok(terminal) => {
                        self.publish(|| {
                            Event::new(EventKind::TerminalResolved)
                                .with_session(self.id)
                                .with_lifecycle(terminal.label())
                        });
                        self.terminal = Some(terminal);
                        // The resolving event is never compared against its own pairing.
                        if event.is_terminal() {
                            self.release(Reason::OutsideLifecycle, Some(&event));
                        }
                        return;
                    }
                    Err(ResolveError::OutsideLifecycle { .. }) => {
                        self.release(Reason::OutsideLifecycle, Some(&event));
                        return;
                    }
                    Err(err) => {
                        self.fail(BindError::Resolve(err));
                        return;
                    }
                }
            }
        }

        if self.terminal.as_ref() == Some(&event) {
            self.release(Reason::TerminalEvent, Some(&event));
        } else if event.is_terminal() {
            self.release(Reason::OutsideLifecycle, Some(&event));
        }
    }

    fn lifecycle_ended(&mut self) {
        match self.end_policy {
            EndPolicy::Terminate => self.release(Reason::LifecycleCompleted, None),
            EndPolicy::Detach => {
                self.lifecycle = None;
                self.state = State::Detached;
                self.publish(|| Event::new(EventKind::SessionDetached).with_session(self.id));
            }
        }
    }

    fn release(&mut self, reason: Reason, event: Option<&E>) {
        self.lifecycle = None;
        self.state = State::Terminated(Outcome::Cut(reason));

        let kind = match reason {
            Reason::Cancelled => EventKind::SessionCancelled,
            _ => EventKind::SessionTerminated,
        };
        self.publish(|| {
            let ev = Event::new(kind)
                .with_session(self.id)
                .with_reason(reason.as_label());
            match event {
                Some(event) => ev.with_lifecycle(event.label()),
                None => ev,
            }
        });
    }

    fn fail(&mut self, err: BindError) {
        self.lifecycle = None;
        self.publish(|| {
            Event::new(EventKind::SessionFailed)
                .with_session(self.id)
                .with_reason(err.as_message())
        });
        self.state = State::Terminated(Outcome::Failed(err));
    }

    // Events are only built when a reader is listening.
    fn publish(&self, build: impl FnOnce() -> Event) {
        if let Some(observer) = &self.observer {
            if observer.is_observed() {
                observer.publish(build());
            }
        }
    }
}

impl<E: LifecycleEvent> Drop for Session<E> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<E: LifecycleEvent> std::fmt::Debug for Session<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("rule", &self.rule)
            .field("terminal", &self.terminal)
            .field("state", &self.state)
            .finish()
    }
}
