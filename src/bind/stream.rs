use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use futures::stream::FusedStream;

use crate::error::BindError;
use crate::lifecycle::LifecycleEvent;
use crate::session::{Outcome, Session, SessionId};

/// A multi-value source cut by its lifecycle.
///
/// Yields `Ok(item)` for every source item. When the lifecycle cuts the source
/// the stream simply ends; a lifecycle or resolve failure is yielded once as
/// `Err` and then the stream ends. The source is dropped as soon as the
/// session is released.
#[must_use = "streams do nothing unless polled"]
pub struct BoundStream<S, E: LifecycleEvent> {
    source: Option<Pin<Box<S>>>,
    session: Session<E>,
    done: bool,
}

impl<S, E: LifecycleEvent> BoundStream<S, E> {
    pub(crate) fn new(source: S, session: Session<E>) -> Self {
        Self {
            source: Some(Box::pin(source)),
            session,
            done: false,
        }
    }

    /// Identifier of the underlying session.
    pub fn session_id(&self) -> SessionId {
        self.session.id()
    }

    /// How the binding ended, if it has.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.session.outcome()
    }

    /// Drops the source and releases the lifecycle subscription. Idempotent.
    pub fn cancel(&mut self) {
        self.source = None;
        self.done = true;
        self.session.cancel();
    }
}

impl<S: Stream, E: LifecycleEvent> Stream for BoundStream<S, E> {
    type Item = Result<S::Item, BindError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(None);
        }

        if let Poll::Ready(outcome) = this.session.poll_end(cx) {
            this.source = None;
            this.done = true;
            return Poll::Ready(match outcome {
                Outcome::Cut(_) => None,
                Outcome::Failed(err) => Some(Err(err)),
            });
        }

        let Some(source) = this.source.as_mut() else {
            return Poll::Ready(None);
        };
        match source.as_mut().poll_next(cx) {
            Poll::Ready(Some(item)) => Poll::Ready(Some(Ok(item))),
            Poll::Ready(None) => {
                this.source = None;
                this.done = true;
                this.session.finish();
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<S: Stream, E: LifecycleEvent> FusedStream for BoundStream<S, E> {
    fn is_terminated(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use futures::stream::FusedStream;
    use futures::{FutureExt, StreamExt, stream};

    use crate::bind::{bind, bind_corresponding, bind_until_event};
    use crate::config::EndPolicy;
    use crate::error::{BindError, ResolveError};
    use crate::lifecycle::{ActivityEvent, LifecycleEvents, LifecycleSubject, Natural};
    use crate::session::{Outcome, Reason};

    fn endless() -> impl futures::Stream<Item = u32> {
        stream::iter(0..).boxed()
    }

    #[test]
    fn test_auto_bind_at_start_stops_at_stop() {
        let subject = LifecycleSubject::new();
        subject.emit(ActivityEvent::Create);
        subject.emit(ActivityEvent::Start);
        let mut bound = bind_corresponding(subject.subscribe(), Natural).stream(endless());

        assert_eq!(bound.next().now_or_never(), Some(Some(Ok(0))));
        subject.emit(ActivityEvent::Resume);
        assert_eq!(bound.next().now_or_never(), Some(Some(Ok(1))));
        subject.emit(ActivityEvent::Pause);
        assert_eq!(bound.next().now_or_never(), Some(Some(Ok(2))));

        subject.emit(ActivityEvent::Stop);
        assert_eq!(bound.next().now_or_never(), Some(None));
        assert!(bound.is_terminated());
        assert_eq!(bound.outcome(), Some(&Outcome::Cut(Reason::TerminalEvent)));
        assert_eq!(subject.subscriber_count(), 0);
    }

    #[test]
    fn test_until_destroy_ends_when_lifecycle_completes() {
        let subject = LifecycleSubject::new();
        subject.emit(ActivityEvent::Create);
        let mut bound =
            bind_until_event(subject.subscribe(), ActivityEvent::Destroy).stream(endless());
        assert_eq!(bound.next().now_or_never(), Some(Some(Ok(0))));

        subject.complete();
        assert_eq!(bound.next().now_or_never(), Some(None));
        assert_eq!(
            bound.outcome(),
            Some(&Outcome::Cut(Reason::LifecycleCompleted))
        );
    }

    #[test]
    fn test_detach_lets_source_finish() {
        let subject = LifecycleSubject::new();
        subject.emit(ActivityEvent::Create);
        let mut bound = bind_until_event(subject.subscribe(), ActivityEvent::Destroy)
            .with_end_policy(EndPolicy::Detach)
            .stream(stream::iter([1, 2]));

        subject.complete();
        let items: Vec<_> = bound.by_ref().collect::<Vec<_>>().now_or_never().unwrap_or_default();
        assert_eq!(items, vec![Ok(1), Ok(2)]);
        assert_eq!(bound.outcome(), Some(&Outcome::Cut(Reason::SourceFinished)));
    }

    #[test]
    fn test_binding_in_terminal_state_yields_nothing() {
        let subject = LifecycleSubject::new();
        subject.emit(ActivityEvent::Destroy);
        let mut bound = bind_corresponding(subject.subscribe(), Natural).stream(endless());

        assert!(bound.outcome().is_some());
        assert_eq!(bound.next().now_or_never(), Some(None));
    }

    #[test]
    fn test_unmapped_event_is_yielded_once() {
        let subject = LifecycleSubject::new();
        subject.emit("booting");
        let mut bound = bind_corresponding(subject.subscribe(), Natural).stream(endless());

        assert_eq!(
            bound.next().now_or_never(),
            Some(Some(Err(BindError::Resolve(ResolveError::unmapped("booting")))))
        );
        assert_eq!(bound.next().now_or_never(), Some(None));
    }

    #[test]
    fn test_source_errors_pass_through() {
        let source = stream::iter([Ok(1), Err("bad frame"), Ok(2)]);
        let bound = bind(LifecycleEvents::<ActivityEvent>::pending()).stream(source);
        let items: Vec<_> = bound.collect::<Vec<_>>().now_or_never().unwrap_or_default();
        assert_eq!(items, vec![Ok(Ok(1)), Ok(Err("bad frame")), Ok(Ok(2))]);
    }

    #[test]
    fn test_cancel_twice_and_drop_release_subscription() {
        let subject = LifecycleSubject::new();
        subject.emit(ActivityEvent::Resume);
        let mut bound = bind_corresponding(subject.subscribe(), Natural).stream(endless());
        assert_eq!(subject.subscriber_count(), 1);

        bound.cancel();
        bound.cancel();
        assert_eq!(bound.outcome(), Some(&Outcome::Cut(Reason::Cancelled)));
        assert_eq!(subject.subscriber_count(), 0);
        assert_eq!(bound.next().now_or_never(), Some(None));

        let other = bind_corresponding(subject.subscribe(), Natural).stream(endless());
        assert_eq!(subject.subscriber_count(), 1);
        drop(other);
        assert_eq!(subject.subscriber_count(), 0);
    }
}
