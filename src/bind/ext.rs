use std::future::Future;

use futures::Stream;

use crate::lifecycle::LifecycleEvent;

use super::binding::Binding;
use super::shape::{Bound, Completable, Maybe, Shape, Single};
use super::stream::BoundStream;
use super::target::BindTarget;

/// Lifecycle binding for every [`Stream`].
///
/// # Example
/// ```
/// use futures::{FutureExt, StreamExt, stream};
/// use lifebound::{Activity, StreamBindExt};
///
/// let activity = Activity::new("main");
/// activity.on_create();
/// activity.on_start();
///
/// let mut prices = stream::repeat(42).bind_to_lifecycle(&activity);
/// assert_eq!(prices.next().now_or_never(), Some(Some(Ok(42))));
///
/// activity.on_stop();
/// assert_eq!(prices.next().now_or_never(), Some(None));
/// ```
pub trait StreamBindExt: Stream + Sized {
    /// Binds with an explicit [`Binding`].
    fn bind<E: LifecycleEvent>(self, binding: Binding<E>) -> BoundStream<Self, E> {
        binding.stream(self)
    }

    /// Binds with the target's automatic rule.
    fn bind_to_lifecycle<E, T>(self, target: T) -> BoundStream<Self, E>
    where
        E: LifecycleEvent,
        T: BindTarget<E>,
    {
        target.auto_binding().stream(self)
    }

    /// Binds until `event`.
    fn bind_until_event<E, T>(self, target: T, event: E) -> BoundStream<Self, E>
    where
        E: LifecycleEvent,
        T: BindTarget<E>,
    {
        target.until_binding(event).stream(self)
    }
}

impl<S: Stream> StreamBindExt for S {}

/// Picks the shape of a future before binding it.
pub trait FutureBindExt: Future + Sized {
    /// Treats the future as a single-value source.
    fn single(self) -> Single<Self> {
        Single::new(self)
    }

    /// Treats the future as an optional-value source.
    fn maybe<T>(self) -> Maybe<Self>
    where
        Self: Future<Output = Option<T>>,
    {
        Maybe::new(self)
    }

    /// Treats the future as a completion-only source.
    fn completable(self) -> Completable<Self> {
        Completable::new(self)
    }
}

impl<F: Future> FutureBindExt for F {}

/// Lifecycle binding for every [`Shape`].
pub trait ShapeBindExt: Shape + Sized {
    /// Binds with an explicit [`Binding`].
    fn bind<E: LifecycleEvent>(self, binding: Binding<E>) -> Bound<Self, E> {
        binding.apply(self)
    }

    /// Binds with the target's automatic rule.
    fn bind_to_lifecycle<E, T>(self, target: T) -> Bound<Self, E>
    where
        E: LifecycleEvent,
        T: BindTarget<E>,
    {
        target.auto_binding().apply(self)
    }

    /// Binds until `event`.
    fn bind_until_event<E, T>(self, target: T, event: E) -> Bound<Self, E>
    where
        E: LifecycleEvent,
        T: BindTarget<E>,
    {
        target.until_binding(event).apply(self)
    }
}

impl<K: Shape> ShapeBindExt for K {}

#[cfg(test)]
mod tests {
    use futures::future::{pending, ready};
    use futures::{FutureExt, StreamExt, stream};

    use super::*;
    use crate::error::BindError;
    use crate::lifecycle::{ActivityEvent, LifecycleEvents, LifecycleSubject, ViewEvent};
    use crate::session::Reason;

    #[test]
    fn test_raw_lifecycle_binds_on_any_event() {
        let subject = LifecycleSubject::new();
        let mut bound = stream::repeat(1u8).bind_to_lifecycle(subject.subscribe());
        assert_eq!(bound.next().now_or_never(), Some(Some(Ok(1))));

        subject.emit(ViewEvent::Detached);
        assert_eq!(bound.next().now_or_never(), Some(None));
    }

    #[test]
    fn test_raw_lifecycle_with_map() {
        let subject = LifecycleSubject::new();
        subject.emit("open");
        let map = |last: &&'static str| match *last {
            "open" => Ok("close"),
            other => Err(crate::ResolveError::unmapped(other)),
        };
        let mut bound = stream::repeat(()).bind_to_lifecycle((subject.subscribe(), map));
        assert!(matches!(bound.next().now_or_never(), Some(Some(Ok(())))));

        subject.emit("ping");
        assert!(matches!(bound.next().now_or_never(), Some(Some(Ok(())))));
        subject.emit("close");
        assert!(matches!(bound.next().now_or_never(), Some(None)));
    }

    #[test]
    fn test_shapes_bind_until_event() {
        let subject = LifecycleSubject::new();
        subject.emit(ActivityEvent::Start);

        let mut single = pending::<u8>()
            .single()
            .bind_until_event(subject.subscribe(), ActivityEvent::Pause);
        let mut maybe = pending::<Option<u8>>()
            .maybe()
            .bind_until_event(subject.subscribe(), ActivityEvent::Pause);
        assert_eq!((&mut single).now_or_never(), None);
        assert_eq!((&mut maybe).now_or_never(), None);

        subject.emit(ActivityEvent::Pause);
        assert_eq!(
            single.now_or_never(),
            Some(Err(BindError::Cut {
                reason: Reason::TerminalEvent
            }))
        );
        assert_eq!(maybe.now_or_never(), Some(Ok(None)));
    }

    #[test]
    fn test_explicit_binding_is_accepted() {
        let binding = crate::bind_until_event(LifecycleEvents::pending(), ActivityEvent::Stop);
        let out = ready(()).completable().bind(binding).now_or_never();
        assert_eq!(out, Some(Ok(())));
    }
}
