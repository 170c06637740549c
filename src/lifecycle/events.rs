use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{self, BoxStream, Stream, StreamExt};

use crate::error::LifecycleError;

/// A component's lifecycle as a stream of events.
///
/// The stream may end (the component will emit nothing further) or yield one
/// `Err` (the lifecycle source failed) after which it ends.
pub struct LifecycleEvents<E> {
    inner: BoxStream<'static, Result<E, LifecycleError>>,
}

impl<E: Send + 'static> LifecycleEvents<E> {
    /// Wraps a fallible event stream.
    pub fn new<S>(events: S) -> Self
    where
        S: Stream<Item = Result<E, LifecycleError>> + Send + 'static,
    {
        Self {
            inner: events.boxed(),
        }
    }

    /// Wraps a stream of events that cannot fail.
    pub fn from_events<S>(events: S) -> Self
    where
        S: Stream<Item = E> + Send + 'static,
    {
        Self::new(events.map(Ok))
    }

    /// A lifecycle that has already ended.
    pub fn empty() -> Self {
        Self::new(stream::empty())
    }

    /// A lifecycle that never emits and never ends.
    pub fn pending() -> Self {
        Self::new(stream::pending())
    }
}

impl<E: Send + 'static> FromIterator<E> for LifecycleEvents<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let events: Vec<E> = iter.into_iter().collect();
        Self::from_events(stream::iter(events))
    }
}

impl<E> Stream for LifecycleEvents<E> {
    type Item = Result<E, LifecycleError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl<E> fmt::Debug for LifecycleEvents<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleEvents").finish_non_exhaustive()
    }
}

/// Anything that can hand out its lifecycle stream.
pub trait LifecycleSource<E> {
    /// Subscribes to the lifecycle; the current stage (if any) is emitted first.
    fn lifecycle(&self) -> LifecycleEvents<E>;
}
