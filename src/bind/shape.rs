//! # Future shapes and their termination semantics.
//!
//! A [`Shape`] wraps a future and says what the bound future returns when the
//! lifecycle cuts it before it resolves:
//!
//! | shape            | source output | bound output                  | on cut                      |
//! |------------------|---------------|-------------------------------|-----------------------------|
//! | [`Single`]       | `T`           | `Result<T, BindError>`        | `Err(BindError::Cut { .. })` |
//! | [`Maybe`]        | `Option<T>`   | `Result<Option<T>, BindError>`| `Ok(None)`                  |
//! | [`Completable`]  | `T`           | `Result<T, BindError>`        | `Err(BindError::Cut { .. })` |
//!
//! Lifecycle and resolve failures are always `Err`. The source's own output
//! (including any `Result` it carries) is passed through untouched.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::BindError;
use crate::lifecycle::LifecycleEvent;
use crate::session::{Outcome, Reason, Session, SessionId};

/// A future source with lifecycle termination semantics.
pub trait Shape: Unpin {
    /// What the bound future resolves to.
    type Output;

    /// Polls the wrapped source.
    fn poll_source(&mut self, cx: &mut Context<'_>) -> Poll<Self::Output>;

    /// Output when the lifecycle cut the source.
    fn cut(reason: Reason) -> Self::Output;

    /// Output when the session failed.
    fn failed(err: BindError) -> Self::Output;
}

/// A source producing exactly one value.
pub struct Single<F: Future> {
    source: Pin<Box<F>>,
}

impl<F: Future> Single<F> {
    /// Wraps `source`.
    pub fn new(source: F) -> Self {
        Self {
            source: Box::pin(source),
        }
    }
}

impl<F: Future> Shape for Single<F> {
    type Output = Result<F::Output, BindError>;

    fn poll_source(&mut self, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.source.as_mut().poll(cx).map(Ok)
    }

    fn cut(reason: Reason) -> Self::Output {
        Err(BindError::Cut { reason })
    }

    fn failed(err: BindError) -> Self::Output {
        Err(err)
    }
}

/// A source producing zero or one value.
pub struct Maybe<F: Future> {
    source: Pin<Box<F>>,
}

impl<F: Future> Maybe<F> {
    /// Wraps `source`.
    pub fn new(source: F) -> Self {
        Self {
            source: Box::pin(source),
        }
    }
}

impl<F, T> Shape for Maybe<F>
where
    F: Future<Output = Option<T>>,
{
    type Output = Result<Option<T>, BindError>;

    fn poll_source(&mut self, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.source.as_mut().poll(cx).map(Ok)
    }

    fn cut(_reason: Reason) -> Self::Output {
        Ok(None)
    }

    fn failed(err: BindError) -> Self::Output {
        Err(err)
    }
}

/// A source that only signals completion.
pub struct Completable<F: Future> {
    source: Pin<Box<F>>,
}

impl<F: Future> Completable<F> {
    /// Wraps `source`.
    pub fn new(source: F) -> Self {
        Self {
            source: Box::pin(source),
        }
    }
}

impl<F: Future> Shape for Completable<F> {
    type Output = Result<F::Output, BindError>;

    fn poll_source(&mut self, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.source.as_mut().poll(cx).map(Ok)
    }

    fn cut(reason: Reason) -> Self::Output {
        Err(BindError::Cut { reason })
    }

    fn failed(err: BindError) -> Self::Output {
        Err(err)
    }
}

/// A future source cut by its lifecycle.
///
/// The source is dropped as soon as the session is released.
#[must_use = "futures do nothing unless polled"]
pub struct Bound<K, E: LifecycleEvent> {
    shape: Option<K>,
    session: Session<E>,
}

impl<K, E: LifecycleEvent> Bound<K, E> {
    pub(crate) fn new(shape: K, session: Session<E>) -> Self {
        Self {
            shape: Some(shape),
            session,
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
        self.shape = None;
        self.session.cancel();
    }
}

impl<K: Shape, E: LifecycleEvent> Future for Bound<K, E> {
    type Output = K::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if let Poll::Ready(outcome) = this.session.poll_end(cx) {
            this.shape = None;
            return Poll::Ready(match outcome {
                Outcome::Cut(reason) => K::cut(reason),
                Outcome::Failed(err) => K::failed(err),
            });
        }

        let Some(shape) = this.shape.as_mut() else {
            return Poll::Ready(K::cut(Reason::Cancelled));
        };
        match shape.poll_source(cx) {
            Poll::Ready(output) => {
                this.shape = None;
                this.session.finish();
                Poll::Ready(output)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
