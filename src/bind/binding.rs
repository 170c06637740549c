use std::fmt;
use std::future::Future;

use futures::Stream;

use crate::config::EndPolicy;
use crate::lifecycle::{CorrespondingEvents, LifecycleEvent, LifecycleEvents};
use crate::session::{Observer, Rule, Session};

use super::shape::{Bound, Completable, Maybe, Shape, Single};
use super::stream::BoundStream;

/// A lifecycle stream paired with the rule that decides when to cut.
///
/// A binding owns one lifecycle subscription and is consumed by the source it
/// is applied to. To bind several sources with the same rule, keep a
/// [`Binder`](crate::Binder) and take one binding per source.
///
/// # Example
/// ```
/// use futures::{FutureExt, StreamExt, stream};
/// use lifebound::{ActivityEvent, LifecycleSubject, bind_until_event};
///
/// let subject = LifecycleSubject::new();
/// subject.emit(ActivityEvent::Start);
///
/// let mut ticks = bind_until_event(subject.subscribe(), ActivityEvent::Stop)
///     .stream(stream::iter(1..=3).chain(stream::pending()));
/// assert_eq!(ticks.next().now_or_never(), Some(Some(Ok(1))));
///
/// subject.emit(ActivityEvent::Stop);
/// assert_eq!(ticks.next().now_or_never(), Some(None));
/// ```
pub struct Binding<E: LifecycleEvent> {
    lifecycle: LifecycleEvents<E>,
    rule: Rule<E>,
    end_policy: EndPolicy,
    observer: Option<Observer>,
}

impl<E: LifecycleEvent> Binding<E> {
    /// Creates a binding with [`EndPolicy::Terminate`] and no observer.
    pub fn new(lifecycle: LifecycleEvents<E>, rule: Rule<E>) -> Self {
        Self {
            lifecycle,
            rule,
            end_policy: EndPolicy::default(),
            observer: None,
        }
    }

    /// Sets what happens when the lifecycle ends without reaching the terminal event.
    pub fn with_end_policy(mut self, end_policy: EndPolicy) -> Self {
        self.end_policy = end_policy;
        self
    }

    /// Publishes session events through `observer`.
    pub fn with_observer(mut self, observer: Observer) -> Self {
        self.observer = Some(observer);
        self
    }

    pub(crate) fn with_observer_opt(mut self, observer: Option<Observer>) -> Self {
        self.observer = observer;
        self
    }

    /// The rule this binding applies.
    pub fn rule(&self) -> &Rule<E> {
        &self.rule
    }

    /// The end policy this binding applies.
    pub fn end_policy(&self) -> EndPolicy {
        self.end_policy
    }

    /// Starts the session without attaching a source.
    pub fn session(self) -> Session<E> {
        Session::new(self.lifecycle, self.rule, self.end_policy, self.observer)
    }

    /// Binds a multi-value source.
    pub fn stream<S: Stream>(self, source: S) -> BoundStream<S, E> {
        BoundStream::new(source, self.session())
    }

    /// Binds any shape.
    pub fn apply<K: Shape>(self, shape: K) -> Bound<K, E> {
        Bound::new(shape, self.session())
    }

    /// Binds a single-value source.
    pub fn single<F: Future>(self, source: F) -> Bound<Single<F>, E> {
        self.apply(Single::new(source))
    }

    /// Binds an optional-value source.
    pub fn maybe<F, T>(self, source: F) -> Bound<Maybe<F>, E>
    where
        F: Future<Output = Option<T>>,
    {
        self.apply(Maybe::new(source))
    }

    /// Binds a completion-only source.
    pub fn completable<F: Future>(self, source: F) -> Bound<Completable<F>, E> {
        self.apply(Completable::new(source))
    }
}

impl<E: LifecycleEvent> fmt::Debug for Binding<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("rule", &self.rule)
            .field("end_policy", &self.end_policy)
            .finish_non_exhaustive()
    }
}

/// Binds until the first lifecycle event of any kind.
///
/// Meant for lifecycles with no natural pairing, e.g. a stream that only emits
/// when a view is detached.
pub fn bind<E: LifecycleEvent>(lifecycle: LifecycleEvents<E>) -> Binding<E> {
    Binding::new(lifecycle, Rule::AnyEvent)
}

/// Binds until `event` is observed.
pub fn bind_until_event<E: LifecycleEvent>(lifecycle: LifecycleEvents<E>, event: E) -> Binding<E> {
    Binding::new(lifecycle, Rule::Until(event))
}

/// Binds until the event `map` pairs with the first observed one.
pub fn bind_corresponding<E, M>(lifecycle: LifecycleEvents<E>, map: M) -> Binding<E>
where
    E: LifecycleEvent,
    M: CorrespondingEvents<E>,
{
    Binding::new(lifecycle, Rule::corresponding(map))
}
