use std::fmt;
use std::sync::Arc;

use crate::components::LifecycleProvider;
use crate::config::EndPolicy;
use crate::lifecycle::{
    CorrespondingEvents, LifecycleEvent, LifecycleEvents, LifecycleSource, Natural,
};
use crate::session::{Observer, Rule};

use super::binding::Binding;

/// Reusable binding: a lifecycle source plus the rule to apply to it.
///
/// A [`Binding`] is spent on one source. A `Binder` can be kept, cloned and
/// shared; every source bound through it gets its own subscription and its own
/// session, so a `Corresponding` rule resolves against the stage current at
/// the time that source is bound.
///
/// `&Binder` is a [`BindTarget`](crate::BindTarget) through
/// [`LifecycleProvider`]: `bind_to_lifecycle(&binder)` applies the stored rule.
///
/// # Example
/// ```
/// use futures::{FutureExt, StreamExt, stream};
/// use lifebound::{Activity, Binder, StreamBindExt};
///
/// let activity = Activity::new("main");
/// let binder = Binder::to_lifecycle(&activity);
///
/// activity.on_create();
/// let mut until_destroy = stream::repeat(1).bind_to_lifecycle(&binder);
/// activity.on_start();
/// let mut until_stop = stream::repeat(2).bind_to_lifecycle(&binder);
///
/// activity.on_stop();
/// assert_eq!(until_stop.next().now_or_never(), Some(None));
/// assert_eq!(until_destroy.next().now_or_never(), Some(Some(Ok(1))));
/// ```
pub struct Binder<E: LifecycleEvent> {
    source: Arc<dyn LifecycleSource<E> + Send + Sync>,
    rule: Rule<E>,
    end_policy: EndPolicy,
    observer: Option<Observer>,
}

impl<E: LifecycleEvent> Binder<E> {
    /// Binder applying `rule` to `source`, with [`EndPolicy::Terminate`] and no observer.
    pub fn new<S>(source: S, rule: Rule<E>) -> Self
    where
        S: LifecycleSource<E> + Send + Sync + 'static,
    {
        Self {
            source: Arc::new(source),
            rule,
            end_policy: EndPolicy::default(),
            observer: None,
        }
    }

    /// Binder with the provider's corresponding-event map, end policy and observer.
    pub fn to_lifecycle<P>(provider: &P) -> Self
    where
        P: LifecycleProvider<E> + Clone + Send + Sync + 'static,
    {
        Self::from_provider(provider, Rule::Corresponding(provider.corresponding_events()))
    }

    /// Binder that ends every source at `event`.
    pub fn until_event<P>(provider: &P, event: E) -> Self
    where
        P: LifecycleProvider<E> + Clone + Send + Sync + 'static,
    {
        Self::from_provider(provider, Rule::Until(event))
    }

    fn from_provider<P>(provider: &P, rule: Rule<E>) -> Self
    where
        P: LifecycleProvider<E> + Clone + Send + Sync + 'static,
    {
        let mut binder = Self::new(provider.clone(), rule).with_end_policy(provider.end_policy());
        binder.observer = provider.observer();
        binder
    }

    /// Sets the end policy of every binding made from now on.
    pub fn with_end_policy(mut self, end_policy: EndPolicy) -> Self {
        self.end_policy = end_policy;
        self
    }

    /// Publishes session events of every binding through `observer`.
    pub fn with_observer(mut self, observer: Observer) -> Self {
        self.observer = Some(observer);
        self
    }

    /// The rule applied to every source.
    pub fn rule(&self) -> &Rule<E> {
        &self.rule
    }

    /// A fresh single-use binding on a new lifecycle subscription.
    pub fn binding(&self) -> Binding<E> {
        Binding::new(self.source.lifecycle(), self.rule.clone())
            .with_end_policy(self.end_policy)
            .with_observer_opt(self.observer.clone())
    }
}

impl<E: LifecycleEvent> Clone for Binder<E> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            rule: self.rule.clone(),
            end_policy: self.end_policy,
            observer: self.observer.clone(),
        }
    }
}

impl<E: LifecycleEvent> fmt::Debug for Binder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("rule", &self.rule)
            .field("end_policy", &self.end_policy)
            .finish_non_exhaustive()
    }
}

impl<E: LifecycleEvent> LifecycleSource<E> for Binder<E> {
    fn lifecycle(&self) -> LifecycleEvents<E> {
        self.source.lifecycle()
    }
}

impl<E: LifecycleEvent> LifecycleProvider<E> for Binder<E> {
    fn corresponding_events(&self) -> Arc<dyn CorrespondingEvents<E>> {
        match &self.rule {
            Rule::Corresponding(map) => Arc::clone(map),
            _ => Arc::new(Natural),
        }
    }

    fn end_policy(&self) -> EndPolicy {
        self.end_policy
    }

    fn observer(&self) -> Option<Observer> {
        self.observer.clone()
    }

    /// Applies the stored rule, whatever it is.
    fn bind_to_lifecycle(&self) -> Binding<E> {
        self.binding()
    }
}

#[cfg(test)]
mod tests {
    use futures::future::pending;
    use futures::{FutureExt, StreamExt, stream};

    use super::*;
    use crate::bind::{FutureBindExt, ShapeBindExt, StreamBindExt};
    use crate::components::Activity;
    use crate::error::BindError;
    use crate::events::{Bus, EventKind};
    use crate::lifecycle::{ActivityEvent, LifecycleSubject};

    #[test]
    fn test_each_source_resolves_its_own_terminal() {
        let activity = Activity::new("main");
        let binder = Binder::to_lifecycle(&activity);

        activity.on_create();
        let mut created = stream::repeat("a").bind_to_lifecycle(&binder);
        activity.on_start();
        activity.on_resume();
        let mut resumed = stream::repeat("b").bind_to_lifecycle(&binder.clone());
        assert_eq!(activity.subscriber_count(), 2);

        activity.on_pause();
        assert_eq!(resumed.next().now_or_never(), Some(None));
        assert_eq!(created.next().now_or_never(), Some(Some(Ok("a"))));

        activity.on_stop();
        activity.on_destroy();
        assert_eq!(created.next().now_or_never(), Some(None));
        assert_eq!(activity.subscriber_count(), 0);
    }

    #[test]
    fn test_until_event_binder_across_shapes() {
        let subject = LifecycleSubject::new();
        subject.emit(ActivityEvent::Create);
        let binder = Binder::until_event(&subject, ActivityEvent::Stop);

        let mut ticks = binder.binding().stream(stream::repeat(()));
        let request = pending::<u8>().single().bind_to_lifecycle(&binder);
        let lookup = pending::<Option<u8>>().maybe().bind_to_lifecycle(&binder);
        assert!(matches!(binder.rule(), Rule::Until(ActivityEvent::Stop)));

        subject.emit(ActivityEvent::Start);
        assert!(ticks.next().now_or_never().flatten().is_some());

        subject.emit(ActivityEvent::Stop);
        assert_eq!(ticks.next().now_or_never(), Some(None));
        assert!(matches!(request.now_or_never(), Some(Err(BindError::Cut { .. }))));
        assert_eq!(lookup.now_or_never(), Some(Ok(None)));
    }

    #[test]
    fn test_raw_source_with_any_event_rule() {
        let detach = LifecycleSubject::<&'static str>::new();
        let binder = Binder::new(detach.clone(), Rule::AnyEvent);
        let mut first = stream::repeat(1).bind_to_lifecycle(&binder);
        let mut second = stream::repeat(2).bind_to_lifecycle(&binder);

        detach.emit("detached");
        assert_eq!(first.next().now_or_never(), Some(None));
        assert_eq!(second.next().now_or_never(), Some(None));
    }

    #[test]
    fn test_settings_are_carried_into_every_binding() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let subject = LifecycleSubject::new();
        subject.emit(ActivityEvent::Create);
        let binder = Binder::until_event(&subject, ActivityEvent::Destroy)
            .with_end_policy(EndPolicy::Detach)
            .with_observer(Observer::new(bus).with_component("main"));

        let mut ticks = binder.binding().stream(stream::iter([1, 2]));
        assert_eq!(binder.binding().end_policy(), EndPolicy::Detach);

        subject.complete();
        assert_eq!(ticks.next().now_or_never(), Some(Some(Ok(1))));
        assert_eq!(ticks.next().now_or_never(), Some(Some(Ok(2))));
        assert_eq!(ticks.next().now_or_never(), Some(None));

        let ev = rx.try_recv().expect("bound event");
        assert_eq!(ev.kind, EventKind::SessionBound);
        assert_eq!(ev.component.as_deref(), Some("main"));
    }
}
