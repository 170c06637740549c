use std::fmt;
use std::sync::Arc;

use crate::config::EndPolicy;
use crate::events::{Bus, Event, EventKind};
use crate::lifecycle::{
    CorrespondingEvents, LifecycleEvent, LifecycleEvents, LifecycleSource, LifecycleSubject,
    Natural,
};
use crate::session::Observer;

use super::LifecycleProvider;

/// A named lifecycle owner.
///
/// Drive it with [`transition`](Self::transition) (or the stage methods of the
/// [`Activity`](super::Activity), [`Fragment`](super::Fragment),
/// [`Owner`](super::Owner) and [`View`](super::View) aliases) and bind sources
/// to it through [`LifecycleProvider`].
///
/// Components created by a [`Hub`](crate::Hub) publish their transitions and
/// every binding's session events on the hub's bus.
pub struct Component<E: LifecycleEvent> {
    name: Arc<str>,
    subject: LifecycleSubject<E>,
    map: Arc<dyn CorrespondingEvents<E>>,
    end_policy: EndPolicy,
    bus: Option<Bus>,
}

impl<E: LifecycleEvent> Component<E> {
    /// Creates a component using the event type's natural pairings.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            subject: LifecycleSubject::new(),
            map: Arc::new(Natural),
            end_policy: EndPolicy::default(),
            bus: None,
        }
    }

    pub(crate) fn observed(name: impl Into<Arc<str>>, bus: Bus, end_policy: EndPolicy) -> Self {
        Self {
            bus: Some(bus),
            end_policy,
            ..Self::new(name)
        }
    }

    /// Replaces the corresponding-event map.
    pub fn with_corresponding<M>(mut self, map: M) -> Self
    where
        M: CorrespondingEvents<E>,
    {
        self.map = Arc::new(map);
        self
    }

    /// Replaces the end policy carried into bindings.
    pub fn with_end_policy(mut self, end_policy: EndPolicy) -> Self {
        self.end_policy = end_policy;
        self
    }

    /// Component name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Moves the component to `event`. Returns `false` once the lifecycle has ended.
    pub fn transition(&self, event: E) -> bool {
        let label = event.label();
        if !self.subject.emit(event) {
            return false;
        }
        self.publish(Event::new(EventKind::LifecycleTransition).with_lifecycle(label));
        true
    }

    /// Ends the lifecycle; bindings react per their end policy.
    pub fn finish(&self) -> bool {
        if !self.subject.complete() {
            return false;
        }
        self.publish(Event::new(EventKind::LifecycleEnded));
        true
    }

    /// Fails the lifecycle; bindings receive the failure.
    pub fn fail(&self, reason: impl Into<Arc<str>>) -> bool {
        let reason = reason.into();
        if !self.subject.fail(Arc::clone(&reason)) {
            return false;
        }
        self.publish(Event::new(EventKind::LifecycleEnded).with_reason(reason));
        true
    }

    /// Current stage.
    pub fn current(&self) -> Option<E> {
        self.subject.current()
    }

    /// True once finished or failed.
    pub fn is_ended(&self) -> bool {
        self.subject.is_closed()
    }

    /// Number of live lifecycle observers (one per armed binding).
    pub fn subscriber_count(&self) -> usize {
        self.subject.subscriber_count()
    }

    fn publish(&self, ev: Event) {
        if let Some(bus) = &self.bus {
            bus.publish(ev.with_component(Arc::clone(&self.name)));
        }
    }
}

impl<E: LifecycleEvent> Clone for Component<E> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            subject: self.subject.clone(),
            map: Arc::clone(&self.map),
            end_policy: self.end_policy,
            bus: self.bus.clone(),
        }
    }
}

impl<E: LifecycleEvent> fmt::Debug for Component<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.name)
            .field("current", &self.current())
            .field("end_policy", &self.end_policy)
            .finish_non_exhaustive()
    }
}

impl<E: LifecycleEvent> LifecycleSource<E> for Component<E> {
    fn lifecycle(&self) -> LifecycleEvents<E> {
        self.subject.subscribe()
    }
}

impl<E: LifecycleEvent> LifecycleProvider<E> for Component<E> {
    fn corresponding_events(&self) -> Arc<dyn CorrespondingEvents<E>> {
        Arc::clone(&self.map)
    }

    fn end_policy(&self) -> EndPolicy {
        self.end_policy
    }

    fn observer(&self) -> Option<Observer> {
        self.bus
            .as_ref()
            .map(|bus| Observer::new(bus.clone()).with_component(Arc::clone(&self.name)))
    }
}

#[cfg(test)]
mod tests {
    use futures::future::pending;
    use futures::{FutureExt, StreamExt, stream};

    use super::*;
    use crate::bind::{FutureBindExt, ShapeBindExt, StreamBindExt};
    use crate::error::{BindError, ResolveError};
    use crate::lifecycle::ActivityEvent;
    use crate::session::Reason;

    #[test]
    fn test_transitions_are_published_with_component_name() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let activity = Component::observed("main", bus, EndPolicy::Terminate);

        assert!(activity.transition(ActivityEvent::Create));
        assert!(activity.finish());
        assert!(!activity.transition(ActivityEvent::Start));

        let ev = rx.try_recv().expect("transition");
        assert_eq!(ev.kind, EventKind::LifecycleTransition);
        assert_eq!(ev.component.as_deref(), Some("main"));
        assert_eq!(ev.lifecycle.as_deref(), Some("Create"));
        assert_eq!(rx.try_recv().expect("ended").kind, EventKind::LifecycleEnded);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_injected_map_overrides_natural_pairing() {
        let activity = Component::new("main").with_corresponding(|last: &ActivityEvent| {
            match last {
                ActivityEvent::Destroy => Err(ResolveError::outside("Destroy")),
                _ => Ok(ActivityEvent::Destroy),
            }
        });
        activity.transition(ActivityEvent::Start);
        let mut bound = stream::repeat(0u8).bind_to_lifecycle(&activity);

        activity.transition(ActivityEvent::Stop);
        assert_eq!(bound.next().now_or_never(), Some(Some(Ok(0))));
        activity.transition(ActivityEvent::Destroy);
        assert_eq!(bound.next().now_or_never(), Some(None));
    }

    #[test]
    fn test_end_policy_is_carried_into_bindings() {
        let activity = Component::new("main").with_end_policy(EndPolicy::Detach);
        activity.transition(ActivityEvent::Create);
        let mut bound = pending::<u8>()
            .single()
            .bind_until_event(&activity, ActivityEvent::Destroy);

        activity.finish();
        assert_eq!((&mut bound).now_or_never(), None);
        assert!(bound.outcome().is_none());
    }

    #[test]
    fn test_failure_reaches_bound_future() {
        let activity = Component::<ActivityEvent>::new("main");
        let bound = pending::<u8>().single().bind_to_lifecycle(&activity);
        activity.fail("window lost");
        assert!(matches!(
            bound.now_or_never(),
            Some(Err(BindError::Lifecycle(_)))
        ));
        assert!(activity.is_ended());
    }

    #[test]
    fn test_clones_share_the_lifecycle() {
        let activity = Component::new("main");
        let handle = activity.clone();
        handle.transition(ActivityEvent::Resume);
        assert_eq!(activity.current(), Some(ActivityEvent::Resume));

        let bound = pending::<u8>().single().bind_to_lifecycle(&activity);
        assert_eq!(handle.subscriber_count(), 1);
        handle.transition(ActivityEvent::Pause);
        assert_eq!(
            bound.now_or_never(),
            Some(Err(BindError::Cut {
                reason: Reason::TerminalEvent
            }))
        );
    }
}
