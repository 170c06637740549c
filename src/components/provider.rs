use std::sync::Arc;

use crate::bind::Binding;
use crate::config::EndPolicy;
use crate::lifecycle::{
    CorrespondingEvents, LifecycleEvent, LifecycleSource, LifecycleSubject, Natural,
};
use crate::session::{Observer, Rule};

/// A lifecycle source that knows how to bind sources to itself.
///
/// Implementors provide the lifecycle stream; the defaults give the natural
/// corresponding-event map, [`EndPolicy::Terminate`] and no observer.
pub trait LifecycleProvider<E: LifecycleEvent>: LifecycleSource<E> {
    /// Map used by [`bind_to_lifecycle`](Self::bind_to_lifecycle).
    fn corresponding_events(&self) -> Arc<dyn CorrespondingEvents<E>> {
        Arc::new(Natural)
    }

    /// End policy carried into every binding.
    fn end_policy(&self) -> EndPolicy {
        EndPolicy::default()
    }

    /// Observer carried into every binding.
    fn observer(&self) -> Option<Observer> {
        None
    }

    /// Binding that ends at `event`.
    fn bind_until_event(&self, event: E) -> Binding<E> {
        Binding::new(self.lifecycle(), Rule::Until(event))
            .with_end_policy(self.end_policy())
            .with_observer_opt(self.observer())
    }

    /// Binding that ends at the event corresponding to the current stage.
    fn bind_to_lifecycle(&self) -> Binding<E> {
        Binding::new(self.lifecycle(), Rule::Corresponding(self.corresponding_events()))
            .with_end_policy(self.end_policy())
            .with_observer_opt(self.observer())
    }
}

impl<E: LifecycleEvent> LifecycleProvider<E> for LifecycleSubject<E> {}
