use crate::components::LifecycleProvider;
use crate::lifecycle::{CorrespondingEvents, LifecycleEvent, LifecycleEvents};

use super::binding::{Binding, bind, bind_corresponding, bind_until_event};

/// Something a source can be bound to.
///
/// | target                        | auto rule                    |
/// |-------------------------------|------------------------------|
/// | `&P` where `P: LifecycleProvider` | the provider's map       |
/// | `LifecycleEvents<E>`          | first event of any kind      |
/// | `(LifecycleEvents<E>, map)`   | the given map                |
pub trait BindTarget<E: LifecycleEvent> {
    /// Binding with the target's automatic rule.
    fn auto_binding(self) -> Binding<E>;

    /// Binding that ends at `event`.
    fn until_binding(self, event: E) -> Binding<E>;
}

impl<E, P> BindTarget<E> for &P
where
    E: LifecycleEvent,
    P: LifecycleProvider<E> + ?Sized,
{
    fn auto_binding(self) -> Binding<E> {
        self.bind_to_lifecycle()
    }

    fn until_binding(self, event: E) -> Binding<E> {
        self.bind_until_event(event)
    }
}

impl<E: LifecycleEvent> BindTarget<E> for LifecycleEvents<E> {
    fn auto_binding(self) -> Binding<E> {
        bind(self)
    }

    fn until_binding(self, event: E) -> Binding<E> {
        bind_until_event(self, event)
    }
}

impl<E, M> BindTarget<E> for (LifecycleEvents<E>, M)
where
    E: LifecycleEvent,
    M: CorrespondingEvents<E>,
{
    fn auto_binding(self) -> Binding<E> {
        bind_corresponding(self.0, self.1)
    }

    fn until_binding(self, event: E) -> Binding<E> {
        bind_until_event(self.0, event)
    }
}
