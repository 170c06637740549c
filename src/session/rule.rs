use std::fmt;
use std::sync::Arc;

use crate::lifecycle::{CorrespondingEvents, LifecycleEvent};

/// How a session decides which lifecycle event ends it.
pub enum Rule<E> {
    /// The first observed lifecycle event ends the session.
    AnyEvent,
    /// The given event ends the session.
    Until(E),
    /// The event paired with the first observed one ends the session.
    Corresponding(Arc<dyn CorrespondingEvents<E>>),
}

impl<E: LifecycleEvent> Rule<E> {
    /// Builds a [`Rule::Corresponding`] from any map.
    pub fn corresponding<M>(map: M) -> Self
    where
        M: CorrespondingEvents<E>,
    {
        Rule::Corresponding(Arc::new(map))
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            Rule::AnyEvent => "any_event",
            Rule::Until(_) => "until_event",
            Rule::Corresponding(_) => "corresponding",
        }
    }
}

impl<E: Clone> Clone for Rule<E> {
    fn clone(&self) -> Self {
        match self {
            Rule::AnyEvent => Rule::AnyEvent,
            Rule::Until(event) => Rule::Until(event.clone()),
            Rule::Corresponding(map) => Rule::Corresponding(Arc::clone(map)),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for Rule<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::AnyEvent => f.write_str("AnyEvent"),
            Rule::Until(event) => f.debug_tuple("Until").field(event).finish(),
            Rule::Corresponding(_) => f.write_str("Corresponding(..)"),
        }
    }
}
