//! Lifecycle events, corresponding-event maps and lifecycle sources.
//!
//! - `event`: the [`LifecycleEvent`] contract and the built-in stage sets;
//! - `corresponding`: injectable maps from a starting stage to its terminal stage;
//! - `subject`: the replaying multicast source behind components;
//! - `events`: the boxed event stream every binding consumes.

mod corresponding;
mod event;
mod events;
mod subject;

pub use corresponding::{CorrespondingEvents, Natural};
pub use event::{
    ActivityEvent, FragmentEvent, LifecycleEvent, OwnerEvent, ServiceEvent, ViewEvent,
};
pub use events::{LifecycleEvents, LifecycleSource};
pub use subject::LifecycleSubject;
