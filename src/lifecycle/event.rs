//! # Lifecycle events.
//!
//! [`LifecycleEvent`] is the contract every lifecycle stage type fulfils. It
//! tells a binding session three things about a stage:
//! - how to name it in events and errors ([`LifecycleEvent::label`]),
//! - whether nothing can follow it ([`LifecycleEvent::is_terminal`]),
//! - which later stage naturally closes a binding started at it
//!   ([`LifecycleEvent::corresponding`]).
//!
//! ## Built-in stage sets
//! ```text
//! ActivityEvent:  Create → Start → Resume → Pause → Stop → Destroy
//! FragmentEvent:  Attach → Create → CreateView → Start → Resume
//!                 → Pause → Stop → DestroyView → Destroy → Detach
//! OwnerEvent:     OnCreate → OnStart → OnResume → OnPause → OnStop → OnDestroy
//! ServiceEvent:   Create → StartCommand → Bind → Rebind → Unbind → Destroy
//! ViewEvent:      Attached ⇄ Detached
//! ```
//!
//! ## Natural pairings
//! | bound at      | activity | fragment    | owner     | service | view     |
//! |---------------|----------|-------------|-----------|---------|----------|
//! | create        | Destroy  | Destroy     | OnDestroy | Destroy |          |
//! | start         | Stop     | Stop        | OnStop    |         |          |
//! | start-command |          |             |           | Destroy |          |
//! | resume        | Pause    | Pause       | OnPause   |         |          |
//! | pause         | Stop     | Stop        | OnStop    |         |          |
//! | stop          | Destroy  | DestroyView | OnDestroy |         |          |
//! | bind / rebind |          |             |           | Unbind  |          |
//! | unbind        |          |             |           | Destroy |          |
//! | attach        |          | Detach      |           |         | Detached |
//! | create-view   |          | DestroyView |           |         |          |
//! | destroy-view  |          | Destroy     |           |         |          |
//! | destroy       | outside  | Detach      | outside   | outside |          |
//! | detach        |          | outside     |           |         | Detached |
//!
//! "outside" means [`ResolveError::OutsideLifecycle`]: a binding started there
//! ends immediately. A view bound while detached lives until the next detach,
//! since the replayed `Detached` only resolves the terminal and is never
//! compared against it.

use std::borrow::Cow;
use std::fmt;

use crate::error::ResolveError;

/// A stage in a component's lifecycle.
///
/// Implement it for custom components. Only [`label`](Self::label) is required;
/// the default [`corresponding`](Self::corresponding) reports every stage as
/// unmapped, so auto-resolved bindings need an injected
/// [`CorrespondingEvents`](crate::CorrespondingEvents) map.
///
/// # Example
/// ```
/// use std::borrow::Cow;
/// use lifebound::{LifecycleEvent, ResolveError};
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Job { Queued, Running, Done }
///
/// impl LifecycleEvent for Job {
///     fn label(&self) -> Cow<'static, str> {
///         Cow::Borrowed(match self {
///             Job::Queued => "queued",
///             Job::Running => "running",
///             Job::Done => "done",
///         })
///     }
///     fn is_terminal(&self) -> bool { matches!(self, Job::Done) }
///     fn corresponding(&self) -> Result<Self, ResolveError> {
///         match self {
///             Job::Queued | Job::Running => Ok(Job::Done),
///             Job::Done => Err(ResolveError::outside(self.label())),
///         }
///     }
/// }
///
/// assert_eq!(Job::Running.corresponding(), Ok(Job::Done));
/// ```
pub trait LifecycleEvent: Clone + PartialEq + fmt::Debug + Send + Sync + Unpin + 'static {
    /// Human-readable stage name used in events and errors.
    fn label(&self) -> Cow<'static, str>;

    /// True if no further event can follow this one.
    fn is_terminal(&self) -> bool {
        false
    }

    /// The stage that ends a binding started at this one.
    fn corresponding(&self) -> Result<Self, ResolveError> {
        Err(ResolveError::unmapped(self.label()))
    }
}

/// Lifecycle stages of an activity-like component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityEvent {
    Create,
    Start,
    Resume,
    Pause,
    Stop,
    Destroy,
}

impl ActivityEvent {
    /// Returns the stage name.
    pub fn as_label(&self) -> &'static str {
        match self {
            ActivityEvent::Create => "Create",
            ActivityEvent::Start => "Start",
            ActivityEvent::Resume => "Resume",
            ActivityEvent::Pause => "Pause",
            ActivityEvent::Stop => "Stop",
            ActivityEvent::Destroy => "Destroy",
        }
    }
}

impl LifecycleEvent for ActivityEvent {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.as_label())
    }

    fn is_terminal(&self) -> bool {
        matches!(self, ActivityEvent::Destroy)
    }

    fn corresponding(&self) -> Result<Self, ResolveError> {
        match self {
            ActivityEvent::Create => Ok(ActivityEvent::Destroy),
            ActivityEvent::Start => Ok(ActivityEvent::Stop),
            ActivityEvent::Resume => Ok(ActivityEvent::Pause),
            ActivityEvent::Pause => Ok(ActivityEvent::Stop),
            ActivityEvent::Stop => Ok(ActivityEvent::Destroy),
            ActivityEvent::Destroy => Err(ResolveError::outside(self.as_label())),
        }
    }
}

/// Lifecycle stages of a fragment-like component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentEvent {
    Attach,
    Create,
    CreateView,
    Start,
    Resume,
    Pause,
    Stop,
    DestroyView,
    Destroy,
    Detach,
}

impl FragmentEvent {
    /// Returns the stage name.
    pub fn as_label(&self) -> &'static str {
        match self {
            FragmentEvent::Attach => "Attach",
            FragmentEvent::Create => "Create",
            FragmentEvent::CreateView => "CreateView",
            FragmentEvent::Start => "Start",
            FragmentEvent::Resume => "Resume",
            FragmentEvent::Pause => "Pause",
            FragmentEvent::Stop => "Stop",
            FragmentEvent::DestroyView => "DestroyView",
            FragmentEvent::Destroy => "Destroy",
            FragmentEvent::Detach => "Detach",
        }
    }
}

impl LifecycleEvent for FragmentEvent {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.as_label())
    }

    fn is_terminal(&self) -> bool {
        matches!(self, FragmentEvent::Detach)
    }

    fn corresponding(&self) -> Result<Self, ResolveError> {
        match self {
            FragmentEvent::Attach => Ok(FragmentEvent::Detach),
            FragmentEvent::Create => Ok(FragmentEvent::Destroy),
            FragmentEvent::CreateView => Ok(FragmentEvent::DestroyView),
            FragmentEvent::Start => Ok(FragmentEvent::Stop),
            FragmentEvent::Resume => Ok(FragmentEvent::Pause),
            FragmentEvent::Pause => Ok(FragmentEvent::Stop),
            FragmentEvent::Stop => Ok(FragmentEvent::DestroyView),
            FragmentEvent::DestroyView => Ok(FragmentEvent::Destroy),
            FragmentEvent::Destroy => Ok(FragmentEvent::Detach),
            FragmentEvent::Detach => Err(ResolveError::outside(self.as_label())),
        }
    }
}

/// Lifecycle stages reported by a generic lifecycle owner.
///
/// Same shape as [`ActivityEvent`], for components that expose a single
/// observable lifecycle instead of overriding per-stage callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerEvent {
    OnCreate,
    OnStart,
    OnResume,
    OnPause,
    OnStop,
    OnDestroy,
}

impl OwnerEvent {
    /// Returns the stage name.
    pub fn as_label(&self) -> &'static str {
        match self {
            OwnerEvent::OnCreate => "OnCreate",
            OwnerEvent::OnStart => "OnStart",
            OwnerEvent::OnResume => "OnResume",
            OwnerEvent::OnPause => "OnPause",
            OwnerEvent::OnStop => "OnStop",
            OwnerEvent::OnDestroy => "OnDestroy",
        }
    }
}

impl LifecycleEvent for OwnerEvent {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.as_label())
    }

    fn is_terminal(&self) -> bool {
        matches!(self, OwnerEvent::OnDestroy)
    }

    fn corresponding(&self) -> Result<Self, ResolveError> {
        match self {
            OwnerEvent::OnCreate => Ok(OwnerEvent::OnDestroy),
            OwnerEvent::OnStart => Ok(OwnerEvent::OnStop),
            OwnerEvent::OnResume => Ok(OwnerEvent::OnPause),
            OwnerEvent::OnPause => Ok(OwnerEvent::OnStop),
            OwnerEvent::OnStop => Ok(OwnerEvent::OnDestroy),
            OwnerEvent::OnDestroy => Err(ResolveError::outside(self.as_label())),
        }
    }
}

/// Attach state of a view-like component.
///
/// A view may be attached and detached many times, so no stage is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewEvent {
    Attached,
    Detached,
}

impl ViewEvent {
    /// Returns the stage name.
    pub fn as_label(&self) -> &'static str {
        match self {
            ViewEvent::Attached => "Attached",
            ViewEvent::Detached => "Detached",
        }
    }
}

impl LifecycleEvent for ViewEvent {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.as_label())
    }

    fn corresponding(&self) -> Result<Self, ResolveError> {
        match self {
            ViewEvent::Attached => Ok(ViewEvent::Detached),
            ViewEvent::Detached => Ok(ViewEvent::Detached),
        }
    }
}

/// Lifecycle stages of a background service.
///
/// A service may be bound and unbound several times between `Create` and
/// `Destroy`; only `Destroy` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceEvent {
    Create,
    StartCommand,
    Bind,
    Unbind,
    Rebind,
    Destroy,
}

impl ServiceEvent {
    /// Returns the stage name.
    pub fn as_label(&self) -> &'static str {
        match self {
            ServiceEvent::Create => "Create",
            ServiceEvent::StartCommand => "StartCommand",
            ServiceEvent::Bind => "Bind",
            ServiceEvent::Unbind => "Unbind",
            ServiceEvent::Rebind => "Rebind",
            ServiceEvent::Destroy => "Destroy",
        }
    }
}

impl LifecycleEvent for ServiceEvent {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.as_label())
    }

    fn is_terminal(&self) -> bool {
        matches!(self, ServiceEvent::Destroy)
    }

    fn corresponding(&self) -> Result<Self, ResolveError> {
        match self {
            ServiceEvent::Create | ServiceEvent::StartCommand => Ok(ServiceEvent::Destroy),
            ServiceEvent::Bind | ServiceEvent::Rebind => Ok(ServiceEvent::Unbind),
            ServiceEvent::Unbind => Ok(ServiceEvent::Destroy),
            ServiceEvent::Destroy => Err(ResolveError::outside(self.as_label())),
        }
    }
}

impl LifecycleEvent for &'static str {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(self)
    }
}

impl LifecycleEvent for String {
    fn label(&self) -> Cow<'static, str> {
        Cow::Owned(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_pairings() {
        use ActivityEvent::*;
        assert_eq!(Create.corresponding(), Ok(Destroy));
        assert_eq!(Start.corresponding(), Ok(Stop));
        assert_eq!(Resume.corresponding(), Ok(Pause));
        assert_eq!(Pause.corresponding(), Ok(Stop));
        assert_eq!(Stop.corresponding(), Ok(Destroy));
        assert_eq!(
            Destroy.corresponding(),
            Err(ResolveError::outside("Destroy"))
        );
    }

    #[test]
    fn test_fragment_pairings() {
        use FragmentEvent::*;
        let expected = [
            (Attach, Detach),
            (Create, Destroy),
            (CreateView, DestroyView),
            (Start, Stop),
            (Resume, Pause),
            (Pause, Stop),
            (Stop, DestroyView),
            (DestroyView, Destroy),
            (Destroy, Detach),
        ];
        for (bound_at, until) in expected {
            assert_eq!(bound_at.corresponding(), Ok(until), "bound at {bound_at:?}");
        }
        assert!(matches!(
            Detach.corresponding(),
            Err(ResolveError::OutsideLifecycle { .. })
        ));
    }

    #[test]
    fn test_owner_and_view_pairings() {
        assert_eq!(OwnerEvent::OnResume.corresponding(), Ok(OwnerEvent::OnPause));
        assert!(OwnerEvent::OnDestroy.corresponding().is_err());
        assert_eq!(ViewEvent::Attached.corresponding(), Ok(ViewEvent::Detached));
        assert_eq!(ViewEvent::Detached.corresponding(), Ok(ViewEvent::Detached));
    }

    #[test]
    fn test_service_pairings() {
        use ServiceEvent::*;
        for (bound_at, until) in [
            (Create, Destroy),
            (StartCommand, Destroy),
            (Bind, Unbind),
            (Rebind, Unbind),
            (Unbind, Destroy),
        ] {
            assert_eq!(bound_at.corresponding(), Ok(until), "bound at {bound_at:?}");
        }
        assert_eq!(Destroy.corresponding(), Err(ResolveError::outside("Destroy")));
        assert!(Destroy.is_terminal());
        assert!(!Unbind.is_terminal());
    }

    #[test]
    fn test_terminal_stages() {
        assert!(ActivityEvent::Destroy.is_terminal());
        assert!(!ActivityEvent::Stop.is_terminal());
        assert!(FragmentEvent::Detach.is_terminal());
        assert!(!FragmentEvent::Destroy.is_terminal());
        assert!(OwnerEvent::OnDestroy.is_terminal());
        assert!(!ViewEvent::Detached.is_terminal());
    }

    #[test]
    fn test_string_events_are_unmapped() {
        assert_eq!(
            "create".corresponding(),
            Err(ResolveError::unmapped("create"))
        );
        assert_eq!(
            String::from("start").corresponding(),
            Err(ResolveError::unmapped("start"))
        );
        assert!(!"destroy".is_terminal());
    }
}
