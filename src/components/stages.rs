//! Stage shorthands for the built-in component kinds.
//!
//! Each method is `transition(stage)` and returns the same flag.

use crate::lifecycle::{ActivityEvent, FragmentEvent, OwnerEvent, ServiceEvent, ViewEvent};

use super::Component;

/// Activity-like component.
pub type Activity = Component<ActivityEvent>;
/// Fragment-like component.
pub type Fragment = Component<FragmentEvent>;
/// Component exposing a single observable lifecycle.
pub type Owner = Component<OwnerEvent>;
/// Background service; may be bound and unbound repeatedly.
pub type Service = Component<ServiceEvent>;
/// View-like component that only reports attach state.
pub type View = Component<ViewEvent>;

impl Component<ActivityEvent> {
    pub fn on_create(&self) -> bool {
        self.transition(ActivityEvent::Create)
    }

    pub fn on_start(&self) -> bool {
        self.transition(ActivityEvent::Start)
    }

    pub fn on_resume(&self) -> bool {
        self.transition(ActivityEvent::Resume)
    }

    pub fn on_pause(&self) -> bool {
        self.transition(ActivityEvent::Pause)
    }

    pub fn on_stop(&self) -> bool {
        self.transition(ActivityEvent::Stop)
    }

    pub fn on_destroy(&self) -> bool {
        self.transition(ActivityEvent::Destroy)
    }
}

impl Component<FragmentEvent> {
    pub fn on_attach(&self) -> bool {
        self.transition(FragmentEvent::Attach)
    }

    pub fn on_create(&self) -> bool {
        self.transition(FragmentEvent::Create)
    }

    pub fn on_create_view(&self) -> bool {
        self.transition(FragmentEvent::CreateView)
    }

    pub fn on_start(&self) -> bool {
        self.transition(FragmentEvent::Start)
    }

    pub fn on_resume(&self) -> bool {
        self.transition(FragmentEvent::Resume)
    }

    pub fn on_pause(&self) -> bool {
        self.transition(FragmentEvent::Pause)
    }

    pub fn on_stop(&self) -> bool {
        self.transition(FragmentEvent::Stop)
    }

    pub fn on_destroy_view(&self) -> bool {
        self.transition(FragmentEvent::DestroyView)
    }

    pub fn on_destroy(&self) -> bool {
        self.transition(FragmentEvent::Destroy)
    }

    pub fn on_detach(&self) -> bool {
        self.transition(FragmentEvent::Detach)
    }
}

impl Component<OwnerEvent> {
    pub fn on_create(&self) -> bool {
        self.transition(OwnerEvent::OnCreate)
    }

    pub fn on_start(&self) -> bool {
        self.transition(OwnerEvent::OnStart)
    }

    pub fn on_resume(&self) -> bool {
        self.transition(OwnerEvent::OnResume)
    }

    pub fn on_pause(&self) -> bool {
        self.transition(OwnerEvent::OnPause)
    }

    pub fn on_stop(&self) -> bool {
        self.transition(OwnerEvent::OnStop)
    }

    pub fn on_destroy(&self) -> bool {
        self.transition(OwnerEvent::OnDestroy)
    }
}

impl Component<ServiceEvent> {
    pub fn on_create(&self) -> bool {
        self.transition(ServiceEvent::Create)
    }

    pub fn on_start_command(&self) -> bool {
        self.transition(ServiceEvent::StartCommand)
    }

    pub fn on_bind(&self) -> bool {
        self.transition(ServiceEvent::Bind)
    }

    pub fn on_unbind(&self) -> bool {
        self.transition(ServiceEvent::Unbind)
    }

    pub fn on_rebind(&self) -> bool {
        self.transition(ServiceEvent::Rebind)
    }

    pub fn on_destroy(&self) -> bool {
        self.transition(ServiceEvent::Destroy)
    }
}

impl Component<ViewEvent> {
    pub fn on_attach(&self) -> bool {
        self.transition(ViewEvent::Attached)
    }

    pub fn on_detach(&self) -> bool {
        self.transition(ViewEvent::Detached)
    }
}

#[cfg(test)]
mod tests {
    use futures::future::pending;
    use futures::{FutureExt, StreamExt, stream};

    use super::*;
    use crate::bind::{FutureBindExt, ShapeBindExt, StreamBindExt};
    use crate::components::LifecycleProvider;
    use crate::error::BindError;

    #[test]
    fn test_fragment_bound_at_create_view_ends_at_destroy_view() {
        let fragment = Fragment::new("list");
        fragment.on_attach();
        fragment.on_create();
        fragment.on_create_view();
        let mut rows = stream::repeat("row").bind_to_lifecycle(&fragment);

        fragment.on_start();
        fragment.on_resume();
        fragment.on_pause();
        fragment.on_stop();
        assert_eq!(rows.next().now_or_never(), Some(Some(Ok("row"))));

        fragment.on_destroy_view();
        assert_eq!(rows.next().now_or_never(), Some(None));
    }

    #[test]
    fn test_fragment_stop_pairs_with_destroy_view() {
        let fragment = Fragment::new("detail");
        fragment.on_stop();
        let binding = fragment.bind_to_lifecycle();
        let session = binding.session();
        assert_eq!(session.terminal(), Some(&FragmentEvent::DestroyView));
    }

    #[test]
    fn test_owner_bound_at_resume_ends_at_pause() {
        let owner = Owner::new("screen");
        owner.on_create();
        owner.on_start();
        owner.on_resume();
        let bound = pending::<()>().completable().bind_to_lifecycle(&owner);
        owner.on_pause();
        assert!(matches!(bound.now_or_never(), Some(Err(BindError::Cut { .. }))));
    }

    #[test]
    fn test_view_detach_cuts_raw_binding() {
        let view = View::new("badge");
        view.on_attach();
        let mut clicks = stream::repeat(1u8).bind_until_event(&view, ViewEvent::Detached);
        assert_eq!(clicks.next().now_or_never(), Some(Some(Ok(1))));

        view.on_detach();
        assert_eq!(clicks.next().now_or_never(), Some(None));
    }

    #[test]
    fn test_view_bound_while_detached_survives_reattach() {
        let view = View::new("badge");
        view.on_attach();
        view.on_detach();
        let mut clicks = stream::repeat(1u8).bind_to_lifecycle(&view);
        assert_eq!(clicks.outcome(), None);

        view.on_attach();
        assert_eq!(clicks.next().now_or_never(), Some(Some(Ok(1))));

        view.on_detach();
        assert_eq!(clicks.next().now_or_never(), Some(None));
    }

    #[test]
    fn test_service_bindings_follow_bind_and_destroy() {
        let service = Service::new("sync");
        service.on_create();
        let created = pending::<()>().completable().bind_to_lifecycle(&service);
        service.on_start_command();
        let started = pending::<()>().completable().bind_to_lifecycle(&service);
        service.on_bind();
        let mut bound = stream::repeat(0u8).bind_to_lifecycle(&service);
        service.on_rebind();
        let mut rebound = stream::repeat(1u8).bind_to_lifecycle(&service);
        assert_eq!(bound.next().now_or_never(), Some(Some(Ok(0))));

        service.on_unbind();
        assert_eq!(bound.next().now_or_never(), Some(None));
        assert_eq!(rebound.next().now_or_never(), Some(None));
        let unbound = pending::<()>().completable().bind_to_lifecycle(&service);

        service.on_destroy();
        for cut in [created, started, unbound] {
            assert!(matches!(cut.now_or_never(), Some(Err(BindError::Cut { .. }))));
        }
        assert_eq!(service.subscriber_count(), 0);
    }

    #[test]
    fn test_service_until_unbind() {
        let service = Service::new("sync");
        let mut work = stream::repeat(()).bind_until_event(&service, ServiceEvent::Unbind);
        service.on_create();
        service.on_start_command();
        service.on_bind();
        service.on_rebind();
        assert!(work.next().now_or_never().flatten().is_some());

        service.on_unbind();
        assert_eq!(work.next().now_or_never(), Some(None));
    }

    #[test]
    fn test_activity_destroy_then_bind_is_outside_lifecycle() {
        let activity = Activity::new("main");
        activity.on_create();
        activity.on_destroy();
        let bound = pending::<u8>().single().bind_to_lifecycle(&activity);
        assert!(bound.outcome().is_some());
        assert_eq!(activity.subscriber_count(), 0);
    }
}
