//! # Hub: owns the bus, the subscriber workers and observed components.
//!
//! ## Architecture
//! ```text
//! hub.activity("main") ──► Component { bus, end_policy }
//!                               │ transition / finish / fail
//!                               │ bind_* → Session { Observer(bus, "main") }
//!                               ▼
//!                              Bus ──► listener task ──► SubscriberSet::emit(&Event)
//!                                                            ┌────────┴────────┐
//!                                                            ▼                 ▼
//!                                                     SessionTracker     user subscribers
//!
//! Shutdown path:
//!   token.cancel()
//!     └─► listener drains events still queued on the bus
//!     └─► SubscriberSet::shutdown(): queues closed, workers drained
//! ```
//!
//! After [`Hub::shutdown`] returns, every event published before it has been
//! handled by every subscriber (unless dropped on overflow).

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::components::{Activity, Component, Fragment, Owner, Service, View};
use crate::config::Config;
use crate::events::{Bus, Event};
use crate::lifecycle::LifecycleEvent;
use crate::session::Observer;
use crate::subscribers::{SessionTracker, SubscriberSet};

use super::builder::HubBuilder;

/// Observability hub for components and their bindings.
///
/// # Example
/// ```
/// use futures::{StreamExt, stream};
/// use lifebound::{Config, Hub, StreamBindExt};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let hub = Hub::builder(Config::default()).build();
///     let tracker = hub.tracker();
///
///     let activity = hub.activity("main");
///     activity.on_create();
///     let ticks = stream::iter(0..3).bind_to_lifecycle(&activity);
///     assert_eq!(ticks.count().await, 3);
///
///     hub.shutdown().await;
///     assert!(tracker.live().await.is_empty());
/// }
/// ```
pub struct Hub {
    cfg: Config,
    bus: Bus,
    tracker: Arc<SessionTracker>,
    token: CancellationToken,
    listener: JoinHandle<()>,
}

impl Hub {
    /// Starts building a hub.
    pub fn builder(cfg: Config) -> HubBuilder {
        HubBuilder::new(cfg)
    }

    pub(super) fn new_internal(
        cfg: Config,
        bus: Bus,
        set: SubscriberSet,
        tracker: Arc<SessionTracker>,
    ) -> Self {
        let token = CancellationToken::new();
        let rx = bus.subscribe();
        let listener = tokio::spawn(listen(rx, set, token.clone()));
        Self {
            cfg,
            bus,
            tracker,
            token,
            listener,
        }
    }

    /// Hub configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// The hub's event bus.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// The session tracker fed by this hub.
    pub fn tracker(&self) -> Arc<SessionTracker> {
        Arc::clone(&self.tracker)
    }

    /// Observer for bindings made on raw lifecycle streams.
    pub fn observer(&self, component: &str) -> Observer {
        Observer::new(self.bus.clone()).with_component(component)
    }

    /// Creates an observed component.
    pub fn component<E: LifecycleEvent>(&self, name: &str) -> Component<E> {
        Component::observed(name, self.bus.clone(), self.cfg.end_policy)
    }

    /// Creates an observed activity.
    pub fn activity(&self, name: &str) -> Activity {
        self.component(name)
    }

    /// Creates an observed fragment.
    pub fn fragment(&self, name: &str) -> Fragment {
        self.component(name)
    }

    /// Creates an observed lifecycle owner.
    pub fn owner(&self, name: &str) -> Owner {
        self.component(name)
    }

    /// Creates an observed service.
    pub fn service(&self, name: &str) -> Service {
        self.component(name)
    }

    /// Creates an observed view.
    pub fn view(&self, name: &str) -> View {
        self.component(name)
    }

    /// Stops the listener and the subscriber workers once every pending event is handled.
    pub async fn shutdown(self) {
        self.token.cancel();
        let _ = self.listener.await;
    }
}

/// Forwards bus events to the subscriber set until cancelled, then drains.
async fn listen(mut rx: broadcast::Receiver<Event>, set: SubscriberSet, token: CancellationToken) {
    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            res = rx.recv() => match res {
                Ok(ev) => set.emit(&ev),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            },
        }
    }
    loop {
        match rx.try_recv() {
            Ok(ev) => set.emit(&ev),
            Err(TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
    set.shutdown().await;
}
