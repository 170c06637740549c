use std::sync::Arc;

use crate::{
    config::Config,
    events::Bus,
    subscribers::{SessionTracker, Subscribe, SubscriberSet},
};

use super::handle::Hub;

/// Builder for a [`Hub`].
pub struct HubBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
    tracker: Option<Arc<SessionTracker>>,
}

impl HubBuilder {
    /// Creates a builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            tracker: None,
        }
    }

    /// Sets event subscribers.
    ///
    /// Subscribers receive lifecycle and session events through dedicated
    /// workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Uses `tracker` instead of a default [`SessionTracker`].
    pub fn with_tracker(mut self, tracker: Arc<SessionTracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    /// Builds the hub.
    ///
    /// Creates the bus, spawns one worker per subscriber (the session tracker is
    /// always included) and the listener that feeds them. Must be called inside
    /// a tokio runtime.
    pub fn build(self) -> Hub {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let tracker = self
            .tracker
            .unwrap_or_else(|| Arc::new(SessionTracker::new()));

        let mut subscribers = self.subscribers;
        subscribers.push(Arc::clone(&tracker) as Arc<dyn Subscribe>);
        let set = SubscriberSet::new(subscribers, bus.clone());

        Hub::new_internal(self.cfg, bus, set, tracker)
    }
}
