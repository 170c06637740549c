//! # Global binding configuration.
//!
//! Provides [`Config`] centralized settings for a [`Hub`](crate::Hub) and the
//! components it creates.
//!
//! Config is used in two ways:
//! 1. **Hub creation**: `Hub::builder(config)` sizes the event bus.
//! 2. **Binding defaults**: every binding made through a hub component inherits
//!    [`Config::end_policy`].
//!
//! Bindings created without a hub use [`Config::default`] values.

/// What a session does when its lifecycle stream ends without a terminal event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EndPolicy {
    /// Release the session and cut the source (unbind rather than leak).
    #[default]
    Terminate,
    /// Stop observing the lifecycle and let the source run to its natural end.
    Detach,
}

/// Global configuration for bindings and the observability hub.
///
/// ## Field semantics
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by the bus)
/// - `end_policy`: reaction of a session to lifecycle completion
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// The hub listener that lags behind more than `bus_capacity` events skips
    /// the oldest ones.
    pub bus_capacity: usize,

    /// Default end policy for bindings made through hub components.
    pub end_policy: EndPolicy,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024`
    /// - `end_policy = EndPolicy::Terminate`
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            end_policy: EndPolicy::Terminate,
        }
    }
}
