//! # Corresponding-event maps.
//!
//! A [`CorrespondingEvents`] map answers one question: "a binding started at
//! `last`; which event ends it?". Maps are injected, so the built-in pairings of
//! [`LifecycleEvent::corresponding`] are defaults only.
//!
//! ## Provided maps
//! - [`Natural`]: delegates to the event type's own pairing.
//! - Any `Fn(&E) -> Result<E, ResolveError>` closure.
//!
//! ## Example
//! ```
//! use lifebound::{ActivityEvent, CorrespondingEvents, ResolveError};
//!
//! // End every binding at Destroy, no matter where it started.
//! let until_destroy = |last: &ActivityEvent| match last {
//!     ActivityEvent::Destroy => Err(ResolveError::outside("Destroy")),
//!     _ => Ok(ActivityEvent::Destroy),
//! };
//! assert_eq!(
//!     until_destroy.corresponding(&ActivityEvent::Resume),
//!     Ok(ActivityEvent::Destroy)
//! );
//! ```

use crate::error::ResolveError;

use super::LifecycleEvent;

/// Maps the last observed lifecycle event to the event that ends a binding.
///
/// Return [`ResolveError::OutsideLifecycle`] when nothing can follow `last`
/// (the binding ends immediately) and [`ResolveError::Unmapped`] when the map
/// has no pairing (reported to the caller).
pub trait CorrespondingEvents<E>: Send + Sync + 'static {
    /// Resolves the terminal event for a binding started at `last`.
    fn corresponding(&self, last: &E) -> Result<E, ResolveError>;
}

/// The pairing built into the event type ([`LifecycleEvent::corresponding`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<E: LifecycleEvent> CorrespondingEvents<E> for Natural {
    fn corresponding(&self, last: &E) -> Result<E, ResolveError> {
        last.corresponding()
    }
}

impl<E, F> CorrespondingEvents<E> for F
where
    F: Fn(&E) -> Result<E, ResolveError> + Send + Sync + 'static,
{
    fn corresponding(&self, last: &E) -> Result<E, ResolveError> {
        self(last)
    }
}
