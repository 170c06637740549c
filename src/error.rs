//! Error types used by lifecycle sources and bound sources.
//!
//! This module defines three error enums:
//!
//! - [`LifecycleError`] — failures of the lifecycle event source itself.
//! - [`ResolveError`] — a corresponding-event map could not produce a terminal event.
//! - [`BindError`] — what a bound source reports to its caller.
//!
//! All types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use std::sync::Arc;
use thiserror::Error;

use crate::session::Reason;

/// # Errors produced by a lifecycle event source.
///
/// Delivered once to every observer of the failed source, after which the
/// lifecycle stream ends.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// The lifecycle source failed and will emit nothing further.
    #[error("lifecycle source failed: {reason}")]
    Failed {
        /// Human-readable failure description.
        reason: Arc<str>,
    },
}

impl LifecycleError {
    /// Builds a [`LifecycleError::Failed`] from any string-like reason.
    pub fn failed(reason: impl Into<Arc<str>>) -> Self {
        LifecycleError::Failed {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use lifebound::LifecycleError;
    ///
    /// let err = LifecycleError::failed("owner crashed");
    /// assert_eq!(err.as_label(), "lifecycle_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            LifecycleError::Failed { .. } => "lifecycle_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            LifecycleError::Failed { reason } => format!("failed: {reason}"),
        }
    }
}

/// # Errors produced while resolving a corresponding terminal event.
///
/// `OutsideLifecycle` is not reported to callers: it means the component is
/// already past the point where a binding makes sense, and the binding ends
/// immediately. `Unmapped` is a configuration error and is reported.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The observed event is the last stage of the lifecycle; nothing can follow it.
    #[error("cannot bind to lifecycle when outside of it (last event: {event})")]
    OutsideLifecycle {
        /// Label of the observed event.
        event: Arc<str>,
    },

    /// The map has no pairing for the observed event.
    #[error("binding to {event} is not supported by this corresponding-event map")]
    Unmapped {
        /// Label of the observed event.
        event: Arc<str>,
    },
}

impl ResolveError {
    /// Shorthand for [`ResolveError::OutsideLifecycle`].
    pub fn outside(event: impl Into<Arc<str>>) -> Self {
        ResolveError::OutsideLifecycle {
            event: event.into(),
        }
    }

    /// Shorthand for [`ResolveError::Unmapped`].
    pub fn unmapped(event: impl Into<Arc<str>>) -> Self {
        ResolveError::Unmapped {
            event: event.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ResolveError::OutsideLifecycle { .. } => "resolve_outside_lifecycle",
            ResolveError::Unmapped { .. } => "resolve_unmapped",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ResolveError::OutsideLifecycle { event } => format!("outside lifecycle at {event}"),
            ResolveError::Unmapped { event } => format!("no corresponding event for {event}"),
        }
    }
}

/// # Errors reported by a bound source.
///
/// Errors of the source itself are never wrapped here; they travel inside the
/// source's own items/output.
///
/// - `Cut` is how single-value and completion-only sources learn that the
///   lifecycle ended them before they completed.
/// - `Lifecycle` and `Resolve` are propagated unchanged from the session.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// The lifecycle ended the binding before the source completed.
    #[error("source cut by lifecycle ({reason})")]
    Cut {
        /// Why the session was released.
        reason: Reason,
    },

    /// The lifecycle source failed.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// The terminal event could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl BindError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use lifebound::{BindError, Reason};
    ///
    /// let err = BindError::Cut { reason: Reason::TerminalEvent };
    /// assert_eq!(err.as_label(), "bind_cut");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BindError::Cut { .. } => "bind_cut",
            BindError::Lifecycle(e) => e.as_label(),
            BindError::Resolve(e) => e.as_label(),
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BindError::Cut { reason } => format!("cut: {}", reason.as_label()),
            BindError::Lifecycle(e) => e.as_message(),
            BindError::Resolve(e) => e.as_message(),
        }
    }

    /// True if the lifecycle ended the source (as opposed to a failure).
    ///
    /// # Example
    /// ```
    /// use lifebound::{BindError, LifecycleError, Reason};
    ///
    /// assert!(BindError::Cut { reason: Reason::Cancelled }.is_cut());
    /// assert!(!BindError::from(LifecycleError::failed("boom")).is_cut());
    /// ```
    pub fn is_cut(&self) -> bool {
        matches!(self, BindError::Cut { .. })
    }
}
