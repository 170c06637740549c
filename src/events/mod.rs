//! Observability events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to facts emitted by components and binding sessions.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: hub components (transitions, end of lifecycle), binding
//!   sessions (bound, resolved, detached, terminated, failed, cancelled),
//!   `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: the hub listener, which fans out to the `SubscriberSet`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
