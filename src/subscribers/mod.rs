//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] that
//! drives subscribers, and built-in implementations for events broadcast
//! through the [`Bus`](crate::Bus).
//!
//! ## Architecture
//! ```text
//! Component / Session ── publish(Event) ──► Bus ──► hub listener
//!                                                       │
//!                                                       ▼
//!                                                 SubscriberSet
//!                                         ┌─────────────┼─────────────┐
//!                                         ▼             ▼             ▼
//!                                  SessionTracker   LogWriter      Custom
//! ```
//!
//! ## Subscriber types
//! - **Passive subscribers**: observe and react to events (logging, alerts)
//! - **Stateful subscribers**: maintain state from events ([`SessionTracker`])

mod set;
mod subscribe;
mod tracker;

#[cfg(feature = "logging")]
mod log;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
pub use tracker::{SessionStatus, SessionTracker};
