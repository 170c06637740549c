//! Hub runtime: event bus, subscriber workers and observed components.
//!
//! - `builder`: assembles a [`Hub`] from [`Config`](crate::Config) and subscribers;
//! - `handle`: the running hub, its listener task and graceful shutdown.

mod builder;
mod handle;

pub use builder::HubBuilder;
pub use handle::Hub;
