//! # Lifecycle providers.
//!
//! [`LifecycleProvider`] is what sources are bound to: it hands out the
//! lifecycle stream plus the map, end policy and observer every binding
//! inherits. [`Component`] is the ready-made provider; the aliases
//! [`Activity`], [`Fragment`], [`Owner`], [`Service`] and [`View`] add stage
//! methods.
//!
//! ## Example
//! ```
//! use futures::{FutureExt, StreamExt, stream};
//! use lifebound::{Fragment, StreamBindExt};
//!
//! let fragment = Fragment::new("list");
//! fragment.on_attach();
//! fragment.on_create();
//!
//! // Bound at Create: lives until Destroy.
//! let mut rows = stream::repeat("row").bind_to_lifecycle(&fragment);
//! fragment.on_destroy_view();
//! assert_eq!(rows.next().now_or_never(), Some(Some(Ok("row"))));
//!
//! fragment.on_destroy();
//! assert_eq!(rows.next().now_or_never(), Some(None));
//! ```

mod component;
mod provider;
mod stages;

pub use component::Component;
pub use provider::LifecycleProvider;
pub use stages::{Activity, Fragment, Owner, Service, View};
