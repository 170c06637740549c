//! # Binding API.
//!
//! Attaches a [`Session`](crate::Session) to a source and translates the
//! session's outcome into what the source's shape returns.
//!
//! ```text
//! target ──► BindTarget ──► Binding { lifecycle, rule } ──► Session
//!                                                             │
//!           source ──► StreamBindExt / ShapeBindExt ──────────┤
//!                                                             ▼
//!                                           BoundStream / Bound<Shape>
//!                                    (poll: drain lifecycle, then source)
//! ```
//!
//! Three entry points per shape:
//! - `bind(binding)`: an explicit [`Binding`];
//! - `bind_to_lifecycle(target)`: the target's automatic rule;
//! - `bind_until_event(target, event)`: an explicit terminal event.
//!
//! A [`Binding`] is spent on one source; [`Binder`] keeps the source and rule
//! and hands out a fresh binding per source.

mod binder;
mod binding;
mod ext;
mod shape;
mod stream;
mod target;

pub use binder::Binder;
pub use binding::{Binding, bind, bind_corresponding, bind_until_event};
pub use ext::{FutureBindExt, ShapeBindExt, StreamBindExt};
pub use shape::{Bound, Completable, Maybe, Shape, Single};
pub use stream::BoundStream;
pub use target::BindTarget;
