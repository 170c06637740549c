//! # lifebound
//!
//! **lifebound** binds asynchronous sources to the lifecycle of a UI-like
//! component and cuts them automatically at the matching lifecycle event.
//!
//! Any [`Stream`](futures::Stream) or [`Future`] can be bound. A source bound at
//! `Start` lives until `Stop`, one bound at `Resume` lives until `Pause`, and one
//! bound to a component that is already destroyed never runs at all.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Activity   │   │   Fragment   │   │  raw stream  │
//!     │ (Component)  │   │ (Component)  │   │ + map / any  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ LifecycleProvider│                  │ BindTarget
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Binding { LifecycleEvents, Rule, EndPolicy, Observer }           │
//! │  Rule: AnyEvent | Until(event) | Corresponding(map)               │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ BoundStream  │   │ Bound<Single>│   │ Bound<Maybe> │  ...
//!     │  + Session   │   │  + Session   │   │  + Session   │
//!     └┬─────────────┘   └┬─────────────┘   └┬─────────────┘
//!      │ Publishes        │                  │
//!      │ - SessionBound   │                  │
//!      │ - TerminalResolved                  │
//!      │ - SessionTerminated / Failed / Cancelled
//!      ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                  Bus (broadcast channel, optional)                │
//! │                    (capacity: Config::bus_capacity)               │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                          Hub listener task
//!                                   ▼
//!                            SubscriberSet
//!                         ┌─────────┼─────────┐
//!                         ▼         ▼         ▼
//!                 SessionTracker LogWriter  custom
//! ```
//!
//! ### Session
//! ```text
//! bind ──► Session::new(lifecycle, rule)
//!            ├─► publish SessionBound
//!            └─► prime: drain events already available (replayed current stage)
//!
//! poll(bound source) {
//!   ├─► drain lifecycle events
//!   │       ├─ first event (Corresponding) ─► map → terminal
//!   │       │                                 ├─ OutsideLifecycle ─► cut now
//!   │       │                                 └─ Unmapped         ─► Err(Resolve)
//!   │       ├─ event == terminal             ─► cut (TerminalEvent)
//!   │       ├─ event.is_terminal()           ─► cut (OutsideLifecycle)
//!   │       ├─ lifecycle ended               ─► cut (LifecycleCompleted) | detach
//!   │       └─ lifecycle failed              ─► Err(Lifecycle)
//!   └─► poll source (only if still armed or detached)
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types                                 |
//! |-------------------|--------------------------------------------------------------|-------------------------------------------|
//! | **Lifecycles**    | Stage enums, natural pairings, replaying source              | [`ActivityEvent`], [`LifecycleSubject`]   |
//! | **Components**    | Named providers driven by stage methods                      | [`Activity`], [`Fragment`], [`Component`] |
//! | **Binding**       | Extension methods for streams and future shapes              | [`StreamBindExt`], [`ShapeBindExt`]       |
//! | **Observability** | Session and lifecycle events, subscriber workers, leak check | [`Hub`], [`Subscribe`], [`SessionTracker`]|
//! | **Errors**        | Typed errors for lifecycle, resolution and binding           | [`BindError`], [`ResolveError`]           |
//!
//! ## Optional features
//! - `logging`: exports `LogWriter`, a demo subscriber printing events to stdout.
//!
//! ## Example
//! ```rust
//! use futures::{FutureExt, StreamExt, stream};
//! use lifebound::{Activity, BindError, FutureBindExt, ShapeBindExt, StreamBindExt};
//!
//! let activity = Activity::new("main");
//! activity.on_create();
//! activity.on_start();
//!
//! // Bound at Start: cut at Stop.
//! let mut ticks = stream::repeat(()).bind_to_lifecycle(&activity);
//! let request = futures::future::pending::<u32>()
//!     .single()
//!     .bind_to_lifecycle(&activity);
//!
//! activity.on_resume();
//! assert!(ticks.next().now_or_never().flatten().is_some());
//!
//! activity.on_pause();
//! activity.on_stop();
//! assert_eq!(ticks.next().now_or_never(), Some(None));
//! assert!(matches!(request.now_or_never(), Some(Err(BindError::Cut { .. }))));
//! ```

mod bind;
mod components;
mod config;
mod error;
mod events;
mod hub;
mod lifecycle;
mod session;
mod subscribers;

// ---- Public re-exports ----

pub use bind::{
    BindTarget, Binder, Binding, Bound, BoundStream, Completable, FutureBindExt, Maybe, Shape,
    ShapeBindExt, Single, StreamBindExt, bind, bind_corresponding, bind_until_event,
};
pub use components::{Activity, Component, Fragment, LifecycleProvider, Owner, Service, View};
pub use config::{Config, EndPolicy};
pub use error::{BindError, LifecycleError, ResolveError};
pub use events::{Bus, Event, EventKind};
pub use hub::{Hub, HubBuilder};
pub use lifecycle::{
    ActivityEvent, CorrespondingEvents, FragmentEvent, LifecycleEvent, LifecycleEvents,
    LifecycleSource, LifecycleSubject, Natural, OwnerEvent, ServiceEvent, ViewEvent,
};
pub use session::{Observer, Outcome, Reason, Rule, Session, SessionId};
pub use subscribers::{SessionStatus, SessionTracker, Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
