//! # Example: raw_lifecycle
//!
//! Binds sources to lifecycle streams that are not [`Component`](lifebound::Component)s.
//!
//! Shows how to:
//! - Bind to a bare event stream (any event cuts, like a view-detach stream).
//! - Bind to a stream paired with a custom corresponding-event map.
//! - Handle an unmapped event ([`BindError::Resolve`]).
//!
//! ## Run
//! ```bash
//! cargo run --example raw_lifecycle
//! ```

use futures::{FutureExt, StreamExt, stream};
use lifebound::{
    BindError, FutureBindExt, LifecycleSubject, ResolveError, ShapeBindExt, StreamBindExt,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Connection {
    Connecting,
    Online,
    Offline,
    Closed,
}

impl lifebound::LifecycleEvent for Connection {
    fn label(&self) -> std::borrow::Cow<'static, str> {
        std::borrow::Cow::Owned(format!("{self:?}"))
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Connection::Closed)
    }
}

fn connection_map(last: &Connection) -> Result<Connection, ResolveError> {
    match last {
        Connection::Online => Ok(Connection::Offline),
        Connection::Offline => Ok(Connection::Online),
        Connection::Closed => Err(ResolveError::outside("Closed")),
        Connection::Connecting => Err(ResolveError::unmapped("Connecting")),
    }
}

fn main() {
    // A detach stream: whatever it emits ends the binding.
    let detach = LifecycleSubject::<&'static str>::new();
    let mut clicks = stream::repeat("click").bind_to_lifecycle(detach.subscribe());
    println!("{:?}", clicks.next().now_or_never());
    detach.emit("detached");
    println!("after detach: {:?}", clicks.next().now_or_never());

    // A connection lifecycle with its own pairing.
    let conn = LifecycleSubject::new();
    conn.emit(Connection::Online);
    let mut heartbeats =
        stream::repeat("beat").bind_to_lifecycle((conn.subscribe(), connection_map));
    println!("{:?}", heartbeats.next().now_or_never());
    conn.emit(Connection::Offline);
    println!("after offline: {:?}", heartbeats.next().now_or_never());

    // Binding while still connecting has no pairing.
    let pending = LifecycleSubject::new();
    pending.emit(Connection::Connecting);
    let handshake = futures::future::pending::<()>()
        .completable()
        .bind_to_lifecycle((pending.subscribe(), connection_map));
    match handshake.now_or_never() {
        Some(Err(BindError::Resolve(err))) => println!("cannot bind: {err}"),
        other => println!("unexpected: {other:?}"),
    }

    // Once closed, nothing can be bound.
    conn.emit(Connection::Closed);
    let late = futures::future::ready(1)
        .single()
        .bind_to_lifecycle((conn.subscribe(), connection_map));
    println!("late binding: {:?}", late.outcome());
}
