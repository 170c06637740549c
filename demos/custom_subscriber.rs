//! # Example: custom_subscriber
//!
//! Demonstrates how to build and attach a custom event subscriber.
//!
//! Shows how to:
//! - Implement the [`Subscribe`] trait.
//! - Inspect [`Event`] / [`EventKind`] for lifecycle and session metrics.
//! - Wire the subscriber into [`Hub::builder`].
//!
//! ## Flow
//! ```text
//! Fragment ──► transition ──► Bus.publish(LifecycleTransition)
//! bind_*   ──► Session    ──► Bus.publish(SessionBound / TerminalResolved / SessionTerminated)
//!                               └─► hub listener
//!                                     └─► SubscriberSet.emit() ──► SessionStats.on_event()
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example custom_subscriber
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::{FutureExt, StreamExt, stream};
use lifebound::{Config, Event, EventKind, Hub, StreamBindExt, Subscribe};

/// Counts session outcomes and prints each release.
/// In real life, you could export metrics or alert on cancelled bindings.
#[derive(Default)]
struct SessionStats {
    bound: AtomicUsize,
    terminated: AtomicUsize,
    cancelled: AtomicUsize,
}

#[async_trait::async_trait]
impl Subscribe for SessionStats {
    async fn on_event(&self, ev: &Event) {
        let component = ev.component.as_deref().unwrap_or("<unknown>");
        match ev.kind {
            EventKind::LifecycleTransition => {
                println!(
                    "[sub] {component} -> {}",
                    ev.lifecycle.as_deref().unwrap_or("<none>")
                );
            }
            EventKind::SessionBound => {
                self.bound.fetch_add(1, Ordering::Relaxed);
            }
            EventKind::TerminalResolved => {
                println!(
                    "[sub] {component} session {:?} lives until {}",
                    ev.session,
                    ev.lifecycle.as_deref().unwrap_or("<none>")
                );
            }
            EventKind::SessionTerminated => {
                self.terminated.fetch_add(1, Ordering::Relaxed);
                println!(
                    "[sub] {component} session {:?} released: {}",
                    ev.session,
                    ev.reason.as_deref().unwrap_or("<none>")
                );
            }
            EventKind::SessionCancelled => {
                self.cancelled.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "session-stats"
    }

    fn queue_capacity(&self) -> usize {
        256
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let stats = Arc::new(SessionStats::default());
    let subs: Vec<Arc<dyn Subscribe>> = vec![stats.clone()];
    let hub = Hub::builder(Config::default()).with_subscribers(subs).build();

    let fragment = hub.fragment("list");
    fragment.on_attach();
    fragment.on_create();
    fragment.on_create_view();

    // Bound at CreateView: cut at DestroyView.
    let mut rows = stream::repeat("row").bind_to_lifecycle(&fragment);
    // Dropped early: reported as cancelled.
    let abandoned = stream::repeat("cache").bind_to_lifecycle(&fragment);

    fragment.on_start();
    let _ = rows.next().now_or_never();
    drop(abandoned);

    fragment.on_stop();
    fragment.on_destroy_view();
    assert_eq!(rows.next().await, None);

    hub.shutdown().await;
    println!(
        "bound={} terminated={} cancelled={}",
        stats.bound.load(Ordering::Relaxed),
        stats.terminated.load(Ordering::Relaxed),
        stats.cancelled.load(Ordering::Relaxed),
    );
}
