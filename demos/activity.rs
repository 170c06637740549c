//! # Example: activity
//!
//! Binds a ticker stream and a pending request to an activity and walks the
//! activity through its lifecycle.
//!
//! Shows how to:
//! - Create an observed [`Activity`] through a [`Hub`].
//! - Bind a stream with [`StreamBindExt::bind_to_lifecycle`] (bound at Resume, cut at Pause).
//! - Bind a single-value future with [`ShapeBindExt::bind_until_event`] (cut at Destroy).
//! - Check for leaked bindings with the hub's [`SessionTracker`](lifebound::SessionTracker).
//!
//! ## Flow
//! ```text
//! on_create ─► on_start ─► on_resume ─► bind ticker (until Pause)
//!                                        bind request (until Destroy)
//!              ... ticks ...
//! on_pause  ─► ticker cut (stream ends)
//! on_stop   ─► on_destroy ─► request cut (Err(BindError::Cut))
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example activity --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use futures::{StreamExt, stream};
use lifebound::{
    ActivityEvent, Config, FutureBindExt, Hub, ShapeBindExt, StreamBindExt, Subscribe,
};

fn ticker(period: Duration) -> impl futures::Stream<Item = u64> {
    stream::unfold(0u64, move |n| async move {
        tokio::time::sleep(period).await;
        Some((n, n + 1))
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    #[allow(unused_mut)]
    let mut subs: Vec<Arc<dyn Subscribe>> = Vec::new();
    #[cfg(feature = "logging")]
    subs.push(Arc::new(lifebound::LogWriter::new()));

    let hub = Hub::builder(Config::default()).with_subscribers(subs).build();
    let tracker = hub.tracker();
    let activity = hub.activity("main");

    activity.on_create();
    activity.on_start();
    activity.on_resume();

    let mut ticks = ticker(Duration::from_millis(50)).bind_to_lifecycle(&activity);
    let request = async {
        tokio::time::sleep(Duration::from_secs(60)).await;
        "response"
    }
    .single()
    .bind_until_event(&activity, ActivityEvent::Destroy);

    let pauser = activity.clone();
    let driver = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(220)).await;
        pauser.on_pause();
        pauser.on_stop();
        pauser.on_destroy();
        pauser.finish();
    });

    while let Some(tick) = ticks.next().await {
        match tick {
            Ok(n) => println!("tick {n}"),
            Err(err) => println!("binding failed: {err}"),
        }
    }
    println!("ticker ended: {:?}", ticks.outcome());

    match request.await {
        Ok(body) => println!("request finished: {body}"),
        Err(err) => println!("request cut: {err}"),
    }

    let _ = driver.await;
    hub.shutdown().await;
    println!("live sessions after shutdown: {:?}", tracker.live().await);
}
