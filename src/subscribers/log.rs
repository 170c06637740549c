//! # LogWriter — simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [transition] component="main" event=Start
//! [bound] component="main" session=#1 rule=corresponding
//! [resolved] component="main" session=#1 until=Stop
//! [terminated] component="main" session=#1 reason=terminal_event event=Stop
//! [lifecycle-ended] component="main"
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};

use super::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn or_unknown(v: &Option<std::sync::Arc<str>>) -> &str {
    v.as_deref().unwrap_or("unknown")
}

fn session(e: &Event) -> String {
    e.session
        .map(|id| id.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let component = or_unknown(&e.component);
        match e.kind {
            EventKind::LifecycleTransition => {
                println!(
                    "[transition] component={component:?} event={}",
                    or_unknown(&e.lifecycle)
                );
            }
            EventKind::LifecycleEnded => match e.reason.as_deref() {
                Some(reason) => {
                    println!("[lifecycle-failed] component={component:?} reason={reason:?}")
                }
                None => println!("[lifecycle-ended] component={component:?}"),
            },
            EventKind::SessionBound => {
                println!(
                    "[bound] component={component:?} session={} rule={}",
                    session(e),
                    or_unknown(&e.reason)
                );
            }
            EventKind::TerminalResolved => {
                println!(
                    "[resolved] component={component:?} session={} until={}",
                    session(e),
                    or_unknown(&e.lifecycle)
                );
            }
            EventKind::SessionDetached => {
                println!("[detached] component={component:?} session={}", session(e));
            }
            EventKind::SessionTerminated => {
                println!(
                    "[terminated] component={component:?} session={} reason={} event={}",
                    session(e),
                    or_unknown(&e.reason),
                    or_unknown(&e.lifecycle)
                );
            }
            EventKind::SessionFailed => {
                println!(
                    "[failed] component={component:?} session={} err={:?}",
                    session(e),
                    or_unknown(&e.reason)
                );
            }
            EventKind::SessionCancelled => {
                println!("[cancelled] component={component:?} session={}", session(e));
            }
            EventKind::SubscriberOverflow => {
                println!(
                    "[subscriber-overflow] subscriber={component} reason={:?}",
                    or_unknown(&e.reason)
                );
            }
            EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber-panicked] subscriber={component} info={}",
                    or_unknown(&e.reason)
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
