//! Single-slot error banner that clears itself.
//!
//! # Design
//! The message, its generation counter and the pending timer live under one
//! lock, so bumping the generation and re-arming the timer happen as a single
//! step. Each `show` aborts the previous timer and arms a new one; a timer only
//! clears the slot if the generation it was armed for is still current, so a
//! late wake-up can never wipe a newer message. Dropping the `Notice` aborts
//! any pending timer.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::error::ErrorMessage;
use crate::lock;

/// How long a message stays visible unless replaced.
pub const DISMISS_AFTER: Duration = Duration::from_millis(3000);

#[derive(Debug, Default)]
struct Slot {
    message: Option<ErrorMessage>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl Slot {
    fn disarm(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }
}

#[derive(Debug)]
pub struct Notice {
    slot: Arc<Mutex<Slot>>,
    delay: Duration,
}

impl Default for Notice {
    fn default() -> Self {
        Self::new(DISMISS_AFTER)
    }
}

impl Notice {
    pub fn new(delay: Duration) -> Self {
        Self {
            slot: Arc::default(),
            delay,
        }
    }

    pub fn current(&self) -> Option<ErrorMessage> {
        lock(&self.slot).message
    }

    /// Replace whatever is showing with `message` and restart the countdown.
    pub fn show(&self, message: ErrorMessage) {
        tracing::debug!(%message, "showing error");
        let mut slot = lock(&self.slot);
        slot.generation += 1;
        slot.message = Some(message);
        slot.disarm();

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("no async runtime; error will not auto-dismiss");
            return;
        };
        let generation = slot.generation;
        let shared = Arc::clone(&self.slot);
        let delay = self.delay;
        slot.timer = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let mut slot = lock(&shared);
            if slot.generation == generation {
                slot.message = None;
                slot.timer = None;
            }
        }));
    }

    /// Hide the banner now.
    pub fn clear(&self) {
        let mut slot = lock(&self.slot);
        if slot.message.is_none() {
            return;
        }
        slot.generation += 1;
        slot.message = None;
        slot.disarm();
    }
}

impl Drop for Notice {
    fn drop(&mut self) {
        lock(&self.slot).disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn message_clears_after_delay() {
        let notice = Notice::default();
        notice.show(ErrorMessage::Add);

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert_eq!(notice.current(), Some(ErrorMessage::Add));

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(notice.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_message_restarts_the_countdown() {
        let notice = Notice::default();
        notice.show(ErrorMessage::Add);
        tokio::time::sleep(Duration::from_millis(2000)).await;

        notice.show(ErrorMessage::Delete);
        tokio::time::sleep(Duration::from_millis(1500)).await;
        // The first timer would have fired by now.
        assert_eq!(notice.current(), Some(ErrorMessage::Delete));

        tokio::time::sleep(Duration::from_millis(1501)).await;
        assert_eq!(notice.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_hides_immediately_and_disarms() {
        let notice = Notice::default();
        notice.show(ErrorMessage::Update);
        notice.clear();
        assert_eq!(notice.current(), None);
        assert!(lock(&notice.slot).timer.is_none());
    }

    #[test]
    fn show_without_runtime_still_sets_message() {
        let notice = Notice::default();
        notice.show(ErrorMessage::Load);
        assert_eq!(notice.current(), Some(ErrorMessage::Load));
    }

    #[tokio::test(start_paused = true)]
    async fn every_visible_message_has_a_live_timer() {
        let notice = Notice::default();
        for message in [ErrorMessage::Add, ErrorMessage::Update, ErrorMessage::Delete] {
            notice.show(message);
            let slot = lock(&notice.slot);
            assert_eq!(slot.message, Some(message));
            assert!(slot.timer.as_ref().is_some_and(|t| !t.is_finished()));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_errors_still_dismiss() {
        let notice = Arc::new(Notice::new(Duration::from_millis(20)));
        let messages = [ErrorMessage::Update, ErrorMessage::Delete];

        for _ in 0..50 {
            let shows: Vec<_> = messages
                .iter()
                .map(|&message| {
                    let notice = Arc::clone(&notice);
                    tokio::spawn(async move { notice.show(message) })
                })
                .collect();
            for show in shows {
                show.await.unwrap();
            }
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(notice.current(), None);
    }
}
