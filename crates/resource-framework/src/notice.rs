//! # Ephemeral Notices
//!
//! A controller shows at most one notice at a time: either a success message or an
//! error. Keeping both in a single slot makes them mutually exclusive by construction.
//!
//! [`NoticeTimer`] owns the expiry task. Arming it again aborts the previous task and
//! bumps a generation counter, so an expiry that was already queued for an older notice
//! is recognised as stale and ignored.

use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

#[derive(Debug, Default)]
pub(crate) struct NoticeTimer {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl NoticeTimer {
    /// Starts a new expiry countdown, cancelling any running one. `on_expire` receives the
    /// generation the countdown was armed with.
    pub(crate) fn arm<F>(&mut self, ttl: Duration, on_expire: F)
    where
        F: FnOnce(u64) + Send + 'static,
    {
        self.cancel();
        let generation = self.generation;
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            on_expire(generation);
        }));
    }

    /// Stops the running countdown and invalidates any expiry already in flight.
    pub(crate) fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.generation += 1;
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

impl Drop for NoticeTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn expiry_fires_with_current_generation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = NoticeTimer::default();
        timer.arm(Duration::from_millis(3000), move |generation| {
            let _ = tx.send(generation);
        });

        let generation = rx.recv().await.unwrap();
        assert!(timer.is_current(generation));
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_cancels_previous_countdown() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = NoticeTimer::default();

        let first = tx.clone();
        timer.arm(Duration::from_millis(1000), move |generation| {
            let _ = first.send(("first", generation));
        });
        tokio::time::sleep(Duration::from_millis(500)).await;
        timer.arm(Duration::from_millis(1000), move |generation| {
            let _ = tx.send(("second", generation));
        });

        let (which, generation) = rx.recv().await.unwrap();
        assert_eq!(which, "second");
        assert!(timer.is_current(generation));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_invalidates_generation() {
        let (tx, mut rx) = mpsc::unbounded_channel::<u64>();
        let mut timer = NoticeTimer::default();
        timer.arm(Duration::from_millis(10), move |generation| {
            let _ = tx.send(generation);
        });
        timer.cancel();
        assert!(rx.recv().await.is_none());
        assert!(!timer.is_current(1));
    }
}
