use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Enforces a minimum spacing between dispatches, however many run concurrently,
/// and a full interval of rest after every completed fetch.
pub(crate) struct Pacer {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl Pacer {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Wait for the next free slot. The first call returns immediately.
    pub(crate) async fn wait(&self) {
        // Held across the sleep so callers are released one interval apart
        let mut next = self.next_slot.lock().await;
        if let Some(at) = *next {
            if at > Instant::now() {
                sleep_until(at).await;
            }
        }
        *next = Some(Instant::now() + self.interval);
    }

    /// Mark a fetch as finished. The next slot is at least one interval away.
    pub(crate) async fn done(&self) {
        let mut next = self.next_slot.lock().await;
        let rested = Instant::now() + self.interval;
        if next.map_or(true, |at| at < rested) {
            *next = Some(rested);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_slot_is_free() {
        let pacer = Pacer::new(Duration::from_secs(1));
        let start = Instant::now();
        pacer.wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn slots_are_spaced() {
        let pacer = Pacer::new(Duration::from_millis(500));
        let start = Instant::now();
        for _ in 0..4 {
            pacer.wait().await;
        }
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn done_pushes_the_next_slot_past_a_slow_fetch() {
        let pacer = Pacer::new(Duration::from_secs(1));
        pacer.wait().await;
        tokio::time::sleep(Duration::from_secs(3)).await;
        pacer.done().await;

        let finished = Instant::now();
        pacer.wait().await;
        assert_eq!(finished.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn done_keeps_a_later_dispatch_slot() {
        let pacer = Pacer::new(Duration::from_secs(2));
        let start = Instant::now();
        pacer.wait().await;
        pacer.done().await;
        pacer.wait().await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_never_sleeps() {
        let pacer = Pacer::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..10 {
            pacer.wait().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
