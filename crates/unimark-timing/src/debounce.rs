//! Trailing-edge debouncing.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Pending value waiting to be emitted.
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Thread-safe debouncer.
///
/// Every [`call`](Self::call) replaces the pending value and pushes the
/// deadline back by the quiet period, so only the last value of a burst is
/// emitted.
pub struct Debouncer<T> {
    pending: Mutex<Option<Pending<T>>>,
    wait: Duration,
}

impl<T> Debouncer<T> {
    /// Create a new debouncer with the specified quiet period.
    #[must_use]
    pub fn new(wait: Duration) -> Self {
        Self {
            pending: Mutex::new(None),
            wait,
        }
    }

    /// Quiet period.
    #[must_use]
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Record a value, cancelling any pending one.
    ///
    /// Thread-safe, can be called from producer callbacks.
    pub fn call(&self, value: T) {
        let mut pending = self.pending.lock().unwrap();
        if pending.is_some() {
            tracing::trace!("Debounced call replaces pending value");
        }
        *pending = Some(Pending {
            value,
            deadline: Instant::now() + self.wait,
        });
    }

    /// Take the pending value if its quiet period has elapsed.
    pub fn drain_ready(&self) -> Option<T> {
        let mut pending = self.pending.lock().unwrap();
        let now = Instant::now();
        if pending.as_ref().is_some_and(|p| p.deadline <= now) {
            pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    /// Deadline of the pending value, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.lock().unwrap().as_ref().map(|p| p.deadline)
    }

    /// Drop the pending value without emitting it.
    ///
    /// Returns `true` if a value was pending.
    pub fn cancel(&self) -> bool {
        self.pending.lock().unwrap().take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::thread;

    #[test]
    fn test_single_call_emitted_after_deadline() {
        let debouncer = Debouncer::new(Duration::from_millis(10));

        debouncer.call("query");

        // Before deadline
        assert_eq!(debouncer.drain_ready(), None);

        thread::sleep(Duration::from_millis(15));

        assert_eq!(debouncer.drain_ready(), Some("query"));

        // Should be empty after drain
        assert_eq!(debouncer.drain_ready(), None);
        assert_eq!(debouncer.next_deadline(), None);
    }

    #[test]
    fn test_burst_emits_last_value() {
        let debouncer = Debouncer::new(Duration::from_millis(10));

        debouncer.call(1);
        debouncer.call(2);
        debouncer.call(3);

        thread::sleep(Duration::from_millis(15));

        assert_eq!(debouncer.drain_ready(), Some(3));
        assert_eq!(debouncer.drain_ready(), None);
    }

    #[test]
    fn test_new_call_extends_deadline() {
        let debouncer = Debouncer::new(Duration::from_millis(30));

        debouncer.call('a');
        let first = debouncer.next_deadline().unwrap();

        thread::sleep(Duration::from_millis(5));
        debouncer.call('b');
        let second = debouncer.next_deadline().unwrap();

        assert!(second > first);
    }

    #[test]
    fn test_cancel_drops_pending() {
        let debouncer = Debouncer::new(Duration::from_millis(10));

        assert!(!debouncer.cancel());
        debouncer.call("x");
        assert!(debouncer.cancel());

        thread::sleep(Duration::from_millis(15));

        assert_eq!(debouncer.drain_ready(), None);
    }

    #[test]
    fn test_shared_across_threads() {
        let debouncer = std::sync::Arc::new(Debouncer::new(Duration::from_millis(10)));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let debouncer = debouncer.clone();
                thread::spawn(move || debouncer.call(i))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        thread::sleep(Duration::from_millis(15));

        assert!(debouncer.drain_ready().is_some());
        assert_eq!(debouncer.drain_ready(), None);
    }
}
