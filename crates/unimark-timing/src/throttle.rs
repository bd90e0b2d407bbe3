//! Leading-edge throttling with one trailing slot.

use std::sync::Mutex;
use std::time::{Duration, Instant};

struct State<T> {
    fired: bool,
    trailing: Option<(T, Instant)>,
}

/// Thread-safe throttle.
///
/// The first [`call`](Self::call) passes straight through. Each later call
/// schedules a trailing emission one window ahead, unless one is already
/// scheduled, in which case the call is dropped. The trailing emission
/// carries the value of the call that scheduled it.
pub struct Throttle<T> {
    state: Mutex<State<T>>,
    window: Duration,
}

impl<T> Throttle<T> {
    /// Create a new throttle with the specified window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            state: Mutex::new(State {
                fired: false,
                trailing: None,
            }),
            window,
        }
    }

    /// Window length.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Offer a value.
    ///
    /// Returns the value back when it should be handled immediately (first
    /// call only).
    pub fn call(&self, value: T) -> Option<T> {
        let mut state = self.state.lock().unwrap();
        if !state.fired {
            state.fired = true;
            return Some(value);
        }
        if state.trailing.is_some() {
            tracing::trace!("Throttled call dropped, trailing emission already scheduled");
            return None;
        }
        state.trailing = Some((value, Instant::now() + self.window));
        None
    }

    /// Take the trailing value if its window has elapsed.
    pub fn drain_ready(&self) -> Option<T> {
        let mut state = self.state.lock().unwrap();
        let now = Instant::now();
        if state.trailing.as_ref().is_some_and(|(_, deadline)| *deadline <= now) {
            state.trailing.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Deadline of the scheduled trailing value, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state
            .lock()
            .unwrap()
            .trailing
            .as_ref()
            .map(|(_, deadline)| *deadline)
    }
}
