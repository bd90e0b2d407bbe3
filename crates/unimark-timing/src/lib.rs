//! Poll-driven timing gates.
//!
//! [`Debouncer`] defers a value until a quiet period has elapsed, with newer
//! values replacing the pending one. [`Throttle`] passes the first value
//! through immediately and afterwards lets at most one trailing value out
//! per window.
//!
//! Neither gate spawns threads or timers. Callers record values from any
//! thread and poll with `drain_ready`, using `next_deadline` to decide how
//! long to sleep.

mod debounce;
mod throttle;

pub use debounce::Debouncer;
pub use throttle::Throttle;
