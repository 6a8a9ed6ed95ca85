//! Global runtime configuration.
//!
//! [`Config`] centralizes the knobs of the demo supervisor:
//! how the spinner renders, how long the work stand-in pretends to wait,
//! and the capacity of the event bus.
//!
//! ## Sentinel values
//! - `bus_capacity` is clamped to a minimum of 1 by [`Config::bus_capacity_clamped`].

use std::borrow::Cow;
use std::time::Duration;

/// Configuration for the supervisor and its two stand-in tasks.
#[derive(Clone, Debug)]
pub struct Config {
    /// Message the spinner renders next to the animation frame.
    pub message: Cow<'static, str>,

    /// Delay between spinner frames (one suspension point per frame).
    pub spin_interval: Duration,

    /// How long the work stand-in suspends before producing its value.
    pub work_delay: Duration,

    /// The value the work stand-in produces after `work_delay`.
    pub answer: u64,

    /// Capacity of the event bus broadcast ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` events
    /// observe `Lagged` and skip older items.
    pub bus_capacity: usize,
}

impl Config {
    /// Returns the bus capacity clamped to a minimum of 1.
    ///
    /// The `Bus` should use this value to avoid constructing an invalid channel.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `message = "thinking!"`
    /// - `spin_interval = 100ms`
    /// - `work_delay = 3s`
    /// - `answer = 42`
    /// - `bus_capacity = 256`
    fn default() -> Self {
        Self {
            message: Cow::Borrowed("thinking!"),
            spin_interval: Duration::from_millis(100),
            work_delay: Duration::from_secs(3),
            answer: 42,
            bus_capacity: 256,
        }
    }
}
