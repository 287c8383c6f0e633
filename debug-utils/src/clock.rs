//! Elapsed-time source used for timestamps.

/// Monotonic milliseconds since start. No calendar meaning.
pub trait Clock {
    fn millis(&self) -> u64;
}

impl<F> Clock for F
where
    F: Fn() -> u64,
{
    fn millis(&self) -> u64 {
        self()
    }
}

/// Clock backed by the embassy time driver
#[cfg(feature = "embassy-time")]
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyClock;

#[cfg(feature = "embassy-time")]
impl Clock for EmbassyClock {
    fn millis(&self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }
}
