//! Monotonic millisecond time source used for debouncing.

/// Milliseconds elapsed since boot.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// `Clock` backed by the Embassy time driver (RTC1 on nRF52840).
#[cfg(feature = "embedded")]
#[derive(Clone, Copy, Default)]
pub struct EmbassyClock;

#[cfg(feature = "embedded")]
impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }
}
