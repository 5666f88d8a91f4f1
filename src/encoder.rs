//! Rotary encoder tick counting.
//!
//! The controller only needs a signed cumulative count; `TickCounter`
//! abstracts whatever produces it (a hardware QDEC peripheral, a pin
//! decoder, or a test fake). `QuadratureEncoder` is a software decoder in
//! half-quad mode: it counts on both edges of channel A, so a full
//! quadrature cycle yields two ticks.
//!
//! `count()` on the decoder samples the pins only when called, which is
//! fine while the caller polls every millisecond or so. When the reader is
//! slower than that, run the decoder on its own and hand the reader a
//! `SharedTicks`.

use core::sync::atomic::{AtomicI32, Ordering};

use embedded_hal::digital::InputPin;

/// Signed cumulative tick count of a rotary encoder.
pub trait TickCounter {
    /// Current count. Implementations may sample hardware here.
    fn count(&mut self) -> i32;

    fn set_count(&mut self, count: i32);

    fn clear_count(&mut self) {
        self.set_count(0);
    }
}

/// Half-quad decoder over two GPIO inputs (CLK = A, DT = B).
///
/// `sample()` must be called often enough to see every edge of A; `count()`
/// samples once before returning.
pub struct QuadratureEncoder<A, B> {
    a: A,
    b: B,
    last_a: bool,
    count: i32,
}

impl<A, B> QuadratureEncoder<A, B>
where
    A: InputPin,
    B: InputPin,
{
    /// Caller must configure both pins as pull-up inputs before calling this.
    pub fn new(mut a: A, b: B) -> Self {
        let last_a = a.is_high().unwrap_or(false);
        Self {
            a,
            b,
            last_a,
            count: 0,
        }
    }

    /// Read both channels and update the count on an A edge.
    ///
    /// A leading B (clockwise) leaves A and B unequal right after the A
    /// edge; B leading leaves them equal. Returns the step taken: +1, -1,
    /// or 0 when A did not change.
    pub fn sample(&mut self) -> i32 {
        let a = self.a.is_high().unwrap_or(self.last_a);
        if a == self.last_a {
            return 0;
        }
        self.last_a = a;

        let Ok(b) = self.b.is_high() else {
            return 0;
        };
        let step = if a != b { 1 } else { -1 };
        self.count = self.count.wrapping_add(step);
        step
    }

    /// Sample once and add the step to a count shared with the reader.
    pub fn sample_into(&mut self, ticks: &AtomicI32) {
        let step = self.sample();
        if step != 0 {
            ticks.fetch_add(step, Ordering::Relaxed);
        }
    }
}

impl<A, B> TickCounter for QuadratureEncoder<A, B>
where
    A: InputPin,
    B: InputPin,
{
    fn count(&mut self) -> i32 {
        self.sample();
        self.count
    }

    fn set_count(&mut self, count: i32) {
        self.count = count;
    }
}

/// Read side of a tick count filled by a decoder running elsewhere.
///
/// The decoder task calls `QuadratureEncoder::sample_into` at its own rate,
/// so slow redraws on the reader side never drop or flip steps.
#[derive(Clone, Copy)]
pub struct SharedTicks<'a> {
    ticks: &'a AtomicI32,
}

impl<'a> SharedTicks<'a> {
    pub const fn new(ticks: &'a AtomicI32) -> Self {
        Self { ticks }
    }
}

impl TickCounter for SharedTicks<'_> {
    fn count(&mut self) -> i32 {
        self.ticks.load(Ordering::Relaxed)
    }

    fn set_count(&mut self, count: i32) {
        self.ticks.store(count, Ordering::Relaxed);
    }
}

/// Convert a raw tick count into logical detent steps.
pub fn logical_position(raw: i32, sensitivity: i32) -> i32 {
    if sensitivity <= 1 {
        raw
    } else {
        raw / sensitivity
    }
}
