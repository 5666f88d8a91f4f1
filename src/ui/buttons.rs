//! Encoder push-button input with polled debouncing.
//!
//! The switch is active-low with a pull-up. `Button` reads the level,
//! `Debouncer` turns raw samples into single press edges:
//!
//! - a low sample is accepted once `delay_ms` have passed since the last
//!   accepted low sample (the timestamp keeps advancing while held, so
//!   release bounce falls inside the window);
//! - an accepted sample yields an edge only when the `handled` latch is
//!   clear; the latch is cleared when the line is seen high outside that
//!   window, so contact bounce on the way down cannot re-arm it.

use embedded_hal::digital::InputPin;

/// Active-low push-button wrapper.
pub struct Button<P> {
    pin: P,
}

impl<P> Button<P>
where
    P: InputPin,
{
    /// Caller must configure the pin as pull-up input before calling this.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Returns true if the button is currently held down.
    ///
    /// A failed read counts as released.
    pub fn is_pressed(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }
}

/// Debounce + edge latch for a polled button line.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    delay_ms: u64,
    last_accept_ms: u64,
    handled: bool,
}

impl Debouncer {
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            last_accept_ms: 0,
            handled: false,
        }
    }

    /// Feed one sample; returns true exactly once per logical press.
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> bool {
        let mut edge = false;

        if pressed && now_ms.saturating_sub(self.last_accept_ms) >= self.delay_ms {
            self.last_accept_ms = now_ms;
            if !self.handled {
                self.handled = true;
                edge = true;
            }
        }

        if !pressed && now_ms.saturating_sub(self.last_accept_ms) >= self.delay_ms {
            self.handled = false;
        }

        edge
    }

    /// True while an accepted press has not been released yet.
    ///
    /// Lets a caller tell a held button from a released one without
    /// feeding another sample.
    pub fn is_latched(&self) -> bool {
        self.handled
    }
}
