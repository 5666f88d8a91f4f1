//! Unified error type for encoder-menu.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // UI / Display
    /// The panel did not answer its init sequence. Fatal: nothing can be shown.
    DisplayInit,

    /// I²C transaction to the display failed after init.
    Display,

    // Menu registration
    /// The item list is at `MAX_MENU_ITEMS`.
    MenuFull,

    /// A value item was registered with `min > max`.
    InvertedBounds { min: i32, max: i32 },
}
