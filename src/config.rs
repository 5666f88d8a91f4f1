//! Application-wide constants and runtime configuration.
//!
//! Screen geometry, timing parameters, and capacities live here so they
//! can be tuned in one place.

// Display

/// Default panel width (pixels).
pub const SCREEN_WIDTH: u32 = 128;

/// Default panel height (pixels).
pub const SCREEN_HEIGHT: u32 = 64;

/// Default SSD1306 I²C address.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

/// Estimated glyph cell at text scale 1 (fixed-width font).
pub const GLYPH_WIDTH: i32 = 6;
pub const GLYPH_HEIGHT: i32 = 8;

/// Largest text scale accepted for the home content.
pub const MAX_TEXT_SCALE: u8 = 3;

/// Right margin for right-justified values (pixels).
pub const VALUE_RIGHT_MARGIN: i32 = 2;

// List layout

/// Number of menu rows visible at once.
pub const VISIBLE_ROWS: usize = 4;

/// Y coordinate of the first list row, below the 8 px title line.
pub const LIST_TOP_Y: i32 = 16;

/// Vertical distance between list rows.
pub const LIST_ROW_HEIGHT: i32 = 12;

/// Y coordinate of the value / first option row on sub-screens.
pub const SUBSCREEN_ROW_Y: i32 = 20;

/// Y coordinate of the second yes/no option.
pub const SUBSCREEN_SECOND_ROW_Y: i32 = 30;

// Input
//
// Pin assignments live in `main.rs` (nRF52840-DK defaults):
//
//   Encoder CLK    → P0.03
//   Encoder DT     → P0.04
//   Encoder SW     → P0.24  (active-low, internal pull-up)
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Raw encoder ticks per logical step. Half-quad decoding yields two
/// ticks per detent.
pub const ENCODER_SENSITIVITY: i32 = 2;

/// Interval between encoder pin samples in the demo's decoder task (ms).
pub const ENCODER_SAMPLE_MS: u64 = 1;

/// Interval between controller ticks in the demo binary (ms).
pub const POLL_INTERVAL_MS: u64 = 2;

// Capacities

/// Maximum number of registered menu items.
pub const MAX_MENU_ITEMS: usize = 16;

/// Maximum length of labels, titles, and home text (bytes).
pub const TEXT_CAPACITY: usize = 24;

/// Runtime configuration handed to `MenuController::new`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub i2c_address: u8,
    pub sensitivity: i32,
    pub debounce_ms: u64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            i2c_address: DEFAULT_I2C_ADDRESS,
            sensitivity: ENCODER_SENSITIVITY,
            debounce_ms: BUTTON_DEBOUNCE_MS,
        }
    }
}
