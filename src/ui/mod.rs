//! User interface subsystem - OLED display + encoder push-button.
//!
//! ## Components
//!
//! - **Screen**: display lists for the idle, list, adjust, and yes/no views
//! - **Display**: `Panel` trait and painter; SSD1306 128×64 OLED via I²C
//! - **Buttons**: active-low encoder switch with polled debouncing
//! - **Input logic**: selection wraparound, viewport scroll, clamping

pub mod buttons;
pub mod display;
pub mod input_logic;
pub mod screen;
