//! Rotary-encoder menu for small monochrome OLED displays.
//!
//! Everything here is `no_std`, allocation-free, and testable on the host:
//! the panel, encoder, switch pin, and clock are traits the application
//! supplies. The embedded binary (`main.rs`, `embedded` feature) wires them
//! to an SSD1306 on nRF52840.
//!
//! Usage: `cargo test` on the host.
//!
//! ```text
//! let mut menu = MenuController::new(panel, encoder, switch, clock, MenuConfig::default());
//! menu.begin(Titles::new("Settings", "Home"))?;
//! menu.add_change_item("Brightness", 5, 0, 10, Some(Cmd::Brightness))?;
//! loop {
//!     if let Some(event) = menu.tick() { /* handle */ }
//! }
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod clock;
pub mod config;
pub mod encoder;
pub mod error;
pub mod menu;
pub mod ui;

pub use clock::Clock;
pub use config::MenuConfig;
pub use encoder::{QuadratureEncoder, SharedTicks, TickCounter};
pub use error::Error;
pub use menu::{ItemKind, MenuController, MenuEvent, MenuItem, Modal, SubtextPlacement, Titles};
pub use ui::display::Panel;
