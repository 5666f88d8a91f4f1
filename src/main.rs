//! encoder-menu demo firmware for nRF52840.
//!
//! Drives a 128x64 SSD1306 over TWIM0 with a KY-040 style rotary encoder.
//! The encoder pins are decoded every millisecond on a higher-priority
//! interrupt executor, so a blocking display flush never drops steps. The
//! main task polls the menu state machine and reacts to its events; the
//! idle screen shows an uptime counter.

#![no_std]
#![no_main]

use core::fmt::Write as _;
use core::sync::atomic::AtomicI32;

use defmt::{error, info};
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::interrupt;
use embassy_nrf::interrupt::{InterruptExt, Priority};
use embassy_nrf::{bind_interrupts, peripherals, twim};
use embassy_time::{Duration, Instant, Timer};
use heapless::String;
use {defmt_rtt as _, panic_probe as _};

use encoder_menu::clock::EmbassyClock;
use encoder_menu::config::{ENCODER_SAMPLE_MS, POLL_INTERVAL_MS};
use encoder_menu::ui::display;
use encoder_menu::{
    MenuConfig, MenuController, MenuEvent, QuadratureEncoder, SharedTicks, SubtextPlacement,
    Titles,
};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

/// Raw encoder ticks, written by the decoder task, read by the menu.
static ENCODER_TICKS: AtomicI32 = AtomicI32::new(0);

static DECODER_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn EGU1_SWI1() {
    DECODER_EXECUTOR.on_interrupt()
}

#[embassy_executor::task]
async fn decode_encoder(mut encoder: QuadratureEncoder<Input<'static>, Input<'static>>) {
    loop {
        encoder.sample_into(&ENCODER_TICKS);
        Timer::after(Duration::from_millis(ENCODER_SAMPLE_MS)).await;
    }
}

/// Commands bound to the demo menu entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
enum Cmd {
    Contrast,
    Invert,
    KeepInverted,
    Reset,
    Close,
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    let config = MenuConfig::default();
    info!("encoder-menu starting");

    let i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let panel = display::new_panel(i2c, config.i2c_address);

    let encoder = QuadratureEncoder::new(
        Input::new(p.P0_03, Pull::Up),
        Input::new(p.P0_04, Pull::Up),
    );
    let switch = Input::new(p.P0_24, Pull::Up);

    interrupt::EGU1_SWI1.set_priority(Priority::P6);
    let decoder_spawner = DECODER_EXECUTOR.start(interrupt::EGU1_SWI1);
    decoder_spawner.must_spawn(decode_encoder(encoder));

    let ticks = SharedTicks::new(&ENCODER_TICKS);
    let mut menu = MenuController::new(panel, ticks, switch, EmbassyClock, config);
    if let Err(e) = menu.begin(Titles::new("Settings", "Uptime")) {
        error!("display init failed: {}", e);
        loop {
            cortex_m::asm::wfi();
        }
    }

    let items = [
        menu.add_change_item("Contrast", 5, 0, 10, Some(Cmd::Contrast)),
        menu.add_yes_no_item("Invert", Some(Cmd::Invert), Some(Cmd::KeepInverted)),
        menu.add_yes_no_item_with_labels("Reset", Some(Cmd::Reset), None, "Do it", "Cancel"),
        menu.add_action_item("Close", Some(Cmd::Close)),
    ];
    for result in items {
        if let Err(e) = result {
            error!("menu registration failed: {}", e);
        }
    }
    menu.set_idle_subtext("seconds", SubtextPlacement::Below);

    let mut shown_secs = u64::MAX;
    loop {
        match menu.tick() {
            Some(MenuEvent::ValueChanged(Cmd::Contrast, level)) => {
                info!("contrast set to {}", level);
            }
            Some(MenuEvent::Action(Cmd::Close)) => menu.close_menu_mode(),
            Some(MenuEvent::Action(cmd)) => info!("command {}", cmd),
            Some(MenuEvent::ValueChanged(cmd, value)) => info!("{} changed to {}", cmd, value),
            None => {}
        }

        let secs = Instant::now().as_secs();
        if secs != shown_secs {
            shown_secs = secs;
            let mut text: String<12> = String::new();
            let _ = write!(text, "{}", secs);
            menu.present_home_content(&text, 2);
        }

        Timer::after(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}
