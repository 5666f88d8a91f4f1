//! Unit tests for the menu state machine.
//!
//! These run on the host with fake panel, encoder, switch, and clock.

use core::cell::Cell;
use core::convert::Infallible;
use std::rc::Rc;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use super::{ItemKind, MenuController, MenuEvent, Modal, SubtextPlacement, Titles};
use crate::clock::Clock;
use crate::config::{MenuConfig, MAX_MENU_ITEMS};
use crate::encoder::TickCounter;
use crate::error::Error;
use crate::ui::display::Panel;

// ═══════════════════════════════════════════════════════════════════════════
// Fakes
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cmd {
    Open,
    Save,
    Yes,
    No,
    Close,
}

struct FakePanel {
    init_ok: bool,
    inits: usize,
    presents: usize,
}

impl OriginDimensions for FakePanel {
    fn size(&self) -> Size {
        Size::new(128, 64)
    }
}

impl DrawTarget for FakePanel {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        Ok(())
    }
}

impl Panel for FakePanel {
    fn init_panel(&mut self) -> Result<(), Error> {
        self.inits += 1;
        if self.init_ok {
            Ok(())
        } else {
            Err(Error::DisplayInit)
        }
    }

    fn clear_frame(&mut self) {}

    fn present(&mut self) -> Result<(), Error> {
        self.presents += 1;
        Ok(())
    }
}

struct FakeEncoder(Rc<Cell<i32>>);

impl TickCounter for FakeEncoder {
    fn count(&mut self) -> i32 {
        self.0.get()
    }

    fn set_count(&mut self, count: i32) {
        self.0.set(count);
    }
}

/// Switch line: `true` = held down (pulled low).
struct FakeSwitch(Rc<Cell<bool>>);

impl embedded_hal::digital::ErrorType for FakeSwitch {
    type Error = Infallible;
}

impl embedded_hal::digital::InputPin for FakeSwitch {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }
}

struct FakeClock(Rc<Cell<u64>>);

impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

type Menu = MenuController<FakePanel, FakeEncoder, FakeSwitch, FakeClock, Cmd>;

struct Rig {
    menu: Menu,
    ticks: Rc<Cell<i32>>,
    held: Rc<Cell<bool>>,
    now: Rc<Cell<u64>>,
}

impl Rig {
    fn unstarted(init_ok: bool) -> Self {
        let ticks = Rc::new(Cell::new(0));
        let held = Rc::new(Cell::new(false));
        let now = Rc::new(Cell::new(1_000));
        let menu = MenuController::new(
            FakePanel {
                init_ok,
                inits: 0,
                presents: 0,
            },
            FakeEncoder(ticks.clone()),
            FakeSwitch(held.clone()),
            FakeClock(now.clone()),
            MenuConfig::default(),
        );
        Self {
            menu,
            ticks,
            held,
            now,
        }
    }

    fn new() -> Self {
        let mut rig = Self::unstarted(true);
        rig.menu.begin(Titles::new("Settings", "Home")).unwrap();
        rig
    }

    /// Rotate by `steps` detents (two raw ticks each).
    fn turn(&self, steps: i32) {
        self.ticks.set(self.ticks.get() + steps * 2);
    }

    fn tick(&mut self) -> Option<MenuEvent<Cmd>> {
        self.now.set(self.now.get() + 10);
        self.menu.tick()
    }

    /// Full press-and-release, each edge outside the debounce window.
    fn press(&mut self) -> Option<MenuEvent<Cmd>> {
        self.now.set(self.now.get() + 100);
        self.held.set(true);
        let on_press = self.menu.tick();
        self.now.set(self.now.get() + 60);
        self.held.set(false);
        let on_release = self.menu.tick();
        on_press.or(on_release)
    }

    fn with_scenario_items() -> Self {
        let mut rig = Self::new();
        rig.menu.add_action_item("Open", Some(Cmd::Open)).unwrap();
        rig.menu
            .add_change_item("Level", 0, 0, 10, Some(Cmd::Save))
            .unwrap();
        rig.menu
            .add_yes_no_item("Reset", Some(Cmd::Yes), Some(Cmd::No))
            .unwrap();
        rig
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Setup
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn begin_initialises_panel_and_shows_splash() {
    let rig = Rig::new();
    assert_eq!(rig.menu.panel().inits, 1);
    assert_eq!(rig.menu.panel().presents, 1);
    assert_eq!(rig.menu.modal(), Modal::Idle);
    assert!(!rig.menu.is_menu_active());
    assert!(rig.menu.frame().find("Home").is_some());
    assert!(rig.menu.frame().find("Press to start").is_some());
}

#[test]
fn begin_reports_display_init_failure() {
    let mut rig = Rig::unstarted(false);
    assert_eq!(
        rig.menu.begin(Titles::new("Settings", "Home")),
        Err(Error::DisplayInit)
    );
    assert_eq!(rig.menu.panel().presents, 0);
}

#[test]
fn begin_zeroes_encoder() {
    let mut rig = Rig::unstarted(true);
    rig.ticks.set(41);
    rig.menu.begin(Titles::new("Settings", "Home")).unwrap();
    assert_eq!(rig.ticks.get(), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Registration
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn items_keep_insertion_order() {
    let rig = Rig::with_scenario_items();
    let labels: std::vec::Vec<&str> = rig.menu.items().iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, ["Open", "Level", "Reset"]);
}

#[test]
fn inverted_bounds_are_rejected() {
    let mut rig = Rig::new();
    assert_eq!(
        rig.menu.add_change_item("Bad", 0, 10, 0, None),
        Err(Error::InvertedBounds { min: 10, max: 0 })
    );
    assert!(rig.menu.items().is_empty());
}

#[test]
fn initial_value_is_clamped_into_bounds() {
    let mut rig = Rig::new();
    rig.menu.add_change_item("Hi", 50, 0, 10, None).unwrap();
    rig.menu.add_change_item("Lo", -50, 0, 10, None).unwrap();
    assert_eq!(rig.menu.items()[0].value(), Some(10));
    assert_eq!(rig.menu.items()[1].value(), Some(0));
}

#[test]
fn full_menu_is_rejected() {
    let mut rig = Rig::new();
    for i in 0..MAX_MENU_ITEMS {
        assert_eq!(rig.menu.add_action_item("Item", None), Ok(i));
    }
    assert_eq!(rig.menu.add_action_item("Extra", None), Err(Error::MenuFull));
}

#[test]
fn yes_no_item_uses_default_or_custom_labels() {
    let mut rig = Rig::new();
    rig.menu.add_yes_no_item("A", None, None).unwrap();
    rig.menu
        .add_yes_no_item_with_labels("B", None, None, "Sure", "Nope")
        .unwrap();
    match &rig.menu.items()[0].kind {
        ItemKind::YesNo {
            yes_label,
            no_label,
            ..
        } => {
            assert_eq!(yes_label.as_str(), "YES");
            assert_eq!(no_label.as_str(), "NO");
        }
        _ => panic!("expected yes/no item"),
    }
    match &rig.menu.items()[1].kind {
        ItemKind::YesNo {
            yes_label,
            no_label,
            ..
        } => {
            assert_eq!(yes_label.as_str(), "Sure");
            assert_eq!(no_label.as_str(), "Nope");
        }
        _ => panic!("expected yes/no item"),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Navigation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn press_on_idle_opens_list() {
    let mut rig = Rig::with_scenario_items();
    assert_eq!(rig.press(), None);
    assert_eq!(rig.menu.modal(), Modal::List);
    assert!(rig.menu.is_menu_active());
    assert!(rig.menu.frame().find("Settings").is_some());
    assert!(rig.menu.frame().find("> Open").is_some());
    assert!(rig.menu.frame().find("0").is_some());
}

#[test]
fn rotation_while_idle_is_not_applied_on_open() {
    let mut rig = Rig::with_scenario_items();
    rig.turn(2);
    rig.tick();
    rig.press();
    assert_eq!(rig.menu.selected(), 0);
}

#[test]
fn encoder_moves_selection_with_wraparound() {
    let mut rig = Rig::with_scenario_items();
    rig.press();

    rig.turn(1);
    rig.tick();
    assert_eq!(rig.menu.selected(), 1);
    assert!(rig.menu.frame().find("> Level").is_some());

    rig.turn(-2);
    rig.tick();
    assert_eq!(rig.menu.selected(), 2);
}

#[test]
fn half_detent_does_not_move() {
    let mut rig = Rig::with_scenario_items();
    rig.press();
    rig.ticks.set(rig.ticks.get() + 1);
    rig.tick();
    assert_eq!(rig.menu.selected(), 0);
    rig.ticks.set(rig.ticks.get() + 1);
    rig.tick();
    assert_eq!(rig.menu.selected(), 1);
}

#[test]
fn list_redraws_every_tick() {
    let mut rig = Rig::with_scenario_items();
    rig.press();
    let before = rig.menu.panel().presents;
    rig.tick();
    rig.tick();
    assert_eq!(rig.menu.panel().presents, before + 2);
}

#[test]
fn movement_by_item_count_is_identity() {
    let mut rig = Rig::with_scenario_items();
    rig.press();
    rig.menu.apply_movement(1);
    rig.menu.apply_movement(3);
    assert_eq!(rig.menu.selected(), 1);
    rig.menu.apply_movement(-3);
    assert_eq!(rig.menu.selected(), 1);
}

#[test]
fn scroll_window_follows_selection() {
    let mut rig = Rig::new();
    for _ in 0..6 {
        rig.menu.add_action_item("Row", None).unwrap();
    }
    rig.menu.apply_movement(4);
    assert_eq!((rig.menu.selected(), rig.menu.scroll_offset()), (4, 1));
    rig.menu.apply_movement(1);
    assert_eq!((rig.menu.selected(), rig.menu.scroll_offset()), (5, 2));
    rig.menu.apply_movement(-3);
    assert_eq!((rig.menu.selected(), rig.menu.scroll_offset()), (2, 2));
    rig.menu.apply_movement(4);
    assert_eq!((rig.menu.selected(), rig.menu.scroll_offset()), (0, 0));
}

#[test]
fn selection_invariants_hold_for_any_delta_sequence() {
    let mut rig = Rig::new();
    for _ in 0..7 {
        rig.menu.add_action_item("Row", None).unwrap();
    }
    let n = rig.menu.items().len();

    // Small LCG so the sequence is deterministic.
    let mut seed: u32 = 0x1234_5678;
    for _ in 0..500 {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let delta = (seed >> 16) as i32 % 41 - 20;
        rig.menu.apply_movement(delta);

        let (sel, off) = (rig.menu.selected(), rig.menu.scroll_offset());
        assert!(sel < n);
        assert!(off <= sel && sel < off + 4, "sel {} off {}", sel, off);
    }
}

#[test]
fn empty_menu_opens_and_ignores_input() {
    let mut rig = Rig::new();
    rig.press();
    assert_eq!(rig.menu.modal(), Modal::List);
    rig.turn(3);
    assert_eq!(rig.tick(), None);
    assert_eq!(rig.press(), None);
    assert_eq!(rig.menu.modal(), Modal::List);
    assert_eq!(rig.menu.selected(), 0);
    assert_eq!(rig.menu.frame().runs().len(), 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// Activation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn action_item_fires_and_stays_in_list() {
    let mut rig = Rig::with_scenario_items();
    rig.press();
    assert_eq!(rig.press(), Some(MenuEvent::Action(Cmd::Open)));
    assert_eq!(rig.menu.modal(), Modal::List);
}

#[test]
fn action_without_slot_fires_nothing() {
    let mut rig = Rig::new();
    rig.menu.add_action_item("Noop", None).unwrap();
    rig.press();
    assert_eq!(rig.press(), None);
    assert_eq!(rig.menu.modal(), Modal::List);
}

#[test]
fn held_button_activates_once() {
    let mut rig = Rig::with_scenario_items();
    rig.press();

    rig.now.set(rig.now.get() + 100);
    rig.held.set(true);
    let mut events = 0;
    for _ in 0..50 {
        if rig.tick().is_some() {
            events += 1;
        }
    }
    assert_eq!(events, 1);
}

#[test]
fn activate_is_ignored_outside_list() {
    let mut rig = Rig::with_scenario_items();
    assert_eq!(rig.menu.activate(), None);
    assert_eq!(rig.menu.modal(), Modal::Idle);
}

// ═══════════════════════════════════════════════════════════════════════════
// Value adjust
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn adjust_scenario_commits_clamped_value_once() {
    let mut rig = Rig::with_scenario_items();
    rig.press();
    rig.menu.apply_movement(1);
    assert_eq!(rig.menu.selected(), 1);

    assert_eq!(rig.press(), None);
    assert_eq!(rig.menu.modal(), Modal::ValueAdjust { working: 0 });
    assert!(rig.menu.frame().find("Adjust value").is_some());
    assert!(rig.menu.frame().find("Value: ").is_some());

    rig.turn(3);
    assert_eq!(rig.tick(), None);
    assert_eq!(rig.menu.modal(), Modal::ValueAdjust { working: 3 });
    assert!(rig.menu.frame().find("3").is_some());

    let mut events = std::vec::Vec::new();
    events.extend(rig.press());
    for _ in 0..5 {
        events.extend(rig.tick());
    }
    assert_eq!(events, [MenuEvent::ValueChanged(Cmd::Save, 3)]);
    assert_eq!(rig.menu.items()[1].value(), Some(3));
    assert_eq!(rig.menu.modal(), Modal::List);
    assert!(rig.menu.frame().find("> Level").is_some());
}

#[test]
fn adjust_never_leaves_bounds() {
    let mut rig = Rig::new();
    rig.menu.add_change_item("Temp", 9, 0, 10, None).unwrap();
    rig.press();
    rig.press();

    rig.turn(5);
    rig.tick();
    assert_eq!(rig.menu.modal(), Modal::ValueAdjust { working: 10 });

    rig.turn(-50);
    rig.tick();
    assert_eq!(rig.menu.modal(), Modal::ValueAdjust { working: 0 });

    // Overshoot does not accumulate past the bound.
    rig.turn(2);
    rig.tick();
    assert_eq!(rig.menu.modal(), Modal::ValueAdjust { working: 2 });

    assert_eq!(rig.press(), None);
    assert_eq!(rig.menu.items()[0].value(), Some(2));
}

#[test]
fn entry_press_must_be_released_before_confirming() {
    let mut rig = Rig::with_scenario_items();
    rig.press();
    rig.menu.apply_movement(1);

    rig.now.set(rig.now.get() + 100);
    rig.held.set(true);
    for _ in 0..20 {
        assert_eq!(rig.tick(), None);
    }
    assert!(rig.menu.modal().is_transient());
}

// ═══════════════════════════════════════════════════════════════════════════
// Yes / No
// ═══════════════════════════════════════════════════════════════════════════

fn open_prompt(rig: &mut Rig) {
    rig.press();
    rig.menu.apply_movement(2);
    rig.press();
    assert_eq!(rig.menu.modal(), Modal::YesNoPrompt { offset: 0 });
}

#[test]
fn prompt_defaults_to_yes() {
    let mut rig = Rig::with_scenario_items();
    open_prompt(&mut rig);
    assert!(rig.menu.frame().find("Select: ").is_some());
    assert!(rig.menu.frame().find("> YES").is_some());
    assert!(rig.menu.frame().find("  NO").is_some());

    assert_eq!(rig.press(), Some(MenuEvent::Action(Cmd::Yes)));
    assert_eq!(rig.menu.modal(), Modal::List);
}

#[test]
fn prompt_offset_is_clamped() {
    let mut rig = Rig::with_scenario_items();
    open_prompt(&mut rig);

    rig.turn(7);
    rig.tick();
    assert_eq!(rig.menu.modal(), Modal::YesNoPrompt { offset: 1 });
    assert!(rig.menu.frame().find("> NO").is_some());

    rig.turn(-9);
    rig.tick();
    assert_eq!(rig.menu.modal(), Modal::YesNoPrompt { offset: 0 });

    rig.turn(1);
    rig.tick();
    assert_eq!(rig.press(), Some(MenuEvent::Action(Cmd::No)));
}

#[test]
fn prompt_without_slot_returns_silently() {
    let mut rig = Rig::new();
    rig.menu.add_yes_no_item("Wipe", Some(Cmd::Yes), None).unwrap();
    rig.press();
    rig.press();
    rig.turn(1);
    rig.tick();
    assert_eq!(rig.press(), None);
    assert_eq!(rig.menu.modal(), Modal::List);
}

// ═══════════════════════════════════════════════════════════════════════════
// Mode switching
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn toggle_is_noop_while_prompt_open() {
    let mut rig = Rig::with_scenario_items();
    open_prompt(&mut rig);
    rig.menu.toggle_menu_mode();
    assert_eq!(rig.menu.modal(), Modal::YesNoPrompt { offset: 0 });
    rig.menu.close_menu_mode();
    assert_eq!(rig.menu.modal(), Modal::YesNoPrompt { offset: 0 });
}

#[test]
fn toggle_is_noop_while_adjusting_value() {
    let mut rig = Rig::with_scenario_items();
    rig.press();
    rig.menu.apply_movement(1);
    rig.press();
    rig.turn(2);
    rig.tick();
    assert_eq!(rig.menu.modal(), Modal::ValueAdjust { working: 2 });

    rig.menu.toggle_menu_mode();
    assert_eq!(rig.menu.modal(), Modal::ValueAdjust { working: 2 });
    rig.menu.close_menu_mode();
    assert_eq!(rig.menu.modal(), Modal::ValueAdjust { working: 2 });
    assert!(rig.menu.frame().find("Adjust value").is_some());

    assert_eq!(rig.press(), Some(MenuEvent::ValueChanged(Cmd::Save, 2)));
    assert_eq!(rig.menu.modal(), Modal::List);
}

#[test]
fn toggle_flips_idle_and_list() {
    let mut rig = Rig::with_scenario_items();
    rig.menu.toggle_menu_mode();
    assert_eq!(rig.menu.modal(), Modal::List);
    rig.menu.toggle_menu_mode();
    assert_eq!(rig.menu.modal(), Modal::Idle);
    assert!(rig.menu.frame().find("Home").is_some());
}

#[test]
fn close_action_returns_to_home_content() {
    let mut rig = Rig::new();
    rig.menu.add_action_item("Close", Some(Cmd::Close)).unwrap();
    rig.menu.present_home_content("12:30", 2);
    rig.press();

    if let Some(MenuEvent::Action(Cmd::Close)) = rig.press() {
        rig.menu.close_menu_mode();
    }
    assert_eq!(rig.menu.modal(), Modal::Idle);
    let run = rig.menu.frame().find("12:30").unwrap();
    assert_eq!(run.scale, 2);
}

// ═══════════════════════════════════════════════════════════════════════════
// Idle screen
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn home_scale_is_clamped() {
    let mut rig = Rig::new();
    rig.menu.present_home_content("Hi", 9);
    assert_eq!(rig.menu.frame().find("Hi").unwrap().scale, 3);
    rig.menu.present_home_content("Hi", 0);
    assert_eq!(rig.menu.frame().find("Hi").unwrap().scale, 1);
}

#[test]
fn home_content_is_deferred_while_menu_open() {
    let mut rig = Rig::with_scenario_items();
    rig.press();
    rig.menu.present_home_content("Later", 1);
    assert!(rig.menu.frame().find("Later").is_none());
    rig.menu.close_menu_mode();
    assert!(rig.menu.frame().find("Later").is_some());
}

#[test]
fn idle_title_and_subtext_redraw_when_idle() {
    let mut rig = Rig::new();
    rig.menu.present_home_content("OK", 1);
    rig.menu.set_idle_title("Status");
    assert_eq!(
        rig.menu.frame().find("Status").unwrap().origin,
        Point::new(0, 0)
    );

    rig.menu.set_idle_subtext("temp", SubtextPlacement::Above);
    let text_y = rig.menu.frame().find("OK").unwrap().origin.y;
    let sub_y = rig.menu.frame().find("temp").unwrap().origin.y;
    assert_eq!(sub_y, text_y - 12);

    rig.menu.set_idle_subtext("temp", SubtextPlacement::Below);
    let sub_y = rig.menu.frame().find("temp").unwrap().origin.y;
    assert_eq!(sub_y, text_y + 8 + 2);
}
