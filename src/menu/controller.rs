//! The menu controller: one resumable state machine stepped by `tick()`.
//!
//! ```text
//!            press                 press on YES_NO
//!   Idle ───────────▶ List ─────────────────────────▶ YesNoPrompt
//!    ▲                │  ▲ ◀──────── press ─────────────────┘
//!    └─ close/toggle ─┘  │
//!                        │   press on CHANGE_VALUE
//!                        ├─────────────────────────▶ ValueAdjust
//!                        └◀──────── press ─────────────────┘
//! ```
//!
//! A prompt owns the screen until it is confirmed; `tick()` never blocks.

use embedded_graphics::geometry::Size;
use embedded_hal::digital::InputPin;
use heapless::Vec;

use crate::clock::Clock;
use crate::config::{MenuConfig, MAX_MENU_ITEMS, MAX_TEXT_SCALE, VISIBLE_ROWS};
use crate::encoder::{logical_position, TickCounter};
use crate::error::Error;
use crate::ui::buttons::{Button, Debouncer};
use crate::ui::display::{paint, Panel};
use crate::ui::input_logic::{clamp_value, scroll_to_fit, step_choice, wrap_selection};
use crate::ui::screen::{self, Frame, HomeScreen};

use super::{
    label, ItemKind, Label, MenuEvent, MenuItem, Modal, SubtextPlacement, Titles,
    DEFAULT_NO_LABEL, DEFAULT_YES_LABEL, START_HINT,
};

struct ScreenTitles {
    menu: Label,
    idle: Label,
    adjust: Label,
    adjust_subtitle: Label,
    yes_no: Label,
}

impl From<Titles<'_>> for ScreenTitles {
    fn from(t: Titles<'_>) -> Self {
        Self {
            menu: label(t.menu),
            idle: label(t.idle),
            adjust: label(t.adjust),
            adjust_subtitle: label(t.adjust_subtitle),
            yes_no: label(t.yes_no),
        }
    }
}

/// Encoder + push-button menu on a monochrome panel.
///
/// `K` is the application's command key, returned in `MenuEvent`s when an
/// item's callback slot fires.
pub struct MenuController<D, E, P, C, K> {
    panel: D,
    encoder: E,
    button: Button<P>,
    clock: C,
    config: MenuConfig,

    items: Vec<MenuItem<K>, MAX_MENU_ITEMS>,
    selected: usize,
    scroll_offset: usize,
    modal: Modal,

    titles: ScreenTitles,
    home_text: Label,
    home_scale: u8,
    idle_subtext: Label,
    subtext_placement: SubtextPlacement,

    debouncer: Debouncer,
    /// Encoder count / sensitivity at the last read.
    last_position: i32,
    /// Copy of what the panel currently shows, exposed through `frame()`.
    frame: Frame,
}

impl<D, E, P, C, K> MenuController<D, E, P, C, K>
where
    D: Panel,
    E: TickCounter,
    P: InputPin,
    C: Clock,
    K: Copy,
{
    /// Take ownership of the panel, encoder, switch pin, and clock.
    /// Nothing is drawn until `begin`.
    pub fn new(panel: D, encoder: E, button: P, clock: C, config: MenuConfig) -> Self {
        Self {
            panel,
            encoder,
            button: Button::new(button),
            clock,
            config,
            items: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            modal: Modal::Idle,
            titles: ScreenTitles::from(Titles::new("Menu", "")),
            home_text: Label::new(),
            home_scale: 1,
            idle_subtext: Label::new(),
            subtext_placement: SubtextPlacement::default(),
            debouncer: Debouncer::new(config.debounce_ms),
            last_position: 0,
            frame: Frame::new(),
        }
    }

    /// Initialise the panel, zero the encoder, and show the idle screen.
    ///
    /// `Error::DisplayInit` is fatal for the caller: there is nothing the
    /// menu can do without a screen.
    pub fn begin(&mut self, titles: Titles<'_>) -> Result<(), Error> {
        self.titles = ScreenTitles::from(titles);

        self.encoder.clear_count();
        self.last_position = 0;

        if let Err(e) = self.panel.init_panel() {
            error!("display: init failed at {:#x}", self.config.i2c_address);
            return Err(e);
        }
        info!("display: ready at {:#x}", self.config.i2c_address);

        self.modal = Modal::Idle;
        let frame = screen::splash(&self.titles.idle, START_HINT);
        self.show(frame);
        Ok(())
    }

    // Registration

    /// Yes/No item with the default "YES" / "NO" option labels.
    pub fn add_yes_no_item(
        &mut self,
        name: &str,
        on_yes: Option<K>,
        on_no: Option<K>,
    ) -> Result<usize, Error> {
        self.add_yes_no_item_with_labels(name, on_yes, on_no, DEFAULT_YES_LABEL, DEFAULT_NO_LABEL)
    }

    pub fn add_yes_no_item_with_labels(
        &mut self,
        name: &str,
        on_yes: Option<K>,
        on_no: Option<K>,
        yes_label: &str,
        no_label: &str,
    ) -> Result<usize, Error> {
        self.push_item(MenuItem::yes_no(name, on_yes, on_no, yes_label, no_label))
    }

    /// Bounded integer item. `min > max` is rejected; an initial value
    /// outside the bounds is clamped.
    pub fn add_change_item(
        &mut self,
        name: &str,
        value: i32,
        min: i32,
        max: i32,
        on_change: Option<K>,
    ) -> Result<usize, Error> {
        if min > max {
            warn!("menu: rejected value item with min {} > max {}", min, max);
            return Err(Error::InvertedBounds { min, max });
        }
        self.push_item(MenuItem::change(name, value, min, max, on_change))
    }

    pub fn add_action_item(&mut self, name: &str, on_activate: Option<K>) -> Result<usize, Error> {
        self.push_item(MenuItem::action(name, on_activate))
    }

    fn push_item(&mut self, item: MenuItem<K>) -> Result<usize, Error> {
        let index = self.items.len();
        if self.items.push(item).is_err() {
            warn!("menu: item list full ({} items)", MAX_MENU_ITEMS);
            return Err(Error::MenuFull);
        }
        debug!("menu: registered item {}", index);
        Ok(index)
    }

    // Navigation

    /// Move the selection by `delta` rows with wraparound, scrolling the
    /// 4-row window as little as possible. No-op on an empty menu.
    pub fn apply_movement(&mut self, delta: i32) {
        if self.items.is_empty() {
            return;
        }
        self.selected = wrap_selection(self.selected, delta, self.items.len());
        self.scroll_offset = scroll_to_fit(self.selected, self.scroll_offset, VISIBLE_ROWS);
    }

    /// Confirm the selected item. Only acts in `List`.
    ///
    /// Actions fire at once; Yes/No and value items open their prompt and
    /// fire when the prompt is confirmed.
    pub fn activate(&mut self) -> Option<MenuEvent<K>> {
        if self.modal != Modal::List {
            return None;
        }
        let next = match &self.items.get(self.selected)?.kind {
            ItemKind::Action { on_activate } => {
                debug!("menu: action item {}", self.selected);
                return (*on_activate).map(MenuEvent::Action);
            }
            ItemKind::YesNo { .. } => Modal::YesNoPrompt { offset: 0 },
            ItemKind::ChangeValue { value, .. } => Modal::ValueAdjust { working: *value },
        };
        self.enter_prompt(next);
        None
    }

    /// Poll the button and encoder once and advance the state machine.
    ///
    /// Call from the main loop; never blocks. Returns the event of any
    /// callback slot that fired during this step.
    pub fn tick(&mut self) -> Option<MenuEvent<K>> {
        let now = self.clock.now_ms();
        let held = self.button.is_pressed();
        let pressed = self.debouncer.update(held, now);

        match self.modal {
            Modal::Idle => {
                if pressed {
                    self.open_menu();
                }
                None
            }
            Modal::List => {
                let event = if pressed { self.activate() } else { None };
                if self.modal == Modal::List {
                    let delta = self.take_movement();
                    if delta != 0 {
                        self.apply_movement(delta);
                    }
                    self.render_menu();
                }
                event
            }
            Modal::YesNoPrompt { offset } => self.step_yes_no(offset, pressed),
            Modal::ValueAdjust { working } => self.step_value_adjust(working, pressed),
        }
    }

    fn step_yes_no(&mut self, offset: u8, pressed: bool) -> Option<MenuEvent<K>> {
        let offset = step_choice(offset, self.take_movement());
        self.modal = Modal::YesNoPrompt { offset };
        self.render_prompt();

        if !pressed {
            return None;
        }
        let slot = match self.items.get(self.selected).map(|item| &item.kind) {
            Some(ItemKind::YesNo { on_yes, on_no, .. }) => {
                if offset == 0 {
                    *on_yes
                } else {
                    *on_no
                }
            }
            _ => None,
        };
        info!(
            "menu: item {} answered {}",
            self.selected,
            if offset == 0 { "yes" } else { "no" }
        );
        self.return_to_list();
        slot.map(MenuEvent::Action)
    }

    fn step_value_adjust(&mut self, working: i32, pressed: bool) -> Option<MenuEvent<K>> {
        let bounds = match self.items.get(self.selected).map(|item| &item.kind) {
            Some(ItemKind::ChangeValue { min, max, .. }) => Some((*min, *max)),
            _ => None,
        };
        let Some((min, max)) = bounds else {
            self.return_to_list();
            return None;
        };

        let working = clamp_value(working.saturating_add(self.take_movement()), min, max);
        self.modal = Modal::ValueAdjust { working };
        self.render_prompt();

        if !pressed {
            return None;
        }
        let mut event = None;
        if let Some(MenuItem {
            kind: ItemKind::ChangeValue {
                value, on_change, ..
            },
            ..
        }) = self.items.get_mut(self.selected)
        {
            *value = working;
            event = (*on_change).map(|key| MenuEvent::ValueChanged(key, working));
        }
        info!("menu: item {} set to {}", self.selected, working);
        self.return_to_list();
        event
    }

    // Mode switching

    /// Flip between the idle screen and the list. Ignored while a prompt
    /// is open.
    pub fn toggle_menu_mode(&mut self) {
        match self.modal {
            Modal::Idle => self.open_menu(),
            Modal::List => self.close_menu_mode(),
            _ => debug!("menu: toggle ignored while a prompt is open"),
        }
    }

    /// Return from the list to the idle screen.
    pub fn close_menu_mode(&mut self) {
        if self.modal != Modal::List {
            return;
        }
        debug!("menu: closed");
        self.modal = Modal::Idle;
        self.render_idle();
    }

    /// True in the list and in both prompts.
    pub fn is_menu_active(&self) -> bool {
        self.modal != Modal::Idle
    }

    fn open_menu(&mut self) {
        debug!("menu: opened");
        self.modal = Modal::List;
        self.sync_encoder();
        self.render_menu();
    }

    fn enter_prompt(&mut self, prompt: Modal) {
        debug!("menu: prompt for item {}", self.selected);
        self.sync_encoder();
        self.modal = prompt;
        self.render_prompt();
    }

    fn return_to_list(&mut self) {
        self.modal = Modal::List;
        self.render_menu();
    }

    // Idle screen

    /// Set the home content. `scale` is clamped to `1..=3`. Drawn now if
    /// the menu is closed, otherwise on the next return to idle.
    pub fn present_home_content(&mut self, text: &str, scale: u8) {
        self.home_text = label(text);
        self.home_scale = scale.clamp(1, MAX_TEXT_SCALE);
        if self.modal == Modal::Idle {
            self.render_idle();
        }
    }

    pub fn set_idle_title(&mut self, title: &str) {
        self.titles.idle = label(title);
        if self.modal == Modal::Idle {
            self.render_idle();
        }
    }

    pub fn set_idle_subtext(&mut self, subtext: &str, placement: SubtextPlacement) {
        self.idle_subtext = label(subtext);
        self.subtext_placement = placement;
        if self.modal == Modal::Idle {
            self.render_idle();
        }
    }

    // Rendering

    /// Draw the list view: title plus up to four rows from the scroll offset.
    pub fn render_menu(&mut self) {
        let frame = screen::menu_list(
            self.size(),
            &self.titles.menu,
            &self.items,
            self.selected,
            self.scroll_offset,
        );
        self.show(frame);
    }

    fn render_idle(&mut self) {
        let frame = screen::home(
            self.size(),
            &HomeScreen {
                title: &self.titles.idle,
                text: &self.home_text,
                scale: self.home_scale,
                subtext: &self.idle_subtext,
                placement: self.subtext_placement,
            },
        );
        self.show(frame);
    }

    fn render_prompt(&mut self) {
        let frame = match (self.modal, self.items.get(self.selected).map(|item| &item.kind)) {
            (Modal::YesNoPrompt { offset }, Some(ItemKind::YesNo { yes_label, no_label, .. })) => {
                screen::yes_no(&self.titles.yes_no, yes_label, no_label, offset)
            }
            (Modal::ValueAdjust { working }, _) => screen::value_adjust(
                self.size(),
                &self.titles.adjust,
                &self.titles.adjust_subtitle,
                working,
            ),
            _ => return,
        };
        self.show(frame);
    }

    fn show(&mut self, frame: Frame) {
        if let Err(e) = paint(&mut self.panel, &frame) {
            warn!("display: redraw failed: {:?}", e);
        }
        self.frame = frame;
    }

    fn size(&self) -> Size {
        Size::new(self.config.screen_width, self.config.screen_height)
    }

    // Encoder

    fn sync_encoder(&mut self) {
        self.last_position = logical_position(self.encoder.count(), self.config.sensitivity);
    }

    /// Logical steps since the previous read.
    fn take_movement(&mut self) -> i32 {
        let position = logical_position(self.encoder.count(), self.config.sensitivity);
        let delta = position.wrapping_sub(self.last_position);
        self.last_position = position;
        delta
    }

    // Accessors

    pub fn modal(&self) -> Modal {
        self.modal
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn items(&self) -> &[MenuItem<K>] {
        &self.items
    }

    /// The frame most recently sent to the panel.
    ///
    /// The text and positions of what is on screen, without touching the
    /// panel. Useful for mirroring the display (serial console, remote
    /// viewer) and for asserting on screens in host tests.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Shared access to the panel, e.g. to read driver state.
    pub fn panel(&self) -> &D {
        &self.panel
    }
}
