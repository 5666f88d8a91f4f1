//! Menu model: items, modal states, and the events handed back to the
//! application.
//!
//! Items do not hold callbacks. Each callback slot is an optional
//! application-chosen key `K`; when the slot fires, `MenuController::tick`
//! returns a `MenuEvent` carrying that key. An empty slot fires nothing.

mod controller;

#[cfg(test)]
mod tests;

pub use controller::MenuController;

use heapless::String;

use crate::config::TEXT_CAPACITY;

/// Fixed-capacity text used for labels, titles, and home content.
pub type Label = String<TEXT_CAPACITY>;

pub const DEFAULT_YES_LABEL: &str = "YES";
pub const DEFAULT_NO_LABEL: &str = "NO";
pub const DEFAULT_ADJUST_TITLE: &str = "Adjust value";
pub const DEFAULT_ADJUST_SUBTITLE: &str = "Value: ";
pub const DEFAULT_YES_NO_TITLE: &str = "Select: ";
pub const START_HINT: &str = "Press to start";

/// Copy `text` into a `Label`, dropping whatever does not fit.
pub fn label(text: &str) -> Label {
    let mut s = Label::new();
    for c in text.chars() {
        if s.push(c).is_err() {
            break;
        }
    }
    s
}

/// Behaviour of a menu entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemKind<K> {
    /// Confirm prompt with two options.
    YesNo {
        yes_label: Label,
        no_label: Label,
        on_yes: Option<K>,
        on_no: Option<K>,
    },
    /// Bounded integer; `min <= value <= max` always holds.
    ChangeValue {
        value: i32,
        min: i32,
        max: i32,
        on_change: Option<K>,
    },
    /// Fires immediately on press.
    Action { on_activate: Option<K> },
}

/// One row of the menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem<K> {
    pub label: Label,
    pub kind: ItemKind<K>,
}

impl<K> MenuItem<K> {
    pub fn action(name: &str, on_activate: Option<K>) -> Self {
        Self {
            label: label(name),
            kind: ItemKind::Action { on_activate },
        }
    }

    /// Bounds are taken as given; the initial value is clamped into them.
    pub fn change(name: &str, value: i32, min: i32, max: i32, on_change: Option<K>) -> Self {
        Self {
            label: label(name),
            kind: ItemKind::ChangeValue {
                value: value.max(min).min(max),
                min,
                max,
                on_change,
            },
        }
    }

    pub fn yes_no(
        name: &str,
        on_yes: Option<K>,
        on_no: Option<K>,
        yes_label: &str,
        no_label: &str,
    ) -> Self {
        Self {
            label: label(name),
            kind: ItemKind::YesNo {
                yes_label: label(yes_label),
                no_label: label(no_label),
                on_yes,
                on_no,
            },
        }
    }

    /// Current value of a `ChangeValue` item.
    pub fn value(&self) -> Option<i32> {
        match &self.kind {
            ItemKind::ChangeValue { value, .. } => Some(*value),
            _ => None,
        }
    }
}

/// A fired callback slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuEvent<K> {
    /// `on_activate`, `on_yes`, or `on_no` fired.
    Action(K),
    /// `on_change` fired with the committed value.
    ValueChanged(K, i32),
}

/// Where the controller is in its navigation state machine.
///
/// `Idle` and `List` persist; the two prompts are entered on a confirm in
/// `List` and left on the next confirm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Modal {
    /// Home screen, menu closed.
    Idle,
    /// Scrollable item list.
    List,
    /// Yes/No prompt for the selected item. `offset` 0 = yes, 1 = no.
    YesNoPrompt { offset: u8 },
    /// Adjusting the selected item; `working` is the uncommitted value.
    ValueAdjust { working: i32 },
}

impl Modal {
    /// True while a prompt owns the screen.
    pub fn is_transient(&self) -> bool {
        matches!(self, Modal::YesNoPrompt { .. } | Modal::ValueAdjust { .. })
    }
}

/// Subtext position relative to the home content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SubtextPlacement {
    Above,
    #[default]
    Below,
}

/// Screen titles handed to `MenuController::begin`.
#[derive(Clone, Copy, Debug)]
pub struct Titles<'t> {
    pub menu: &'t str,
    pub idle: &'t str,
    pub adjust: &'t str,
    pub adjust_subtitle: &'t str,
    pub yes_no: &'t str,
}

impl<'t> Titles<'t> {
    /// Menu and idle titles, default sub-screen titles.
    pub const fn new(menu: &'t str, idle: &'t str) -> Self {
        Self {
            menu,
            idle,
            adjust: DEFAULT_ADJUST_TITLE,
            adjust_subtitle: DEFAULT_ADJUST_SUBTITLE,
            yes_no: DEFAULT_YES_NO_TITLE,
        }
    }
}
