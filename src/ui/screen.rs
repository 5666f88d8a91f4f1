//! Screen layouts as display lists.
//!
//! Each screen is built as a `Frame`: a short list of text runs with a
//! top-left origin and an integer scale, the same cursor/size/print model
//! as the glyph-cell estimates used for centering. `display::paint` turns
//! a frame into pixels.
//!
//! Layout (128×64):
//! ```text
//! y=0   title (scale 1)
//! y=16  list row 0        y=20  sub-screen row / option 1
//! y=28  list row 1        y=30  option 2
//! y=40  list row 2
//! y=52  list row 3
//! ```

use core::fmt::Write;

use embedded_graphics::geometry::{Point, Size};
use heapless::{String, Vec};

use crate::config::{
    GLYPH_HEIGHT, GLYPH_WIDTH, LIST_ROW_HEIGHT, LIST_TOP_Y, SUBSCREEN_ROW_Y,
    SUBSCREEN_SECOND_ROW_Y, VALUE_RIGHT_MARGIN, VISIBLE_ROWS,
};
use crate::menu::{ItemKind, MenuItem, SubtextPlacement};

/// Capacity of a single text run (marker + label fits with room to spare).
pub const RUN_CAPACITY: usize = 32;

/// Title + four rows + four values leaves one spare slot.
pub const MAX_RUNS: usize = 10;

/// One positioned piece of text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRun {
    pub origin: Point,
    pub scale: u8,
    pub text: String<RUN_CAPACITY>,
}

/// Everything drawn on one screen refresh.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    runs: Vec<TextRun, MAX_RUNS>,
}

impl Frame {
    pub fn new() -> Self {
        Self { runs: Vec::new() }
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// True if any run contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.runs.iter().any(|r| r.text.contains(needle))
    }

    /// The run whose text is exactly `text`, if any.
    pub fn find(&self, text: &str) -> Option<&TextRun> {
        self.runs.iter().find(|r| r.text.as_str() == text)
    }

    fn push(&mut self, x: i32, y: i32, scale: u8, text: &str) {
        let mut s: String<RUN_CAPACITY> = String::new();
        for c in text.chars() {
            if s.push(c).is_err() {
                break;
            }
        }
        let _ = self.runs.push(TextRun {
            origin: Point::new(x, y),
            scale,
            text: s,
        });
    }

    fn push_marked(&mut self, x: i32, y: i32, marked: bool, label: &str) {
        let mut s: String<RUN_CAPACITY> = String::new();
        let _ = s.push_str(if marked { "> " } else { "  " });
        for c in label.chars() {
            if s.push(c).is_err() {
                break;
            }
        }
        self.push(x, y, 1, &s);
    }

    /// Right-justify `value` on row `y` using the 6 px glyph estimate.
    fn push_value(&mut self, width: i32, y: i32, value: i32) {
        let mut s: String<12> = String::new();
        let _ = write!(s, "{}", value);
        let x = width - s.len() as i32 * GLYPH_WIDTH - VALUE_RIGHT_MARGIN;
        self.push(x, y, 1, &s);
    }
}

/// First screen after `begin`: idle title and a start hint.
pub fn splash(idle_title: &str, hint: &str) -> Frame {
    let mut f = Frame::new();
    f.push(0, 0, 1, idle_title);
    f.push(0, LIST_TOP_Y, 1, hint);
    f
}

/// Idle/home content shown while no menu is active.
pub struct HomeScreen<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub scale: u8,
    pub subtext: &'a str,
    pub placement: SubtextPlacement,
}

/// Idle title at the top; content centered in the area below the title
/// line; subtext centered directly above or below the content.
pub fn home(size: Size, screen: &HomeScreen<'_>) -> Frame {
    let width = size.width as i32;
    let height = size.height as i32;
    let scale = screen.scale as i32;
    let char_w = GLYPH_WIDTH * scale;
    let char_h = GLYPH_HEIGHT * scale;

    let mut f = Frame::new();
    f.push(0, 0, 1, screen.title);

    let x = (width - screen.text.len() as i32 * char_w) / 2;
    let y = ((height - LIST_TOP_Y) - char_h) / 2 + LIST_TOP_Y;
    if !screen.text.is_empty() {
        f.push(x, y, screen.scale, screen.text);
    }

    if !screen.subtext.is_empty() {
        let sx = (width - screen.subtext.len() as i32 * GLYPH_WIDTH) / 2;
        let sy = match screen.placement {
            SubtextPlacement::Above => y - 12,
            SubtextPlacement::Below => y + char_h + 2,
        };
        f.push(sx, sy, 1, screen.subtext);
    }
    f
}

/// Scrollable item list with the selection marker.
pub fn menu_list<K>(
    size: Size,
    title: &str,
    items: &[MenuItem<K>],
    selected: usize,
    scroll_offset: usize,
) -> Frame {
    let width = size.width as i32;
    let mut f = Frame::new();
    f.push(0, 0, 1, title);

    let visible = items.iter().enumerate().skip(scroll_offset).take(VISIBLE_ROWS);
    for (row, (index, item)) in visible.enumerate() {
        let y = LIST_TOP_Y + row as i32 * LIST_ROW_HEIGHT;
        f.push_marked(0, y, index == selected, &item.label);
        if let ItemKind::ChangeValue { value, .. } = &item.kind {
            f.push_value(width, y, *value);
        }
    }
    f
}

/// Value adjustment sub-screen.
pub fn value_adjust(size: Size, title: &str, subtitle: &str, value: i32) -> Frame {
    let mut f = Frame::new();
    f.push(0, 0, 1, title);
    f.push(0, SUBSCREEN_ROW_Y, 1, subtitle);
    f.push_value(size.width as i32, SUBSCREEN_ROW_Y, value);
    f
}

/// Yes/No prompt. `offset` 0 marks the yes option, 1 the no option.
pub fn yes_no(title: &str, yes_label: &str, no_label: &str, offset: u8) -> Frame {
    let mut f = Frame::new();
    f.push(0, 0, 1, title);
    f.push_marked(0, SUBSCREEN_ROW_Y, offset == 0, yes_label);
    f.push_marked(0, SUBSCREEN_SECOND_ROW_Y, offset == 1, no_label);
    f
}
