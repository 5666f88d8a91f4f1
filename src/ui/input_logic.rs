/// Move the selection by `delta` rows, wrapping around `item_count`.
///
/// Returns `selected` unchanged for an empty list.
pub fn wrap_selection(selected: usize, delta: i32, item_count: usize) -> usize {
    if item_count == 0 {
        return selected;
    }
    let n = item_count as i64;
    (selected as i64 + delta as i64).rem_euclid(n) as usize
}

/// Smallest scroll change that keeps `selected` inside a `rows`-high window.
pub fn scroll_to_fit(selected: usize, scroll_offset: usize, rows: usize) -> usize {
    if selected < scroll_offset {
        selected
    } else if selected >= scroll_offset + rows {
        selected + 1 - rows
    } else {
        scroll_offset
    }
}

/// Clamp an adjusted value into `[min, max]`.
pub fn clamp_value(value: i32, min: i32, max: i32) -> i32 {
    value.max(min).min(max)
}

/// Yes/No cursor: 0 = yes, 1 = no. Clamped, never wraps.
pub fn step_choice(offset: u8, delta: i32) -> u8 {
    (offset as i32).saturating_add(delta).clamp(0, 1) as u8
}
