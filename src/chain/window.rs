//! Visible strike window around the money

use std::ops::Range;

use crate::core::OptionTable;

/// Strike counts offered per side of the money
pub const STRIKE_WINDOW_CHOICES: [usize; 3] = [5, 10, 15];

/// Index of the last row whose `in_the_money` flag differs from the row
/// before it. Row 0 always counts as a change.
pub fn moneyness_boundary(calls: &OptionTable) -> Option<usize> {
    let rows = calls.rows();
    if rows.is_empty() {
        return None;
    }

    let flipped = rows
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0].in_the_money != pair[1].in_the_money)
        .map(|(i, _)| i + 1)
        .last();

    Some(flipped.unwrap_or(0))
}

/// Rows to show: `num_strikes` below the ITM/OTM boundary and `num_strikes`
/// from it upward, clamped to the table.
pub fn strike_window(calls: &OptionTable, num_strikes: usize) -> Range<usize> {
    let Some(boundary) = moneyness_boundary(calls) else {
        return 0..0;
    };

    let start = boundary.saturating_sub(num_strikes);
    let end = (start + num_strikes * 2).min(calls.len());
    start..end
}
