// SPDX-License-Identifier: GPL-3.0-or-later

/// Placeholder for missing scalar fields.
pub const UNKNOWN: &str = "Unknown";

/// Render a millisecond duration as `M:SS`, flooring to whole seconds.
///
/// Absent, zero and negative durations render as `0:00`. Minutes are not
/// rolled over into hours.
pub fn format_duration(milliseconds: Option<i64>) -> String {
    let ms = match milliseconds {
        Some(ms) if ms > 0 => ms,
        _ => return "0:00".to_string(),
    };

    let seconds = ms / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Join items with `", "`, truncating to `max_items` followed by `", ..."`.
/// An empty list renders as `None`.
pub fn format_list<S: AsRef<str>>(items: &[S], max_items: usize) -> String {
    if items.is_empty() {
        return "None".to_string();
    }

    let shown = items
        .iter()
        .take(max_items)
        .map(|item| item.as_ref())
        .collect::<Vec<_>>()
        .join(", ");

    if items.len() > max_items {
        format!("{}, ...", shown)
    } else {
        shown
    }
}
