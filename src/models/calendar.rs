//! Month indexing shared by the generator, the question picker and the logs.
//!
//! Index 0 is January.

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Partial month: exam leave truncates attendance tracking.
pub const JULY: usize = 6;

/// Summer holiday: no attendance is tracked at all.
pub const AUGUST: usize = 7;

/// Partial month: winter holidays truncate attendance tracking.
pub const DECEMBER: usize = 11;

/// Full month name, or `Month N` for columns beyond December.
pub fn month_name(index: usize) -> String {
    MONTH_NAMES
        .get(index)
        .map(|name| (*name).to_string())
        .unwrap_or_else(|| format!("Month {}", index + 1))
}
