/// `School [2, 7]`: every tied school, in the layout the analysis notebooks expect.
pub fn format_correct_schools(ids: &[usize]) -> String {
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("School [{joined}]")
}

/// Seconds with two decimals.
pub fn format_response_secs(secs: f64) -> String {
    format!("{secs:.2}")
}

pub fn verdict(is_correct: bool) -> &'static str {
    if is_correct {
        "Correct"
    } else {
        "Wrong"
    }
}

pub fn optional_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
