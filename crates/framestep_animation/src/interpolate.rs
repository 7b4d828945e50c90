//! Expansion of increment sequences into frame values

/// Expand `increments` into the per-frame values between `start` and `end`.
///
/// Each increment moves a running total by `(end - start) * d / 100`. Every
/// frame value is the running total truncated to one fractional digit, so the
/// output has exactly one entry per increment.
pub fn interpolate(start: f64, end: f64, increments: &[i32]) -> Vec<String> {
    let diff = end - start;
    let mut total = start;

    increments
        .iter()
        .map(|&d| {
            total += diff * f64::from(d) / 100.0;
            format_tenths(total)
        })
        .collect()
}

/// Render a value with exactly one fractional digit, dropping (not rounding)
/// anything past the first digit of its shortest decimal representation.
pub fn format_tenths(value: f64) -> String {
    let mut text = value.to_string();

    match text.find('.') {
        Some(dot) => text.truncate((dot + 2).min(text.len())),
        None if value.is_finite() => text.push_str(".0"),
        None => {}
    }

    // Anything in (-0.1, 0] truncates to zero and never carries a sign
    if text == "-0.0" || text == "-0" {
        text = "0.0".to_string();
    }
    text
}
