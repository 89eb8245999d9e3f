/// Rounds hours to one decimal, ties to even.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Rounds ratios to two decimals, ties to even.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// `spent / estimate`, defined only when both sides are nonzero.
#[must_use]
pub fn ratio(spent: f64, estimate: f64) -> Option<f64> {
    (spent != 0.0 && estimate != 0.0).then(|| spent / estimate)
}

/// Arithmetic mean, undefined for an empty slice.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "history lengths are far below 2^52")]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
