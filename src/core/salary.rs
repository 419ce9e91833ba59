/// Estimates a single monthly salary from a vacancy's bounds.
///
/// Bounds are expected in the target currency already. Zero, negative and
/// non-finite bounds count as missing since the job boards report `0` for
/// "not specified". The result is truncated toward zero; an estimate that
/// truncates to zero is missing as well.
pub fn estimate(lower: Option<f64>, upper: Option<f64>) -> Option<u64> {
    let lower = lower.filter(|v| v.is_finite() && *v > 0.0);
    let upper = upper.filter(|v| v.is_finite() && *v > 0.0);

    let predicted = match (lower, upper) {
        (Some(from), Some(to)) => (from + to) / 2.0,
        (Some(from), None) => from * 1.2,
        (None, Some(to)) => to * 0.8,
        (None, None) => return None,
    };

    Some(predicted.trunc() as u64).filter(|amount| *amount > 0)
}
