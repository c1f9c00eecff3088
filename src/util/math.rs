//! Small numeric helpers for interval and threshold checks.

/// Length of the overlap between `[a0, a1]` and `[b0, b1]`, zero when disjoint.
///
/// The difference is taken in `f64`, so spans wider than `f32::MAX` stay finite.
pub(crate) fn overlap_1d(a0: f32, a1: f32, b0: f32, b1: f32) -> f64 {
    (f64::from(a1.min(b1)) - f64::from(a0.max(b0))).max(0.0)
}

/// Returns true when `value` is finite and within `[0, 1]`.
pub(crate) fn is_unit_interval(value: f32) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}
