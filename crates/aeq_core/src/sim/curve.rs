//! Linear fit/clamp arithmetic for the progress curve.

use crate::models::ItemStatus;

/// Clamp `value` into `[mn, mx]`.
pub fn clamp(value: f64, mn: f64, mx: f64) -> f64 {
    value.max(mn).min(mx)
}

/// Linearly remap `value` from `[omin, omax]` into `[nmin, nmax]`,
/// clamping the result to the output range.
///
/// A degenerate input range (`omin == omax`) cannot be interpolated:
/// values before the range map to `nmin`, values at or past it to
/// `nmax`.
pub fn fit(value: f64, omin: f64, omax: f64, nmin: f64, nmax: f64) -> f64 {
    if (omax - omin).abs() < f64::EPSILON {
        return if value < omin { nmin } else { nmax };
    }
    let nvalue = ((value - omin) * (nmax - nmin)) / (omax - omin) + nmin;
    clamp(nvalue, nmin, nmax)
}

/// Remap `value` from `[mn, mx]` into a 0-100 percentage.
pub fn fit100(value: f64, mn: f64, mx: f64) -> f64 {
    fit(value, mn, mx, 0.0, 100.0)
}

/// Map a percentage onto an ordered status list.
///
/// Bucket index is `floor(percent / 100 * (N - 1))`, so 0% maps to the
/// first entry and 100% to the last. Returns `None` for an empty list.
pub fn percent_to_status(percent: f64, statuses: &[ItemStatus]) -> Option<ItemStatus> {
    if statuses.is_empty() {
        return None;
    }
    let index = ((percent / 100.0) * (statuses.len() - 1) as f64).floor() as usize;
    statuses.get(index.min(statuses.len() - 1)).copied()
}
