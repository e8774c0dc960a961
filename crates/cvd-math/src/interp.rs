//! Scalar interval helpers.

/// Maps a unit sample `u` in [0, 1) onto the interval `[lo, hi)`.
///
/// Written as `(hi - lo) * u + lo` so that a degenerate interval
/// (`lo == hi`) returns `lo` exactly.
#[inline]
pub fn scale_unit(u: f64, lo: f64, hi: f64) -> f64 {
    (hi - lo) * u + lo
}
