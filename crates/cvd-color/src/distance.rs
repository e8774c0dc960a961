//! Perceptual color difference in CAM02-UCS.

use crate::ucs::{Jab, K_L};

/// Color difference ΔE between two CAM02-UCS points.
///
/// Euclidean distance with lightness weighted by 1/K_L (K_L = 1 for
/// CAM02-UCS, so this is the plain Euclidean norm).
#[inline]
pub fn cam02de(x: Jab, y: Jab) -> f64 {
    let dj = (x.j - y.j) / K_L;
    let da = x.a - y.a;
    let db = x.b - y.b;
    (dj * dj + da * da + db * db).sqrt()
}

/// [`cam02de`] over single-precision triples, as stored in catalogs.
///
/// The difference is accumulated in `f32`.
#[inline]
pub fn cam02de_f32(x: &[f32; 3], y: &[f32; 3]) -> f32 {
    let dj = (x[0] - y[0]) / K_L as f32;
    let da = x[1] - y[1];
    let db = x[2] - y[2];
    (dj * dj + da * da + db * db).sqrt()
}
