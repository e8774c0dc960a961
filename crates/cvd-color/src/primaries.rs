//! sRGB primaries expressed as an XYZ transform.
//!
//! XYZ is normalized so that reference white D65 has Y = 100; linear sRGB
//! is on the 0-1 scale.

use cvd_math::Mat3;

/// XYZ (0-1 scale) to linear sRGB.
///
/// This is the exact matrix specified in IEC 61966-2-1:1999. The forward
/// direction is obtained by inverting it once, in
/// [`ColorModel::new`](crate::ColorModel::new).
pub const XYZ_TO_SRGB: Mat3 = Mat3::from_rows([
    [3.2406, -1.5372, -0.4986],
    [-0.9689, 1.8758, 0.0415],
    [0.0557, -0.2040, 1.0570],
]);

/// D65 reference white on the 0-100 scale.
pub const XYZ100_D65: [f64; 3] = [95.047, 100.0, 108.883];
