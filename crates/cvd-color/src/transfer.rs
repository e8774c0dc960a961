//! sRGB transfer function.
//!
//! The sRGB standard uses a piecewise function combining a linear segment
//! near black with a power curve (approximately gamma 2.2) for the rest.
//!
//! # Range
//!
//! - Input/Output: [0, 1]. Values outside that range are passed through
//!   the same branches without clamping; the set generator relies on this
//!   to detect out-of-gamut reprojections after encoding.
//!
//! # Reference
//!
//! IEC 61966-2-1:1999

use cvd_math::Vec3;

/// sRGB EOTF: Decodes sRGB encoded values to linear light.
///
/// # Formula
///
/// ```text
/// if V < 0.04045:
///     L = V / 12.92
/// else:
///     L = ((V + 0.055) / 1.055)^2.4
/// ```
///
/// # Example
///
/// ```rust
/// use cvd_color::transfer::eotf;
///
/// let linear = eotf(0.5);
/// assert!((linear - 0.214).abs() < 0.01);
/// ```
#[inline]
pub fn eotf(v: f64) -> f64 {
    if v < 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB OETF: Encodes linear light to sRGB.
///
/// # Formula
///
/// ```text
/// if L <= 0.0031308:
///     V = L * 12.92
/// else:
///     V = 1.055 * L^(1/2.4) - 0.055
/// ```
#[inline]
pub fn oetf(l: f64) -> f64 {
    if l <= 0.0031308 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// Applies sRGB EOTF to an RGB triplet.
#[inline]
pub fn eotf_rgb(rgb: Vec3) -> Vec3 {
    rgb.map(eotf)
}

/// Applies sRGB OETF to an RGB triplet.
#[inline]
pub fn oetf_rgb(rgb: Vec3) -> Vec3 {
    rgb.map(oetf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for i in 0..=255 {
            let v = i as f64 / 255.0;
            let back = oetf(eotf(v));
            assert!((v - back).abs() < 1e-12, "v={}, back={}", v, back);
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(eotf(0.0), 0.0);
        assert!((eotf(1.0) - 1.0).abs() < 1e-15);
        assert_eq!(oetf(0.0), 0.0);
        assert!((oetf(1.0) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_branch_thresholds() {
        // Decode switches to the power segment exactly at 0.04045.
        assert_eq!(eotf(0.04044), 0.04044 / 12.92);
        assert_eq!(eotf(0.04045), ((0.04045f64 + 0.055) / 1.055).powf(2.4));
        // Encode keeps the linear segment up to and including 0.0031308.
        assert_eq!(oetf(0.0031308), 0.0031308 * 12.92);
    }

    #[test]
    fn test_negative_passthrough() {
        // Out-of-gamut negatives stay on the linear segment, unclamped.
        assert_eq!(oetf(-0.5), -0.5 * 12.92);
        assert_eq!(eotf(-0.5), -0.5 / 12.92);
    }
}
