//! CIECAM02 color appearance model.
//!
//! Converts between XYZ (Y of white = 100) and the JMh appearance
//! correlates under one fixed set of viewing conditions:
//!
//! - adopted white: D65, XYZ = (95.047, 100, 108.883)
//! - background: mid-gray, Y_b = 20
//! - adapting luminance: L_A = 64/π/5 cd/m² (a 64 lux room)
//! - surround: average (F = 1.0, c = 0.69, N_c = 1.0)
//!
//! Everything that depends only on the viewing conditions is computed once
//! in [`Ciecam02::new`] and reused for every conversion.
//!
//! # Reference
//!
//! Moroney et al., "The CIECAM02 Color Appearance Model", IS&T/SID CIC 2002.
//! Luo & Li, "CIECAM02 and Its Recent Developments", 2013.

use cvd_math::{Mat3, Vec3};

use crate::error::{ColorError, ColorResult};
use crate::primaries::XYZ100_D65;

// ============================================================================
// Viewing Conditions
// ============================================================================

/// Luminance factor of the background.
const Y_B: f64 = 20.0;

/// Adapting field luminance in cd/m².
const L_A: f64 = 64.0 / std::f64::consts::PI / 5.0;

/// Average surround: maximum degree of adaptation.
const SURROUND_F: f64 = 1.0;
/// Average surround: impact of surround.
const SURROUND_C: f64 = 0.69;
/// Average surround: chromatic induction factor.
const SURROUND_NC: f64 = 1.0;

/// CAT02 chromatic adaptation transform (XYZ to sharpened RGB).
const M_CAT02: Mat3 = Mat3::from_rows([
    [0.7328, 0.4296, -0.1624],
    [-0.7036, 1.6975, 0.0061],
    [0.0030, 0.0136, 0.9834],
]);

/// Hunt-Pointer-Estevez transform (XYZ to cone space).
const M_HPE: Mat3 = Mat3::from_rows([
    [0.38971, 0.68898, -0.07868],
    [-0.22981, 1.18340, 0.04641],
    [0.0, 0.0, 1.0],
]);

/// Unique hue data for hue quadrature: angles, eccentricities, quadratures.
const HUE_ANGLES: [f64; 5] = [20.14, 90.00, 164.25, 237.53, 380.14];
const HUE_ECCENTRICITY: [f64; 5] = [0.8, 0.7, 1.0, 1.2, 0.8];
const HUE_QUADRATURE: [f64; 5] = [0.0, 100.0, 200.0, 300.0, 400.0];

/// Recovers post-adaptation responses from (p2, a, b), scaled by 1/1403.
const M_AB_TO_RGB: Mat3 = Mat3::from_rows([
    [460.0, 451.0, 288.0],
    [460.0, -891.0, -261.0],
    [460.0, -220.0, -6300.0],
]);

// ============================================================================
// Appearance Correlates
// ============================================================================

/// CIECAM02 lightness, colorfulness and hue angle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Jmh {
    /// Lightness J.
    pub j: f64,
    /// Colorfulness M.
    pub m: f64,
    /// Hue angle h in degrees, [0, 360).
    pub h: f64,
}

impl Jmh {
    /// Creates a new JMh triple.
    #[inline]
    pub const fn new(j: f64, m: f64, h: f64) -> Self {
        Self { j, m, h }
    }
}

// ============================================================================
// Model
// ============================================================================

/// Precomputed CIECAM02 state for the fixed viewing conditions.
#[derive(Debug, Clone)]
pub struct Ciecam02 {
    /// CAT02 matrix.
    pub m_cat02: Mat3,
    /// Inverse of the CAT02 matrix.
    pub m_cat02_inv: Mat3,
    /// Adapted CAT02 RGB to HPE cone space (M_HPE · M_CAT02⁻¹).
    pub hpe_from_cat02: Mat3,
    /// HPE cone space back to adapted CAT02 RGB (M_CAT02 · M_HPE⁻¹).
    pub cat02_from_hpe: Mat3,
    /// Per-channel von Kries gains D·Y_w/RGB_w + 1 − D.
    pub d_rgb: Vec3,
    /// Degree of adaptation D.
    pub d: f64,
    /// Luminance level adaptation factor F_L.
    pub f_l: f64,
    /// Background ratio n = Y_b / Y_w.
    pub n: f64,
    /// Base exponential nonlinearity z.
    pub z: f64,
    /// Background induction factor N_bb.
    pub n_bb: f64,
    /// Chromatic induction factor N_cb (equal to N_bb).
    pub n_cb: f64,
    /// Achromatic response of the adopted white.
    pub a_w: f64,
}

impl Ciecam02 {
    /// Derives the viewing-condition constants.
    ///
    /// Fails only if one of the fixed transform matrices is singular.
    pub fn new() -> ColorResult<Self> {
        let m_cat02_inv = M_CAT02
            .inverse()
            .ok_or_else(|| ColorError::MatrixError("CAT02 matrix is singular".into()))?;
        let m_hpe_inv = M_HPE
            .inverse()
            .ok_or_else(|| ColorError::MatrixError("HPE matrix is singular".into()))?;
        let hpe_from_cat02 = M_HPE * m_cat02_inv;
        let cat02_from_hpe = M_CAT02 * m_hpe_inv;

        let xyz_w = Vec3::from_array(XYZ100_D65);
        let y_w = xyz_w.y;
        let rgb_w = M_CAT02 * xyz_w;

        let d = (SURROUND_F * (1.0 - (1.0 / 3.6) * ((-L_A - 42.0) / 92.0).exp())).clamp(0.0, 1.0);
        let d_rgb = rgb_w.map(|w| d * y_w / w + 1.0 - d);

        let k = 1.0 / (5.0 * L_A + 1.0);
        let k4 = k * k * k * k;
        let f_l = 0.2 * k4 * (5.0 * L_A) + 0.1 * (1.0 - k4).powi(2) * (5.0 * L_A).powf(1.0 / 3.0);

        let n = Y_B / y_w;
        let z = 1.48 + n.sqrt();
        let n_bb = 0.725 * (1.0 / n).powf(0.2);

        let rgb_pw = hpe_from_cat02 * (d_rgb * rgb_w);
        let rgb_aw = rgb_pw.map(|x| compress(x, f_l));
        let a_w = achromatic(rgb_aw, n_bb);

        Ok(Self {
            m_cat02: M_CAT02,
            m_cat02_inv,
            hpe_from_cat02,
            cat02_from_hpe,
            d_rgb,
            d,
            f_l,
            n,
            z,
            n_bb,
            n_cb: n_bb,
            a_w,
        })
    }

    /// XYZ (white Y = 100) to JMh.
    ///
    /// Returns `None` when the achromatic response is negative, where
    /// lightness is undefined.
    pub fn forward(&self, xyz: Vec3) -> Option<Jmh> {
        // Steps 1-3: CAT02, von Kries adaptation, HPE cone space
        let rgb_c = self.d_rgb * (self.m_cat02 * xyz);
        let rgb_p = self.hpe_from_cat02 * rgb_c;

        // Step 4: nonlinear response compression
        let rgb_a = rgb_p.map(|x| compress(x, self.f_l));

        // Step 5: opponent dimensions and hue angle
        let a = rgb_a.dot(Vec3::new(1.0, -12.0 / 11.0, 1.0 / 11.0));
        let b = rgb_a.dot(Vec3::new(1.0, 1.0, -2.0)) / 9.0;
        let h_rad = b.atan2(a);
        let h = h_rad.to_degrees().rem_euclid(360.0);

        // Step 7: achromatic response
        let achromatic = achromatic(rgb_a, self.n_bb);
        if achromatic < 0.0 {
            return None;
        }

        // Step 8: lightness
        let j = 100.0 * (achromatic / self.a_w).powf(SURROUND_C * self.z);

        // Steps 9-10: eccentricity, chroma, colorfulness
        let e_t = (12500.0 / 13.0) * SURROUND_NC * self.n_cb * ((h_rad + 2.0).cos() + 3.8);
        let t = e_t * a.hypot(b) / rgb_a.dot(Vec3::new(1.0, 1.0, 21.0 / 20.0));
        let c = t.powf(0.9) * (j / 100.0).sqrt() * (1.64 - 0.29f64.powf(self.n)).powf(0.73);
        let m = c * self.f_l.powf(0.25);

        Some(Jmh::new(j, m, h))
    }

    /// JMh to XYZ (white Y = 100).
    ///
    /// Exact algebraic inverse of [`forward`](Self::forward). Achromatic
    /// input (t ≈ 0) is handled by substituting +∞ for 1/t, which drives
    /// both opponent dimensions to zero.
    pub fn inverse(&self, jmh: Jmh) -> Vec3 {
        let Jmh { j, m, h } = jmh;
        let h_rad = h.to_radians();

        let c = m / self.f_l.powf(0.25);
        let t = (c / ((j / 100.0).sqrt() * (1.64 - 0.29f64.powf(self.n)).powf(0.73))).powf(1.0 / 0.9);
        let e_t = 0.25 * ((h_rad + 2.0).cos() + 3.8);
        let achromatic = self.a_w * (j / 100.0).powf(1.0 / (SURROUND_C * self.z));

        let one_over_t = if t < 1e-30 { f64::INFINITY } else { 1.0 / t };
        let p1 = (50000.0 / 13.0) * SURROUND_NC * self.n_cb * e_t * one_over_t;
        let p2 = achromatic / self.n_bb + 0.305;
        let p3 = 21.0 / 20.0;

        let (sin_h, cos_h) = h_rad.sin_cos();
        let num = p2 * (2.0 + p3) * (460.0 / 1403.0);
        let d2 = (2.0 + p3) * (220.0 / 1403.0);
        let d3 = -27.0 / 1403.0 + p3 * (6300.0 / 1403.0);

        // Divide by whichever of sin/cos is larger in magnitude
        let (a, b) = if sin_h.abs() >= cos_h.abs() {
            let p4 = p1 / sin_h;
            let b = num / (p4 + d2 * (cos_h / sin_h) + d3);
            (b * cos_h / sin_h, b)
        } else {
            let p5 = p1 / cos_h;
            let a = num / (p5 + d2 + d3 * (sin_h / cos_h));
            (a, a * sin_h / cos_h)
        };

        let rgb_a = M_AB_TO_RGB * Vec3::new(p2, a, b) / 1403.0;
        let rgb_p = rgb_a.map(|x| decompress(x, self.f_l));
        let rgb = (self.cat02_from_hpe * rgb_p) / self.d_rgb;
        self.m_cat02_inv * rgb
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Post-adaptation response compression (signed, exponent 0.42).
#[inline]
fn compress(x: f64, f_l: f64) -> f64 {
    let q = (f_l * x.abs() / 100.0).powf(0.42);
    x.signum() * 400.0 * (q / (q + 27.13)) + 0.1
}

/// Inverse of [`compress`].
#[inline]
fn decompress(x: f64, f_l: f64) -> f64 {
    let d = x - 0.1;
    let ad = d.abs();
    d.signum() * (100.0 / f_l) * ((27.13 * ad) / (400.0 - ad)).powf(1.0 / 0.42)
}

/// Achromatic response A from compressed cone responses.
#[inline]
fn achromatic(rgb_a: Vec3, n_bb: f64) -> f64 {
    (rgb_a.dot(Vec3::new(2.0, 1.0, 0.05)) - 0.305) * n_bb
}

/// Hue quadrature H from a hue angle in degrees.
///
/// H places a hue on the 0-400 scale between the unique hues red (0),
/// yellow (100), green (200) and blue (300). Angles below 20.14° are
/// wrapped past 360° so that they fall between blue and red.
///
/// ```rust
/// use cvd_color::hue_quadrature;
///
/// assert!((hue_quadrature(90.0) - 100.0).abs() < 1e-12);
/// ```
pub fn hue_quadrature(h: f64) -> f64 {
    let hp = if h < HUE_ANGLES[0] { h + 360.0 } else { h };
    let i = HUE_ANGLES[..4].iter().rposition(|&hi| hp >= hi).unwrap_or(0);
    let lo = (hp - HUE_ANGLES[i]) / HUE_ECCENTRICITY[i];
    let hi = (HUE_ANGLES[i + 1] - hp) / HUE_ECCENTRICITY[i + 1];
    HUE_QUADRATURE[i] + 100.0 * lo / (lo + hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_viewing_conditions() {
        let cam = Ciecam02::new().unwrap();
        assert_abs_diff_eq!(cam.d, 0.8316553945340656, epsilon = 1e-12);
        assert_abs_diff_eq!(cam.f_l, 0.27313053667320736, epsilon = 1e-12);
        assert_abs_diff_eq!(cam.n_bb, 1.0003040045593807, epsilon = 1e-12);
        assert_abs_diff_eq!(cam.z, 1.9272135954999579, epsilon = 1e-12);
        assert_abs_diff_eq!(cam.a_w, 25.515986669780446, epsilon = 1e-9);
    }

    #[test]
    fn test_forward_srgb_red() {
        let cam = Ciecam02::new().unwrap();
        let xyz = Vec3::new(41.239558896741414, 21.258623078559552, 1.9297215491746944);
        let jmh = cam.forward(xyz).unwrap();
        assert_abs_diff_eq!(jmh.j, 46.92506739801062, epsilon = 1e-8);
        assert_abs_diff_eq!(jmh.m, 80.46644073344822, epsilon = 1e-8);
        assert_abs_diff_eq!(jmh.h, 32.152695304387514, epsilon = 1e-8);
    }

    #[test]
    fn test_forward_white() {
        let cam = Ciecam02::new().unwrap();
        let jmh = cam.forward(Vec3::from_array(XYZ100_D65)).unwrap();
        assert_abs_diff_eq!(jmh.j, 100.0, epsilon = 1e-2);
        assert!(jmh.m < 3.0);
    }

    #[test]
    fn test_negative_achromatic_is_undefined() {
        let cam = Ciecam02::new().unwrap();
        assert!(cam.forward(Vec3::splat(-5.0)).is_none());
    }

    #[test]
    fn test_roundtrip() {
        let cam = Ciecam02::new().unwrap();
        let samples = [
            Vec3::new(41.24, 21.26, 1.93),
            Vec3::new(35.76, 71.52, 11.92),
            Vec3::new(18.05, 7.22, 95.05),
            Vec3::new(20.0, 21.0, 23.0),
            Vec3::new(60.0, 40.0, 10.0),
        ];
        for xyz in samples {
            let back = cam.inverse(cam.forward(xyz).unwrap());
            for i in 0..3 {
                assert_abs_diff_eq!(back[i], xyz[i], epsilon = 1e-8 * xyz[i].abs().max(1.0));
            }
        }
    }

    #[test]
    fn test_inverse_achromatic() {
        let cam = Ciecam02::new().unwrap();
        let xyz = cam.inverse(Jmh::new(50.0, 0.0, 0.0));
        assert!(xyz.is_finite());
        let jmh = cam.forward(xyz).unwrap();
        assert_abs_diff_eq!(jmh.j, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(jmh.m, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_hue_quadrature() {
        assert_abs_diff_eq!(hue_quadrature(20.14), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hue_quadrature(90.0), 100.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hue_quadrature(45.0), 32.58679450207857, epsilon = 1e-10);
        assert_abs_diff_eq!(hue_quadrature(200.0), 253.33830660201417, epsilon = 1e-10);
        assert_abs_diff_eq!(hue_quadrature(300.0), 334.19640902123933, epsilon = 1e-10);
        assert_abs_diff_eq!(hue_quadrature(359.0), 379.2988640814728, epsilon = 1e-10);
        // Below the first unique hue wraps past 360
        assert_abs_diff_eq!(hue_quadrature(10.0), 389.7007042253521, epsilon = 1e-10);
    }
}
