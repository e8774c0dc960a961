//! The full conversion chain as one reusable context.
//!
//! [`ColorModel`] owns every derived constant (the sRGB to XYZ inverse and
//! the CIECAM02 viewing-condition state), so callers build it once and
//! pass it by reference into hot loops.
//!
//! ```text
//! sRGB8 ─eotf─> linear sRGB ─M─> XYZ100 ─CIECAM02─> JMh ─UCS─> J'a'b'
//! ```

use cvd_math::{Mat3, Vec3};

use crate::ciecam02::{Ciecam02, Jmh};
use crate::error::{ColorError, ColorResult};
use crate::primaries::XYZ_TO_SRGB;
use crate::rgb8::Rgb8;
use crate::ucs::{jab_to_jmh, jmh_to_jab, Jab};

/// Conversion context between linear sRGB and CAM02-UCS.
#[derive(Debug, Clone)]
pub struct ColorModel {
    srgb_to_xyz: Mat3,
    cam: Ciecam02,
}

impl ColorModel {
    /// Builds the context, inverting the fixed matrices once.
    pub fn new() -> ColorResult<Self> {
        let srgb_to_xyz = XYZ_TO_SRGB
            .inverse()
            .ok_or_else(|| ColorError::MatrixError("XYZ to sRGB matrix is singular".into()))?;
        Ok(Self {
            srgb_to_xyz,
            cam: Ciecam02::new()?,
        })
    }

    /// Linear sRGB (0-1) to XYZ (white Y = 100).
    #[inline]
    pub fn linear_to_xyz100(&self, rgb: Vec3) -> Vec3 {
        (self.srgb_to_xyz * rgb) * 100.0
    }

    /// XYZ (white Y = 100) to linear sRGB (0-1).
    #[inline]
    pub fn xyz100_to_linear(&self, xyz: Vec3) -> Vec3 {
        (XYZ_TO_SRGB * xyz) / 100.0
    }

    /// XYZ to CIECAM02 JMh, `None` where lightness is undefined.
    #[inline]
    pub fn xyz_to_jmh(&self, xyz: Vec3) -> Option<Jmh> {
        self.cam.forward(xyz)
    }

    /// CIECAM02 JMh to XYZ.
    #[inline]
    pub fn jmh_to_xyz(&self, jmh: Jmh) -> Vec3 {
        self.cam.inverse(jmh)
    }

    /// Linear sRGB to CAM02-UCS.
    pub fn linear_to_jab(&self, rgb: Vec3) -> Option<Jab> {
        self.xyz_to_jmh(self.linear_to_xyz100(rgb)).map(jmh_to_jab)
    }

    /// CAM02-UCS to linear sRGB.
    ///
    /// The result is not clamped; components outside [0, 1] mean the point
    /// lies outside the sRGB gamut.
    pub fn jab_to_linear(&self, jab: Jab) -> Vec3 {
        self.xyz100_to_linear(self.jmh_to_xyz(jab_to_jmh(jab)))
    }

    /// 8-bit sRGB to CAM02-UCS.
    #[inline]
    pub fn rgb8_to_jab(&self, c: Rgb8) -> Option<Jab> {
        self.linear_to_jab(c.to_linear())
    }

    /// CAM02-UCS coordinates of `rgb` as seen through a CVD simulation
    /// matrix (see [`cvd_matrix`](crate::cvd_matrix)).
    #[inline]
    pub fn simulate_jab(&self, rgb: Vec3, cvd: &Mat3) -> Option<Jab> {
        self.linear_to_jab(*cvd * rgb)
    }
}
