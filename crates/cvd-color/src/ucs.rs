//! CAM02-UCS uniform color space.
//!
//! Rescales CIECAM02 lightness and colorfulness so that Euclidean distance
//! tracks perceived color difference, then converts (M', h) to Cartesian
//! a'/b'.
//!
//! # Reference
//!
//! Luo, Cui & Li, "Uniform colour spaces based on CIECAM02 colour
//! appearance model", Color Research & Application 31(4), 2006.

use crate::ciecam02::Jmh;

/// Lightness knee parameter c1.
pub const C1: f64 = 0.007;

/// Colorfulness compression parameter c2.
pub const C2: f64 = 0.0228;

/// Lightness weight K_L in the UCS distance formula.
pub const K_L: f64 = 1.0;

/// A point in CAM02-UCS: lightness J' and opponent coordinates a', b'.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Jab {
    /// Lightness J'.
    pub j: f64,
    /// Red-green coordinate a'.
    pub a: f64,
    /// Yellow-blue coordinate b'.
    pub b: f64,
}

impl Jab {
    /// Creates a new Jab triple.
    #[inline]
    pub const fn new(j: f64, a: f64, b: f64) -> Self {
        Self { j, a, b }
    }

    /// Converts to an array `[J', a', b']`.
    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.j, self.a, self.b]
    }

    /// Narrows to single precision for catalog storage.
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.j as f32, self.a as f32, self.b as f32]
    }
}

/// JMh to CAM02-UCS.
pub fn jmh_to_jab(jmh: Jmh) -> Jab {
    let j = (1.0 + 100.0 * C1) * jmh.j / (1.0 + C1 * jmh.j);
    let m = (1.0 / C2) * (1.0 + C2 * jmh.m).ln();
    let (sin_h, cos_h) = jmh.h.to_radians().sin_cos();
    Jab::new(j, m * cos_h, m * sin_h)
}

/// CAM02-UCS to JMh.
pub fn jab_to_jmh(jab: Jab) -> Jmh {
    let j = -jab.j / (C1 * jab.j - 100.0 * C1 - 1.0);
    let m_prime = jab.a.hypot(jab.b);
    let m = ((C2 * m_prime).exp() - 1.0) / C2;
    let h = jab.b.atan2(jab.a).to_degrees().rem_euclid(360.0);
    Jmh::new(j, m, h)
}
