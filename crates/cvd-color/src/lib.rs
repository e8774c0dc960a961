//! # cvd-color
//!
//! Perceptual color conversions with color vision deficiency simulation.
//!
//! This crate implements the one conversion chain needed to compare sRGB
//! colors perceptually, for normal and anomalous trichromats:
//!
//! - **Transfer** - sRGB EOTF/OETF (IEC 61966-2-1)
//! - **Primaries** - exact sRGB to XYZ matrix, D65 white
//! - **CIECAM02** - forward and inverse appearance model, fixed viewing conditions
//! - **CAM02-UCS** - uniform J'a'b' coordinates and the ΔE metric
//! - **CVD** - Machado et al. protanomaly, deuteranomaly and tritanomaly matrices
//!
//! # Architecture
//!
//! ```text
//!   Rgb8 ──> linear sRGB ──> XYZ100 ──> JMh ──> J'a'b'
//!                 │                                ^
//!                 └── cvd_matrix(kind, severity) ──┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use cvd_color::{cam02de, cvd_matrix, ColorModel, CvdKind, Rgb8};
//!
//! let model = ColorModel::new().unwrap();
//! let red = Rgb8::from_hex("c04040").unwrap().to_linear();
//! let green = Rgb8::from_hex("40a040").unwrap().to_linear();
//!
//! let normal = cam02de(
//!     model.linear_to_jab(red).unwrap(),
//!     model.linear_to_jab(green).unwrap(),
//! );
//!
//! let deutan = cvd_matrix(CvdKind::Deuteranomaly, 100).unwrap();
//! let simulated = cam02de(
//!     model.simulate_jab(red, &deutan).unwrap(),
//!     model.simulate_jab(green, &deutan).unwrap(),
//! );
//! assert!(simulated < normal);
//! ```
//!
//! # Undefined appearance
//!
//! Very dark out-of-gamut inputs can produce a negative achromatic response,
//! for which CIECAM02 lightness is undefined. Every conversion that can hit
//! this returns `Option`, never NaN.
//!
//! # Dependencies
//!
//! - [`cvd-math`] - Vec3, Mat3
//!
//! # Used By
//!
//! - `cvd-gen` - catalogs and generators
//! - `cvd-cli` - hex parsing and output formatting

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod model;
mod rgb8;
pub mod ciecam02;
pub mod cvd;
pub mod distance;
pub mod primaries;
pub mod transfer;
pub mod ucs;

pub use ciecam02::{hue_quadrature, Ciecam02, Jmh};
pub use cvd::{apply_cvd, cvd_matrix, CvdKind, MAX_SEVERITY};
pub use distance::{cam02de, cam02de_f32};
pub use error::{ColorError, ColorResult};
pub use model::ColorModel;
pub use rgb8::{Rgb8, RGB8_COUNT};
pub use ucs::{jab_to_jmh, jmh_to_jab, Jab};

pub use cvd_math as math;

/// Prelude with commonly used types
pub mod prelude {
    pub use crate::{cam02de, cvd_matrix, ColorModel, CvdKind, Jab, Jmh, Rgb8};
}
