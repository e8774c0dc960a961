//! # cvd-math
//!
//! Linear algebra for color appearance modelling.
//!
//! This crate provides the small set of double-precision primitives the
//! color pipeline is built on:
//!
//! - [`Mat3`] - 3x3 matrices for RGB/XYZ, cone-space and CVD transforms
//! - [`Vec3`] - 3D vectors for linear RGB and XYZ triplets
//! - Interpolation helpers ([`scale_unit`], [`Mat3::lerp`])
//!
//! # Design
//!
//! Everything is `f64`. The appearance model chains several nonlinear
//! stages, and generated palettes depend on exact rounding of the final
//! 8-bit values, so single precision is not enough.
//!
//! All matrix operations assume **row-major** storage and **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! # Usage
//!
//! ```rust
//! use cvd_math::{Mat3, Vec3};
//!
//! let xyz_to_rgb = Mat3::from_rows([
//!     [3.2406, -1.5372, -0.4986],
//!     [-0.9689, 1.8758, 0.0415],
//!     [0.0557, -0.2040, 1.0570],
//! ]);
//!
//! let xyz = Vec3::new(0.95047, 1.0, 1.08883);
//! let rgb = xyz_to_rgb * xyz;
//! ```
//!
//! # Used By
//!
//! - `cvd-color` - sRGB/XYZ, CIECAM02 and CVD simulation matrices

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod interp;
mod mat3;
mod vec3;

pub use interp::*;
pub use mat3::*;
pub use vec3::*;
