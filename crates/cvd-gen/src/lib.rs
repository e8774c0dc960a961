//! # cvd-gen
//!
//! Color sets and color cycles that stay distinguishable under color
//! vision deficiency.
//!
//! - **[`Catalog`]** - every 8-bit color in a J' window, converted once to
//!   CAM02-UCS for normal vision and three simulated CVD kinds
//! - **[`SetGenerator`]** - seeded rejection sampling of N colors with
//!   pairwise ΔE and |ΔJ'| bounds, plus an intermediate-severity recheck
//! - **[`generate_sets`]** - parallel driver collecting unique sets
//! - **[`CycleGenerator`]** - greedy maximin ordering from white
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cvd_color::ColorModel;
//! use cvd_gen::{generate_sets, Catalog, SetConfig, SetGenerator, Universe};
//!
//! let model = ColorModel::new()?;
//! let config = SetConfig { num_colors: 6, num_sets: 10, ..Default::default() };
//! config.validate()?;
//!
//! let catalog = Catalog::build(&model, &Universe::Full, config.min_j, config.max_j, config.cvd_severity)?;
//! let generator = SetGenerator::new(&model, &catalog, config)?;
//! for set in generate_sets(&generator) {
//!     println!("{set}");
//! }
//! # Ok::<(), cvd_gen::GenError>(())
//! ```
//!
//! # Dependencies
//!
//! - [`cvd-color`] - conversions, CVD matrices, ΔE
//! - `rayon` - catalog build, cycle scan, set driver
//! - `rand` - seeded sampling
//!
//! # Used By
//!
//! - `cvd-cli` - the `cvd-colors` binary

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod catalog;
mod config;
mod cycle;
mod driver;
mod error;
mod set;

pub use catalog::{Catalog, CycleCatalog, JabBox, Universe, SAMPLING_PAD};
pub use config::{CycleConfig, GamutMode, SamplingConfig, SetConfig, DEFAULT_SEED};
pub use cycle::{ColorCycle, CycleEntry, CycleGenerator, ANCHOR_DISTANCE};
pub use driver::{generate_sets, run_chain, MAX_CHAIN_SEED};
pub use error::{GenError, GenResult};
pub use set::{quantize, Attempt, ColorSet, SetGenerator};
