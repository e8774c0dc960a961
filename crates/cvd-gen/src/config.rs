//! Generator configuration.
//!
//! Both configs deserialize from YAML (or any serde format) with every
//! field optional; missing fields take the defaults below. Call
//! `validate()` before building a catalog.
//!
//! ```yaml
//! num_colors: 6
//! min_color_dist: 25
//! cvd_severity: 80
//! gamut: legacy
//! ```

use cvd_color::MAX_SEVERITY;
use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};

/// Seed of the driver's master PRNG.
pub const DEFAULT_SEED: u64 = 614_616_785;

/// How a sampled CAM02-UCS point is turned into an 8-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamutMode {
    /// Round half-to-even and reject points outside the sRGB gamut.
    /// Later picks sample only the surviving candidates' bounding box.
    #[default]
    Corrected,
    /// Truncate and wrap each channel modulo 256, and always sample the
    /// full catalog box. Reproduces sets generated before the gamut check
    /// existed.
    Legacy,
}

/// Rejection sampling limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Draws per pick before falling back to a uniform choice from the
    /// candidate pool.
    pub max_draws: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self { max_draws: 1_000_000 }
    }
}

/// Parameters of set generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetConfig {
    /// Colors per set.
    pub num_colors: usize,
    /// Minimum ΔE between any two colors, for every vision condition.
    pub min_color_dist: f64,
    /// Minimum |ΔJ'| between any two colors.
    pub min_light_dist: f64,
    /// Lower bound of the J' window.
    pub min_j: f64,
    /// Upper bound of the J' window.
    pub max_j: f64,
    /// CVD severity in percent.
    pub cvd_severity: u8,
    /// Unique sets the driver collects.
    pub num_sets: usize,
    /// Gamut handling.
    pub gamut: GamutMode,
    /// Seed of the driver's master PRNG.
    pub seed: u64,
    /// Rejection sampling limits.
    pub sampling: SamplingConfig,
}

impl Default for SetConfig {
    fn default() -> Self {
        Self {
            num_colors: 8,
            min_color_dist: 20.0,
            min_light_dist: 4.0,
            min_j: 40.0,
            max_j: 90.0,
            cvd_severity: MAX_SEVERITY,
            num_sets: 10_000,
            gamut: GamutMode::Corrected,
            seed: DEFAULT_SEED,
            sampling: SamplingConfig::default(),
        }
    }
}

impl SetConfig {
    /// Checks every field against its accepted range.
    pub fn validate(&self) -> GenResult<()> {
        if self.num_colors < 2 {
            return Err(invalid(format!("num_colors must be >= 2, got {}", self.num_colors)));
        }
        if !(self.min_color_dist > 0.0 && self.min_color_dist.is_finite()) {
            return Err(invalid(format!(
                "min_color_dist must be positive, got {}",
                self.min_color_dist
            )));
        }
        if !(self.min_light_dist >= 0.0 && self.min_light_dist.is_finite()) {
            return Err(invalid(format!(
                "min_light_dist must be non-negative, got {}",
                self.min_light_dist
            )));
        }
        if self.num_sets < 1 {
            return Err(invalid("num_sets must be >= 1".into()));
        }
        if self.sampling.max_draws < 1 {
            return Err(invalid("sampling.max_draws must be >= 1".into()));
        }
        validate_window(self.min_j, self.max_j)?;
        validate_severity(self.cvd_severity)
    }
}

/// Parameters of cycle generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Length of the cycle, white included.
    pub num_colors: usize,
    /// Lower bound of the J' window.
    pub min_j: f64,
    /// Upper bound of the J' window.
    pub max_j: f64,
    /// Highest CVD severity considered; every severity from 1 up is used.
    pub cvd_severity: u8,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            num_colors: 11,
            min_j: 40.0,
            max_j: 90.0,
            cvd_severity: MAX_SEVERITY,
        }
    }
}

impl CycleConfig {
    /// Checks every field against its accepted range.
    pub fn validate(&self) -> GenResult<()> {
        if self.num_colors < 2 {
            return Err(invalid(format!("num_colors must be >= 2, got {}", self.num_colors)));
        }
        validate_window(self.min_j, self.max_j)?;
        validate_severity(self.cvd_severity)
    }
}

fn invalid(msg: String) -> GenError {
    GenError::InvalidInput(msg)
}

fn validate_window(min_j: f64, max_j: f64) -> GenResult<()> {
    let in_range = |j: f64| (0.0..=100.0).contains(&j);
    if !(in_range(min_j) && in_range(max_j) && min_j < max_j) {
        return Err(invalid(format!(
            "lightness window [{min_j}, {max_j}] must satisfy 0 <= min_j < max_j <= 100"
        )));
    }
    Ok(())
}

fn validate_severity(severity: u8) -> GenResult<()> {
    if severity > MAX_SEVERITY {
        return Err(invalid(format!(
            "cvd_severity must be in [0, {MAX_SEVERITY}], got {severity}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(SetConfig::default().validate().is_ok());
        assert!(CycleConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let bad = [
            SetConfig { num_colors: 1, ..Default::default() },
            SetConfig { min_color_dist: 0.0, ..Default::default() },
            SetConfig { min_color_dist: f64::NAN, ..Default::default() },
            SetConfig { min_light_dist: -1.0, ..Default::default() },
            SetConfig { min_j: 90.0, max_j: 40.0, ..Default::default() },
            SetConfig { min_j: 50.0, max_j: 50.0, ..Default::default() },
            SetConfig { max_j: 101.0, ..Default::default() },
            SetConfig { cvd_severity: 101, ..Default::default() },
            SetConfig { num_sets: 0, ..Default::default() },
            SetConfig { sampling: SamplingConfig { max_draws: 0 }, ..Default::default() },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(GenError::InvalidInput(_))),
                "accepted {config:?}"
            );
        }
        let cycle = CycleConfig { cvd_severity: 200, ..Default::default() };
        assert!(cycle.validate().is_err());
    }

    #[test]
    fn test_yaml_partial() {
        let config: SetConfig = serde_yaml::from_str(
            "num_colors: 5\nmin_color_dist: 25.5\ngamut: legacy\nsampling:\n  max_draws: 10\n",
        )
        .unwrap();
        assert_eq!(config.num_colors, 5);
        assert_eq!(config.min_color_dist, 25.5);
        assert_eq!(config.gamut, GamutMode::Legacy);
        assert_eq!(config.sampling.max_draws, 10);
        // Untouched fields keep their defaults
        assert_eq!(config.min_light_dist, 4.0);
        assert_eq!(config.seed, DEFAULT_SEED);
    }
}
