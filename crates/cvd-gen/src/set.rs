//! Constrained random color sets.
//!
//! One attempt builds a set color by color:
//!
//! 1. Sample a point uniformly in the catalog's padded J'a'b' box, convert
//!    it to 8-bit sRGB and accept it only if that exact color is in the
//!    catalog. Repeat until accepted.
//! 2. Drop every candidate too close to the latest pick (|ΔJ'| below the
//!    lightness bound, or ΔE below the color bound for normal vision or any
//!    simulated CVD kind). The pool only shrinks, so it also excludes
//!    everything too close to earlier picks.
//! 3. If the pool is empty the attempt fails. Otherwise sample the next
//!    color from it like in step 1, using the pool's own bounding box in
//!    corrected mode and the full box in legacy mode.
//!
//! A complete set must then pass a finer check at every severity below the
//! configured one, since simulation is not linear in severity.

use std::fmt;

use cvd_color::transfer::oetf_rgb;
use cvd_color::{cam02de_f32, ColorModel, Jab, Rgb8};
use cvd_math::{scale_unit, Mat3, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::catalog::{kind_matrices, Catalog, JabBox};
use crate::config::{GamutMode, SetConfig};
use crate::error::{GenError, GenResult};

/// Running minimum the finer check starts from.
const FINER_CHECK_CAP: f32 = 100.0;

/// A generated set, sorted by (r, g, b).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorSet(Vec<Rgb8>);

impl ColorSet {
    /// Wraps `colors`, sorting them into canonical order.
    pub fn new(mut colors: Vec<Rgb8>) -> Self {
        colors.sort_unstable();
        Self(colors)
    }

    /// Colors in canonical order.
    #[inline]
    pub fn colors(&self) -> &[Rgb8] {
        &self.0
    }

    /// Number of colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the set has no colors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Space-separated lowercase hex, e.g. `4060c0 40a040 c04040`.
impl fmt::Display for ColorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Outcome of one seeded attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt {
    /// Every color placed and the finer check passed.
    Generated(ColorSet),
    /// No candidate was left for color number `position` (0-based).
    Exhausted {
        /// Index of the color that could not be placed.
        position: usize,
    },
    /// The set violates the color bound at this intermediate severity.
    FinerCvdCheckFailed {
        /// First severity at which the bound is violated.
        severity: u8,
    },
}

impl Attempt {
    /// The set, if the attempt succeeded.
    pub fn into_set(self) -> Option<ColorSet> {
        match self {
            Attempt::Generated(set) => Some(set),
            _ => None,
        }
    }
}

/// Generates color sets from a catalog.
#[derive(Debug)]
pub struct SetGenerator<'a> {
    model: &'a ColorModel,
    catalog: &'a Catalog,
    config: SetConfig,
    /// CVD matrices for severities `1..cvd_severity`.
    finer: Vec<[Mat3; 3]>,
}

impl<'a> SetGenerator<'a> {
    /// Creates a generator.
    ///
    /// The catalog must have been built for the same lightness window and
    /// severity as `config`.
    pub fn new(model: &'a ColorModel, catalog: &'a Catalog, config: SetConfig) -> GenResult<Self> {
        config.validate()?;
        if catalog.severity() != config.cvd_severity {
            return Err(GenError::InvalidInput(format!(
                "catalog severity {} does not match cvd_severity {}",
                catalog.severity(),
                config.cvd_severity
            )));
        }
        if catalog.window() != (config.min_j, config.max_j) {
            return Err(GenError::InvalidInput(format!(
                "catalog window {:?} does not match [{}, {}]",
                catalog.window(),
                config.min_j,
                config.max_j
            )));
        }
        let finer = (1..config.cvd_severity)
            .map(kind_matrices)
            .collect::<GenResult<Vec<_>>>()?;
        Ok(Self { model, catalog, config, finer })
    }

    /// The generator's configuration.
    #[inline]
    pub fn config(&self) -> &SetConfig {
        &self.config
    }

    /// Generates one set, `None` on either recoverable failure.
    pub fn generate(&self, seed: u64) -> Option<ColorSet> {
        self.attempt(seed).into_set()
    }

    /// Generates one set and reports why it failed, if it did.
    ///
    /// Deterministic in `seed`, the configuration and the catalog.
    pub fn attempt(&self, seed: u64) -> Attempt {
        let mut rng = StdRng::seed_from_u64(seed);
        let cat = self.catalog;
        let colors = cat.colors();
        let full_box = cat.sampling_box();

        let first = self.draw(&mut rng, &full_box, cat.len(), |c| cat.index_of(c));
        let mut picks = Vec::with_capacity(self.config.num_colors);
        picks.push(first);

        let mut prev = first;
        let mut pool: Vec<u32> = Vec::new();
        for position in 1..self.config.num_colors {
            if position == 1 {
                pool = (0..cat.len())
                    .filter(|&i| self.separated(i, prev))
                    .map(|i| i as u32)
                    .collect();
            } else {
                pool.retain(|&i| self.separated(i as usize, prev));
            }
            if pool.is_empty() {
                trace!(seed, position, "candidate pool exhausted");
                return Attempt::Exhausted { position };
            }

            let bounds = match self.config.gamut {
                GamutMode::Legacy => full_box,
                GamutMode::Corrected => {
                    JabBox::enclosing(pool.iter().map(|&i| &cat.jab()[i as usize]))
                        .unwrap_or(full_box)
                }
            };
            let at = self.draw(&mut rng, &bounds, pool.len(), |c| {
                pool.binary_search_by_key(&c.packed(), |&i| colors[i as usize].packed())
                    .ok()
            });
            prev = pool[at] as usize;
            picks.push(prev);
        }

        let set: Vec<Rgb8> = picks.iter().map(|&i| colors[i]).collect();
        if let Some(severity) = self.failing_severity(&set) {
            trace!(seed, severity, "finer CVD check failed");
            return Attempt::FinerCvdCheckFailed { severity };
        }
        Attempt::Generated(ColorSet::new(set))
    }

    /// True if `colors` keep the color bound, for every CVD kind, at every
    /// severity from 1 to one below the configured severity.
    pub fn check_color_set(&self, colors: &[Rgb8]) -> bool {
        self.failing_severity(colors).is_none()
    }

    /// First intermediate severity at which some pair of `colors` falls
    /// below the color bound under some CVD kind.
    ///
    /// Normal vision is not rechecked. A pair whose simulated appearance is
    /// undefined fails immediately.
    pub fn failing_severity(&self, colors: &[Rgb8]) -> Option<u8> {
        let linear: Vec<Vec3> = colors.iter().map(|c| c.to_linear()).collect();
        self.scan_severities(&linear, |rgb, m| self.model.simulate_jab(rgb, m).map(Jab::to_f32))
    }

    fn scan_severities(
        &self,
        linear: &[Vec3],
        simulate: impl Fn(Vec3, &Mat3) -> Option<[f32; 3]>,
    ) -> Option<u8> {
        let mut sims: Vec<[Option<[f32; 3]>; 3]> = Vec::with_capacity(linear.len());
        let mut min_dist = FINER_CHECK_CAP;

        for (severity, mats) in (1u8..).zip(&self.finer) {
            sims.clear();
            sims.extend(linear.iter().map(|&rgb| mats.map(|m| simulate(rgb, &m))));
            for (i, x) in sims.iter().enumerate() {
                for y in &sims[i + 1..] {
                    for (p, q) in x.iter().zip(y) {
                        match (p, q) {
                            (Some(p), Some(q)) => min_dist = min_dist.min(cam02de_f32(p, q)),
                            _ => return Some(severity),
                        }
                    }
                }
            }
            if f64::from(min_dist) < self.config.min_color_dist {
                return Some(severity);
            }
        }
        None
    }

    /// True if entry `i` is far enough from entry `pick` in lightness and
    /// in ΔE for normal vision and all three simulated kinds.
    #[inline]
    fn separated(&self, i: usize, pick: usize) -> bool {
        let jab = self.catalog.jab();
        let (x, y) = (&jab[i], &jab[pick]);
        if f64::from((x[0] - y[0]).abs()) < self.config.min_light_dist {
            return false;
        }
        let far = |d: f32| f64::from(d) >= self.config.min_color_dist;
        if !far(cam02de_f32(x, y)) {
            return false;
        }
        self.catalog.cvd_columns().iter().all(|column| match (&column[i], &column[pick]) {
            (Some(x), Some(y)) => far(cam02de_f32(x, y)),
            _ => false,
        })
    }

    /// Rejection-samples `bounds` until a point lands on a color `lookup`
    /// resolves, returning its position in the pool. Falls back to a
    /// uniform choice among `pool_len` entries after `max_draws` misses.
    fn draw(
        &self,
        rng: &mut StdRng,
        bounds: &JabBox,
        pool_len: usize,
        lookup: impl Fn(Rgb8) -> Option<usize>,
    ) -> usize {
        for _ in 0..self.config.sampling.max_draws {
            let j = scale_unit(rng.r#gen(), bounds.min[0], bounds.max[0]);
            let a = scale_unit(rng.r#gen(), bounds.min[1], bounds.max[1]);
            let b = scale_unit(rng.r#gen(), bounds.min[2], bounds.max[2]);
            let encoded = oetf_rgb(self.model.jab_to_linear(Jab::new(j, a, b))) * 255.0;
            if let Some(at) = quantize(encoded, self.config.gamut).and_then(&lookup) {
                return at;
            }
        }
        debug!(
            max_draws = self.config.sampling.max_draws,
            pool_len,
            "rejection sampling missed, picking uniformly from pool"
        );
        rng.gen_range(0..pool_len)
    }
}

/// Turns an encoded sRGB triplet on the 0-255 scale into an 8-bit color.
///
/// - [`GamutMode::Corrected`]: rounds half-to-even, then rejects anything
///   outside [0, 255] or not finite.
/// - [`GamutMode::Legacy`]: truncates toward zero and wraps modulo 256, so
///   out-of-gamut points land on unrelated in-gamut colors.
///
/// ```rust
/// use cvd_gen::{quantize, GamutMode};
/// use cvd_math::Vec3;
///
/// let v = Vec3::new(260.4, 12.5, -3.7);
/// assert_eq!(quantize(v, GamutMode::Corrected), None);
/// let wrapped = quantize(v, GamutMode::Legacy).unwrap();
/// assert_eq!((wrapped.r, wrapped.g, wrapped.b), (4, 12, 253));
/// ```
pub fn quantize(encoded: Vec3, mode: GamutMode) -> Option<Rgb8> {
    match mode {
        GamutMode::Corrected => {
            let v = encoded.map(f64::round_ties_even);
            if !v.is_finite() || v.min_element() < 0.0 || v.max_element() > 255.0 {
                return None;
            }
            Some(Rgb8::new(v.x as u8, v.y as u8, v.z as u8))
        }
        GamutMode::Legacy => {
            let wrap = |x: f64| (x.trunc() as i64).rem_euclid(256) as u8;
            Some(Rgb8::new(wrap(encoded.x), wrap(encoded.y), wrap(encoded.z)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Universe;
    use cvd_color::CvdKind;

    fn universe(hex: &[&str]) -> Universe {
        Universe::Colors(hex.iter().map(|h| Rgb8::from_hex(h).unwrap()).collect())
    }

    #[test]
    fn test_quantize_corrected() {
        let q = |x, y, z| quantize(Vec3::new(x, y, z), GamutMode::Corrected);
        assert_eq!(q(0.0, 127.5, 255.0), Some(Rgb8::new(0, 128, 255)));
        // Half-to-even
        assert_eq!(q(0.5, 1.5, 2.5), Some(Rgb8::new(0, 2, 2)));
        // Rounds into range first
        assert_eq!(q(-0.4, 255.4, 10.0), Some(Rgb8::new(0, 255, 10)));
        assert_eq!(q(-0.6, 10.0, 10.0), None);
        assert_eq!(q(10.0, 255.6, 10.0), None);
        assert_eq!(q(f64::NAN, 10.0, 10.0), None);
    }

    #[test]
    fn test_quantize_legacy() {
        let q = |x, y, z| quantize(Vec3::new(x, y, z), GamutMode::Legacy);
        assert_eq!(q(0.9, 127.5, 255.9), Some(Rgb8::new(0, 127, 255)));
        assert_eq!(q(256.0, 300.2, 511.0), Some(Rgb8::new(0, 44, 255)));
        assert_eq!(q(-1.0, -3.7, -256.0), Some(Rgb8::new(255, 253, 0)));
    }

    #[test]
    fn test_color_set_canonical() {
        let set = ColorSet::new(vec![
            Rgb8::new(0xc0, 0x40, 0x40),
            Rgb8::new(0x40, 0xa0, 0x40),
            Rgb8::new(0x40, 0x60, 0xc0),
        ]);
        assert_eq!(set.to_string(), "4060c0 40a040 c04040");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_rejects_mismatched_catalog() {
        let model = ColorModel::new().unwrap();
        let cat = Catalog::build(&model, &universe(&["c04040", "40a040"]), 40.0, 90.0, 50).unwrap();
        let config = SetConfig::default();
        assert!(matches!(
            SetGenerator::new(&model, &cat, config.clone()),
            Err(GenError::InvalidInput(_))
        ));
        let config = SetConfig { cvd_severity: 50, min_j: 30.0, ..config };
        assert!(SetGenerator::new(&model, &cat, config).is_err());
    }

    #[test]
    fn test_finer_check_intermediate_severity() {
        // Passes at full severity (min ΔE 16.1) but drops to 14.43 at 23%
        let model = ColorModel::new().unwrap();
        let cat = Catalog::build(&model, &universe(&["bbdd99", "dddd11"]), 40.0, 90.0, 100).unwrap();
        let pair = [Rgb8::new(0xbb, 0xdd, 0x99), Rgb8::new(0xdd, 0xdd, 0x11)];

        let config = SetConfig { num_colors: 2, min_color_dist: 14.5, min_light_dist: 0.0, ..Default::default() };
        let strict = SetGenerator::new(&model, &cat, config).unwrap();
        assert_eq!(strict.failing_severity(&pair), Some(23));
        assert!(!strict.check_color_set(&pair));

        let config = SetConfig { num_colors: 2, min_color_dist: 13.0, min_light_dist: 0.0, ..Default::default() };
        let loose = SetGenerator::new(&model, &cat, config).unwrap();
        assert!(loose.check_color_set(&pair));
    }

    #[test]
    fn test_exhausted() {
        // Two grays 1.26 J' apart cannot satisfy a 4 J' lightness bound
        let model = ColorModel::new().unwrap();
        let cat = Catalog::build(&model, &universe(&["6b6b6b", "6e6e6e"]), 40.0, 90.0, 100).unwrap();
        let config = SetConfig {
            num_colors: 2,
            min_color_dist: 1.0,
            sampling: crate::SamplingConfig { max_draws: 8 },
            ..Default::default()
        };
        let generator = SetGenerator::new(&model, &cat, config).unwrap();
        assert_eq!(generator.attempt(7), Attempt::Exhausted { position: 1 });
        assert_eq!(generator.generate(7), None);
    }

    #[test]
    fn test_undefined_appearance_not_separated() {
        let model = ColorModel::new().unwrap();
        let mut cat =
            Catalog::build(&model, &universe(&["c04040", "40a040", "4060c0"]), 40.0, 90.0, 100).unwrap();
        let find = |cat: &Catalog, hex| cat.index_of(Rgb8::from_hex(hex).unwrap()).unwrap();
        let (red, green, blue) = (find(&cat, "c04040"), find(&cat, "40a040"), find(&cat, "4060c0"));
        let config = SetConfig {
            num_colors: 3,
            min_color_dist: 5.0,
            min_light_dist: 5.0,
            sampling: crate::SamplingConfig { max_draws: 64 },
            ..Default::default()
        };

        {
            let generator = SetGenerator::new(&model, &cat, config.clone()).unwrap();
            assert!(generator.separated(green, red));
            assert!(generator.separated(blue, red));
            assert!((0..16).any(|seed| generator.generate(seed).is_some()));
        }

        cat.undefine_cvd(green, CvdKind::Deuteranomaly);
        let generator = SetGenerator::new(&model, &cat, config).unwrap();
        assert!(!generator.separated(green, red));
        assert!(!generator.separated(red, green));
        assert!(!generator.separated(green, blue));
        assert!(generator.separated(blue, red));
        assert!((0..16).all(|seed| generator.generate(seed).is_none()));
    }

    #[test]
    fn test_finer_check_undefined_appearance() {
        let model = ColorModel::new().unwrap();
        let cat = Catalog::build(&model, &universe(&["c04040", "4060c0"]), 40.0, 90.0, 100).unwrap();
        let config = SetConfig { num_colors: 2, min_color_dist: 5.0, ..Default::default() };
        let generator = SetGenerator::new(&model, &cat, config).unwrap();
        let linear = [Rgb8::new(0xc0, 0x40, 0x40).to_linear(), Rgb8::new(0x40, 0x60, 0xc0).to_linear()];
        let defined = |rgb: Vec3, m: &Mat3| model.simulate_jab(rgb, m).map(Jab::to_f32);
        assert_eq!(generator.scan_severities(&linear, defined), None);

        // Blue has no defined appearance under 40 % tritanomaly only
        let tritan40 = kind_matrices(40).unwrap()[2];
        let undefined_at_40 = |rgb: Vec3, m: &Mat3| {
            if rgb == linear[1] && *m == tritan40 { None } else { defined(rgb, m) }
        };
        assert_eq!(generator.scan_severities(&linear, undefined_at_40), Some(40));
        assert_eq!(generator.scan_severities(&linear, |_, _| None), Some(1));
    }
}
