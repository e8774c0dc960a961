//! Maximally distinct color cycles.
//!
//! Greedy farthest-point selection: start from white, then repeatedly add
//! the catalog color whose worst-case ΔE to everything chosen so far is
//! largest. The worst case runs over normal vision and over all three CVD
//! kinds at every severity from 1 to the configured maximum.

use std::fmt;
use std::time::Instant;

use cvd_color::{cam02de_f32, Rgb8};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::catalog::CycleCatalog;
use crate::config::CycleConfig;
use crate::error::{GenError, GenResult};

/// Distance recorded for the first (white) color.
pub const ANCHOR_DISTANCE: f32 = 100.0;

/// Starting value of a candidate's running minimum.
const UNBOUNDED: f32 = 1000.0;

/// One cycle color and the worst-case ΔE it achieved when chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleEntry {
    /// The chosen color.
    pub color: Rgb8,
    /// Minimum ΔE to every earlier color over all conditions.
    pub distance: f32,
}

/// An ordered color cycle starting with white.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorCycle(Vec<CycleEntry>);

impl ColorCycle {
    /// Entries in selection order.
    #[inline]
    pub fn entries(&self) -> &[CycleEntry] {
        &self.0
    }

    /// Colors in selection order.
    pub fn colors(&self) -> impl Iterator<Item = Rgb8> + '_ {
        self.0.iter().map(|e| e.color)
    }

    /// Number of colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the cycle has no colors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One `<hex> <distance>` line per entry, distance to 3 decimals.
impl fmt::Display for ColorCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in &self.0 {
            writeln!(f, "{} {:.3}", e.color, e.distance)?;
        }
        Ok(())
    }
}

/// Builds color cycles from a [`CycleCatalog`].
#[derive(Debug)]
pub struct CycleGenerator<'a> {
    catalog: &'a CycleCatalog,
    config: CycleConfig,
}

impl<'a> CycleGenerator<'a> {
    /// Creates a generator. The catalog must cover `config.cvd_severity`.
    pub fn new(catalog: &'a CycleCatalog, config: CycleConfig) -> GenResult<Self> {
        config.validate()?;
        if catalog.max_severity() != config.cvd_severity {
            return Err(GenError::InvalidInput(format!(
                "catalog severity {} does not match cvd_severity {}",
                catalog.max_severity(),
                config.cvd_severity
            )));
        }
        if catalog.colors().last() != Some(&Rgb8::WHITE) {
            return Err(GenError::InvalidInput("cycle catalog lacks white".into()));
        }
        Ok(Self { catalog, config })
    }

    /// Runs the greedy search. Always yields `num_colors` entries.
    ///
    /// Ties go to the lowest catalog index, and if no candidate is at a
    /// positive distance the first catalog entry is taken, so the result
    /// does not depend on how the scan is split across threads.
    pub fn generate(&self) -> ColorCycle {
        let start = Instant::now();
        let cat = self.catalog;
        let white = cat.len() - 1;

        let mut chosen = Vec::with_capacity(self.config.num_colors);
        let mut entries = Vec::with_capacity(self.config.num_colors);
        chosen.push(white);
        entries.push(CycleEntry { color: cat.colors()[white], distance: ANCHOR_DISTANCE });

        while entries.len() < self.config.num_colors {
            let (best, distance) = (0..cat.len())
                .into_par_iter()
                .map(|j| (j, self.worst_case(j, &chosen)))
                .reduce(|| (0, 0.0), farther);
            debug!(position = entries.len(), color = %cat.colors()[best], distance, "cycle pick");
            chosen.push(best);
            entries.push(CycleEntry { color: cat.colors()[best], distance });
        }

        info!(
            colors = entries.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "cycle generated"
        );
        ColorCycle(entries)
    }

    /// Minimum ΔE between candidate `j` and every chosen entry, over normal
    /// vision and every simulated severity and kind. Undefined simulated
    /// appearance counts as zero distance.
    fn worst_case(&self, j: usize, chosen: &[usize]) -> f32 {
        let cat = self.catalog;
        let jab = cat.jab();
        let row = cat.cvd_row(j);
        let mut dist = UNBOUNDED;
        for &k in chosen {
            dist = dist.min(cam02de_f32(&jab[j], &jab[k]));
            for (p, q) in row.iter().zip(cat.cvd_row(k)) {
                let d = match (p, q) {
                    (Some(p), Some(q)) => cam02de_f32(p, q),
                    _ => 0.0,
                };
                dist = dist.min(d);
            }
        }
        dist
    }
}

/// Keeps the larger distance, the lower index on ties.
#[inline]
fn farther(a: (usize, f32), b: (usize, f32)) -> (usize, f32) {
    if b.1 > a.1 || (b.1 == a.1 && b.0 < a.0) {
        b
    } else {
        a
    }
}
