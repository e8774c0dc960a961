//! Precomputed CAM02-UCS coordinates for a universe of 8-bit colors.
//!
//! Converting to CAM02-UCS is far more expensive than anything the
//! generators do per candidate, and all 2^24 colors fit in memory, so
//! every color is converted exactly once up front. Storage is
//! structure-of-arrays in `f32`, in ascending packed order
//! (`r + 256 g + 65536 b`), independent of how the work was scheduled.
//!
//! Two flavours exist:
//!
//! - [`Catalog`] - normal vision plus the three CVD kinds at one severity,
//!   restricted to a J' window (set generation)
//! - [`CycleCatalog`] - normal vision plus the three CVD kinds at every
//!   severity from 1 up, with white always present (cycle generation)

use std::time::Instant;

use cvd_color::{cvd_matrix, ColorModel, CvdKind, Rgb8, RGB8_COUNT};
use cvd_math::{Mat3, Vec3};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{GenError, GenResult};

/// Padding added around the catalog's a'/b' range for sampling.
pub const SAMPLING_PAD: f64 = 0.1;

/// Colors the catalog is built from.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Universe {
    /// All 2^24 8-bit colors.
    #[default]
    Full,
    /// An explicit list. Order and duplicates do not matter.
    Colors(Vec<Rgb8>),
}

impl Universe {
    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        match self {
            Universe::Full => RGB8_COUNT as usize,
            Universe::Colors(c) => sorted_unique(c.clone()).len(),
        }
    }

    /// True if the universe has no colors.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Axis-aligned box in CAM02-UCS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JabBox {
    /// Lower corner `[J', a', b']`.
    pub min: [f64; 3],
    /// Upper corner `[J', a', b']`.
    pub max: [f64; 3],
}

impl JabBox {
    /// Bounding box of a set of points. `None` if there are none.
    pub fn enclosing<'a>(points: impl IntoIterator<Item = &'a [f32; 3]>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?.map(f64::from);
        let (min, max) = iter.fold((first, first), |(mut lo, mut hi), p| {
            for i in 0..3 {
                let v = f64::from(p[i]);
                lo[i] = lo[i].min(v);
                hi[i] = hi[i].max(v);
            }
            (lo, hi)
        });
        Some(Self { min, max })
    }
}

/// Catalog for set generation.
#[derive(Debug, Clone)]
pub struct Catalog {
    rgb: Vec<Rgb8>,
    jab: Vec<[f32; 3]>,
    /// Indexed like [`CvdKind::ALL`].
    cvd: [Vec<Option<[f32; 3]>>; 3],
    bounds: JabBox,
    min_j: f64,
    max_j: f64,
    severity: u8,
}

/// One converted color, before splitting into columns.
struct Row {
    rgb: Rgb8,
    jab: [f32; 3],
    cvd: [Option<[f32; 3]>; 3],
}

impl Catalog {
    /// Converts every color of `universe` with J' in `[min_j, max_j]`.
    ///
    /// # Errors
    ///
    /// - [`GenError::InvalidInput`] for a severity above 100
    /// - [`GenError::EmptyCatalog`] if nothing falls in the window
    pub fn build(
        model: &ColorModel,
        universe: &Universe,
        min_j: f64,
        max_j: f64,
        severity: u8,
    ) -> GenResult<Self> {
        let mats = kind_matrices(severity)?;
        let start = Instant::now();

        let rows = convert(universe, |c| {
            let linear = c.to_linear();
            let jab = model.linear_to_jab(linear)?;
            if !(jab.j >= min_j && jab.j <= max_j) {
                return None;
            }
            Some(Row {
                rgb: c,
                jab: jab.to_f32(),
                cvd: mats.map(|m| simulate(model, linear, &m)),
            })
        });

        let mut rgb = Vec::with_capacity(rows.len());
        let mut jab = Vec::with_capacity(rows.len());
        let mut cvd: [Vec<_>; 3] = std::array::from_fn(|_| Vec::with_capacity(rows.len()));
        for row in rows {
            rgb.push(row.rgb);
            jab.push(row.jab);
            for (column, value) in cvd.iter_mut().zip(row.cvd) {
                column.push(value);
            }
        }

        let bounds = JabBox::enclosing(&jab).ok_or(GenError::EmptyCatalog { min_j, max_j })?;
        info!(
            entries = rgb.len(),
            min_j,
            max_j,
            severity,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "catalog built"
        );

        Ok(Self { rgb, jab, cvd, bounds, min_j, max_j, severity })
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.rgb.len()
    }

    /// Always false for a built catalog.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rgb.is_empty()
    }

    /// Colors, ascending by packed value.
    #[inline]
    pub fn colors(&self) -> &[Rgb8] {
        &self.rgb
    }

    /// Normal-vision J'a'b' per entry.
    #[inline]
    pub fn jab(&self) -> &[[f32; 3]] {
        &self.jab
    }

    /// Simulated J'a'b' per entry for `kind`. `None` where undefined.
    #[inline]
    pub fn cvd_jab(&self, kind: CvdKind) -> &[Option<[f32; 3]>] {
        &self.cvd[kind_slot(kind)]
    }

    /// Simulated J'a'b' columns in [`CvdKind::ALL`] order.
    #[inline]
    pub(crate) fn cvd_columns(&self) -> &[Vec<Option<[f32; 3]>>; 3] {
        &self.cvd
    }

    /// Unpadded bounding box of all entries.
    #[inline]
    pub fn bounds(&self) -> JabBox {
        self.bounds
    }

    /// Box for sampling over the whole catalog: the J' window, and the
    /// a'/b' range widened by [`SAMPLING_PAD`].
    pub fn sampling_box(&self) -> JabBox {
        let b = self.bounds;
        JabBox {
            min: [self.min_j, b.min[1] - SAMPLING_PAD, b.min[2] - SAMPLING_PAD],
            max: [self.max_j, b.max[1] + SAMPLING_PAD, b.max[2] + SAMPLING_PAD],
        }
    }

    /// CVD severity the simulated columns were computed at.
    #[inline]
    pub fn severity(&self) -> u8 {
        self.severity
    }

    /// Lightness window `(min_j, max_j)`.
    #[inline]
    pub fn window(&self) -> (f64, f64) {
        (self.min_j, self.max_j)
    }

    /// Index of `color`, if it is in the catalog.
    #[inline]
    pub fn index_of(&self, color: Rgb8) -> Option<usize> {
        self.rgb.binary_search_by_key(&color.packed(), |c| c.packed()).ok()
    }

    /// Marks the simulated appearance of entry `index` under `kind` as
    /// undefined.
    #[cfg(test)]
    pub(crate) fn undefine_cvd(&mut self, index: usize, kind: CvdKind) {
        self.cvd[kind_slot(kind)][index] = None;
    }
}

/// Catalog for cycle generation.
///
/// Simulated coordinates are stored per entry for every severity
/// `1..=max_severity` and every kind, so the memory footprint grows with
/// `len * max_severity`.
#[derive(Debug, Clone)]
pub struct CycleCatalog {
    rgb: Vec<Rgb8>,
    jab: Vec<[f32; 3]>,
    /// `[entry][severity - 1][kind]`, flattened.
    cvd: Vec<Option<[f32; 3]>>,
    max_severity: u8,
}

impl CycleCatalog {
    /// Converts every color of `universe` with J' in `[min_j, max_j]`,
    /// plus white.
    pub fn build(
        model: &ColorModel,
        universe: &Universe,
        min_j: f64,
        max_j: f64,
        max_severity: u8,
    ) -> GenResult<Self> {
        let mats = (1..=max_severity)
            .map(kind_matrices)
            .collect::<GenResult<Vec<_>>>()?;
        let start = Instant::now();

        let universe = match universe {
            Universe::Full => Universe::Full,
            Universe::Colors(c) => {
                let mut c = c.clone();
                c.push(Rgb8::WHITE);
                Universe::Colors(c)
            }
        };

        let rows = convert(&universe, |c| {
            let linear = c.to_linear();
            let jab = model.linear_to_jab(linear)?;
            if !(jab.j >= min_j && jab.j <= max_j) && c != Rgb8::WHITE {
                return None;
            }
            let cvd: Vec<Option<[f32; 3]>> = mats
                .iter()
                .flat_map(|per_kind| per_kind.iter().map(|m| simulate(model, linear, m)))
                .collect();
            Some((c, jab.to_f32(), cvd))
        });

        let stride = usize::from(max_severity) * 3;
        let mut rgb = Vec::with_capacity(rows.len());
        let mut jab = Vec::with_capacity(rows.len());
        let mut cvd = Vec::with_capacity(rows.len() * stride);
        for (c, j, sims) in rows {
            rgb.push(c);
            jab.push(j);
            cvd.extend(sims);
        }

        info!(
            entries = rgb.len(),
            min_j,
            max_j,
            max_severity,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "cycle catalog built"
        );

        Ok(Self { rgb, jab, cvd, max_severity })
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.rgb.len()
    }

    /// Never true for a built catalog, which always holds white.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rgb.is_empty()
    }

    /// Colors, ascending by packed value. White is last.
    #[inline]
    pub fn colors(&self) -> &[Rgb8] {
        &self.rgb
    }

    /// Normal-vision J'a'b' per entry.
    #[inline]
    pub fn jab(&self) -> &[[f32; 3]] {
        &self.jab
    }

    /// Highest simulated severity.
    #[inline]
    pub fn max_severity(&self) -> u8 {
        self.max_severity
    }

    /// Simulated J'a'b' of entry `index` for every severity and kind,
    /// ordered `[severity - 1][kind]` with kinds as in [`CvdKind::ALL`].
    #[inline]
    pub fn cvd_row(&self, index: usize) -> &[Option<[f32; 3]>] {
        let stride = usize::from(self.max_severity) * 3;
        &self.cvd[index * stride..(index + 1) * stride]
    }

    /// Marks the simulated appearance of entry `index` at `severity` under
    /// `kind` as undefined.
    #[cfg(test)]
    pub(crate) fn undefine_cvd(&mut self, index: usize, severity: u8, kind: CvdKind) {
        let stride = usize::from(self.max_severity) * 3;
        let cell = usize::from(severity - 1) * 3 + kind_slot(kind);
        self.cvd[index * stride + cell] = None;
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn kind_slot(kind: CvdKind) -> usize {
    match kind {
        CvdKind::Deuteranomaly => 0,
        CvdKind::Protanomaly => 1,
        CvdKind::Tritanomaly => 2,
    }
}

pub(crate) fn kind_matrices(severity: u8) -> GenResult<[Mat3; 3]> {
    let [d, p, t] = CvdKind::ALL;
    Ok([cvd_matrix(d, severity)?, cvd_matrix(p, severity)?, cvd_matrix(t, severity)?])
}

#[inline]
fn simulate(model: &ColorModel, linear: Vec3, m: &Mat3) -> Option<[f32; 3]> {
    model.simulate_jab(linear, m).map(|j| j.to_f32())
}

fn sorted_unique(mut colors: Vec<Rgb8>) -> Vec<Rgb8> {
    colors.sort_unstable_by_key(|c| c.packed());
    colors.dedup();
    colors
}

/// Runs `f` over the universe in parallel, keeping packed order.
///
/// The full universe is split into one slab per blue value; each slab
/// walks green then red, so concatenating slabs gives ascending packed
/// order.
fn convert<T, F>(universe: &Universe, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(Rgb8) -> Option<T> + Sync,
{
    match universe {
        Universe::Full => {
            let slabs: Vec<Vec<T>> = (0..=255u8)
                .into_par_iter()
                .map(|b| {
                    let slab: Vec<T> = (0..=255u8)
                        .flat_map(|g| (0..=255u8).map(move |r| Rgb8::new(r, g, b)))
                        .filter_map(&f)
                        .collect();
                    debug!(b, kept = slab.len(), "catalog slab");
                    slab
                })
                .collect();
            slabs.into_iter().flatten().collect()
        }
        Universe::Colors(colors) => sorted_unique(colors.clone())
            .into_par_iter()
            .filter_map(&f)
            .collect(),
    }
}
