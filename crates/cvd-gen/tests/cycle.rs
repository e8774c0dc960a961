//! Cycle generation checked against a direct double-precision search.

use approx::assert_abs_diff_eq;
use cvd_color::{cam02de, cvd_matrix, ColorModel, CvdKind, Rgb8};
use cvd_gen::{CycleCatalog, CycleConfig, CycleGenerator, Universe, ANCHOR_DISTANCE};

const MAX_SEVERITY: u8 = 4;

fn grid(step: usize) -> Universe {
    let levels: Vec<u8> = (0..=255).step_by(step).map(|v| v as u8).collect();
    let mut colors = Vec::new();
    for &r in &levels {
        for &g in &levels {
            for &b in &levels {
                colors.push(Rgb8::new(r, g, b));
            }
        }
    }
    Universe::Colors(colors)
}

fn config(num_colors: usize) -> CycleConfig {
    CycleConfig { num_colors, min_j: 30.0, max_j: 95.0, cvd_severity: MAX_SEVERITY }
}

/// Worst-case ΔE from `c` to every color of `chosen`, recomputed from scratch.
fn worst_case(model: &ColorModel, c: Rgb8, chosen: &[Rgb8]) -> f64 {
    let mut dist = f64::INFINITY;
    for &k in chosen {
        dist = dist.min(cam02de(model.rgb8_to_jab(c).unwrap(), model.rgb8_to_jab(k).unwrap()));
        for severity in 1..=MAX_SEVERITY {
            for kind in CvdKind::ALL {
                let m = cvd_matrix(kind, severity).unwrap();
                let d = match (
                    model.simulate_jab(c.to_linear(), &m),
                    model.simulate_jab(k.to_linear(), &m),
                ) {
                    (Some(p), Some(q)) => cam02de(p, q),
                    _ => 0.0,
                };
                dist = dist.min(d);
            }
        }
    }
    dist
}

#[test]
fn greedy_picks_are_maximin() {
    let model = ColorModel::new().unwrap();
    let config = config(6);
    let catalog =
        CycleCatalog::build(&model, &grid(85), config.min_j, config.max_j, MAX_SEVERITY).unwrap();
    let cycle = CycleGenerator::new(&catalog, config).unwrap().generate();

    assert_eq!(cycle.len(), 6);
    assert_eq!(cycle.entries()[0].color, Rgb8::WHITE);
    assert_eq!(cycle.entries()[0].distance, ANCHOR_DISTANCE);

    let colors: Vec<Rgb8> = cycle.colors().collect();
    for (n, entry) in cycle.entries().iter().enumerate().skip(1) {
        let chosen = &colors[..n];
        let best = catalog
            .colors()
            .iter()
            .map(|&c| worst_case(&model, c, chosen))
            .fold(0.0, f64::max);
        let own = worst_case(&model, entry.color, chosen);
        assert_abs_diff_eq!(own, f64::from(entry.distance), epsilon = 1e-3);
        assert!(own > best - 1e-3, "pick {n}: {own} < {best}");
    }

    // Adding colors can only shrink the worst case
    let d: Vec<f32> = cycle.entries()[1..].iter().map(|e| e.distance).collect();
    assert!(d.windows(2).all(|w| w[1] <= w[0]), "{d:?}");
}

#[test]
fn window_and_white() {
    let model = ColorModel::new().unwrap();
    let config = config(3);
    let catalog =
        CycleCatalog::build(&model, &grid(85), config.min_j, config.max_j, MAX_SEVERITY).unwrap();
    for &c in catalog.colors() {
        if c == Rgb8::WHITE {
            continue;
        }
        let j = model.rgb8_to_jab(c).unwrap().j;
        assert!((30.0..=95.0).contains(&j), "{c} J' {j}");
    }
    assert_eq!(catalog.colors().last(), Some(&Rgb8::WHITE));
    assert_eq!(catalog.colors().iter().filter(|&&c| c == Rgb8::WHITE).count(), 1);
}

#[test]
fn independent_of_thread_count() {
    let model = ColorModel::new().unwrap();
    let config = config(8);
    let catalog =
        CycleCatalog::build(&model, &grid(51), config.min_j, config.max_j, MAX_SEVERITY).unwrap();
    let generator = CycleGenerator::new(&catalog, config).unwrap();

    let run = |threads| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
            .install(|| generator.generate())
    };
    assert_eq!(run(1), run(3));
}

#[test]
fn rejects_bad_config() {
    let model = ColorModel::new().unwrap();
    let catalog = CycleCatalog::build(&model, &grid(85), 30.0, 95.0, 2).unwrap();
    // Severity differs from the catalog
    assert!(CycleGenerator::new(&catalog, config(4)).is_err());
    // A cycle needs at least two colors
    let single = CycleConfig { cvd_severity: 2, ..config(1) };
    assert!(CycleGenerator::new(&catalog, single).is_err());
}

#[test]
fn two_colors_start_with_white() {
    let model = ColorModel::new().unwrap();
    let config = config(2);
    let catalog =
        CycleCatalog::build(&model, &grid(85), config.min_j, config.max_j, MAX_SEVERITY).unwrap();
    let cycle = CycleGenerator::new(&catalog, config).unwrap().generate();
    let text = cycle.to_string();
    assert!(text.starts_with("ffffff 100.000\n"), "{text}");
    assert_eq!(text.lines().count(), 2);
    assert!(cycle.entries()[1].distance > 0.0);
}
