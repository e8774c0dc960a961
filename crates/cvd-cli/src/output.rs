//! Output file naming and writing.
//!
//! Every file starts with `# <name>` and `# cvd-colors <version>`, followed
//! by one set per line or one `<hex> <distance>` line per cycle color.

use anyhow::{Context, Result};
use cvd_gen::{ColorCycle, ColorSet, CycleConfig, GamutMode, SetConfig};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Base name for a set file, e.g. `colors_mcd20.0_mld4.0_nc8_cvd100_minj40_maxj90_ns10000_f`.
///
/// The `_f` suffix marks corrected gamut handling.
pub fn sets_name(config: &SetConfig) -> String {
    let mut name = format!(
        "colors_mcd{:?}_mld{:?}_nc{}_cvd{}_minj{}_maxj{}_ns{}",
        config.min_color_dist,
        config.min_light_dist,
        config.num_colors,
        config.cvd_severity,
        config.min_j,
        config.max_j,
        config.num_sets
    );
    if config.gamut == GamutMode::Corrected {
        name.push_str("_f");
    }
    name
}

/// Base name for a cycle file, e.g. `maxdistinct_nc11_cvd100_minj40_maxj90`.
pub fn cycle_name(config: &CycleConfig) -> String {
    format!(
        "maxdistinct_nc{}_cvd{}_minj{}_maxj{}",
        config.num_colors, config.cvd_severity, config.min_j, config.max_j
    )
}

/// Write sets to `<dir>/<name>.txt`, one per line.
pub fn write_sets(dir: &Path, name: &str, sets: &[ColorSet]) -> Result<PathBuf> {
    write_file(dir, name, |out| {
        for set in sets {
            writeln!(out, "{set}")?;
        }
        Ok(())
    })
}

/// Write a cycle to `<dir>/<name>.txt`.
pub fn write_cycle(dir: &Path, name: &str, cycle: &ColorCycle) -> Result<PathBuf> {
    write_file(dir, name, |out| write!(out, "{cycle}"))
}

fn write_file(
    dir: &Path,
    name: &str,
    body: impl FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    let path = dir.join(format!("{name}.txt"));
    let file =
        File::create(&path).with_context(|| format!("Failed to create: {}", path.display()))?;

    let mut out = BufWriter::new(file);
    writeln!(out, "# {name}")
        .and_then(|_| writeln!(out, "# cvd-colors {}", env!("CARGO_PKG_VERSION")))
        .and_then(|_| body(&mut out))
        .and_then(|_| out.flush())
        .with_context(|| format!("Failed to write: {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvd_color::Rgb8;

    #[test]
    fn test_names() {
        let config = SetConfig::default();
        assert_eq!(
            sets_name(&config),
            "colors_mcd20.0_mld4.0_nc8_cvd100_minj40_maxj90_ns10000_f"
        );
        let legacy = SetConfig {
            min_color_dist: 12.5,
            gamut: GamutMode::Legacy,
            num_sets: 10,
            ..Default::default()
        };
        assert_eq!(sets_name(&legacy), "colors_mcd12.5_mld4.0_nc8_cvd100_minj40_maxj90_ns10");
        assert_eq!(cycle_name(&CycleConfig::default()), "maxdistinct_nc11_cvd100_minj40_maxj90");
    }

    #[test]
    fn test_write_sets() {
        let dir = tempfile::tempdir().unwrap();
        let sets = [
            ColorSet::new(vec![Rgb8::new(0xc0, 0x40, 0x40), Rgb8::new(0x40, 0x60, 0xc0)]),
            ColorSet::new(vec![Rgb8::WHITE, Rgb8::new(0, 0, 0)]),
        ];
        let path = write_sets(&dir.path().join("nested"), "demo", &sets).unwrap();
        assert_eq!(path.file_name().unwrap(), "demo.txt");

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "# demo");
        assert!(lines[1].starts_with("# cvd-colors "));
        assert_eq!(&lines[2..], ["4060c0 c04040", "000000 ffffff"]);
    }
}
