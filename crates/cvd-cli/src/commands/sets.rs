//! Color set generation command

use crate::{output, SetsArgs};
use anyhow::{Context, Result};
use cvd_color::ColorModel;
use cvd_gen::{generate_sets, Catalog, GamutMode, SetConfig, SetGenerator};
use std::path::PathBuf;
use tracing::info;

pub fn run(args: SetsArgs) -> Result<PathBuf> {
    let config = resolve(&args)?;
    let universe = super::load_universe(args.common.universe.as_deref())?;
    info!(
        num_colors = config.num_colors,
        min_color_dist = config.min_color_dist,
        min_light_dist = config.min_light_dist,
        cvd_severity = config.cvd_severity,
        num_sets = config.num_sets,
        gamut = ?config.gamut,
        universe = universe.len(),
        "generating color sets"
    );

    let model = ColorModel::new().context("Failed to set up color model")?;
    let catalog =
        Catalog::build(&model, &universe, config.min_j, config.max_j, config.cvd_severity)?;
    let generator = SetGenerator::new(&model, &catalog, config)?;
    let sets = generate_sets(&generator);

    let name = output::sets_name(generator.config());
    output::write_sets(&args.common.out_dir, &name, &sets)
}

/// Settings from `--config` (or defaults) with explicit flags applied on top.
fn resolve(args: &SetsArgs) -> Result<SetConfig> {
    let common = &args.common;
    let mut config: SetConfig = super::load_config(common.config.as_deref())?;

    if let Some(v) = common.num_colors {
        config.num_colors = v;
    }
    if let Some(v) = common.cvd_severity {
        config.cvd_severity = v;
    }
    if let Some(v) = common.min_j {
        config.min_j = v;
    }
    if let Some(v) = common.max_j {
        config.max_j = v;
    }
    if let Some(v) = args.min_color_dist {
        config.min_color_dist = v;
    }
    if let Some(v) = args.min_light_dist {
        config.min_light_dist = v;
    }
    if let Some(v) = args.num_sets {
        config.num_sets = v;
    }
    if let Some(v) = args.seed {
        config.seed = v;
    }
    if let Some(v) = args.max_draws {
        config.sampling.max_draws = v;
    }
    if args.legacy_gamut {
        config.gamut = GamutMode::Legacy;
    }

    config.validate().context("Invalid set settings")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommonArgs;

    fn args(common: CommonArgs) -> SetsArgs {
        SetsArgs {
            common,
            min_color_dist: None,
            min_light_dist: None,
            num_sets: None,
            seed: None,
            max_draws: None,
            legacy_gamut: false,
        }
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sets.yaml");
        std::fs::write(&path, "num_colors: 5\nmin_color_dist: 15\nnum_sets: 50\n").unwrap();

        let mut a = args(CommonArgs { config: Some(path), num_colors: Some(6), ..Default::default() });
        a.legacy_gamut = true;
        let config = resolve(&a).unwrap();
        assert_eq!(config.num_colors, 6);
        assert_eq!(config.min_color_dist, 15.0);
        assert_eq!(config.num_sets, 50);
        assert_eq!(config.gamut, GamutMode::Legacy);
    }

    #[test]
    fn test_invalid_rejected() {
        let a = args(CommonArgs { min_j: Some(90.0), max_j: Some(40.0), ..Default::default() });
        assert!(resolve(&a).is_err());
    }
}
