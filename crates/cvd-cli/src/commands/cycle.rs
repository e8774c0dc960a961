//! Color cycle generation command

use crate::{output, CycleArgs};
use anyhow::{Context, Result};
use cvd_color::ColorModel;
use cvd_gen::{CycleCatalog, CycleConfig, CycleGenerator};
use std::path::PathBuf;
use tracing::info;

pub fn run(args: CycleArgs) -> Result<PathBuf> {
    let config = resolve(&args)?;
    let universe = super::load_universe(args.common.universe.as_deref())?;
    info!(
        num_colors = config.num_colors,
        cvd_severity = config.cvd_severity,
        min_j = config.min_j,
        max_j = config.max_j,
        universe = universe.len(),
        "generating color cycle"
    );

    let model = ColorModel::new().context("Failed to set up color model")?;
    let catalog =
        CycleCatalog::build(&model, &universe, config.min_j, config.max_j, config.cvd_severity)?;
    let name = output::cycle_name(&config);
    let cycle = CycleGenerator::new(&catalog, config)?.generate();

    output::write_cycle(&args.common.out_dir, &name, &cycle)
}

fn resolve(args: &CycleArgs) -> Result<CycleConfig> {
    let common = &args.common;
    let mut config: CycleConfig = super::load_config(common.config.as_deref())?;

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

    config.validate().context("Invalid cycle settings")?;
    Ok(config)
}
