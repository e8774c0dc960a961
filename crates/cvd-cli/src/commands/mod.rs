//! CLI command implementations

pub mod cycle;
pub mod sets;

use anyhow::{Context, Result};
use cvd_color::Rgb8;
use cvd_gen::Universe;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

/// Load generator settings from YAML, or defaults when no file is given.
pub fn load_config<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    let Some(path) = path else {
        return Ok(T::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config = serde_yaml::from_str(&text)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Load a universe of hex colors, or all 8-bit colors when no file is given.
///
/// Tokens are whitespace-separated. Lines whose first token is a bare `#`
/// are comments, so a generated set file can be fed back in.
pub fn load_universe(path: Option<&Path>) -> Result<Universe> {
    let Some(path) = path else {
        return Ok(Universe::Full);
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read universe: {}", path.display()))?;
    let colors = parse_colors(&text)
        .with_context(|| format!("Failed to parse universe: {}", path.display()))?;
    debug!(path = %path.display(), colors = colors.len(), "universe loaded");
    Ok(Universe::Colors(colors))
}

fn parse_colors(text: &str) -> Result<Vec<Rgb8>> {
    let mut colors = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace().peekable();
        if tokens.peek() == Some(&"#") {
            continue;
        }
        for token in tokens {
            let color = token
                .parse::<Rgb8>()
                .with_context(|| format!("line {}: bad color '{}'", n + 1, token))?;
            colors.push(color);
        }
    }
    Ok(colors)
}
