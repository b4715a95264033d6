//! Conversion options from TOML.
//!
//! Every key is optional; missing keys keep their built-in defaults:
//!
//! ```toml
//! location_code = "249003"
//! min_counseling_date = "2023-10-01"
//!
//! [training]
//! city = "Des Moines"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sba_model::{ConversionOptions, UnknownChildPolicy};
use tracing::info;

/// Loads options from `path`, or returns the defaults when no file is given.
pub fn load_options(path: Option<&Path>) -> Result<ConversionOptions> {
    let Some(path) = path else {
        return Ok(ConversionOptions::default());
    };
    let content =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let options = parse_options(&content).with_context(|| format!("parse {}", path.display()))?;
    info!(path = %path.display(), "loaded conversion options");
    Ok(options)
}

/// Policy for unknown children in a fix run. An explicit flag wins over the
/// config file.
pub fn unknown_child_policy(
    config: Option<&Path>,
    flag: Option<UnknownChildPolicy>,
) -> Result<UnknownChildPolicy> {
    match flag {
        Some(policy) => Ok(policy),
        None => Ok(load_options(config)?.unknown_children),
    }
}

pub fn parse_options(content: &str) -> Result<ConversionOptions> {
    Ok(toml::from_str(content)?)
}

/// The built-in defaults as TOML.
pub fn default_options_toml() -> Result<String> {
    Ok(toml::to_string_pretty(&ConversionOptions::default())?)
}
