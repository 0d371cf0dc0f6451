use std::fs;
use std::io;

use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::Deserialize;

use crate::fsops::EntryErrorPolicy;
use crate::home::HomeLayout;

pub const CONFIG_FILENAME: &str = "firelib.toml";

/// Root configuration document, read from `<home>/config/firelib.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub size: SizeConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SizeConfig {
    pub on_entry_error: EntryErrorPolicy,
    pub human_readable: bool,
}

impl Config {
    /// Load a configuration file. A missing file yields the defaults.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path, "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(err).with_context(|| format!("reading config {}", path)),
        };
        toml::from_str(&raw).with_context(|| format!("parsing config {}", path))
    }

    pub fn load_default(layout: &HomeLayout) -> Result<Self> {
        Self::load(&layout.config_path(CONFIG_FILENAME))
    }
}
