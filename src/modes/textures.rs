//! Texture path editor
//!
//! Shows the configured asset paths and replaces the ones given on the
//! command line. A replacement is only accepted when the file exists.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

use crate::assets::{AssetConfig, AssetKind};

pub struct TexturesMode {
    config_path: PathBuf,
    updates: Vec<(AssetKind, PathBuf)>,
}

impl TexturesMode {
    pub fn new(config_path: impl Into<PathBuf>, updates: Vec<(AssetKind, PathBuf)>) -> Self {
        Self {
            config_path: config_path.into(),
            updates,
        }
    }

    /// Print the current paths, apply the updates and save if any were
    /// requested. Returns the resulting configuration.
    pub fn run(&self, out: &mut impl Write) -> Result<AssetConfig> {
        let mut config = AssetConfig::load(&self.config_path);

        writeln!(out, "Current texture paths:")?;
        for kind in AssetKind::ALL {
            writeln!(out, "{}: {}", kind.key(), config.path(kind).display())?;
        }

        if self.updates.is_empty() {
            return Ok(config);
        }

        for (kind, path) in &self.updates {
            if path.exists() {
                config.set_path(*kind, path.clone());
                log::info!("{} texture set to {:?}", kind.key(), path);
            } else {
                writeln!(
                    out,
                    "File not found: {}. Keeping the current {} texture.",
                    path.display(),
                    kind.key()
                )?;
            }
        }

        config
            .save(&self.config_path)
            .with_context(|| format!("Failed to update {:?}", self.config_path))?;
        writeln!(
            out,
            "Texture paths updated. Restart the game to play with the new textures."
        )?;

        Ok(config)
    }
}
