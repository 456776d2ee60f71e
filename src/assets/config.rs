use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default location of the asset path configuration
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// The logical assets the renderer draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Background,
    SnakeHead,
    SnakeBody,
    Apple,
}

impl AssetKind {
    pub const ALL: [AssetKind; 4] = [
        AssetKind::Background,
        AssetKind::SnakeHead,
        AssetKind::SnakeBody,
        AssetKind::Apple,
    ];

    /// Key used in the JSON file
    pub fn key(&self) -> &'static str {
        match self {
            AssetKind::Background => "background",
            AssetKind::SnakeHead => "snake_head",
            AssetKind::SnakeBody => "snake_body",
            AssetKind::Apple => "apple",
        }
    }

    /// Fill used when the texture cannot be loaded
    pub fn placeholder_fill(&self) -> [u8; 3] {
        match self {
            AssetKind::Background => [0, 0, 0],
            AssetKind::SnakeHead => [0, 255, 255],
            AssetKind::SnakeBody => [0, 205, 0],
            AssetKind::Apple => [220, 20, 20],
        }
    }
}

/// Mapping of logical asset names to image files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub background: PathBuf,
    pub snake_head: PathBuf,
    pub snake_body: PathBuf,
    pub apple: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            background: PathBuf::from("assets/default/background.png"),
            snake_head: PathBuf::from("assets/default/player.png"),
            snake_body: PathBuf::from("assets/default/body.png"),
            apple: PathBuf::from("assets/default/apple.png"),
        }
    }
}

impl AssetConfig {
    /// Load the configuration, falling back to the built-in defaults when the
    /// file is missing or unusable. Keys absent from the file keep their
    /// default.
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no asset config at {:?}, using defaults", path);
                return Self::default();
            }
            Err(e) => {
                log::warn!("failed to read asset config {:?}: {}; using defaults", path, e);
                return Self::default();
            }
        };

        serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("corrupt asset config {:?}: {}; using defaults", path, e);
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize asset config")?;
        fs::write(path, json).with_context(|| format!("Failed to write asset config to {:?}", path))
    }

    pub fn path(&self, kind: AssetKind) -> &Path {
        match kind {
            AssetKind::Background => &self.background,
            AssetKind::SnakeHead => &self.snake_head,
            AssetKind::SnakeBody => &self.snake_body,
            AssetKind::Apple => &self.apple,
        }
    }

    pub fn set_path(&mut self, kind: AssetKind, path: PathBuf) {
        let slot = match kind {
            AssetKind::Background => &mut self.background,
            AssetKind::SnakeHead => &mut self.snake_head,
            AssetKind::SnakeBody => &mut self.snake_body,
            AssetKind::Apple => &mut self.apple,
        };
        *slot = path;
    }
}
