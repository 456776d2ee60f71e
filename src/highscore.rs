//! Highscore persistence
//!
//! The best score is stored as a single decimal integer in a plain text
//! file. Reads never fail: a missing, unreadable or malformed file counts as
//! a highscore of zero.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Where the best score lives between sessions
pub trait HighscoreStore {
    /// Stored highscore, 0 when nothing usable is stored
    fn load(&self) -> u32;

    /// Overwrite the stored highscore
    fn save(&mut self, highscore: u32) -> Result<()>;
}

/// Highscore kept in a text file, opened and closed on every access
#[derive(Debug, Clone)]
pub struct FileHighscoreStore {
    path: PathBuf,
}

impl FileHighscoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl HighscoreStore for FileHighscoreStore {
    fn load(&self) -> u32 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no highscore file at {:?}, starting from 0", self.path);
                return 0;
            }
            Err(e) => {
                log::warn!("failed to read highscore from {:?}: {}", self.path, e);
                return 0;
            }
        };

        match text.trim().parse::<u32>() {
            Ok(highscore) => highscore,
            Err(e) => {
                log::warn!(
                    "ignoring malformed highscore {:?} in {:?}: {}",
                    text.trim(),
                    self.path,
                    e
                );
                0
            }
        }
    }

    fn save(&mut self, highscore: u32) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        // Write beside the target and rename over it so a crash never
        // leaves a truncated file behind.
        let temp = self.temp_path();
        fs::write(&temp, highscore.to_string())
            .with_context(|| format!("Failed to write highscore to {:?}", temp))?;
        fs::rename(&temp, &self.path)
            .with_context(|| format!("Failed to replace highscore file {:?}", self.path))?;

        log::info!("saved highscore {} to {:?}", highscore, self.path);
        Ok(())
    }
}

/// Highscore that lives only as long as the process, for practice rounds
#[derive(Debug, Clone, Default)]
pub struct MemoryHighscoreStore {
    highscore: u32,
}

impl MemoryHighscoreStore {
    pub fn new(highscore: u32) -> Self {
        Self { highscore }
    }
}

impl HighscoreStore for MemoryHighscoreStore {
    fn load(&self) -> u32 {
        self.highscore
    }

    fn save(&mut self, highscore: u32) -> Result<()> {
        log::debug!("practice highscore now {}", highscore);
        self.highscore = highscore;
        Ok(())
    }
}
