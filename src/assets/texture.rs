use anyhow::{Context, Result};
use image::imageops::FilterType;
use std::path::Path;

pub type Rgb = [u8; 3];

/// An image scaled to the size it is drawn at
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pixels: Vec<Rgb>,
    width: u32,
    height: u32,
    name: String,
}

impl Texture {
    /// Decode an image file and resize it to exactly `width` x `height`
    pub fn load(path: &Path, width: u32, height: u32, name: &str) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("Failed to load texture {} from {:?}", name, path))?;
        let scaled = image.resize_exact(width, height, FilterType::Triangle).to_rgb8();

        Ok(Self {
            pixels: scaled.pixels().map(|p| p.0).collect(),
            width,
            height,
            name: name.to_string(),
        })
    }

    /// Solid texture standing in for one that failed to load
    pub fn placeholder(width: u32, height: u32, fill: Rgb, name: &str) -> Self {
        Self {
            pixels: vec![fill; width as usize * height as usize],
            width,
            height,
            name: name.to_string(),
        }
    }

    pub fn load_or_placeholder(path: &Path, width: u32, height: u32, fill: Rgb, name: &str) -> Self {
        Self::load(path, width, height, name).unwrap_or_else(|e| {
            log::warn!("{:#}; using a blank placeholder", e);
            Self::placeholder(width, height, fill, name)
        })
    }

    /// Texel at (x, y), clamped to the texture edges
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .unwrap_or_default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
