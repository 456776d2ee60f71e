use super::config::{AssetConfig, AssetKind};
use super::texture::Texture;

/// Texels along each side of one grid cell. A terminal cell pair draws a
/// 2x2 block with upper half blocks.
pub const TEXELS_PER_CELL: u32 = 2;

/// Every texture the renderer needs, resolved once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct AssetBundle {
    pub background: Texture,
    pub snake_head: Texture,
    pub snake_body: Texture,
    pub apple: Texture,
}

impl AssetBundle {
    /// Load all textures named by `config` for a field `cells_per_side` cells
    /// wide. Textures that fail to load are replaced by placeholders.
    pub fn load(config: &AssetConfig, cells_per_side: u32) -> Self {
        let load = |kind: AssetKind| {
            let (width, height) = texture_size(kind, cells_per_side);
            let texture = Texture::load_or_placeholder(
                config.path(kind),
                width,
                height,
                kind.placeholder_fill(),
                kind.key(),
            );
            log::debug!(
                "{} texture ready at {}x{}",
                texture.name(),
                texture.width(),
                texture.height()
            );
            texture
        };

        Self {
            background: load(AssetKind::Background),
            snake_head: load(AssetKind::SnakeHead),
            snake_body: load(AssetKind::SnakeBody),
            apple: load(AssetKind::Apple),
        }
    }

    /// Bundle made only of placeholders
    pub fn placeholders(cells_per_side: u32) -> Self {
        let make = |kind: AssetKind| {
            let (width, height) = texture_size(kind, cells_per_side);
            Texture::placeholder(width, height, kind.placeholder_fill(), kind.key())
        };

        Self {
            background: make(AssetKind::Background),
            snake_head: make(AssetKind::SnakeHead),
            snake_body: make(AssetKind::SnakeBody),
            apple: make(AssetKind::Apple),
        }
    }
}

/// The background covers the whole field, sprites cover one cell
fn texture_size(kind: AssetKind, cells_per_side: u32) -> (u32, u32) {
    match kind {
        AssetKind::Background => {
            let side = cells_per_side * TEXELS_PER_CELL;
            (side, side)
        }
        _ => (TEXELS_PER_CELL, TEXELS_PER_CELL),
    }
}
