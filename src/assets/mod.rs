//! Rendering assets
//!
//! Asset paths come from a JSON file; the images are decoded once at startup
//! into an [`AssetBundle`] that is handed to the renderer. Nothing here is
//! fatal: unreadable configuration or images fall back to defaults.

pub mod bundle;
pub mod config;
pub mod texture;

pub use bundle::{AssetBundle, TEXELS_PER_CELL};
pub use config::{AssetConfig, AssetKind, DEFAULT_CONFIG_FILE};
pub use texture::{Rgb, Texture};
