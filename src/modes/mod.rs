pub mod human;
pub mod textures;

pub use human::{HumanMode, LoopTiming};
pub use textures::TexturesMode;
