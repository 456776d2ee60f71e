use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

/// Widest field the terminal renderer can lay out; each cell takes two
/// columns and the frame must fit in a `u16` terminal width.
pub const MAX_CELLS_PER_SIDE: i32 = 256;

/// Configuration for the game
///
/// All distances are in field units. Positions on the field are always
/// multiples of `cell_size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square play field
    pub field_extent: i32,
    /// Side length of one grid cell
    pub cell_size: i32,
    /// Engine ticks per simulation step
    pub speed: u32,
    /// Score that wins the round
    pub win_score: u32,
    /// Place apples only on cells the snake does not occupy
    pub apple_avoids_snake: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_extent: 700,
            cell_size: 50,
            speed: 10,
            win_score: 100,
            apple_avoids_snake: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom field
    pub fn new(field_extent: i32, cell_size: i32) -> Self {
        Self {
            field_extent,
            cell_size,
            ..Default::default()
        }
    }

    /// Create a small field for testing
    pub fn small() -> Self {
        Self::new(10, 1)
    }

    /// Number of cells along one side of the field
    pub fn cells_per_side(&self) -> i32 {
        self.field_extent / self.cell_size
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.cell_size > 0, "cell size must be positive");
        ensure!(
            self.field_extent % self.cell_size == 0,
            "field extent {} is not a multiple of cell size {}",
            self.field_extent,
            self.cell_size
        );
        // Spawning happens strictly inside the border cells.
        ensure!(
            self.cells_per_side() >= 3,
            "field must be at least 3 cells wide, got {}",
            self.cells_per_side()
        );
        ensure!(
            self.cells_per_side() <= MAX_CELLS_PER_SIDE,
            "field must be at most {} cells wide, got {}",
            MAX_CELLS_PER_SIDE,
            self.cells_per_side()
        );
        ensure!(self.speed > 0, "speed must be at least one tick per step");
        ensure!(self.win_score > 0, "win score must be positive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.field_extent, 700);
        assert_eq!(config.cell_size, 50);
        assert_eq!(config.cells_per_side(), 14);
        assert_eq!(config.speed, 10);
        assert_eq!(config.win_score, 100);
        assert!(!config.apple_avoids_snake);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(300, 30);
        assert_eq!(config.cells_per_side(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_largest_field_accepted() {
        let config = GameConfig::new(MAX_CELLS_PER_SIDE, 1);
        assert!(config.validate().is_ok());
        assert!(GameConfig::new(MAX_CELLS_PER_SIDE + 1, 1).validate().is_err());
    }

    #[test]
    fn test_invalid_configs() {
        assert!(GameConfig::new(700, 0).validate().is_err());
        assert!(GameConfig::new(700, 60).validate().is_err());
        assert!(GameConfig::new(100, 50).validate().is_err());

        assert!(GameConfig::new(100_000, 1).validate().is_err());
        assert!(GameConfig::new(2_000_000_000, 1).validate().is_err());
        assert!(GameConfig::new(-700, 50).validate().is_err());

        let config = GameConfig {
            speed: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            win_score: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
