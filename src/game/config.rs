use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Configuration for a game session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid in cells.
    pub grid_width: usize,
    /// Height of the game grid in cells.
    pub grid_height: usize,
    /// Length of the snake at spawn.
    pub initial_snake_length: usize,
    /// Wall-clock time between simulation steps.
    pub tick_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 20,
            initial_snake_length: 3,
            tick_interval: Duration::from_millis(100),
        }
    }
}

impl GameConfig {
    /// Configuration with a custom grid size and default everything else.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// A small grid, handy in tests.
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Checks that a world built from this configuration can hold the spawn
    /// snake at the grid centre and still has at least one cell for food.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        let cells = self.grid_width * self.grid_height;
        let spawn_fits = self.initial_snake_length >= 1
            && self.grid_width / 2 + 1 >= self.initial_snake_length;
        if !spawn_fits || cells <= self.initial_snake_length {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
                snake_len: self.initial_snake_length,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn custom_grid_size() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_grid_with_no_room_for_food() {
        let mut config = GameConfig::new(3, 1);
        config.initial_snake_length = 3;
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooSmall {
                width: 3,
                height: 1,
                snake_len: 3,
            })
        );
    }

    #[test]
    fn rejects_grid_too_narrow_for_the_centre_spawn() {
        // 2x2 has four cells, but a 3-cell snake spawned at the centre
        // facing right would poke out of the left edge.
        let mut config = GameConfig::new(2, 2);
        config.initial_snake_length = 3;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooSmall { .. })
        ));
    }

    #[test]
    fn rejects_zero_tick_interval() {
        let mut config = GameConfig::small();
        config.tick_interval = Duration::ZERO;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickInterval));
    }
}
