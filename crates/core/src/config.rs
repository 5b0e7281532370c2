//! Session configuration
//!
//! Everything here is checked once when a session is built; the engine
//! never re-validates during play.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::check_dimensions;
use crate::timing::TimingPolicy;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board width {0} outside 4..=64")]
    Width(u8),
    #[error("board height {0} outside 4..=64")]
    Height(u8),
    #[error("gravity floor must be positive")]
    ZeroFloor,
    #[error("gravity step must be positive")]
    ZeroStep,
    #[error("base gravity interval {base_ms}ms is below the floor {floor_ms}ms")]
    BaseBelowFloor { base_ms: u128, floor_ms: u128 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    pub timing: TimingPolicy,
    /// Seed for the random piece source
    pub seed: u32,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dimensions(self.width, self.height)?;
        if self.timing.floor.is_zero() {
            return Err(ConfigError::ZeroFloor);
        }
        if self.timing.step.is_zero() {
            return Err(ConfigError::ZeroStep);
        }
        if self.timing.base < self.timing.floor {
            return Err(ConfigError::BaseBelowFloor {
                base_ms: self.timing.base.as_millis(),
                floor_ms: self.timing.floor.as_millis(),
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            timing: TimingPolicy::default(),
            seed: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let narrow = GameConfig {
            width: 3,
            ..GameConfig::default()
        };
        assert_eq!(narrow.validate(), Err(ConfigError::Width(3)));

        let tall = GameConfig {
            height: 65,
            ..GameConfig::default()
        };
        assert_eq!(tall.validate(), Err(ConfigError::Height(65)));
    }

    #[test]
    fn test_rejects_bad_timing() {
        let mut config = GameConfig::default();
        config.timing.floor = Duration::ZERO;
        assert_eq!(config.validate(), Err(ConfigError::ZeroFloor));

        let mut config = GameConfig::default();
        config.timing.step = Duration::ZERO;
        assert_eq!(config.validate(), Err(ConfigError::ZeroStep));

        let mut config = GameConfig::default();
        config.timing.base = Duration::from_millis(50);
        assert_eq!(
            config.validate(),
            Err(ConfigError::BaseBelowFloor {
                base_ms: 50,
                floor_ms: 100
            })
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"width": 12, "timing": {"floor_ms": 80}}"#).unwrap();
        assert_eq!(config.width, 12);
        assert_eq!(config.height, BOARD_HEIGHT);
        assert_eq!(config.timing.floor, Duration::from_millis(80));
        assert_eq!(config.timing.base, Duration::from_millis(500));
        assert_eq!(config.validate(), Ok(()));
    }
}
