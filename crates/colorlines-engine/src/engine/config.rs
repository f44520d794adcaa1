use serde::{Deserialize, Serialize};

use crate::{ConfigError, core::Board};

/// Rules and dimensions of a game.
///
/// Serialized with camelCase keys so that it reads the same as the evaluation
/// report it ends up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub colors_count: u8,
    /// Balls placed on the empty board before the first turn.
    pub initial_spawn: usize,
    /// Balls placed after a turn that cleared nothing.
    pub spawn_per_turn: usize,
    /// Minimum run length that gets cleared.
    pub line_length: usize,
    /// A game stops after this many turns even if the board never fills.
    pub max_turns: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 9,
            height: 9,
            colors_count: 7,
            initial_spawn: 5,
            spawn_per_turn: 3,
            line_length: 5,
            max_turns: 10_000,
        }
    }
}

impl GameConfig {
    /// Checks that the config describes a playable board.
    ///
    /// A zero `spawn_per_turn` is allowed; such a game simply never spawns after
    /// the initial balls.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.empty_board().map(|_| ())
    }

    /// Creates an empty board with this config's dimensions.
    pub fn empty_board(&self) -> Result<Board, ConfigError> {
        if self.line_length == 0 {
            return Err(ConfigError::ZeroLineLength);
        }
        Board::new(self.width, self.height, self.colors_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        let board = config.empty_board().unwrap();
        assert_eq!((board.width(), board.height()), (9, 9));
        assert_eq!(board.colors_count(), 7);
    }

    #[test]
    fn test_validate_rejects_degenerate_values() {
        let base = GameConfig::default();
        let cases = [
            (
                GameConfig {
                    width: 0,
                    ..base
                },
                ConfigError::ZeroWidth,
            ),
            (
                GameConfig {
                    height: 0,
                    ..base
                },
                ConfigError::ZeroHeight,
            ),
            (
                GameConfig {
                    colors_count: 0,
                    ..base
                },
                ConfigError::ZeroColors,
            ),
            (
                GameConfig {
                    line_length: 0,
                    ..base
                },
                ConfigError::ZeroLineLength,
            ),
        ];
        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
        let no_spawn = GameConfig {
            spawn_per_turn: 0,
            ..base
        };
        assert_eq!(no_spawn.validate(), Ok(()));
    }

    #[test]
    fn test_json_uses_camel_case_and_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"width": 7, "colorsCount": 4, "maxTurns": 20}"#).unwrap();
        assert_eq!(config.width, 7);
        assert_eq!(config.height, 9);
        assert_eq!(config.colors_count, 4);
        assert_eq!(config.max_turns, 20);
        assert_eq!(config.line_length, 5);

        let json = serde_json::to_value(GameConfig::default()).unwrap();
        assert_eq!(json["spawnPerTurn"], 3);
        assert_eq!(json["initialSpawn"], 5);
    }
}
