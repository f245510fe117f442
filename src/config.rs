use std::path::Path;

use crate::error::ConfigError;
use crate::game::Player;

/// Game configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Tokens in a row needed to win
    pub win_length: usize,
    pub first_player: Player,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 7,
            height: 6,
            win_length: 4,
            first_player: Player::A,
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: GameConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::Validation("width must be > 0".into()));
        }
        if self.height == 0 {
            return Err(ConfigError::Validation("height must be > 0".into()));
        }
        if self.win_length == 0 {
            return Err(ConfigError::Validation("win_length must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.width, config.height, config.win_length), (7, 6, 4));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GameConfig = toml::from_str("win_length = 5\nfirst_player = \"B\"").unwrap();
        assert_eq!(config.win_length, 5);
        assert_eq!(config.first_player, Player::B);
        assert_eq!(config.width, 7);
        assert_eq!(config.height, 6);
    }

    #[test]
    fn test_validation_rejects_zero_sizes() {
        let config = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "config validation error: width must be > 0");

        let config = GameConfig {
            win_length: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let path = Path::new("definitely/not/here/game.toml");
        assert!(matches!(
            GameConfig::load(path),
            Err(ConfigError::FileRead { .. })
        ));
        assert_eq!(
            GameConfig::load_or_default(path).unwrap(),
            GameConfig::default()
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connect-four.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "width = 9\nheight = 8").unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!((config.width, config.height), (9, 8));
        assert_eq!(config.win_length, 4);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "height = 0\n").unwrap();

        assert!(matches!(
            GameConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }
}
