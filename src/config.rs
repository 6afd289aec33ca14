//! Loading game configuration (file locations, default name, RNG seed) from TOML.
//!
//! See `GameConfig` for the expected schema. Every field is optional.

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use crate::error::GameError;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameConfig {
  /// Where the single save file lives.
  pub save_path: String,
  /// JSON array of questions.
  pub questions_path: String,
  /// JSON array of quest templates.
  pub quests_path: String,
  /// Name used when the player just presses enter at the name prompt.
  pub default_name: String,
  /// Fixed RNG seed for reproducible sessions; entropy when absent.
  pub seed: Option<u64>,
}

impl Default for GameConfig {
  fn default() -> Self {
    Self {
      save_path: "savegame.json".into(),
      questions_path: "content/questions.json".into(),
      quests_path: "content/quests.json".into(),
      default_name: "Seeker".into(),
      seed: None,
    }
  }
}

impl GameConfig {
  pub fn from_toml_str(s: &str) -> Result<Self, GameError> {
    Ok(toml::from_str::<GameConfig>(s)?)
  }

  pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GameError> {
    let s = std::fs::read_to_string(path)?;
    Self::from_toml_str(&s)
  }
}

/// Load `GameConfig` from GAME_CONFIG_PATH. Unset → defaults; any IO/parse error
/// is logged and also falls back to defaults.
pub fn load_game_config_from_env() -> GameConfig {
  let Ok(path) = std::env::var("GAME_CONFIG_PATH") else {
    return GameConfig::default();
  };
  match GameConfig::from_file(&path) {
    Ok(cfg) => {
      info!(target: "quiz_quest", %path, "Loaded game config (TOML)");
      cfg
    }
    Err(e) => {
      error!(target: "quiz_quest", %path, error = %e, "Failed to load TOML config; using defaults");
      GameConfig::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_file_keeps_other_defaults() {
    let cfg = GameConfig::from_toml_str("save_path = \"alt.json\"\nseed = 7\n").unwrap();
    assert_eq!(cfg.save_path, "alt.json");
    assert_eq!(cfg.seed, Some(7));
    assert_eq!(cfg.questions_path, "content/questions.json");
    assert_eq!(cfg.default_name, "Seeker");
  }

  #[test]
  fn bad_toml_is_an_error() {
    assert!(matches!(GameConfig::from_toml_str("seed = \"x\""), Err(GameError::Toml(_))));
  }

  #[test]
  fn reads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.toml");
    std::fs::write(&path, "default_name = \"Ada\"\n").unwrap();
    let cfg = GameConfig::from_file(&path).unwrap();
    assert_eq!(cfg.default_name, "Ada");
  }
}
