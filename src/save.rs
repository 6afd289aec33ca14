//! Save-file persistence: one pretty-printed JSON object per game.
//!
//! A missing file is not an error, it just means there is no saved player.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::error::GameError;
use crate::player::Player;

/// Overwrite `path` with the full player record.
#[instrument(level = "info", skip_all, fields(player = %player.name, path = %path.as_ref().display()))]
pub fn save_game(path: impl AsRef<Path>, player: &Player) -> Result<(), GameError> {
  let json = serde_json::to_string_pretty(player)?;
  std::fs::write(path.as_ref(), json)?;
  info!(target: "save", kp = player.kp, quests = player.active_quests.len(), "Game saved");
  Ok(())
}

/// Load the player stored at `path`; `Ok(None)` when no save exists.
///
/// Level is recomputed from KP and out-of-range counters are clamped, so a
/// hand-edited file cannot break the progression invariants.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn load_game(path: impl AsRef<Path>) -> Result<Option<Player>, GameError> {
  let data = match std::fs::read_to_string(path.as_ref()) {
    Ok(d) => d,
    Err(e) if e.kind() == ErrorKind::NotFound => {
      info!(target: "save", "No save file; starting fresh");
      return Ok(None);
    }
    Err(e) => return Err(e.into()),
  };
  let mut player: Player = serde_json::from_str(&data)?;
  if player.repair() {
    warn!(target: "save", player = %player.name, "Save file had out-of-range values; repaired");
  }
  info!(target: "save", player = %player.name, level = player.level, "Game loaded");
  Ok(Some(player))
}
