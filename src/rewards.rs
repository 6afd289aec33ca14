//! Reward engine: KP bookkeeping and the level table.
//!
//! Every change to `Player::kp` goes through `award_kp`, which keeps
//! `player.level == level_from_kp(player.kp)`.

use tracing::{info, instrument};

use crate::domain::Location;
use crate::player::Player;

/// Lower KP bound of each level, index 0 = level 1.
const LEVEL_THRESHOLDS: [u32; 5] = [0, 20, 50, 90, 140];

// KP granted per activity.
pub const PRACTICE_KP: u32 = 2;
pub const MINI_GAME_KP: u32 = 3;
pub const BATTLE_HIT_KP: u32 = 4;

pub fn level_from_kp(kp: u32) -> u8 {
  LEVEL_THRESHOLDS.iter().rposition(|&t| kp >= t).map_or(1, |i| i as u8 + 1)
}

/// Emitted once per award that raised the level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelUp {
  pub from: u8,
  pub to: u8,
  /// Locations whose unlock level is exactly `to`.
  pub unlocked: Vec<Location>,
}

#[instrument(level = "debug", skip(player), fields(player = %player.name, kp_before = player.kp))]
pub fn award_kp(player: &mut Player, amount: u32) -> Option<LevelUp> {
  let from = player.level;
  player.kp = player.kp.saturating_add(amount);
  player.level = level_from_kp(player.kp);
  if player.level <= from {
    return None;
  }
  let unlocked: Vec<Location> = Location::ALL
    .into_iter()
    .filter(|l| l.min_level() == player.level)
    .collect();
  info!(target: "quest", player = %player.name, from, to = player.level, kp = player.kp, "Level up");
  Some(LevelUp { from, to: player.level, unlocked })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn level_table_boundaries() {
    let cases = [
      (0, 1), (19, 1), (20, 2), (49, 2), (50, 3),
      (89, 3), (90, 4), (139, 4), (140, 5), (u32::MAX, 5),
    ];
    for (kp, level) in cases {
      assert_eq!(level_from_kp(kp), level, "kp={kp}");
    }
  }

  #[test]
  fn level_is_monotonic() {
    let mut last = 1;
    for kp in 0..300 {
      let l = level_from_kp(kp);
      assert!(l >= last);
      last = l;
    }
    assert_eq!(last as usize, LEVEL_THRESHOLDS.len());
  }

  #[test]
  fn small_award_without_level_up() {
    let mut p = Player::new("Ada");
    assert_eq!(award_kp(&mut p, 19), None);
    assert_eq!((p.kp, p.level), (19, 1));
  }

  #[test]
  fn crossing_a_threshold_unlocks_matching_locations() {
    let mut p = Player::new("Ada");
    p.kp = 18;
    let up = award_kp(&mut p, 2).unwrap();
    assert_eq!(up, LevelUp { from: 1, to: 2, unlocked: vec![Location::Arcade] });
  }

  #[test]
  fn multi_threshold_award_signals_once_with_final_level() {
    let mut p = Player::new("Ada");
    let up = award_kp(&mut p, 50).unwrap();
    assert_eq!((up.from, up.to), (1, 3));
    // Only locations unlocking at the final level are reported.
    assert_eq!(up.unlocked, vec![Location::Arena]);
    assert_eq!(p.level, 3);
  }

  #[test]
  fn zero_award_is_a_no_op() {
    let mut p = Player::new("Ada");
    p.kp = 20;
    p.level = 2;
    assert_eq!(award_kp(&mut p, 0), None);
    assert_eq!(p.level, 2);
  }
}
