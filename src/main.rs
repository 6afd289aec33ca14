//! Quiz Quest · text adventure for practising maths and general knowledge
//!
//! - Walk between Town, School, Arcade and Arena
//! - Earn KP from quizzes, level up, finish quests, battle beasties
//! - Progress lives in a single JSON save file
//!
//! Important env variables:
//!   GAME_CONFIG_PATH : path to TOML config (save/content paths, default name, seed)
//!   LOG_LEVEL        : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT       : "pretty" (default) or "json"

mod battle;
mod config;
mod console;
mod domain;
mod error;
mod logic;
mod player;
mod protocol;
mod quests;
mod rewards;
mod save;
mod seeds;
mod state;
mod telemetry;
mod util;

use std::io::{self, BufReader};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, instrument};

use crate::config::load_game_config_from_env;
use crate::console::terminal::Terminal;
use crate::console::Session;
use crate::player::Player;
use crate::save::load_game;
use crate::state::ContentStore;

#[instrument(level = "info", skip_all)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = load_game_config_from_env();
  let store = ContentStore::load(&cfg);

  let mut rng = match cfg.seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_entropy(),
  };

  let mut term = Terminal::new(BufReader::new(io::stdin()), io::stdout());
  term.say("Legends of Learning: Awakening (CLI)");

  // A broken save is reported upstream rather than silently replaced.
  let player = match load_game(&cfg.save_path)? {
    Some(p) => {
      term.say(&format!("Welcome back, {}.", p.name));
      p
    }
    None => {
      let name = term
        .read_line("Name: ")
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| cfg.default_name.clone());
      Player::new(name)
    }
  };
  info!(target: "quiz_quest", player = %player.name, level = player.level, "Session start");

  let (player, _) = Session::new(player, &store, cfg.save_path.clone(), term, &mut rng).run();
  info!(target: "quiz_quest", player = %player.name, kp = player.kp, coins = player.coins, "Session end");
  Ok(())
}
