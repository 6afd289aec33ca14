//! Arena encounters: one beastie, one question per round, until someone drops.
//!
//! Round rules: a correct answer hits the beastie for 3 and earns 4 KP; a
//! wrong answer costs the player 2 HP. Every answer also counts toward quests
//! on the question's topic. When both sides reach zero in the same round the
//! player loses: defeat is checked before victory.

use rand::Rng;
use tracing::{info, instrument, warn};

use crate::domain::{Beastie, Location};
use crate::player::Player;
use crate::protocol::{Frontend, GameEvent};
use crate::quests::update_quest_progress;
use crate::rewards::{award_kp, BATTLE_HIT_KP};
use crate::state::ContentStore;

pub const HIT_DAMAGE: u32 = 3;
pub const MISS_DAMAGE: u32 = 2;
pub const VICTORY_COINS: u32 = 5;
/// HP the player is left with after a defeat.
pub const DEFEAT_HP: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory { beastie: String },
    Defeat { beastie: String },
    /// No questions exist for the beastie's topic.
    Fled { beastie: String },
    /// The roster had nothing for this level.
    NoOpponent,
}

/// Run a full encounter against a randomly chosen beastie.
#[instrument(level = "info", skip_all, fields(player = %player.name, level = player.level))]
pub fn run_battle<F: Frontend, R: Rng + ?Sized>(
    player: &mut Player,
    store: &ContentStore,
    frontend: &mut F,
    rng: &mut R,
) -> BattleOutcome {
    match store.random_beastie(player.level, rng) {
        Some(beastie) => fight(player, beastie, store, frontend, rng),
        None => {
            warn!(target: "battle", level = player.level, "No eligible beastie");
            BattleOutcome::NoOpponent
        }
    }
}

/// Fight a specific beastie.
pub fn fight<F: Frontend, R: Rng + ?Sized>(
    player: &mut Player,
    mut beastie: Beastie,
    store: &ContentStore,
    frontend: &mut F,
    rng: &mut R,
) -> BattleOutcome {
    let name = beastie.name.to_string();
    let max_hp = beastie.hp;
    info!(target: "battle", beastie = %name, hp = max_hp, "Encounter start");
    frontend.emit(GameEvent::BattleStarted { beastie: name.clone(), hp: max_hp });

    while beastie.hp > 0 && !player.is_down() {
        let Some(question) = store
            .pick_questions(Some(beastie.topic), None, 1, rng)
            .into_iter()
            .next()
        else {
            info!(target: "battle", beastie = %name, topic = beastie.topic, "No questions; beastie flees");
            frontend.emit(GameEvent::BeastieFled);
            return BattleOutcome::Fled { beastie: name };
        };

        let correct = frontend.ask(&question);
        if correct {
            beastie.hp = beastie.hp.saturating_sub(HIT_DAMAGE);
            let level_up = award_kp(player, BATTLE_HIT_KP);
            frontend.emit(GameEvent::BattleHit { kp: BATTLE_HIT_KP });
            if let Some(up) = level_up {
                frontend.emit_all(GameEvent::from_level_up(&up));
            }
        } else {
            player.take_damage(MISS_DAMAGE);
            frontend.emit(GameEvent::BattleMiss { damage: MISS_DAMAGE });
        }
        frontend.emit(GameEvent::BeastieHp { beastie: name.clone(), hp: beastie.hp, max_hp });

        for done in update_quest_progress(player, &question.topic, correct) {
            crate::logic::emit_completion(frontend, done);
        }
    }

    if player.is_down() {
        player.set_hp(DEFEAT_HP);
        player.location = Location::HOME;
        info!(target: "battle", beastie = %name, beastie_hp = beastie.hp, "Defeat");
        frontend.emit(GameEvent::Defeat { home: Location::HOME, hp: player.hp });
        return BattleOutcome::Defeat { beastie: name };
    }

    player.add_coins(VICTORY_COINS);
    info!(target: "battle", beastie = %name, coins = player.coins, "Victory");
    frontend.emit(GameEvent::Victory { beastie: name.clone(), coins: VICTORY_COINS });
    BattleOutcome::Victory { beastie: name }
}
