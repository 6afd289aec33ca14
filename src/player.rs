//! The player record: the one piece of mutable state the whole game threads
//! through its operations. Also the save-file schema.

use serde::{Deserialize, Serialize};

use crate::domain::{Location, Quest};
use crate::rewards::level_from_kp;

pub const MAX_HP: u32 = 10;

fn default_level() -> u8 { 1 }
fn default_hp() -> u32 { MAX_HP }

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    #[serde(default)]
    pub kp: u32,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default = "default_hp")]
    pub hp: u32,
    #[serde(default)]
    pub coins: u32,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub active_quests: Vec<Quest>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kp: 0,
            level: 1,
            hp: MAX_HP,
            coins: 0,
            location: Location::HOME,
            active_quests: Vec::new(),
        }
    }

    /// Lose `amount` hp, never dropping below zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.set_hp(self.hp.saturating_sub(amount));
    }

    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(MAX_HP);
    }

    pub fn add_coins(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    pub fn has_quest(&self, name: &str) -> bool {
        self.active_quests.iter().any(|q| q.name == name)
    }

    pub fn is_down(&self) -> bool {
        self.hp == 0
    }

    /// Restore invariants on a record that came from outside (a save file).
    /// Returns true when anything had to change.
    pub fn repair(&mut self) -> bool {
        let before = self.clone();
        self.level = level_from_kp(self.kp);
        self.set_hp(self.hp);
        let mut seen = std::collections::HashSet::new();
        self.active_quests.retain(|q| seen.insert(q.name.clone()));
        for q in &mut self.active_quests {
            q.clamp_counters();
        }
        *self != before
    }

    /// One-line summary used by the status panel.
    pub fn describe(&self) -> String {
        format!(
            "{} | Level {} | KP {} | HP {} | Coins {}",
            self.name, self.level, self.kp, self.hp, self.coins
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{QuestTemplate, Rewards};

    #[test]
    fn new_player_defaults() {
        let p = Player::new("Ada");
        assert_eq!((p.kp, p.level, p.hp, p.coins), (0, 1, MAX_HP, 0));
        assert_eq!(p.location, Location::Town);
        assert!(p.active_quests.is_empty());
    }

    #[test]
    fn hp_is_clamped_both_ways() {
        let mut p = Player::new("Ada");
        p.take_damage(25);
        assert_eq!(p.hp, 0);
        assert!(p.is_down());
        p.set_hp(99);
        assert_eq!(p.hp, MAX_HP);
    }

    #[test]
    fn repair_recomputes_level_and_clamps() {
        let mut p = Player::new("Ada");
        p.kp = 55;
        p.level = 1;
        p.hp = 40;
        let mut q = Quest::from_template(&QuestTemplate {
            name: "Sums".into(),
            topic: "addition".into(),
            target: 3,
            correct_needed: 2,
            rewards: Rewards::default(),
            min_level: 1,
        });
        q.attempts = 9;
        q.correct = 9;
        p.active_quests = vec![q.clone(), q];
        assert!(p.repair());
        assert_eq!(p.level, 3);
        assert_eq!(p.hp, MAX_HP);
        assert_eq!(p.active_quests.len(), 1);
        assert_eq!((p.active_quests[0].attempts, p.active_quests[0].correct), (3, 3));
        assert!(!p.repair());
    }
}
