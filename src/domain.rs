//! Domain models used by the game: questions, quest templates and live quests,
//! beasties, and the fixed location graph.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One multiple-choice quiz item.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
  pub prompt: String,
  pub choices: Vec<String>,
  pub answer: String,
  pub topic: String,
  pub difficulty: u8,
}

impl Question {
  /// True when `index` (0-based) points at the correct choice.
  pub fn is_correct_choice(&self, index: usize) -> bool {
    self.choices.get(index).map_or(false, |c| *c == self.answer)
  }

  /// Reasons why this record cannot be played; empty when it is valid.
  pub fn problems(&self) -> Vec<String> {
    let mut out = vec![];
    if self.choices.len() != 4 {
      out.push(format!("expected 4 choices, found {}", self.choices.len()));
    }
    if !self.choices.iter().any(|c| *c == self.answer) {
      out.push(format!("answer '{}' is not one of the choices", self.answer));
    }
    if !(1..=3).contains(&self.difficulty) {
      out.push(format!("difficulty {} outside 1-3", self.difficulty));
    }
    if self.topic.trim().is_empty() {
      out.push("empty topic".into());
    }
    out
  }
}

/// Quest rewards. Missing entries count as zero but are kept absent on save.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Rewards {
  #[serde(default, skip_serializing_if = "Option::is_none")] pub kp: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")] pub coins: Option<u32>,
}

impl Rewards {
  pub fn kp(&self) -> u32 { self.kp.unwrap_or(0) }
  pub fn coins(&self) -> u32 { self.coins.unwrap_or(0) }
}

fn default_min_level() -> u8 { 1 }

/// Read-only quest definition as it appears in the content bank.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestTemplate {
  pub name: String,
  pub topic: String,
  pub target: u32,
  pub correct_needed: u32,
  #[serde(default)] pub rewards: Rewards,
  #[serde(default = "default_min_level")] pub min_level: u8,
}

impl QuestTemplate {
  pub fn problems(&self) -> Vec<String> {
    let mut out = vec![];
    if self.target == 0 {
      out.push("target must be positive".into());
    }
    if self.correct_needed == 0 {
      out.push("correct_needed must be positive".into());
    }
    if self.correct_needed > self.target {
      out.push(format!("correct_needed {} exceeds target {}", self.correct_needed, self.target));
    }
    out
  }
}

/// A quest the player has accepted. Serialized as-is into the save file.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quest {
  pub name: String,
  pub topic: String,
  pub target: u32,
  pub correct_needed: u32,
  #[serde(default)] pub rewards: Rewards,
  #[serde(default = "default_min_level")] pub min_level: u8,
  #[serde(default)] pub attempts: u32,
  #[serde(default)] pub correct: u32,
}

impl Quest {
  pub fn from_template(t: &QuestTemplate) -> Self {
    Self {
      name: t.name.clone(),
      topic: t.topic.clone(),
      target: t.target,
      correct_needed: t.correct_needed,
      rewards: t.rewards.clone(),
      min_level: t.min_level,
      attempts: 0,
      correct: 0,
    }
  }

  /// Count one answer on `topic`. Answers on other topics are ignored.
  ///
  /// `attempts` saturates at `target` and `correct` never passes `attempts`,
  /// so a quest that used up its attempts can still finish on later correct
  /// answers.
  pub fn record_attempt(&mut self, topic: &str, correct: bool) -> bool {
    if topic != self.topic {
      return false;
    }
    if self.attempts < self.target {
      self.attempts += 1;
    }
    if correct && self.correct < self.attempts {
      self.correct += 1;
    }
    true
  }

  pub fn is_complete(&self) -> bool {
    self.attempts >= self.target && self.correct >= self.correct_needed
  }

  /// Pull counters back inside their bounds (used after loading a save).
  pub fn clamp_counters(&mut self) {
    self.attempts = self.attempts.min(self.target);
    self.correct = self.correct.min(self.attempts);
  }
}

/// A monster template. Instances live only for one encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Beastie {
  pub name: &'static str,
  pub hp: u32,
  pub topic: &'static str,
  pub difficulty: u8,
}

/// The fixed location graph.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Location {
  #[default]
  Town,
  School,
  Arcade,
  Arena,
}

impl Location {
  pub const ALL: [Location; 4] = [Location::Town, Location::School, Location::Arcade, Location::Arena];

  /// Where the player wakes up after losing a battle.
  pub const HOME: Location = Location::Town;

  pub fn name(self) -> &'static str {
    match self {
      Location::Town => "Town",
      Location::School => "School",
      Location::Arcade => "Arcade",
      Location::Arena => "Arena",
    }
  }

  pub fn description(self) -> &'static str {
    match self {
      Location::Town => "A cozy hub of lanterns and friendly faces.",
      Location::School => "Classrooms filled with practice scrolls by topic.",
      Location::Arcade => "Machines hum with random quiz modes.",
      Location::Arena => "Beastie battles await the brave.",
    }
  }

  pub fn min_level(self) -> u8 {
    match self {
      Location::Town | Location::School => 1,
      Location::Arcade => 2,
      Location::Arena => 3,
    }
  }

  /// Actions listed for this location, in display order.
  pub fn actions(self) -> &'static [&'static str] {
    match self {
      Location::Town => &["talk", "quests", "map", "travel", "status", "save", "quit"],
      Location::School => &["practice", "quests", "map", "travel", "status", "save", "quit"],
      Location::Arcade => &["mini", "map", "travel", "status", "save", "quit"],
      Location::Arena => &["battle", "map", "travel", "status", "save", "quit"],
    }
  }

  pub fn is_unlocked_at(self, level: u8) -> bool {
    level >= self.min_level()
  }

  /// Case-insensitive lookup by display name.
  pub fn parse(name: &str) -> Option<Location> {
    let needle = name.trim();
    Location::ALL.into_iter().find(|l| l.name().eq_ignore_ascii_case(needle))
  }
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn quest(target: u32, needed: u32) -> Quest {
    Quest::from_template(&QuestTemplate {
      name: "Sums".into(),
      topic: "addition".into(),
      target,
      correct_needed: needed,
      rewards: Rewards::default(),
      min_level: 1,
    })
  }

  #[test]
  fn wrong_right_right_completes() {
    let mut q = quest(3, 2);
    for ok in [false, true, true] {
      q.record_attempt("addition", ok);
    }
    assert!(q.is_complete());
  }

  #[test]
  fn wrong_wrong_right_does_not_complete() {
    let mut q = quest(3, 2);
    for ok in [false, false, true] {
      q.record_attempt("addition", ok);
    }
    assert!(!q.is_complete());
    assert_eq!((q.attempts, q.correct), (3, 1));
  }

  #[test]
  fn attempts_saturate_and_late_correct_answers_still_count() {
    let mut q = quest(2, 2);
    q.record_attempt("addition", false);
    q.record_attempt("addition", false);
    q.record_attempt("addition", true);
    assert_eq!((q.attempts, q.correct), (2, 1));
    q.record_attempt("addition", true);
    assert_eq!((q.attempts, q.correct), (2, 2));
    assert!(q.is_complete());
  }

  #[test]
  fn other_topics_are_ignored() {
    let mut q = quest(3, 1);
    assert!(!q.record_attempt("fractions", true));
    assert_eq!((q.attempts, q.correct), (0, 0));
  }

  #[test]
  fn template_validation_flags_impossible_quests() {
    let t = QuestTemplate {
      name: "Bad".into(),
      topic: "time".into(),
      target: 2,
      correct_needed: 3,
      rewards: Rewards::default(),
      min_level: 1,
    };
    assert_eq!(t.problems().len(), 1);
  }

  #[test]
  fn question_validation() {
    let mut q = Question {
      prompt: "2 + 2?".into(),
      choices: vec!["3".into(), "4".into(), "5".into(), "6".into()],
      answer: "4".into(),
      topic: "addition".into(),
      difficulty: 1,
    };
    assert!(q.problems().is_empty());
    assert!(q.is_correct_choice(1));
    assert!(!q.is_correct_choice(7));
    q.answer = "7".into();
    q.difficulty = 4;
    assert_eq!(q.problems().len(), 2);
  }

  #[test]
  fn location_lookup_ignores_case() {
    assert_eq!(Location::parse(" arena "), Some(Location::Arena));
    assert_eq!(Location::parse("Moon"), None);
    assert!(!Location::Arena.is_unlocked_at(2));
    assert!(Location::Arcade.is_unlocked_at(2));
  }
}
