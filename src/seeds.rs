//! Seed data: the beastie roster and a small built-in content bank.
//!
//! The built-in questions and quests guarantee the game is playable even when
//! the content files are missing or broken.

use crate::domain::{Beastie, Question, QuestTemplate, Rewards};

/// Every beastie that can appear in the Arena.
pub const BEASTIES: &[Beastie] = &[
  Beastie { name: "Glimmerfox", hp: 8, topic: "fractions", difficulty: 1 },
  Beastie { name: "Sumling", hp: 8, topic: "addition", difficulty: 1 },
  Beastie { name: "Shadeclaw", hp: 8, topic: "subtraction", difficulty: 1 },
  Beastie { name: "Gearling", hp: 8, topic: "place_value", difficulty: 1 },
  Beastie { name: "Ironjaw", hp: 10, topic: "integers", difficulty: 2 },
  Beastie { name: "Cogrunner", hp: 10, topic: "multiplication", difficulty: 2 },
  Beastie { name: "Divider", hp: 10, topic: "division", difficulty: 2 },
  Beastie { name: "Chronosh", hp: 10, topic: "time", difficulty: 2 },
  Beastie { name: "Mintcoil", hp: 10, topic: "money", difficulty: 2 },
  Beastie { name: "Gemark", hp: 10, topic: "geometry", difficulty: 2 },
  Beastie { name: "Tapespine", hp: 10, topic: "measurement", difficulty: 2 },
  Beastie { name: "Stormwing", hp: 12, topic: "forces", difficulty: 3 },
];

fn q(prompt: &str, choices: [&str; 4], answer: &str, topic: &str, difficulty: u8) -> Question {
  Question {
    prompt: prompt.into(),
    choices: choices.iter().map(|c| c.to_string()).collect(),
    answer: answer.into(),
    topic: topic.into(),
    difficulty,
  }
}

/// Minimal question set: two items per beginner topic.
pub fn seed_questions() -> Vec<Question> {
  vec![
    q("What is 7 + 5?", ["11", "12", "13", "14"], "12", "addition", 1),
    q("What is 48 + 27?", ["65", "75", "74", "85"], "75", "addition", 2),
    q("What is 15 - 8?", ["6", "7", "8", "9"], "7", "subtraction", 1),
    q("What is 100 - 37?", ["63", "73", "67", "53"], "63", "subtraction", 2),
    q("Which fraction equals one half?", ["2/3", "3/6", "1/3", "3/4"], "3/6", "fractions", 1),
    q("What is 1/4 + 1/4?", ["1/8", "2/8", "1/2", "1/16"], "1/2", "fractions", 2),
    q("In 352, what is the value of the 5?", ["5", "50", "500", "5000"], "50", "place_value", 1),
    q("Which number has 4 in the hundreds place?", ["1432", "4321", "3214", "2143"], "1432", "place_value", 2),
  ]
}

/// Minimal quest set matching the seed questions.
pub fn seed_quests() -> Vec<QuestTemplate> {
  vec![
    QuestTemplate {
      name: "Counting Coins".into(),
      topic: "addition".into(),
      target: 3,
      correct_needed: 2,
      rewards: Rewards { kp: Some(10), coins: Some(5) },
      min_level: 1,
    },
    QuestTemplate {
      name: "Take It Away".into(),
      topic: "subtraction".into(),
      target: 3,
      correct_needed: 2,
      rewards: Rewards { kp: Some(10), coins: Some(5) },
      min_level: 1,
    },
    QuestTemplate {
      name: "Slice of Pie".into(),
      topic: "fractions".into(),
      target: 4,
      correct_needed: 3,
      rewards: Rewards { kp: Some(15), coins: None },
      min_level: 2,
    },
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn seed_content_is_valid() {
    for question in seed_questions() {
      assert!(question.problems().is_empty(), "{}: {:?}", question.prompt, question.problems());
    }
    for quest in seed_quests() {
      assert!(quest.problems().is_empty(), "{}", quest.name);
    }
  }

  #[test]
  fn every_difficulty_tier_has_a_beastie() {
    for d in 1..=3 {
      assert!(BEASTIES.iter().any(|b| b.difficulty == d));
    }
  }
}
