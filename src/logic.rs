//! Player activities shared by every frontend.
//!
//! This includes:
//!   - Practice quizzes at the School
//!   - The Arcade mini-game
//!   - Quest offers in Town
//!   - Travel between locations
//!
//! Each activity mutates the `Player` through the reward engine and quest
//! tracker and reports what happened as `GameEvent`s.

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::domain::{Location, Question};
use crate::player::Player;
use crate::protocol::{Frontend, GameEvent};
use crate::quests::{accept_quest, update_quest_progress, QuestAcceptance, QuestCompletion};
use crate::rewards::{award_kp, MINI_GAME_KP, PRACTICE_KP};
use crate::state::ContentStore;

/// Questions per practice session.
pub const PRACTICE_ROUND: usize = 3;

pub fn emit_completion<F: Frontend>(frontend: &mut F, done: QuestCompletion) {
  frontend.emit(GameEvent::QuestCompleted { name: done.name, kp: done.kp, coins: done.coins });
  if let Some(up) = done.level_up {
    frontend.emit_all(GameEvent::from_level_up(&up));
  }
}

/// Ask one question, pay `kp` on a correct answer, then feed the quest tracker.
fn answer_one<F: Frontend>(player: &mut Player, question: &Question, kp: u32, frontend: &mut F) -> bool {
  let correct = frontend.ask(question);
  debug!(target: "quiz", topic = %question.topic, difficulty = question.difficulty, correct, "Answered");
  if correct {
    let level_up = award_kp(player, kp);
    frontend.emit(GameEvent::AnswerCorrect { kp });
    if let Some(up) = level_up {
      frontend.emit_all(GameEvent::from_level_up(&up));
    }
  } else {
    frontend.emit(GameEvent::AnswerWrong);
  }
  for done in update_quest_progress(player, &question.topic, correct) {
    emit_completion(frontend, done);
  }
  correct
}

/// School practice: up to three questions on an optional topic/difficulty.
/// Returns (correct, asked).
#[instrument(level = "info", skip(player, store, frontend, rng), fields(player = %player.name))]
pub fn practice_quiz<F: Frontend, R: Rng + ?Sized>(
  player: &mut Player,
  store: &ContentStore,
  topic: Option<&str>,
  difficulty: Option<u8>,
  frontend: &mut F,
  rng: &mut R,
) -> (usize, usize) {
  let set = store.pick_questions(topic, difficulty, PRACTICE_ROUND, rng);
  if set.is_empty() {
    frontend.emit(GameEvent::NoQuestions);
    return (0, 0);
  }
  let mut correct = 0;
  for q in &set {
    if answer_one(player, q, PRACTICE_KP, frontend) {
      correct += 1;
    }
  }
  info!(target: "quiz", correct, total = set.len(), "Practice finished");
  frontend.emit(GameEvent::PracticeSummary { correct, total: set.len() });
  (correct, set.len())
}

/// Arcade mini-game: a single question from any topic.
#[instrument(level = "info", skip_all, fields(player = %player.name))]
pub fn mini_game<F: Frontend, R: Rng + ?Sized>(
  player: &mut Player,
  store: &ContentStore,
  frontend: &mut F,
  rng: &mut R,
) -> Option<bool> {
  let Some(q) = store.pick_questions(None, None, 1, rng).into_iter().next() else {
    frontend.emit(GameEvent::NoQuestions);
    return None;
  };
  let won = frontend.ask(&q);
  if won {
    let level_up = award_kp(player, MINI_GAME_KP);
    frontend.emit(GameEvent::MiniGameWon { kp: MINI_GAME_KP });
    if let Some(up) = level_up {
      frontend.emit_all(GameEvent::from_level_up(&up));
    }
  } else {
    frontend.emit(GameEvent::MiniGameLost);
  }
  for done in update_quest_progress(player, &q.topic, won) {
    emit_completion(frontend, done);
  }
  Some(won)
}

/// Town elder: offer one random quest the player's level allows.
#[instrument(level = "info", skip_all, fields(player = %player.name, level = player.level))]
pub fn talk_in_town<F: Frontend, R: Rng + ?Sized>(
  player: &mut Player,
  store: &ContentStore,
  frontend: &mut F,
  rng: &mut R,
) -> Option<QuestAcceptance> {
  let Some(template) = store.random_quest(player.level, rng) else {
    frontend.emit(GameEvent::NoQuestsAvailable);
    return None;
  };
  frontend.emit(GameEvent::QuestOffered { name: template.name.clone() });
  if !frontend.confirm(&format!("Accept quest '{}'?", template.name)) {
    debug!(target: "quest", quest = %template.name, "Quest declined");
    return None;
  }
  let result = accept_quest(player, template);
  let name = template.name.clone();
  frontend.emit(match result {
    QuestAcceptance::Accepted => GameEvent::QuestAccepted { name },
    QuestAcceptance::AlreadyActive => GameEvent::QuestAlreadyActive { name },
  });
  Some(result)
}

/// Move to `destination` if it exists and the player's level unlocks it.
#[instrument(level = "info", skip(player, frontend), fields(player = %player.name))]
pub fn travel<F: Frontend>(player: &mut Player, destination: &str, frontend: &mut F) -> bool {
  let Some(location) = Location::parse(destination) else {
    frontend.emit(GameEvent::UnknownLocation { name: destination.trim().to_string() });
    return false;
  };
  if !location.is_unlocked_at(player.level) {
    frontend.emit(GameEvent::LocationLocked { location });
    return false;
  }
  player.location = location;
  info!(target: "quiz_quest", %location, "Travelled");
  frontend.emit(GameEvent::Travelled { location });
  true
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{QuestTemplate, Rewards};
  use crate::protocol::testing::ScriptedFrontend;
  use crate::seeds::seed_questions;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn rng() -> StdRng { StdRng::seed_from_u64(11) }

  #[test]
  fn practice_awards_two_kp_per_correct_answer() {
    let store = ContentStore::seeded();
    let mut p = Player::new("Ada");
    let mut fe = ScriptedFrontend::with_answers([true, false, true]);
    let result = practice_quiz(&mut p, &store, None, None, &mut fe, &mut rng());
    assert_eq!(result, (2, 3));
    assert_eq!(p.kp, 2 * PRACTICE_KP);
    assert!(fe.has(|e| *e == GameEvent::PracticeSummary { correct: 2, total: 3 }));
  }

  #[test]
  fn practice_with_no_matches_changes_nothing() {
    let store = ContentStore::seeded();
    let mut p = Player::new("Ada");
    let mut fe = ScriptedFrontend::default();
    assert_eq!(practice_quiz(&mut p, &store, Some("astrology"), None, &mut fe, &mut rng()), (0, 0));
    assert_eq!(fe.events, vec![GameEvent::NoQuestions]);
    assert_eq!(p, Player::new("Ada"));
  }

  #[test]
  fn practice_on_a_small_topic_asks_what_exists() {
    let store = ContentStore::seeded();
    let mut p = Player::new("Ada");
    let mut fe = ScriptedFrontend::with_answers([true, true]);
    assert_eq!(practice_quiz(&mut p, &store, Some("fractions"), None, &mut fe, &mut rng()), (2, 2));
    assert!(fe.asked.iter().all(|q| q.topic == "fractions"));
  }

  #[test]
  fn practice_feeds_quests_and_announces_level_up() {
    let store = ContentStore::new(
      seed_questions().into_iter().filter(|q| q.topic == "addition").collect(),
      vec![],
    );
    let mut p = Player::new("Ada");
    p.kp = 18;
    p.level = 1;
    accept_quest(&mut p, &QuestTemplate {
      name: "Sums".into(),
      topic: "addition".into(),
      target: 2,
      correct_needed: 1,
      rewards: Rewards { kp: Some(5), coins: Some(1) },
      min_level: 1,
    });
    let mut fe = ScriptedFrontend::with_answers([true, false]);
    practice_quiz(&mut p, &store, Some("addition"), None, &mut fe, &mut rng());
    assert!(fe.has(|e| *e == GameEvent::LevelUp { level: 2 }));
    assert!(fe.has(|e| *e == GameEvent::LocationUnlocked { location: Location::Arcade }));
    assert!(fe.has(|e| matches!(e, GameEvent::QuestCompleted { kp: 5, coins: 1, .. })));
    assert_eq!((p.kp, p.coins), (18 + 2 + 5, 1));
  }

  #[test]
  fn mini_game_win_and_loss() {
    let store = ContentStore::seeded();
    let mut p = Player::new("Ada");
    let mut fe = ScriptedFrontend::with_answers([true, false]);
    assert_eq!(mini_game(&mut p, &store, &mut fe, &mut rng()), Some(true));
    assert_eq!(mini_game(&mut p, &store, &mut fe, &mut rng()), Some(false));
    assert_eq!(p.kp, MINI_GAME_KP);
    assert!(fe.has(|e| *e == GameEvent::MiniGameLost));
  }

  #[test]
  fn mini_game_with_empty_bank() {
    let store = ContentStore::new(vec![], vec![]);
    let mut p = Player::new("Ada");
    let mut fe = ScriptedFrontend::default();
    assert_eq!(mini_game(&mut p, &store, &mut fe, &mut rng()), None);
  }

  #[test]
  fn talk_accepts_then_reports_duplicate() {
    let store = ContentStore::new(seed_questions(), vec![QuestTemplate {
      name: "Only".into(),
      topic: "addition".into(),
      target: 1,
      correct_needed: 1,
      rewards: Rewards::default(),
      min_level: 1,
    }]);
    let mut p = Player::new("Ada");
    let mut fe = ScriptedFrontend::default();
    fe.confirms.extend([true, true, false]);
    assert_eq!(talk_in_town(&mut p, &store, &mut fe, &mut rng()), Some(QuestAcceptance::Accepted));
    assert_eq!(talk_in_town(&mut p, &store, &mut fe, &mut rng()), Some(QuestAcceptance::AlreadyActive));
    assert_eq!(talk_in_town(&mut p, &store, &mut fe, &mut rng()), None);
    assert_eq!(p.active_quests.len(), 1);
  }

  #[test]
  fn talk_with_nothing_to_offer() {
    let store = ContentStore::seeded();
    let mut p = Player::new("Ada");
    let only_high = ContentStore::new(
      seed_questions(),
      store.quest_templates().iter().filter(|t| t.min_level > 1).cloned().collect(),
    );
    let mut fe = ScriptedFrontend::default();
    assert_eq!(talk_in_town(&mut p, &only_high, &mut fe, &mut rng()), None);
    assert_eq!(fe.events, vec![GameEvent::NoQuestsAvailable]);
  }

  #[test]
  fn travel_rules() {
    let mut p = Player::new("Ada");
    let mut fe = ScriptedFrontend::default();
    assert!(!travel(&mut p, "Moon", &mut fe));
    assert!(!travel(&mut p, "arena", &mut fe));
    assert_eq!(p.location, Location::Town);
    assert!(travel(&mut p, "school", &mut fe));
    assert_eq!(p.location, Location::School);
    assert_eq!(
      fe.events,
      vec![
        GameEvent::UnknownLocation { name: "Moon".into() },
        GameEvent::LocationLocked { location: Location::Arena },
        GameEvent::Travelled { location: Location::School },
      ]
    );
  }
}
