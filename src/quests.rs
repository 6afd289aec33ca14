//! Quest tracker: accepting quests and turning answered questions into quest
//! progress, completions and rewards.

use tracing::{debug, info, instrument};

use crate::domain::{Quest, QuestTemplate};
use crate::player::Player;
use crate::rewards::{award_kp, LevelUp};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuestAcceptance {
  Accepted,
  AlreadyActive,
}

/// A quest that finished during `update_quest_progress`, with what it paid out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestCompletion {
  pub name: String,
  pub kp: u32,
  pub coins: u32,
  pub level_up: Option<LevelUp>,
}

#[instrument(level = "info", skip(player, template), fields(player = %player.name, quest = %template.name))]
pub fn accept_quest(player: &mut Player, template: &QuestTemplate) -> QuestAcceptance {
  if player.has_quest(&template.name) {
    debug!(target: "quest", quest = %template.name, "Quest already active");
    return QuestAcceptance::AlreadyActive;
  }
  player.active_quests.push(Quest::from_template(template));
  info!(target: "quest", quest = %template.name, active = player.active_quests.len(), "Quest accepted");
  QuestAcceptance::Accepted
}

/// Record one answered question against every active quest on `topic`, then
/// pay out and remove each quest that is now complete.
#[instrument(level = "debug", skip(player), fields(player = %player.name))]
pub fn update_quest_progress(player: &mut Player, topic: &str, correct: bool) -> Vec<QuestCompletion> {
  for quest in player.active_quests.iter_mut() {
    if quest.record_attempt(topic, correct) {
      debug!(target: "quest", quest = %quest.name, attempts = quest.attempts, correct = quest.correct, "Quest progress");
    }
  }

  // Evaluate against a snapshot; removals go to the live list.
  let finished: Vec<Quest> = player
    .active_quests
    .iter()
    .filter(|q| q.is_complete())
    .cloned()
    .collect();

  let mut out = Vec::with_capacity(finished.len());
  for quest in finished {
    player.active_quests.retain(|q| q.name != quest.name);
    let kp = quest.rewards.kp();
    let coins = quest.rewards.coins();
    let level_up = award_kp(player, kp);
    player.add_coins(coins);
    info!(target: "quest", quest = %quest.name, kp, coins, "Quest complete");
    out.push(QuestCompletion { name: quest.name, kp, coins, level_up });
  }
  out
}
