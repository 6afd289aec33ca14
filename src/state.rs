//! Content store: the question bank, quest templates, and selection logic.
//!
//! This module owns:
//!   - the questions (read-only after load)
//!   - the quest templates offered in Town
//!   - random selection over both, plus beastie selection for the Arena
//!
//! Content comes from the JSON files named in `GameConfig`. A file that is
//! missing or unusable is replaced by the built-in seeds so the game stays
//! playable.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::de::DeserializeOwned;
use tracing::{error, info, instrument, warn};

use crate::config::GameConfig;
use crate::domain::{Beastie, Question, QuestTemplate};
use crate::error::GameError;
use crate::seeds::{seed_questions, seed_quests, BEASTIES};

/// Highest beastie difficulty, whatever the player's level.
const MAX_BEASTIE_DIFFICULTY: u8 = 3;

#[derive(Clone, Debug)]
pub struct ContentStore {
    questions: Vec<Question>,
    quests: Vec<QuestTemplate>,
    beasties: Vec<Beastie>,
}

impl ContentStore {
    /// Build a store from already-loaded content, dropping invalid records.
    pub fn new(questions: Vec<Question>, quests: Vec<QuestTemplate>) -> Self {
        let questions = questions
            .into_iter()
            .filter(|q| {
                let problems = q.problems();
                if !problems.is_empty() {
                    error!(target: "quiz", prompt = %q.prompt, ?problems, "Skipping question");
                }
                problems.is_empty()
            })
            .collect();

        let mut names = HashSet::new();
        let quests = quests
            .into_iter()
            .filter(|t| {
                let problems = t.problems();
                if !problems.is_empty() {
                    error!(target: "quest", name = %t.name, ?problems, "Skipping quest template");
                    return false;
                }
                if !names.insert(t.name.clone()) {
                    warn!(target: "quest", name = %t.name, "Duplicate quest template name; keeping the first");
                    return false;
                }
                true
            })
            .collect();

        Self {
            questions,
            quests,
            beasties: BEASTIES.to_vec(),
        }
    }

    /// Built-in seed content only.
    pub fn seeded() -> Self {
        Self::new(seed_questions(), seed_quests())
    }

    /// Load content from the configured files, falling back per file to seeds.
    #[instrument(level = "info", skip_all, fields(questions = %cfg.questions_path, quests = %cfg.quests_path))]
    pub fn load(cfg: &GameConfig) -> Self {
        let questions = load_or_seed(&cfg.questions_path, "questions", seed_questions);
        let quests = load_or_seed(&cfg.quests_path, "quests", seed_quests);
        let store = Self::new(questions, quests);
        if store.questions.is_empty() {
            error!(target: "quiz", "No valid questions loaded; using built-in seeds");
            return Self::new(seed_questions(), store.quests);
        }
        store.log_inventory();
        store
    }

    fn log_inventory(&self) {
        let mut by_topic: BTreeMap<&str, (usize, usize, usize)> = BTreeMap::new();
        for q in &self.questions {
            let entry = by_topic.entry(q.topic.as_str()).or_insert((0, 0, 0));
            match q.difficulty {
                1 => entry.0 += 1,
                2 => entry.1 += 1,
                _ => entry.2 += 1,
            }
        }
        for (topic, (easy, medium, hard)) in by_topic {
            info!(target: "quiz", %topic, easy, medium, hard, "Question inventory");
        }
        for b in &self.beasties {
            if !self.questions.iter().any(|q| q.topic == b.topic) {
                warn!(target: "battle", beastie = b.name, topic = b.topic, "Beastie has no questions; it will flee");
            }
        }
        info!(target: "quest", templates = self.quests.len(), "Quest inventory");
    }

    #[allow(dead_code)]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[allow(dead_code)]
    pub fn quest_templates(&self) -> &[QuestTemplate] {
        &self.quests
    }

    /// Sorted, de-duplicated topic names.
    pub fn topics(&self) -> Vec<String> {
        self.questions
            .iter()
            .map(|q| q.topic.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Random sample without replacement, filtered by optional topic and
    /// difficulty. Returns everything matching when fewer than `count` exist,
    /// and an empty vec when nothing matches.
    #[instrument(level = "debug", skip(self, rng))]
    pub fn pick_questions<R: Rng + ?Sized>(
        &self,
        topic: Option<&str>,
        difficulty: Option<u8>,
        count: usize,
        rng: &mut R,
    ) -> Vec<Question> {
        let pool: Vec<&Question> = self
            .questions
            .iter()
            .filter(|q| topic.map_or(true, |t| q.topic == t))
            .filter(|q| difficulty.map_or(true, |d| q.difficulty == d))
            .collect();
        pool.choose_multiple(rng, count.min(pool.len()))
            .map(|q| (*q).clone())
            .collect()
    }

    /// Templates the player is allowed to be offered at `level`.
    pub fn available_quests(&self, level: u8) -> Vec<&QuestTemplate> {
        self.quests.iter().filter(|t| t.min_level <= level).collect()
    }

    pub fn random_quest<R: Rng + ?Sized>(&self, level: u8, rng: &mut R) -> Option<&QuestTemplate> {
        self.available_quests(level).choose(rng).copied()
    }

    /// Uniform pick among beasties with difficulty ≤ min(level, 3).
    pub fn random_beastie<R: Rng + ?Sized>(&self, level: u8, rng: &mut R) -> Option<Beastie> {
        let max_difficulty = level.min(MAX_BEASTIE_DIFFICULTY);
        let eligible: Vec<&Beastie> = self
            .beasties
            .iter()
            .filter(|b| b.difficulty <= max_difficulty)
            .collect();
        eligible.choose(rng).map(|b| (*b).clone())
    }

    #[cfg(test)]
    pub fn with_beasties(mut self, beasties: Vec<Beastie>) -> Self {
        self.beasties = beasties;
        self
    }
}

/// Read a JSON array from `path`.
pub fn load_json_array<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>, GameError> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)?;
    let items: Vec<T> = serde_json::from_str(&data)?;
    if items.is_empty() {
        return Err(GameError::InvalidContent {
            path: path.display().to_string(),
            reason: "no records".into(),
        });
    }
    Ok(items)
}

fn load_or_seed<T: DeserializeOwned>(path: &str, what: &str, seed: fn() -> Vec<T>) -> Vec<T> {
    match load_json_array(path) {
        Ok(items) => {
            info!(target: "quiz_quest", %path, count = items.len(), "Loaded {what}");
            items
        }
        Err(e) => {
            error!(target: "quiz_quest", %path, error = %e, "Failed to load {what}; using built-in seeds");
            seed()
        }
    }
}
