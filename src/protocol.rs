//! The boundary between the game core and whatever shows it to the player.
//!
//! - `Command`: what the player asked for (parsed from one input line).
//! - `GameEvent`: what happened (serde ready, so events can be logged as JSON).
//! - `Frontend`: the collaborator that asks questions and renders events.

use serde::Serialize;

use crate::domain::{Location, Question};
use crate::rewards::LevelUp;
use crate::util::normalize_choice;

/// Player commands. Location-specific ones are gated by `Location::actions`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Talk,
    Practice {
        topic: Option<String>,
        difficulty: Option<u8>,
    },
    Mini,
    Battle,
    Quests,
    Map,
    Travel {
        destination: String,
    },
    Status,
    Save,
    Help,
    Quit,
}

impl Command {
    /// Action keyword as listed by `Location::actions`.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Talk => "talk",
            Command::Practice { .. } => "practice",
            Command::Mini => "mini",
            Command::Battle => "battle",
            Command::Quests => "quests",
            Command::Map => "map",
            Command::Travel { .. } => "travel",
            Command::Status => "status",
            Command::Save => "save",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }

    /// Commands that work in every location.
    pub fn is_global(&self) -> bool {
        matches!(
            self,
            Command::Quests
                | Command::Map
                | Command::Travel { .. }
                | Command::Status
                | Command::Save
                | Command::Help
                | Command::Quit
        )
    }

    /// Parse `action [args...]`. Missing travel/practice arguments are left for
    /// the caller to prompt for.
    pub fn parse(line: &str) -> Option<Command> {
        let mut words = line.split_whitespace();
        let action = words.next()?.to_lowercase();
        let rest: Vec<&str> = words.collect();
        let cmd = match action.as_str() {
            "talk" => Command::Talk,
            "practice" => {
                let mut topic = None;
                let mut difficulty = None;
                for w in rest {
                    match w.parse::<u8>() {
                        Ok(d) => difficulty = Some(d),
                        Err(_) => topic = normalize_choice(w),
                    }
                }
                Command::Practice { topic, difficulty }
            }
            "mini" => Command::Mini,
            "battle" => Command::Battle,
            "quests" => Command::Quests,
            "map" => Command::Map,
            "travel" => Command::Travel {
                destination: rest.join(" "),
            },
            "status" => Command::Status,
            "save" => Command::Save,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return None,
        };
        Some(cmd)
    }
}

/// Everything the core reports back. Rendering is the frontend's job.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    LevelUp {
        level: u8,
    },
    LocationUnlocked {
        location: Location,
    },
    QuestOffered {
        name: String,
    },
    QuestAccepted {
        name: String,
    },
    QuestAlreadyActive {
        name: String,
    },
    NoQuestsAvailable,
    QuestCompleted {
        name: String,
        kp: u32,
        coins: u32,
    },
    NoQuestions,
    AnswerCorrect {
        kp: u32,
    },
    AnswerWrong,
    PracticeSummary {
        correct: usize,
        total: usize,
    },
    MiniGameWon {
        kp: u32,
    },
    MiniGameLost,
    BattleStarted {
        beastie: String,
        hp: u32,
    },
    BattleHit {
        kp: u32,
    },
    BattleMiss {
        damage: u32,
    },
    BeastieHp {
        beastie: String,
        hp: u32,
        max_hp: u32,
    },
    BeastieFled,
    Victory {
        beastie: String,
        coins: u32,
    },
    Defeat {
        home: Location,
        hp: u32,
    },
    Travelled {
        location: Location,
    },
    LocationLocked {
        location: Location,
    },
    UnknownLocation {
        name: String,
    },
    ActionUnavailable {
        action: String,
    },
    Saved {
        path: String,
    },
    SaveFailed {
        message: String,
    },
}

impl GameEvent {
    /// Events announcing a level-up: the new level, then each unlocked place.
    pub fn from_level_up(up: &LevelUp) -> Vec<GameEvent> {
        let mut out = vec![GameEvent::LevelUp { level: up.to }];
        out.extend(
            up.unlocked
                .iter()
                .map(|&location| GameEvent::LocationUnlocked { location }),
        );
        out
    }
}

/// The outward-facing collaborator. The console implements it over
/// stdin/stdout; tests use a scripted double.
pub trait Frontend {
    /// Present `question` and report whether the player picked the answer.
    fn ask(&mut self, question: &Question) -> bool;

    /// Yes/no prompt.
    fn confirm(&mut self, prompt: &str) -> bool;

    fn emit(&mut self, event: GameEvent);

    fn emit_all(&mut self, events: impl IntoIterator<Item = GameEvent>)
    where
        Self: Sized,
    {
        for e in events {
            self.emit(e);
        }
    }
}
