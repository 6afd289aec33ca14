//! Console session: the read-eval-print loop. Each input line is parsed as a
//! `Command`, checked against the current location, and forwarded to core
//! logic. Events come back through the `Terminal` frontend.

use std::io::{BufRead, Write};

use rand::Rng;
use tracing::{debug, error, info, instrument};

use crate::battle::run_battle;
use crate::logic::{mini_game, practice_quiz, talk_in_town, travel};
use crate::player::Player;
use crate::protocol::{Command, Frontend, GameEvent};
use crate::save::save_game;
use crate::state::ContentStore;
use crate::util::normalize_choice;

pub mod render;
pub mod terminal;

use self::terminal::Terminal;

/// Whether the loop should keep going after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<'a, R, W, G: ?Sized> {
    pub player: Player,
    store: &'a ContentStore,
    save_path: String,
    term: Terminal<R, W>,
    rng: &'a mut G,
}

impl<'a, R: BufRead, W: Write, G: Rng + ?Sized> Session<'a, R, W, G> {
    pub fn new(
        player: Player,
        store: &'a ContentStore,
        save_path: impl Into<String>,
        term: Terminal<R, W>,
        rng: &'a mut G,
    ) -> Self {
        Self {
            player,
            store,
            save_path: save_path.into(),
            term,
            rng,
        }
    }

    /// Loop until `quit` or end of input. Returns the final player.
    #[instrument(level = "info", skip_all, fields(player = %self.player.name))]
    pub fn run(mut self) -> (Player, Terminal<R, W>) {
        loop {
            let header = render::location_header(&self.player);
            self.term.say(&header);
            let Some(line) = self.term.read_line("Action: ") else {
                info!(target: "quiz_quest", "Input closed; leaving without saving");
                break;
            };
            if line.is_empty() {
                continue;
            }
            if self.handle_line(&line) == Flow::Quit {
                break;
            }
        }
        (self.player, self.term)
    }

    pub fn handle_line(&mut self, line: &str) -> Flow {
        let Some(cmd) = Command::parse(line) else {
            let action = line.split_whitespace().next().unwrap_or_default().to_string();
            self.term.emit(GameEvent::ActionUnavailable { action });
            return Flow::Continue;
        };
        let here = self.player.location;
        if !cmd.is_global() && !here.actions().contains(&cmd.keyword()) {
            debug!(target: "quiz_quest", action = cmd.keyword(), location = %here, "Action not offered here");
            self.term.emit(GameEvent::ActionUnavailable { action: cmd.keyword().into() });
            return Flow::Continue;
        }
        self.dispatch(cmd)
    }

    fn dispatch(&mut self, cmd: Command) -> Flow {
        match cmd {
            Command::Talk => {
                talk_in_town(&mut self.player, self.store, &mut self.term, &mut *self.rng);
            }
            Command::Practice { topic, difficulty } => {
                let (topic, difficulty) = if topic.is_none() && difficulty.is_none() {
                    self.prompt_practice_filters()
                } else {
                    (topic, difficulty)
                };
                practice_quiz(
                    &mut self.player,
                    self.store,
                    topic.as_deref(),
                    difficulty,
                    &mut self.term,
                    &mut *self.rng,
                );
            }
            Command::Mini => {
                mini_game(&mut self.player, self.store, &mut self.term, &mut *self.rng);
            }
            Command::Battle => {
                run_battle(&mut self.player, self.store, &mut self.term, &mut *self.rng);
            }
            Command::Quests => {
                let text = render::quests_panel(&self.player);
                self.term.say(&text);
            }
            Command::Status => {
                let text = render::status_panel(&self.player);
                self.term.say(&text);
            }
            Command::Map => {
                let text = render::world_map(&self.player);
                self.term.say(&text);
            }
            Command::Travel { destination } => {
                let destination = if destination.is_empty() {
                    let options = render::travel_options(&self.player);
                    self.term.say(&options);
                    self.term.read_line("Travel to: ").unwrap_or_default()
                } else {
                    destination
                };
                travel(&mut self.player, &destination, &mut self.term);
            }
            Command::Save => self.save(),
            Command::Help => self.term.say(render::help_text()),
            Command::Quit => {
                if self.term.confirm("Save before quitting?") {
                    self.save();
                }
                self.term.say("Farewell.");
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    fn prompt_practice_filters(&mut self) -> (Option<String>, Option<u8>) {
        let topics = self.store.topics().join(", ");
        let topic = self
            .term
            .read_line(&format!("Topic ({}; blank for any): ", topics))
            .and_then(|s| normalize_choice(&s));
        let difficulty = self
            .term
            .read_line("Difficulty 1-3 (blank for any): ")
            .and_then(|s| s.parse::<u8>().ok());
        (topic, difficulty)
    }

    fn save(&mut self) {
        match save_game(&self.save_path, &self.player) {
            Ok(()) => self.term.emit(GameEvent::Saved { path: self.save_path.clone() }),
            Err(e) => {
                error!(target: "save", path = %self.save_path, error = %e, "Save failed");
                self.term.emit(GameEvent::SaveFailed { message: e.to_string() });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Location;
    use crate::save::load_game;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    fn play(player: Player, save_path: &str, script: &str) -> (Player, String) {
        let store = ContentStore::seeded();
        let mut rng = StdRng::seed_from_u64(3);
        let term = Terminal::new(Cursor::new(script.to_string()), Vec::new());
        let (player, term) = Session::new(player, &store, save_path, term, &mut rng).run();
        (player, String::from_utf8(term.into_output()).unwrap())
    }

    #[test]
    fn location_actions_are_gated() {
        let (p, out) = play(Player::new("Ada"), "unused.json", "battle\nmini\ndance\n");
        assert_eq!(out.matches("That action is not available here.").count(), 3);
        assert_eq!(p.location, Location::Town);
    }

    #[test]
    fn travel_prompts_for_destination() {
        let (p, out) = play(Player::new("Ada"), "unused.json", "travel\nschool\nstatus\n");
        assert!(out.contains("Available locations:\n- Town\n- School\n"));
        assert!(out.contains("You travel to School."));
        assert!(out.contains("[Lv 1]"));
        assert_eq!(p.location, Location::School);
    }

    #[test]
    fn quit_with_save_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("savegame.json");
        let path = path.to_str().unwrap();
        let (p, out) = play(Player::new("Ada"), path, "quests\nquit\ny\n");
        assert!(out.contains("No active quests."));
        assert!(out.contains("Game saved."));
        assert!(out.ends_with("Farewell.\n"));
        assert_eq!(load_game(path).unwrap(), Some(p));
    }

    #[test]
    fn save_failure_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("missing_dir").join("save.json");
        let (_, out) = play(Player::new("Ada"), bad.to_str().unwrap(), "save\nhelp\n");
        assert!(out.contains("Could not save the game"));
        assert!(out.contains("Travel opens available locations"));
    }

    #[test]
    fn practice_with_inline_filters_skips_prompts() {
        let mut p = Player::new("Ada");
        p.location = Location::School;
        // The only easy fractions question has "2/3" as choice 1, a wrong answer.
        let (p, out) = play(p, "unused.json", "practice fractions 1\n1\n");
        assert!(!out.contains("Topic ("));
        assert!(out.contains("You answered 0/1 correctly."));
        assert_eq!(p.kp, 0);
    }
}
