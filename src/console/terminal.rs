//! `Frontend` over any line reader and writer (stdin/stdout in the binary,
//! byte buffers in tests).

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::console::render::{event_text, question_text};
use crate::domain::Question;
use crate::protocol::{Frontend, GameEvent};

pub struct Terminal<R, W> {
  input: R,
  output: W,
  closed: bool,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
  pub fn new(input: R, output: W) -> Self {
    Self { input, output, closed: false }
  }

  pub fn say(&mut self, text: &str) {
    if let Err(e) = writeln!(self.output, "{}", text) {
      warn!(target: "quiz_quest", error = %e, "Console write failed");
    }
  }

  /// Print `prompt` and read one trimmed line. `None` on end-of-file.
  pub fn read_line(&mut self, prompt: &str) -> Option<String> {
    if self.closed {
      return None;
    }
    let _ = write!(self.output, "{}", prompt);
    let _ = self.output.flush();
    let mut line = String::new();
    match self.input.read_line(&mut line) {
      Ok(0) => {
        debug!(target: "quiz_quest", "Input closed");
        self.closed = true;
        None
      }
      Ok(_) => Some(line.trim().to_string()),
      Err(e) => {
        warn!(target: "quiz_quest", error = %e, "Console read failed");
        self.closed = true;
        None
      }
    }
  }

  #[cfg(test)]
  pub fn into_output(self) -> W {
    self.output
  }
}

impl<R: BufRead, W: Write> Frontend for Terminal<R, W> {
  /// Re-prompts until a choice number is entered. A closed input counts as a
  /// wrong answer so the calling activity still terminates.
  fn ask(&mut self, question: &Question) -> bool {
    self.say(&question_text(question));
    let max = question.choices.len();
    loop {
      let Some(raw) = self.read_line(&format!("Answer 1-{}: ", max)) else {
        return false;
      };
      match raw.parse::<usize>() {
        Ok(n) if (1..=max).contains(&n) => return question.is_correct_choice(n - 1),
        _ => self.say("Please enter a valid choice number."),
      }
    }
  }

  fn confirm(&mut self, prompt: &str) -> bool {
    self
      .read_line(&format!("{} (y/n) ", prompt))
      .map_or(false, |a| a.eq_ignore_ascii_case("y"))
  }

  fn emit(&mut self, event: GameEvent) {
    self.say(&event_text(&event));
  }
}
