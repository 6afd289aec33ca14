//! Text rendering: boxes, battle art, the world map, and one line (or block)
//! per `GameEvent`.

use crate::domain::{Location, Question};
use crate::player::Player;
use crate::protocol::GameEvent;
use crate::util::{fill_template, health_bar};

const ENCOUNTER_ART: &str = "      /\\_/\\\n     ( o.o )   A wild {name} appears!\n      > ^ <    HP {hp}";
const HIT_ART: &str = "   \\  |  /\n    .-*-.\n   /  |  \\\n   Direct hit!";
const MISS_ART: &str = "    .-.\n   (   )   Ouch!\n    `-'\n   / | \\";
const VICTORY_ART: &str = "    \\o/\n     |\n    / \\\n   Victory!";
const DEFEAT_ART: &str = "    x_x\n   /|_|\\\n    / \\\n   Defeat...";

const HEALTH_BAR_WIDTH: usize = 10;

/// Frame `lines` in a +---+ box. Empty input renders nothing.
pub fn boxed(lines: &[String]) -> String {
    let Some(width) = lines.iter().map(|l| l.chars().count()).max() else {
        return String::new();
    };
    let edge = format!("+{}+", "-".repeat(width + 2));
    let mut out = vec![edge.clone()];
    for line in lines {
        let pad = width - line.chars().count();
        out.push(format!("| {}{} |", line, " ".repeat(pad)));
    }
    out.push(edge);
    out.join("\n")
}

pub fn question_text(q: &Question) -> String {
    let mut out = vec![q.prompt.clone()];
    for (i, choice) in q.choices.iter().enumerate() {
        out.push(format!("  {}) {}", i + 1, choice));
    }
    out.join("\n")
}

pub fn location_header(player: &Player) -> String {
    let loc = player.location;
    format!(
        "\nLocation: {} | Level {} | KP {} | HP {} | Coins {}\n{}\nActions: {}",
        loc,
        player.level,
        player.kp,
        player.hp,
        player.coins,
        loc.description(),
        loc.actions().join(", ")
    )
}

fn quest_lines(player: &Player) -> Vec<String> {
    player
        .active_quests
        .iter()
        .map(|q| {
            format!(
                "{} | Topic: {} | Progress {}/{} in {}/{} attempts",
                q.name, q.topic, q.correct, q.correct_needed, q.attempts, q.target
            )
        })
        .collect()
}

pub fn quests_panel(player: &Player) -> String {
    if player.active_quests.is_empty() {
        return boxed(&["No active quests.".to_string()]);
    }
    let mut lines = vec!["Active quests:".to_string()];
    lines.extend(quest_lines(player));
    boxed(&lines)
}

pub fn status_panel(player: &Player) -> String {
    let mut lines: Vec<String> = ["  O  ", " /|\\ ", " / \\ "].iter().map(|s| s.to_string()).collect();
    lines.push(format!("[Lv {}]", player.level));
    lines.push(player.describe());
    if !player.active_quests.is_empty() {
        lines.push("Active quests:".into());
        lines.extend(quest_lines(player));
    }
    boxed(&lines)
}

fn map_label(player: &Player, loc: Location) -> String {
    if !loc.is_unlocked_at(player.level) {
        format!("{} (L{}+)", loc, loc.min_level())
    } else if player.location == loc {
        format!("{} [You]", loc)
    } else {
        loc.to_string()
    }
}

fn map_icon(loc: Location) -> [&'static str; 3] {
    match loc {
        Location::Town => ["  /\\  ", " /__\\ ", " |[]| "],
        Location::School => ["  __  ", " /__\\ ", " |__| "],
        Location::Arcade => [" .--. ", " |==| ", " '--' "],
        Location::Arena => [" /==\\ ", " |||| ", " \\__/ "],
    }
}

pub fn world_map(player: &Player) -> String {
    let indent = " ".repeat(13);
    let stacked = |loc: Location, lines: &mut Vec<String>| {
        for row in map_icon(loc) {
            lines.push(format!("{indent}{row}"));
        }
        lines.push(format!("{indent}{}", map_label(player, loc)));
    };
    let rule = "=".repeat(34);
    let mut lines = vec!["World Map".to_string(), rule.clone()];
    stacked(Location::Arena, &mut lines);
    lines.push(format!("{}|", " ".repeat(16)));
    let (school, arcade) = (map_icon(Location::School), map_icon(Location::Arcade));
    for i in 0..3 {
        lines.push(format!("{}     {}", school[i], arcade[i]));
    }
    lines.push(format!(
        "{} -- {}",
        map_label(player, Location::School),
        map_label(player, Location::Arcade)
    ));
    lines.push(format!("{}|", " ".repeat(16)));
    stacked(Location::Town, &mut lines);
    lines.push(rule);
    boxed(&lines)
}

pub fn travel_options(player: &Player) -> String {
    let mut out = vec!["Available locations:".to_string()];
    out.extend(
        Location::ALL
            .into_iter()
            .filter(|l| l.is_unlocked_at(player.level))
            .map(|l| format!("- {}", l)),
    );
    out.join("\n")
}

pub fn help_text() -> &'static str {
    "Type one of the actions listed for this location.\n\
     Travel opens available locations; quests show your progress.\n\
     Shortcuts: 'practice <topic> <1-3>', 'travel <place>'."
}

/// Human-readable text for one event.
pub fn event_text(event: &GameEvent) -> String {
    match event {
        GameEvent::LevelUp { level } => format!("Level up! You are now Level {}.", level),
        GameEvent::LocationUnlocked { location } => format!("Unlocked: {}.", location),
        GameEvent::QuestOffered { name } => format!("The elder offers you a quest scroll: '{}'.", name),
        GameEvent::QuestAccepted { name } => format!("Quest accepted: {}", name),
        GameEvent::QuestAlreadyActive { .. } => "You already have that quest.".into(),
        GameEvent::NoQuestsAvailable => "No quests available yet.".into(),
        GameEvent::QuestCompleted { name, kp, coins } => {
            format!("Quest complete: {} (+{} KP, +{} coins)", name, kp, coins)
        }
        GameEvent::NoQuestions => "No questions available for that topic/difficulty.".into(),
        GameEvent::AnswerCorrect { kp } => format!("Correct! +{} KP.", kp),
        GameEvent::AnswerWrong => "Incorrect.".into(),
        GameEvent::PracticeSummary { correct, total } => {
            format!("You answered {}/{} correctly.", correct, total)
        }
        GameEvent::MiniGameWon { kp } => format!("Mini-game win! +{} KP.", kp),
        GameEvent::MiniGameLost => "Mini-game loss. Try again.".into(),
        GameEvent::BattleStarted { beastie, hp } => {
            fill_template(ENCOUNTER_ART, &[("name", beastie.as_str()), ("hp", &hp.to_string())])
        }
        GameEvent::BattleHit { kp } => format!("{}\nKP +{}.", HIT_ART, kp),
        GameEvent::BattleMiss { damage } => format!("{}\nYou are hit! -{} HP.", MISS_ART, damage),
        GameEvent::BeastieHp { beastie, hp, max_hp } => format!(
            "{} HP {}/{} {}",
            beastie,
            hp,
            max_hp,
            health_bar(*hp, *max_hp, HEALTH_BAR_WIDTH)
        ),
        GameEvent::BeastieFled => "No questions for this Beastie. It flees.".into(),
        GameEvent::Victory { beastie, coins } => {
            format!("{}\n{} defeated! You earn {} coins.", VICTORY_ART, beastie, coins)
        }
        GameEvent::Defeat { home, hp } => {
            format!("{}\nYou collapse and return to {} with {} HP.", DEFEAT_ART, home, hp)
        }
        GameEvent::Travelled { location } => format!("You travel to {}.", location),
        GameEvent::LocationLocked { .. } => "That location is locked by level.".into(),
        GameEvent::UnknownLocation { .. } => "Unknown location.".into(),
        GameEvent::ActionUnavailable { .. } => "That action is not available here.".into(),
        GameEvent::Saved { .. } => "Game saved.".into(),
        GameEvent::SaveFailed { message } => format!("Could not save the game: {}", message),
    }
}
