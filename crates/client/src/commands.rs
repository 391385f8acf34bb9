//! Line-oriented command parsing for the headless client.
//!
//! Each stdin line maps to one [`Command`]. Movement uses `w`/`a`/`s`/`d`,
//! dialogue options are picked with their 1-based number.
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, bail};
use quest_core::{CardId, CardinalDirection, WorldInput};

/// High-level outcome of parsing one input line.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Start,
    Scan(PathBuf),
    Input(WorldInput),
    Arm(CardId),
    Collect,
    Quit,
    Status,
    Cards,
    Help,
    Exit,
    /// Blank line.
    None,
}

pub const HELP: &str = "\
commands:
  start            begin the built-in campaign
  scan <file>      build a scenario from a photo or JSON file
  w a s d          move up, left, down, right
  e                talk to the NPC in range
  esc              close the dialogue
  1..9             pick a dialogue option
  use / ack        use the armed tool / put it away
  arm <card>       spend the reward on a card
  collect          dismiss the reward card
  cards            list collected cards
  status           show lives, coins, and score
  quit             back to the menu
  exit             leave the game";

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Command::None);
        };
        let arg = words.next();

        let command = match head.to_ascii_lowercase().as_str() {
            "start" => Command::Start,
            "scan" => {
                let path = arg.ok_or_else(|| anyhow!("usage: scan <file>"))?;
                Command::Scan(PathBuf::from(path))
            }
            "w" | "up" => Command::Input(WorldInput::Move(CardinalDirection::Up)),
            "s" | "down" => Command::Input(WorldInput::Move(CardinalDirection::Down)),
            "a" | "left" => Command::Input(WorldInput::Move(CardinalDirection::Left)),
            "d" | "right" => Command::Input(WorldInput::Move(CardinalDirection::Right)),
            "e" | "talk" => Command::Input(WorldInput::Interact),
            "esc" | "cancel" => Command::Input(WorldInput::Cancel),
            "use" => Command::Input(WorldInput::UseActiveTool),
            "ack" => Command::Input(WorldInput::AcknowledgeEffect),
            "arm" => {
                let raw = arg.ok_or_else(|| anyhow!("usage: arm <card>"))?;
                Command::Arm(parse_card_id(raw)?)
            }
            "collect" => Command::Collect,
            "quit" | "menu" => Command::Quit,
            "status" => Command::Status,
            "cards" => Command::Cards,
            "help" | "?" => Command::Help,
            "exit" => Command::Exit,
            other => match other.parse::<usize>() {
                Ok(choice @ 1..=9) => Command::Input(WorldInput::SelectOption(choice - 1)),
                _ => bail!("unknown command '{}', try 'help'", other),
            },
        };
        Ok(command)
    }
}

fn parse_card_id(raw: &str) -> Result<CardId> {
    raw.trim_start_matches('#')
        .parse()
        .map(CardId)
        .map_err(|_| anyhow!("invalid card id '{}'", raw))
}

/// Content type the analyzer receives for a file, guessed from its extension.
pub fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
