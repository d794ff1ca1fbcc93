//! Line-oriented commands for driving an [`Arena`] from a terminal or script.
//!
//! ```text
//!   alloc 300 Process A     place 300 units for "Process A"
//!   free Process A          release them again
//!   policy best             switch to best-fit
//!   show                    print the free and allocated tables
//!   reset [size]            start over with one free block
//! ```

use std::str::FromStr;

use crate::{
  arena::Arena,
  error::CommandError,
  policy::Policy,
  region::Region,
};

pub const HELP: &str = "\
commands:
  alloc <size> <owner>   (a)          allocate <size> units for <owner>
  free <owner>           (f, recycle) release the region held by <owner>
  policy <first|best|worst> (p)       change the placement policy
  show                   (s)          print free and allocated tables
  reset [size]                        reinitialize the arena
  help                                show this text
  quit                   (exit, q)    leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  Alloc { size: usize, owner: String },
  Free { owner: String },
  Policy(Policy),
  Show,
  Reset(Option<usize>),
  Help,
  Quit,
}

/// What a successfully executed command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  Allocated { start: usize, size: usize, owner: String },
  Freed { region: Region, owner: String },
  PolicyChanged(Policy),
  Report(String),
  Reset(usize),
  Help,
  Quit,
}

impl Command {
  /// Parses one input line. Blank lines and `#` comments yield `Ok(None)`.
  pub fn parse_line(line: &str) -> Result<Option<Self>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
      return Ok(None);
    }
    line.parse().map(Some)
  }

  pub fn execute(
    self,
    arena: &mut Arena,
  ) -> Result<Outcome, CommandError> {
    let outcome = match self {
      Command::Alloc { size, owner } => {
        let start = arena.allocate(size, &owner)?;
        Outcome::Allocated { start, size, owner }
      }
      Command::Free { owner } => {
        let region = arena.free(&owner)?;
        Outcome::Freed { region, owner }
      }
      Command::Policy(policy) => {
        arena.set_policy(policy);
        Outcome::PolicyChanged(policy)
      }
      Command::Show => Outcome::Report(arena.to_string()),
      Command::Reset(size) => {
        let total = size.unwrap_or(arena.total());
        arena.initialize(total)?;
        Outcome::Reset(total)
      }
      Command::Help => Outcome::Help,
      Command::Quit => Outcome::Quit,
    };

    Ok(outcome)
  }
}

fn parse_size(word: &str) -> Result<usize, CommandError> {
  word.parse().map_err(|_| CommandError::InvalidSize(word.to_string()))
}

/// Joins the remaining words so owner names may contain spaces.
fn rest<'a>(words: impl Iterator<Item = &'a str>) -> Option<String> {
  let owner = words.collect::<Vec<_>>().join(" ");
  (!owner.is_empty()).then_some(owner)
}

impl FromStr for Command {
  type Err = CommandError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut words = s.split_whitespace();
    let Some(keyword) = words.next() else {
      return Err(CommandError::Unknown(String::new()));
    };

    match keyword.to_ascii_lowercase().as_str() {
      "alloc" | "allocate" | "a" => {
        let size = words.next().ok_or(CommandError::Usage("alloc <size> <owner>"))?;
        let size = parse_size(size)?;
        let owner = rest(words).ok_or(CommandError::Usage("alloc <size> <owner>"))?;
        Ok(Command::Alloc { size, owner })
      }
      "free" | "recycle" | "f" => {
        let owner = rest(words).ok_or(CommandError::Usage("free <owner>"))?;
        Ok(Command::Free { owner })
      }
      "policy" | "p" => {
        let name = words.next().ok_or(CommandError::Usage("policy <first|best|worst>"))?;
        let policy: Policy = name.parse()?;
        Ok(Command::Policy(policy))
      }
      "show" | "s" => Ok(Command::Show),
      "reset" => match words.next() {
        Some(size) => Ok(Command::Reset(Some(parse_size(size)?))),
        None => Ok(Command::Reset(None)),
      },
      "help" | "h" | "?" => Ok(Command::Help),
      "quit" | "exit" | "q" => Ok(Command::Quit),
      _ => Err(CommandError::Unknown(keyword.to_string())),
    }
  }
}
