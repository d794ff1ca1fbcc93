//! fitarena - replay allocation commands against a simulated main memory.

use std::{
  fs::File,
  io::{self, BufRead, BufReader, IsTerminal, Write},
  path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use fitarena::{
  Arena, ArenaConfig, Policy,
  command::{Command, HELP, Outcome},
  logger::{self, LogLevel},
};
use tracing::{info, warn};

/// Contiguous main-memory allocation simulator (first/best/worst fit)
#[derive(Parser, Debug)]
#[command(name = "fitarena")]
#[command(version, about, long_about = None)]
struct Args {
  /// RON configuration file
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Arena size, overrides the config file
  #[arg(short, long)]
  size: Option<usize>,

  /// Placement policy: first, best or worst
  #[arg(short, long)]
  policy: Option<Policy>,

  /// Read commands from a file instead of stdin
  #[arg(long, value_name = "FILE")]
  script: Option<PathBuf>,

  /// Enable debug logging
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> Result<()> {
  let args = Args::parse();

  let mut config = match &args.config {
    Some(path) => ArenaConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
    None => ArenaConfig::default(),
  };
  if let Some(size) = args.size {
    config.total_size = size;
  }
  if let Some(policy) = args.policy {
    config.policy = policy;
  }
  if args.verbose {
    config.log_level = LogLevel::Debug;
  }

  logger::init(config.log_level);

  let mut arena = Arena::from_config(&config).context("creating arena")?;
  info!(total = arena.total(), policy = %arena.policy(), "arena ready");

  let input: Box<dyn BufRead> = match &args.script {
    Some(path) => Box::new(BufReader::new(
      File::open(path).with_context(|| format!("opening {}", path.display()))?,
    )),
    None => Box::new(io::stdin().lock()),
  };
  let interactive = args.script.is_none() && io::stdin().is_terminal();

  run(&mut arena, input, interactive)
}

fn run(
  arena: &mut Arena,
  input: Box<dyn BufRead>,
  interactive: bool,
) -> Result<()> {
  let mut stdout = io::stdout().lock();

  if interactive {
    writeln!(stdout, "{HELP}")?;
  }

  for line in input.lines() {
    let line = line.context("reading command")?;

    let command = match Command::parse_line(&line) {
      Ok(Some(command)) => command,
      Ok(None) => continue,
      Err(err) => {
        writeln!(stdout, "error: {err}")?;
        continue;
      }
    };

    match command.execute(arena) {
      Ok(Outcome::Quit) => break,
      Ok(outcome) => report(&mut stdout, &outcome)?,
      Err(err) => {
        warn!("{err}");
        writeln!(stdout, "error: {err}")?;
      }
    }

    debug_assert!(arena.check_invariants().is_ok());
  }

  Ok(())
}

fn report(
  out: &mut impl Write,
  outcome: &Outcome,
) -> io::Result<()> {
  match outcome {
    Outcome::Allocated { start, size, owner } => {
      writeln!(out, "Memory Allocated: {owner} at {start} with size {size}")
    }
    Outcome::Freed { region, owner } => writeln!(out, "Memory Recycled: {owner} {region}"),
    Outcome::PolicyChanged(policy) => writeln!(out, "Allocation method: {policy}"),
    Outcome::Report(table) => writeln!(out, "{table}"),
    Outcome::Reset(total) => writeln!(out, "Arena reset to [0, {total})"),
    Outcome::Help => writeln!(out, "{HELP}"),
    Outcome::Quit => Ok(()),
  }
}
