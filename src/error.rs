use thiserror::Error;

/// Errors reported by [`Arena`](crate::Arena) operations.
///
/// Every failing operation leaves the arena exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArenaError {
  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  #[error("owner `{0}` already holds a live region")]
  OwnerInUse(String),

  #[error("out of memory: requested {requested}, largest free block is {largest_free}")]
  OutOfMemory { requested: usize, largest_free: usize },

  #[error("no allocated region owned by `{0}`")]
  NotFound(String),

  #[error("arena invariant violated: {0}")]
  Corrupted(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config: {0}")]
  Io(#[from] std::io::Error),

  #[error("failed to parse config: {0}")]
  Parse(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown placement policy `{0}` (expected first, best or worst)")]
pub struct ParsePolicyError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
  #[error("unknown command `{0}`")]
  Unknown(String),

  #[error("usage: {0}")]
  Usage(&'static str),

  #[error("invalid size `{0}`")]
  InvalidSize(String),

  #[error(transparent)]
  Policy(#[from] ParsePolicyError),

  #[error(transparent)]
  Arena(#[from] ArenaError),
}
