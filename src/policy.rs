use std::{cmp::Reverse, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::ParsePolicyError, region::FreeRegion};

/// Placement policy used to pick a free region for the next allocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
  /// Lowest address that fits.
  #[default]
  FirstFit,
  /// Smallest region that fits, lowest address on ties.
  BestFit,
  /// Largest region that fits, lowest address on ties.
  WorstFit,
}

impl Policy {
  pub const ALL: [Policy; 3] = [Policy::FirstFit, Policy::BestFit, Policy::WorstFit];

  /// Returns the index of the chosen region in `free`, which must be sorted by
  /// start address. `None` when no region has `length >= size`.
  pub fn select(
    self,
    free: &[FreeRegion],
    size: usize,
  ) -> Option<usize> {
    let mut candidates = free
      .iter()
      .enumerate()
      .filter(|(_, block)| block.length() >= size);

    match self {
      Policy::FirstFit => candidates.next().map(|(index, _)| index),
      Policy::BestFit => candidates
        .min_by_key(|&(index, block)| (block.length(), index))
        .map(|(index, _)| index),
      Policy::WorstFit => candidates
        .min_by_key(|&(index, block)| (Reverse(block.length()), index))
        .map(|(index, _)| index),
    }
  }
}

impl fmt::Display for Policy {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    let name = match self {
      Policy::FirstFit => "first-fit",
      Policy::BestFit => "best-fit",
      Policy::WorstFit => "worst-fit",
    };
    f.write_str(name)
  }
}

impl FromStr for Policy {
  type Err = ParsePolicyError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "first" | "first-fit" | "firstfit" | "first_fit" => Ok(Policy::FirstFit),
      "best" | "best-fit" | "bestfit" | "best_fit" => Ok(Policy::BestFit),
      "worst" | "worst-fit" | "worstfit" | "worst_fit" => Ok(Policy::WorstFit),
      _ => Err(ParsePolicyError(s.to_string())),
    }
  }
}
