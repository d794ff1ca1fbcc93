use std::fmt;

use tracing::{debug, trace};

use crate::{
  config::ArenaConfig,
  error::ArenaError,
  policy::Policy,
  region::{AllocatedRegion, FreeRegion, Region},
};

/// Space accounting for an [`Arena`] at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
  pub total: usize,
  pub free: usize,
  pub allocated: usize,
  pub free_regions: usize,
  pub allocated_regions: usize,
  pub largest_free: usize,
}

impl Usage {
  /// Share of free space that lies outside the largest free block.
  /// `0.0` when the free space is a single block or nothing is free.
  pub fn fragmentation(&self) -> f64 {
    if self.free == 0 {
      return 0.0;
    }
    1.0 - self.largest_free as f64 / self.free as f64
  }
}

/// A fixed address range `[0, N)` partitioned into free and allocated regions.
///
/// Both lists are kept sorted by start address. Free regions are coalesced after
/// every free, so no two of them are ever adjacent.
#[derive(Debug, Clone)]
pub struct Arena {
  total: usize,
  policy: Policy,
  free: Vec<FreeRegion>,
  allocated: Vec<AllocatedRegion>,
}

impl Arena {
  /// Creates an arena with a single free region spanning `[0, total)`.
  pub fn new(total: usize) -> Result<Self, ArenaError> {
    let mut arena = Self {
      total: 0,
      policy: Policy::default(),
      free: Vec::new(),
      allocated: Vec::new(),
    };
    arena.initialize(total)?;
    Ok(arena)
  }

  pub fn from_config(config: &ArenaConfig) -> Result<Self, ArenaError> {
    let mut arena = Self::new(config.total_size)?;
    arena.set_policy(config.policy);
    Ok(arena)
  }

  /// Drops every region and starts over with one free region of `total` units.
  /// The placement policy is kept.
  pub fn initialize(
    &mut self,
    total: usize,
  ) -> Result<(), ArenaError> {
    if total == 0 {
      return Err(ArenaError::InvalidArgument("arena size must be positive".into()));
    }

    self.total = total;
    self.free.clear();
    self.allocated.clear();
    self.free.push(FreeRegion::new(0, total));

    debug!(total, "arena initialized");
    Ok(())
  }

  pub fn total(&self) -> usize {
    self.total
  }

  pub fn policy(&self) -> Policy {
    self.policy
  }

  /// Takes effect on the next [`allocate`](Self::allocate) call.
  pub fn set_policy(
    &mut self,
    policy: Policy,
  ) {
    debug!(%policy, "placement policy changed");
    self.policy = policy;
  }

  /// Places `size` units for `owner` and returns the start address.
  ///
  /// The chosen free block is consumed from its low end. Nothing changes when
  /// an error is returned.
  pub fn allocate(
    &mut self,
    size: usize,
    owner: &str,
  ) -> Result<usize, ArenaError> {
    if size == 0 {
      return Err(ArenaError::InvalidArgument("allocation size must be positive".into()));
    }
    if owner.is_empty() {
      return Err(ArenaError::InvalidArgument("owner name must not be empty".into()));
    }
    if self.position_of(owner).is_some() {
      return Err(ArenaError::OwnerInUse(owner.to_string()));
    }

    let Some(index) = self.policy.select(&self.free, size) else {
      let largest_free = self.largest_free();
      debug!(size, owner, largest_free, policy = %self.policy, "allocation rejected");
      return Err(ArenaError::OutOfMemory {
        requested: size,
        largest_free,
      });
    };

    let block = &mut self.free[index];
    trace!(start = block.start(), length = block.length(), "selected free block");

    let start = block.start();
    if block.length() == size {
      self.free.remove(index);
    } else {
      block.shrink_front(size);
    }

    let at = self.allocated.partition_point(|a| a.start() < start);
    self.allocated.insert(at, AllocatedRegion::new(start, size, owner));

    debug!(start, size, owner, policy = %self.policy, "memory allocated");
    Ok(start)
  }

  /// Releases the region held by `owner` and coalesces the free list.
  pub fn free(
    &mut self,
    owner: &str,
  ) -> Result<Region, ArenaError> {
    let index = self
      .position_of(owner)
      .ok_or_else(|| ArenaError::NotFound(owner.to_string()))?;

    let released = self.allocated.remove(index).region;
    self.free.push(FreeRegion::new(released.start, released.length));
    self.merge();

    debug!(start = released.start, length = released.length, owner, "memory recycled");
    Ok(released)
  }

  /// Sorts the free list and joins every pair of touching free regions.
  /// Running it again on the result changes nothing.
  pub fn merge(&mut self) {
    if self.free.is_empty() {
      return;
    }

    self.free.sort_unstable_by_key(FreeRegion::start);

    let before = self.free.len();
    let mut merged: Vec<FreeRegion> = Vec::with_capacity(before);

    for block in self.free.drain(..) {
      match merged.last_mut() {
        Some(last) if last.region.touches(&block.region) => {
          last.region.length += block.length();
        }
        _ => merged.push(block),
      }
    }

    self.free = merged;

    if self.free.len() != before {
      trace!(before, after = self.free.len(), "free regions coalesced");
    }
  }

  /// Free regions in ascending address order.
  pub fn free_regions(&self) -> &[FreeRegion] {
    &self.free
  }

  /// Allocated regions in ascending address order.
  pub fn allocated_regions(&self) -> &[AllocatedRegion] {
    &self.allocated
  }

  /// `(start, length)` of every free region, ascending by start.
  pub fn snapshot_free(&self) -> Vec<(usize, usize)> {
    self
      .free
      .iter()
      .map(|block| (block.start(), block.length()))
      .collect()
  }

  /// `(start, length, owner)` of every allocated region, ascending by start.
  pub fn snapshot_allocated(&self) -> Vec<(usize, usize, String)> {
    self
      .allocated
      .iter()
      .map(|block| (block.start(), block.length(), block.owner.clone()))
      .collect()
  }

  pub fn find(
    &self,
    owner: &str,
  ) -> Option<&AllocatedRegion> {
    self.position_of(owner).map(|index| &self.allocated[index])
  }

  pub fn usage(&self) -> Usage {
    let free: usize = self.free.iter().map(FreeRegion::length).sum();
    let allocated: usize = self.allocated.iter().map(AllocatedRegion::length).sum();

    Usage {
      total: self.total,
      free,
      allocated,
      free_regions: self.free.len(),
      allocated_regions: self.allocated.len(),
      largest_free: self.largest_free(),
    }
  }

  /// Verifies that the regions tile `[0, total)` exactly, that no two free
  /// regions touch and that owner names are unique.
  pub fn check_invariants(&self) -> Result<(), ArenaError> {
    let corrupted = |message: String| Err(ArenaError::Corrupted(message));

    if !self.free.is_sorted_by_key(FreeRegion::start) {
      return corrupted("free list is not sorted by start".into());
    }
    if !self.allocated.is_sorted_by_key(AllocatedRegion::start) {
      return corrupted("allocated list is not sorted by start".into());
    }

    for pair in self.free.windows(2) {
      if pair[0].region.touches(&pair[1].region) {
        return corrupted(format!("free regions {} and {} are adjacent", pair[0].region, pair[1].region));
      }
    }

    for (i, block) in self.allocated.iter().enumerate() {
      if self.allocated[i + 1..].iter().any(|other| other.owner == block.owner) {
        return corrupted(format!("owner `{}` appears twice", block.owner));
      }
    }

    let mut regions: Vec<(Region, bool)> = self
      .free
      .iter()
      .map(|block| (block.region, true))
      .chain(self.allocated.iter().map(|block| (block.region, false)))
      .collect();
    regions.sort_unstable_by_key(|(region, _)| region.start);

    let mut cursor = 0;
    for (region, _) in &regions {
      if region.length == 0 {
        return corrupted(format!("empty region at {}", region.start));
      }
      if region.start < cursor {
        return corrupted(format!("region {} overlaps its predecessor", region));
      }
      if region.start > cursor {
        return corrupted(format!("gap [{}, {})", cursor, region.start));
      }
      cursor = region.end();
    }

    if cursor != self.total {
      return corrupted(format!("regions cover [0, {}) instead of [0, {})", cursor, self.total));
    }

    Ok(())
  }

  fn position_of(
    &self,
    owner: &str,
  ) -> Option<usize> {
    self.allocated.iter().position(|block| block.owner == owner)
  }

  fn largest_free(&self) -> usize {
    self.free.iter().map(FreeRegion::length).max().unwrap_or(0)
  }
}

impl fmt::Display for Arena {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    writeln!(f, "Free Area Table ({})", self.policy)?;
    writeln!(f, "{:>8} {:>8}  {}", "Start", "Length", "Status")?;
    for block in &self.free {
      writeln!(f, "{:>8} {:>8}  Free", block.start(), block.length())?;
    }

    writeln!(f, "Allocated Table")?;
    writeln!(f, "{:>8} {:>8}  {}", "Start", "Length", "Name")?;
    for block in &self.allocated {
      writeln!(f, "{:>8} {:>8}  {}", block.start(), block.length(), block.owner)?;
    }

    let usage = self.usage();
    write!(
      f,
      "used {}/{} in {} block(s), {} free block(s), largest free {}, fragmentation {:.2}",
      usage.allocated,
      usage.total,
      usage.allocated_regions,
      usage.free_regions,
      usage.largest_free,
      usage.fragmentation()
    )
  }
}
