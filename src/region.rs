use std::fmt;

/// A half-open address interval `[start, start + length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
  pub start: usize,
  pub length: usize,
}

impl Region {
  pub fn new(
    start: usize,
    length: usize,
  ) -> Self {
    Self { start, length }
  }

  /// One past the last address covered by the region.
  pub fn end(&self) -> usize {
    self.start + self.length
  }

  /// True when `other` starts exactly where `self` ends.
  pub fn touches(
    &self,
    other: &Region,
  ) -> bool {
    self.end() == other.start
  }

  pub fn overlaps(
    &self,
    other: &Region,
  ) -> bool {
    self.start < other.end() && other.start < self.end()
  }
}

impl fmt::Display for Region {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "[{}, {})", self.start, self.end())
  }
}

/// An unallocated region. Carries no owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FreeRegion {
  pub region: Region,
}

impl FreeRegion {
  pub fn new(
    start: usize,
    length: usize,
  ) -> Self {
    Self {
      region: Region::new(start, length),
    }
  }

  pub fn start(&self) -> usize {
    self.region.start
  }

  pub fn length(&self) -> usize {
    self.region.length
  }

  pub fn end(&self) -> usize {
    self.region.end()
  }

  /// Cuts `size` units off the low end. The caller guarantees `size < length`.
  pub(crate) fn shrink_front(
    &mut self,
    size: usize,
  ) {
    self.region.start += size;
    self.region.length -= size;
  }
}

/// A region handed out to a named owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AllocatedRegion {
  pub region: Region,
  pub owner: String,
}

impl AllocatedRegion {
  pub fn new(
    start: usize,
    length: usize,
    owner: impl Into<String>,
  ) -> Self {
    Self {
      region: Region::new(start, length),
      owner: owner.into(),
    }
  }

  pub fn start(&self) -> usize {
    self.region.start
  }

  pub fn length(&self) -> usize {
    self.region.length
  }

  pub fn end(&self) -> usize {
    self.region.end()
  }

  pub fn owner(&self) -> &str {
    &self.owner
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_region_bounds() {
    let region = Region::new(300, 200);

    assert_eq!(region.end(), 500);
    assert!(region.touches(&Region::new(500, 10)));
    assert!(!region.touches(&Region::new(501, 10)));
    assert_eq!(region.to_string(), "[300, 500)");
  }

  #[test]
  fn test_region_overlap() {
    let region = Region::new(100, 100);

    assert!(region.overlaps(&Region::new(150, 100)));
    assert!(region.overlaps(&Region::new(0, 101)));
    assert!(!region.overlaps(&Region::new(200, 50)));
    assert!(!region.overlaps(&Region::new(0, 100)));
  }

  #[test]
  fn test_shrink_front() {
    let mut free = FreeRegion::new(0, 1500);
    free.shrink_front(300);

    assert_eq!((free.start(), free.length()), (300, 1200));
  }
}
