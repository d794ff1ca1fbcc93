use fitarena::{Arena, ArenaError, Policy, Region};

/// Builds an arena of `total` units whose free list is exactly `holes`.
fn arena_with_free(
  total: usize,
  holes: &[(usize, usize)],
) -> Arena {
  let mut arena = Arena::new(total).unwrap();
  let mut cursor = 0;

  for &(start, length) in holes {
    if start > cursor {
      arena.allocate(start - cursor, &format!("used@{cursor}")).unwrap();
    }
    arena.allocate(length, &format!("hole@{start}")).unwrap();
    cursor = start + length;
  }
  if cursor < total {
    arena.allocate(total - cursor, &format!("used@{cursor}")).unwrap();
  }
  for &(start, _) in holes {
    arena.free(&format!("hole@{start}")).unwrap();
  }

  assert_eq!(arena.snapshot_free(), holes.to_vec());
  arena
}

#[test]
fn first_fit_from_fresh_arena() {
  let mut arena = Arena::new(1500).unwrap();

  assert_eq!(arena.allocate(300, "A"), Ok(0));
  assert_eq!(arena.snapshot_free(), vec![(300, 1200)]);
  arena.check_invariants().unwrap();
}

#[test]
fn best_fit_picks_smallest_sufficient_block() {
  let mut arena = arena_with_free(1000, &[(0, 100), (200, 50), (400, 300)]);
  arena.set_policy(Policy::BestFit);

  assert_eq!(arena.allocate(40, "X"), Ok(200));
  assert_eq!(arena.snapshot_free(), vec![(0, 100), (240, 10), (400, 300)]);
  arena.check_invariants().unwrap();
}

#[test]
fn worst_fit_picks_largest_block() {
  let mut arena = arena_with_free(1000, &[(0, 100), (200, 50), (400, 300)]);
  arena.set_policy(Policy::WorstFit);

  assert_eq!(arena.allocate(40, "X"), Ok(400));
  assert_eq!(arena.snapshot_free(), vec![(0, 100), (200, 50), (440, 260)]);
  arena.check_invariants().unwrap();
}

#[test]
fn first_fit_on_same_list_takes_lowest() {
  let mut arena = arena_with_free(1000, &[(0, 100), (200, 50), (400, 300)]);

  assert_eq!(arena.allocate(40, "X"), Ok(0));
  assert_eq!(arena.snapshot_free(), vec![(40, 60), (200, 50), (400, 300)]);
}

#[test]
fn out_of_memory_under_every_policy() {
  let mut arena = arena_with_free(400, &[(0, 50)]);

  for policy in Policy::ALL {
    arena.set_policy(policy);
    let free_before = arena.snapshot_free();
    let allocated_before = arena.snapshot_allocated();

    let result = arena.allocate(100, "P");

    assert_eq!(result, Err(ArenaError::OutOfMemory {
      requested: 100,
      largest_free: 50
    }));
    assert_eq!(arena.snapshot_free(), free_before);
    assert_eq!(arena.snapshot_allocated(), allocated_before);
  }
}

#[test]
fn worst_fit_rejects_when_largest_is_too_small() {
  let mut arena = arena_with_free(1000, &[(0, 60), (500, 70)]);
  arena.set_policy(Policy::WorstFit);

  assert!(matches!(arena.allocate(71, "X"), Err(ArenaError::OutOfMemory { .. })));
  assert_eq!(arena.allocate(70, "X"), Ok(500));
  assert_eq!(arena.snapshot_free(), vec![(0, 60)]);
}

#[test]
fn freeing_neighbours_in_either_order_coalesces() {
  for order in [["A", "B"], ["B", "A"]] {
    let mut arena = Arena::new(1500).unwrap();
    arena.allocate(300, "A").unwrap();
    arena.allocate(300, "B").unwrap();
    arena.allocate(900, "C").unwrap();

    for owner in order {
      arena.free(owner).unwrap();
      arena.check_invariants().unwrap();
    }

    assert_eq!(arena.snapshot_free(), vec![(0, 600)]);
  }
}

#[test]
fn allocate_then_free_round_trips() {
  let mut arena = arena_with_free(1000, &[(0, 100), (200, 50), (400, 300)]);

  for policy in Policy::ALL {
    arena.set_policy(policy);
    let before = arena.snapshot_free();

    arena.allocate(40, "X").unwrap();
    assert_eq!(arena.free("X"), Ok(arena_region_of(policy)));

    assert_eq!(arena.snapshot_free(), before);
  }
}

fn arena_region_of(policy: Policy) -> Region {
  match policy {
    Policy::FirstFit => Region::new(0, 40),
    Policy::BestFit => Region::new(200, 40),
    Policy::WorstFit => Region::new(400, 40),
  }
}

#[test]
fn policy_switch_leaves_allocations_alone() {
  let mut arena = Arena::new(1500).unwrap();
  arena.allocate(300, "A").unwrap();
  let allocated = arena.snapshot_allocated();

  arena.set_policy(Policy::BestFit);
  arena.set_policy(Policy::WorstFit);

  assert_eq!(arena.snapshot_allocated(), allocated);
  assert_eq!(arena.policy(), Policy::WorstFit);
}

#[test]
fn independent_arenas_do_not_share_state() {
  let mut first = Arena::new(100).unwrap();
  let mut second = Arena::new(100).unwrap();
  second.set_policy(Policy::BestFit);

  first.allocate(60, "A").unwrap();

  assert_eq!(second.snapshot_free(), vec![(0, 100)]);
  assert_eq!(second.allocate(60, "A"), Ok(0));
  assert_eq!(first.policy(), Policy::FirstFit);
}

#[test]
fn snapshots_are_sorted_by_start() {
  let mut arena = Arena::new(1000).unwrap();
  arena.allocate(100, "A").unwrap();
  arena.allocate(100, "B").unwrap();
  arena.allocate(100, "C").unwrap();
  arena.free("A").unwrap();

  // Fills the hole at 0 after B and C were placed.
  arena.allocate(50, "D").unwrap();

  let starts: Vec<usize> = arena.snapshot_allocated().iter().map(|(start, _, _)| *start).collect();
  assert_eq!(starts, vec![0, 100, 200]);
  assert_eq!(arena.snapshot_free(), vec![(50, 50), (300, 700)]);
}
