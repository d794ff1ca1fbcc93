use std::io::Read;

use fitarena::{Arena, ArenaError, Policy, logger};

/// Waits until the user presses ENTER.
/// Gives time to read each table before the next step mutates the arena.
fn block_until_enter_pressed() {
  println!("\n>>> Press ENTER to continue...");
  let _ = std::io::stdin().bytes().next();
}

fn print_arena(
  label: &str,
  arena: &Arena,
) {
  println!("\n[{}]\n{}", label, arena);
}

fn main() -> Result<(), ArenaError> {
  logger::init(logger::LogLevel::Debug);

  // One free block covering [0, 1500).
  let mut arena = Arena::new(1500)?;
  print_arena("start", &arena);
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 1) Fill the arena with a few processes under first-fit.
  //    Each request is carved from the low end of the first block that fits.
  // --------------------------------------------------------------------
  for (owner, size) in [("A", 100), ("B", 100), ("C", 50), ("D", 150), ("E", 300)] {
    let start = arena.allocate(size, owner)?;
    println!("[1] {} -> start {}", owner, start);
  }
  print_arena("after first-fit allocations", &arena);
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 2) Punch holes: free A, C and E.
  //    E borders the trailing free space, so it merges into it.
  // --------------------------------------------------------------------
  for owner in ["A", "C", "E"] {
    let region = arena.free(owner)?;
    println!("[2] freed {} {}", owner, region);
  }
  print_arena("holes of 100, 50 and 1100", &arena);
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 3) Ask for 40 units under each policy and undo it again.
  // --------------------------------------------------------------------
  for policy in Policy::ALL {
    arena.set_policy(policy);
    let start = arena.allocate(40, "X")?;
    println!("[3] {:<9} places 40 units at {}", policy, start);
    arena.free("X")?;
  }
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 4) Request more than any single hole can hold.
  // --------------------------------------------------------------------
  arena.allocate(1000, "F")?;
  match arena.allocate(200, "G") {
    Err(err) => println!("\n[4] {}", err),
    Ok(start) => println!("\n[4] unexpectedly placed G at {}", start),
  }
  print_arena("out of memory leaves the tables unchanged", &arena);
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 5) Free everything. Coalescing leaves a single free block again.
  // --------------------------------------------------------------------
  for owner in ["B", "D", "F"] {
    arena.free(owner)?;
  }
  print_arena("end", &arena);
  arena.check_invariants()?;

  Ok(())
}
