//! # fitarena - Contiguous Free-Space Allocation Simulator
//!
//! This crate models how an operating system hands out **main memory** from a
//! fixed address range, using the three classic placement policies and
//! reclaiming freed blocks with adjacent-block coalescing.
//!
//! ## Overview
//!
//! The arena is a fixed range `[0, N)` split into free and allocated regions:
//!
//! ```text
//!   Arena [0, 1500):
//!
//!   ┌──────────┬──────┬──────────┬──────────────┬─────────────────────────┐
//!   │ A  (300) │ free │ B  (300) │  free (300)  │       C  (500)          │
//!   └──────────┴──────┴──────────┴──────────────┴─────────────────────────┘
//!   0         300    400        700            1000                    1500
//!
//!   Free list:      [(300, 100), (700, 300)]      sorted by start
//!   Allocated list: [(0, 300, A), (400, 300, B), (1000, 500, C)]
//! ```
//!
//! Together the two lists always tile `[0, N)` exactly: no gaps, no overlaps,
//! and no two free regions side by side.
//!
//! ## Placement Policies
//!
//! ```text
//!   Request: 40 units        free list: (0,100) (200,50) (400,300)
//!
//!   FirstFit  → (0,100)      lowest address that fits
//!   BestFit   → (200,50)     smallest block that fits
//!   WorstFit  → (400,300)    largest block that fits
//!
//!   Ties between equal blocks go to the lowest address.
//! ```
//!
//! The request is carved from the low end of the chosen block. A block that
//! fits exactly is removed from the free list.
//!
//! ## Coalescing
//!
//! ```text
//!   before free(B):   │ free │ B │ free │
//!   after  free(B):   │       free       │   one region, not three
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   fitarena
//!   ├── arena    - Arena: allocate / free / merge / snapshots
//!   ├── policy   - Policy and candidate selection
//!   ├── region   - Region, FreeRegion, AllocatedRegion
//!   ├── command  - text commands for the fitarena binary
//!   ├── config   - RON configuration
//!   ├── logger   - tracing subscriber setup
//!   └── error    - error types
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use fitarena::{Arena, ArenaError, Policy};
//!
//! let mut arena = Arena::new(1500).unwrap();
//!
//! assert_eq!(arena.allocate(300, "A"), Ok(0));
//! assert_eq!(arena.snapshot_free(), vec![(300, 1200)]);
//!
//! arena.set_policy(Policy::WorstFit);
//! assert!(matches!(arena.allocate(5000, "B"), Err(ArenaError::OutOfMemory { .. })));
//!
//! arena.free("A").unwrap();
//! assert_eq!(arena.snapshot_free(), vec![(0, 1500)]);
//! ```
//!
//! ## Limitations
//!
//! - **Single-threaded only**: the arena is a plain value, wrap it yourself
//! - **Fixed size**: the range is chosen at initialization
//! - **No compaction**: only adjacent free blocks are merged

pub mod arena;
pub mod command;
pub mod config;
pub mod error;
pub mod logger;
pub mod policy;
pub mod region;

pub use arena::{Arena, Usage};
pub use config::ArenaConfig;
pub use error::{ArenaError, CommandError, ConfigError, ParsePolicyError};
pub use policy::Policy;
pub use region::{AllocatedRegion, FreeRegion, Region};
