//! # Zarsian Economy Engine
//!
//! Inventory and crafting transaction engine for the Zars P14a mining
//! colony: a slotted, stack-limited container with atomic multi-item
//! operations, a recipe processor with all-or-nothing batch semantics,
//! a rate-bounded mining resolver, and transactional tool upgrades.
//!
//! ## Design Principles
//!
//! 1. **Transactions or nothing** - a failed process/upgrade/mine leaves
//!    the inventory exactly as it found it (snapshot rollback).
//! 2. **Explicit catalog** - no global registries; one immutable
//!    [`Catalog`] built at startup and passed by reference.
//! 3. **Injected randomness** - drop yields take a caller-supplied `Rng`
//!    so every roll is reproducible under a seed.
//! 4. **External configuration** - balance data in TOML, validated
//!    through the same paths as the built-in catalog.
//!
//! ## Example
//!
//! ```
//! use zarsian_economy::{BatchAmount, Catalog, Game};
//!
//! let mut game = Game::new(Catalog::standard(), "Riley")
//!     .expect("standard catalog has tools")
//!     .with_seed(42);
//! let trip = game.mine("coal", BatchAmount::Exact(3)).expect("coal is tier 0");
//! assert!(trip.yield_total >= 3);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod config;
pub mod crafting;
pub mod error;
pub mod inventory;
pub mod mining;
pub mod pacing;
pub mod player;
pub mod session;
pub mod upgrade;

pub use catalog::{Block, Catalog, DropRates, Ingredient, Item, MiningLevel, Recipe, Tool};
pub use config::{GameConfig, InventoryConfig};
pub use crafting::{BatchAmount, ProcessOutcome};
pub use error::{GameError, GameResult, Shortfall};
pub use inventory::{Inventory, InventorySnapshot, Slot};
pub use mining::MineOutcome;
pub use pacing::Pacing;
pub use player::Player;
pub use session::{Game, InventoryReport, InventoryRow, StatusReport};
pub use upgrade::UpgradeOutcome;
