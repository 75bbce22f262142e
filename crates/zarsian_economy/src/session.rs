//! # Game Session
//!
//! The single-session facade the presentation layer talks to. A [`Game`]
//! owns the catalog, the player, the random source, and the pacing policy,
//! and exposes the command verbs (`mine`, `process`, `upgrade`, the
//! inventory/status queries) as plain method calls.
//!
//! One command is fully processed - simulated delays included - before the
//! next is accepted; there is no concurrency and no cancellation.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::{Catalog, Recipe, Tool};
use crate::crafting::{self, BatchAmount, ProcessOutcome};
use crate::error::{GameError, GameResult};
use crate::inventory::Inventory;
use crate::mining::{self, MineOutcome};
use crate::pacing::Pacing;
use crate::player::Player;
use crate::upgrade::{self, UpgradeOutcome};

/// One row of the inventory report: display name and total count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryRow {
    /// Item display name.
    pub name: String,
    /// Units held across all slots.
    pub count: u32,
}

/// Textual snapshot of the player's storage, sorted by item name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryReport {
    /// Per-item rows, ordered by display name.
    pub rows: Vec<InventoryRow>,
    /// Sum of all counts.
    pub total: u32,
    /// Wallet balance, formatted.
    pub money: String,
}

/// Snapshot of the player's identity and equipment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusReport {
    /// Player name.
    pub name: String,
    /// Equipped tool display name.
    pub tool: String,
    /// Equipped tool mining level, formatted.
    pub tool_level: String,
    /// Occupied / budget slots.
    pub slots_used: usize,
    /// Total slot budget.
    pub slots_max: usize,
}

/// A running single-player session.
#[derive(Debug)]
pub struct Game {
    catalog: Catalog,
    player: Player,
    rng: ChaCha8Rng,
    pacing: Pacing,
}

impl Game {
    /// Starts a session with the given catalog, equipping the weakest
    /// registered tool.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] when the catalog has no tools.
    pub fn new(catalog: Catalog, player_name: impl Into<String>) -> GameResult<Self> {
        Self::with_inventory(catalog, player_name, Inventory::standard())
    }

    /// Starts a session with a custom inventory (dimensions usually come
    /// from [`crate::config::InventoryConfig`]).
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] when the catalog has no tools.
    pub fn with_inventory(
        catalog: Catalog,
        player_name: impl Into<String>,
        inventory: Inventory,
    ) -> GameResult<Self> {
        let starting_tool = catalog
            .tools()
            .into_iter()
            .min_by(|a, b| {
                a.mining_level
                    .cmp(&b.mining_level)
                    .then_with(|| a.id.cmp(&b.id))
            })
            .map(|tool| tool.id.clone())
            .ok_or_else(|| GameError::InvalidConfig("catalog has no tools".to_string()))?;

        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);

        Ok(Self {
            catalog,
            player: Player::with_inventory(player_name, starting_tool, inventory),
            rng: ChaCha8Rng::seed_from_u64(seed),
            pacing: Pacing::Off,
        })
    }

    /// Reseeds the random source (deterministic replays and tests).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Sets the pacing policy.
    #[must_use]
    pub const fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Equips a tool directly, bypassing upgrade rules. Intended for
    /// session setup (e.g. starting with the instant test tool).
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownTool`] for unregistered IDs.
    pub fn equip(&mut self, tool_id: &str) -> GameResult<()> {
        if self.catalog.tool(tool_id).is_none() {
            return Err(GameError::UnknownTool(tool_id.to_string()));
        }
        self.player.equip(tool_id);
        Ok(())
    }

    /// The read-only catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// The equipped tool's catalog entry.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownTool`] if the equipped ID no longer
    /// resolves (cannot happen through the public surface).
    pub fn equipped_tool(&self) -> GameResult<&Tool> {
        self.catalog
            .tool(self.player.tool_id())
            .ok_or_else(|| GameError::UnknownTool(self.player.tool_id().to_string()))
    }

    /// Mines a block. See [`mining::mine`].
    ///
    /// # Errors
    ///
    /// Propagates the mining resolver's errors; no failure mutates state.
    pub fn mine(&mut self, block_id: &str, amount: BatchAmount) -> GameResult<MineOutcome> {
        mining::mine(
            &self.catalog,
            &mut self.player,
            block_id,
            amount,
            &mut self.rng,
            self.pacing,
        )
    }

    /// Runs a recipe batch. See [`crafting::process`].
    ///
    /// # Errors
    ///
    /// Propagates the processor's errors; failures are fully rolled back.
    pub fn process(&mut self, recipe_id: &str, amount: BatchAmount) -> GameResult<ProcessOutcome> {
        crafting::process(
            &self.catalog,
            &mut self.player,
            recipe_id,
            amount,
            self.pacing,
        )
    }

    /// Upgrades the equipped tool. See [`upgrade::upgrade`].
    ///
    /// # Errors
    ///
    /// Propagates the upgrade resolver's errors; failures are fully rolled
    /// back.
    pub fn upgrade(&mut self, tool_id: &str) -> GameResult<UpgradeOutcome> {
        upgrade::upgrade(&self.catalog, &mut self.player, tool_id)
    }

    /// Looks up a recipe for display.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownRecipe`] for unregistered IDs.
    pub fn recipe(&self, id: &str) -> GameResult<&Recipe> {
        self.catalog
            .recipe(id)
            .ok_or_else(|| GameError::UnknownRecipe(id.to_string()))
    }

    /// Recipes matching a search term, ordered by ID.
    #[must_use]
    pub fn search_recipes(&self, term: &str) -> Vec<&Recipe> {
        self.catalog.search_recipes(term)
    }

    /// The inventory snapshot the front-end renders: per-item totals
    /// sorted by display name, plus aggregates.
    #[must_use]
    pub fn inventory_report(&self) -> InventoryReport {
        let mut rows: Vec<InventoryRow> = self
            .player
            .inventory
            .sorted_contents()
            .into_iter()
            .map(|(id, count)| InventoryRow {
                name: self.catalog.item_name(&id).to_string(),
                count,
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));

        InventoryReport {
            total: self.player.inventory.total_items(),
            money: self.player.display_money(),
            rows,
        }
    }

    /// The player status snapshot.
    #[must_use]
    pub fn status(&self) -> StatusReport {
        let (tool, tool_level) = self.catalog.tool(self.player.tool_id()).map_or_else(
            || (self.player.tool_id().to_string(), String::new()),
            |tool| (tool.name.clone(), tool.mining_level.to_string()),
        );
        StatusReport {
            name: self.player.name.clone(),
            tool,
            tool_level,
            slots_used: self.player.inventory.used_slots(),
            slots_max: self.player.inventory.max_slots(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        Game::new(Catalog::standard(), "Riley")
            .unwrap()
            .with_seed(0x5A25)
    }

    #[test]
    fn session_starts_with_the_weakest_tool() {
        let game = game();
        assert_eq!(game.player().tool_id(), "wood_pickaxe");
    }

    #[test]
    fn equip_rejects_unknown_tools() {
        let mut game = game();
        assert!(game.equip("banhammer").is_err());
        game.equip("test_tool").unwrap();
        assert!(game.equipped_tool().unwrap().is_instant());
    }

    #[test]
    fn report_rows_are_sorted_by_display_name() {
        let mut game = game();
        game.equip("test_tool").unwrap();
        game.mine("iron", BatchAmount::Exact(3)).unwrap();
        game.mine("coal", BatchAmount::Exact(3)).unwrap();

        let report = game.inventory_report();
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].name, "Coal");
        assert_eq!(report.rows[1].name, "Raw Iron");
        assert_eq!(
            report.total,
            report.rows.iter().map(|r| r.count).sum::<u32>()
        );
        assert_eq!(report.money, "0⍹ (Rwo)");
    }

    #[test]
    fn full_loop_mine_process_upgrade() {
        let mut game = game();

        // Wooden pickaxe can reach stone and coal.
        game.mine("stone", BatchAmount::Exact(2)).unwrap();
        game.mine("coal", BatchAmount::Exact(5)).unwrap();

        // Not enough for iron yet: the wooden pickaxe is tier 0.
        let err = game.mine("iron", BatchAmount::Exact(1)).unwrap_err();
        assert!(matches!(err, GameError::InsufficientToolLevel { .. }));

        // Cheat some iron in via the test tool, smelt, then upgrade.
        game.equip("test_tool").unwrap();
        game.mine("iron", BatchAmount::Exact(6)).unwrap();
        game.equip("wood_pickaxe").unwrap();
        let smelted = game
            .process("iron_ingot", BatchAmount::Exact(3))
            .unwrap();
        assert_eq!(smelted.executed, 3);

        game.upgrade("iron_pickaxe").unwrap();
        assert_eq!(game.status().tool, "Iron Pickaxe");
        // Iron is now minable.
        game.mine("iron", BatchAmount::Exact(1)).unwrap();
    }

    #[test]
    fn status_reflects_slot_usage() {
        let mut game = game();
        game.mine("coal", BatchAmount::Exact(1)).unwrap();
        let status = game.status();
        assert_eq!(status.name, "Riley");
        assert_eq!(status.slots_used, 1);
        assert_eq!(status.slots_max, 16);
        assert_eq!(status.tool_level, "level 0");
    }
}
