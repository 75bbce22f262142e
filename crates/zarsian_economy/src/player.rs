//! # Player State
//!
//! One player per session, created at game start and dropped at exit.
//! The player exclusively owns their inventory; the equipped tool is a
//! catalog reference held by ID. Money is the colony currency, Rwo.

use crate::error::{GameError, GameResult};
use crate::inventory::Inventory;

/// A session's player: name, inventory, equipped tool, and wallet.
#[derive(Clone, Debug)]
pub struct Player {
    /// Display name chosen at session start.
    pub name: String,
    /// Exclusively owned storage; mutated only through its own operations.
    pub inventory: Inventory,
    tool: String,
    money: u64,
}

impl Player {
    /// Creates a player with the standard inventory and the given tool.
    #[must_use]
    pub fn new(name: impl Into<String>, tool_id: impl Into<String>) -> Self {
        Self::with_inventory(name, tool_id, Inventory::standard())
    }

    /// Creates a player with a custom inventory.
    #[must_use]
    pub fn with_inventory(
        name: impl Into<String>,
        tool_id: impl Into<String>,
        inventory: Inventory,
    ) -> Self {
        Self {
            name: name.into(),
            inventory,
            tool: tool_id.into(),
            money: 0,
        }
    }

    /// ID of the equipped tool.
    #[must_use]
    pub fn tool_id(&self) -> &str {
        &self.tool
    }

    /// Swaps the equipped tool. Validation (catalog membership, tier
    /// progression) is the upgrade resolver's job.
    pub(crate) fn equip(&mut self, tool_id: impl Into<String>) {
        self.tool = tool_id.into();
    }

    /// Current balance in Rwo.
    #[inline]
    #[must_use]
    pub const fn money(&self) -> u64 {
        self.money
    }

    /// Whether the wallet covers `amount` Rwo.
    #[inline]
    #[must_use]
    pub const fn has_money(&self, amount: u64) -> bool {
        self.money >= amount
    }

    /// Credits the wallet.
    pub fn add_money(&mut self, amount: u64) {
        self.money = self.money.saturating_add(amount);
    }

    /// Debits the wallet.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InsufficientFunds`] without mutation when the
    /// balance is too low.
    pub fn spend_money(&mut self, amount: u64) -> GameResult<()> {
        if self.money < amount {
            return Err(GameError::InsufficientFunds {
                required: amount,
                available: self.money,
            });
        }
        self.money -= amount;
        Ok(())
    }

    /// Wallet balance formatted for display, e.g. `"42⍹ (Rwo)"`.
    #[must_use]
    pub fn display_money(&self) -> String {
        format!("{}⍹ (Rwo)", self.money)
    }
}
