//! # Economy Error Types
//!
//! All failures the engine can report. Every variant is recoverable: the
//! session keeps running, the caller renders the condition and moves on.
//! The one invariant that is never negotiable is transactional atomicity -
//! a failed operation must leave the inventory exactly as it found it.

use thiserror::Error;

use crate::catalog::MiningLevel;

/// Per-item shortfall when a recipe or upgrade cost is not met.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shortfall {
    /// The item that is missing.
    pub item: String,
    /// The amount required.
    pub required: u32,
    /// The amount available.
    pub available: u32,
}

impl Shortfall {
    /// Creates a new shortfall record.
    #[inline]
    #[must_use]
    pub const fn new(item: String, required: u32, available: u32) -> Self {
        Self {
            item,
            required,
            available,
        }
    }

    /// How many units are missing.
    #[inline]
    #[must_use]
    pub const fn missing(&self) -> u32 {
        self.required.saturating_sub(self.available)
    }
}

impl std::fmt::Display for Shortfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: need {}, have {}",
            self.item, self.required, self.available
        )
    }
}

/// Errors that can occur in the economy engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// Referenced block ID is not registered in the catalog.
    #[error("unknown block: {0}")]
    UnknownBlock(String),

    /// Referenced tool ID is not registered in the catalog.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// Referenced recipe ID is not registered in the catalog.
    #[error("unknown recipe: {0}")]
    UnknownRecipe(String),

    /// Recipe or upgrade cost not met; carries the per-item shortfall and
    /// how many batches would have been feasible.
    #[error("insufficient materials: {feasible} batch(es) possible")]
    InsufficientMaterials {
        /// Items that fell short, with required and available counts.
        shortfalls: Vec<Shortfall>,
        /// The maximum batch count the inventory could have supported.
        feasible: u32,
    },

    /// The equipped tool's mining level is below the block's requirement.
    #[error("tool too weak for {block}: requires level {required}, tool is {held}")]
    InsufficientToolLevel {
        /// The block that was targeted.
        block: String,
        /// Mining level the block requires.
        required: u32,
        /// Mining level of the equipped tool.
        held: MiningLevel,
    },

    /// An add operation cannot place all units.
    #[error("inventory full: {needed} unit(s) do not fit ({free} free)")]
    InventoryFull {
        /// Units that needed a home.
        needed: u32,
        /// Free capacity at the time of the check.
        free: u32,
    },

    /// Non-positive or otherwise nonsensical batch size.
    #[error("invalid amount: {0}")]
    InvalidAmount(i64),

    /// Upgrade target does not outrank the equipped tool.
    #[error("cannot upgrade to {target}: {held} is already at least as capable")]
    InvalidUpgrade {
        /// The requested tool.
        target: String,
        /// The currently equipped tool.
        held: String,
    },

    /// Not enough money for a purchase.
    #[error("insufficient funds: need {required} Rwo, have {available}")]
    InsufficientFunds {
        /// Amount required.
        required: u64,
        /// Amount on hand.
        available: u64,
    },

    /// A transaction hit an unexpected mid-flight failure and was rolled back.
    #[error("transaction rolled back: {reason}")]
    TransactionRolledBack {
        /// Reason for the rollback.
        reason: String,
    },

    /// Invalid catalog or configuration data.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for economy operations.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortfall_reports_missing_units() {
        let s = Shortfall::new("coal".to_string(), 5, 2);
        assert_eq!(s.missing(), 3);
        assert_eq!(s.to_string(), "coal: need 5, have 2");
    }

    #[test]
    fn error_messages_are_stable() {
        let err = GameError::InventoryFull { needed: 7, free: 3 };
        assert_eq!(
            err.to_string(),
            "inventory full: 7 unit(s) do not fit (3 free)"
        );
    }
}
