//! # Mining Resolver
//!
//! Simulated extraction of a block's drop item. Yield per attempt is a
//! bounded random walk: start at the block's minimum drop, then keep
//! adding one unit while a uniform draw stays at or under the drop rate,
//! stopping early otherwise or at the maximum. Low rates therefore bias
//! the yield toward the minimum.
//!
//! The random source is injected (`&mut impl Rng`) so tests and the
//! session can substitute a seeded deterministic generator.

use std::time::Duration;

use rand::Rng;

use crate::catalog::{Catalog, DropRates};
use crate::crafting::BatchAmount;
use crate::error::{GameError, GameResult};
use crate::pacing::Pacing;
use crate::player::Player;

/// Result of a successful mining trip.
#[derive(Clone, Debug)]
pub struct MineOutcome {
    /// The block that was mined.
    pub block: String,
    /// The item deposited.
    pub item: String,
    /// Extraction attempts performed.
    pub attempts: u32,
    /// Total units deposited, always within
    /// `[min * attempts, max * attempts]`.
    pub yield_total: u32,
    /// Simulated mining time charged.
    pub duration: Duration,
}

/// Rolls one extraction's yield from `rates`.
pub fn roll_yield(rates: DropRates, rng: &mut impl Rng) -> u32 {
    let mut current = rates.min();
    while current < rates.max() {
        if rng.gen::<f64>() <= rates.rate() {
            current += 1;
        } else {
            break;
        }
    }
    current
}

/// Mines `block_id` for the given number of attempts and deposits the
/// accumulated drops into the player's inventory.
///
/// Every trip is bounded by its worst-case yield before any rolling:
/// [`BatchAmount::All`] resolves to the largest attempt count whose
/// worst-case yield fits the free capacity, and an exact request whose
/// worst case cannot fit is rejected up front.
///
/// # Errors
///
/// - [`GameError::UnknownBlock`] / [`GameError::UnknownTool`] for
///   unresolved catalog references (no mutation).
/// - [`GameError::InsufficientToolLevel`] when the equipped tool's tier is
///   below the block's (the unlimited sentinel always passes).
/// - [`GameError::InvalidAmount`] for a zero attempt request.
/// - [`GameError::InventoryFull`] when the worst-case yield exceeds the
///   free capacity, or when the deposit needs a slot the budget does not
///   have; the inventory is left untouched either way.
pub fn mine(
    catalog: &Catalog,
    player: &mut Player,
    block_id: &str,
    amount: BatchAmount,
    rng: &mut impl Rng,
    pacing: Pacing,
) -> GameResult<MineOutcome> {
    let block = catalog
        .block(block_id)
        .ok_or_else(|| GameError::UnknownBlock(block_id.to_string()))?;
    let tool = catalog
        .tool(player.tool_id())
        .ok_or_else(|| GameError::UnknownTool(player.tool_id().to_string()))?;

    if !tool.mining_level.can_mine(block.mining_level) {
        tracing::debug!(block = block_id, tool = %tool.id, "mining rejected: tool too weak");
        return Err(GameError::InsufficientToolLevel {
            block: block_id.to_string(),
            required: block.mining_level,
            held: tool.mining_level,
        });
    }

    let free = player.inventory.free_capacity();
    let worst_case = block.drop_rates.max().max(1);
    let attempts = match amount {
        BatchAmount::Exact(0) => return Err(GameError::InvalidAmount(0)),
        BatchAmount::Exact(n) => n,
        BatchAmount::All => free / worst_case,
    };
    if attempts == 0 {
        // Only reachable via All with less free space than one worst-case
        // extraction.
        return Err(GameError::InventoryFull {
            needed: worst_case,
            free,
        });
    }

    // Bound the trip before rolling: the attempt count is unbounded user
    // input, and the rolled total must stay within u32 and within the
    // free capacity.
    let worst_total = u64::from(attempts) * u64::from(worst_case);
    if worst_total > u64::from(free) {
        tracing::debug!(block = block_id, attempts, free, "mining rejected: no room for yield");
        return Err(GameError::InventoryFull {
            needed: u32::try_from(worst_total).unwrap_or(u32::MAX),
            free,
        });
    }

    let mut total = 0u32;
    for _ in 0..attempts {
        total += roll_yield(block.drop_rates, rng);
    }

    let duration = if tool.is_instant() {
        Duration::ZERO
    } else {
        pacing.delay(block.mining_time * f64::from(attempts) / tool.speed_factor)
    };

    // Unit capacity was verified, but a fresh item can still need a slot
    // the budget does not have. Snapshot so a failed deposit stays atomic.
    let snapshot = player.inventory.snapshot();
    if total > 0 && !player.inventory.add(&block.drop_item, total) {
        player.inventory.restore(&snapshot);
        tracing::warn!(block = block_id, total, "deposit did not fit, rolled back");
        return Err(GameError::InventoryFull {
            needed: total,
            free,
        });
    }

    tracing::info!(block = block_id, attempts, total, "mined");
    Ok(MineOutcome {
        block: block_id.to_string(),
        item: block.drop_item.clone(),
        attempts,
        yield_total: total,
        duration,
    })
}
