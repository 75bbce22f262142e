//! # Tool Upgrades
//!
//! Validates and executes a tool-tier transition. Upgrades only ever move
//! up: the target must strictly outrank the equipped tool's mining level.
//! Costs are consumed under the same snapshot/rollback discipline as the
//! recipe processor, so a failed upgrade never touches the inventory.

use crate::catalog::Catalog;
use crate::error::{GameError, GameResult, Shortfall};
use crate::player::Player;

/// Result of a successful upgrade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpgradeOutcome {
    /// Tool that was equipped before.
    pub previous: String,
    /// Tool equipped now.
    pub tool: String,
    /// Items consumed, `(item id, units)`.
    pub consumed: Vec<(String, u32)>,
}

/// Upgrades the player's equipped tool to `target_id`, consuming the
/// target's upgrade costs.
///
/// # Errors
///
/// - [`GameError::UnknownTool`] when either tool is unregistered.
/// - [`GameError::InvalidUpgrade`] when the target does not outrank the
///   equipped tool.
/// - [`GameError::InsufficientMaterials`] with per-item shortfalls when
///   any cost is short.
///
/// None of the failure paths mutate the player.
pub fn upgrade(catalog: &Catalog, player: &mut Player, target_id: &str) -> GameResult<UpgradeOutcome> {
    let target = catalog
        .tool(target_id)
        .ok_or_else(|| GameError::UnknownTool(target_id.to_string()))?;
    let held = catalog
        .tool(player.tool_id())
        .ok_or_else(|| GameError::UnknownTool(player.tool_id().to_string()))?;

    if target.mining_level <= held.mining_level {
        tracing::debug!(target = target_id, held = %held.id, "upgrade rejected: not an upgrade");
        return Err(GameError::InvalidUpgrade {
            target: target_id.to_string(),
            held: held.id.clone(),
        });
    }

    let shortfalls: Vec<Shortfall> = target
        .upgrade_costs
        .iter()
        .filter_map(|(item, required)| {
            let available = player.inventory.total_of(item);
            (available < *required).then(|| Shortfall::new(item.clone(), *required, available))
        })
        .collect();
    if !shortfalls.is_empty() {
        tracing::debug!(target = target_id, "upgrade rejected: costs not met");
        return Err(GameError::InsufficientMaterials {
            shortfalls,
            feasible: 0,
        });
    }

    let snapshot = player.inventory.snapshot();
    for (item, required) in &target.upgrade_costs {
        if !player.inventory.remove(item, *required) {
            player.inventory.restore(&snapshot);
            tracing::warn!(target = target_id, item = %item, "cost removal failed, rolled back");
            return Err(GameError::TransactionRolledBack {
                reason: format!("upgrade cost '{item}' vanished mid-transaction"),
            });
        }
    }

    let previous = player.tool_id().to_string();
    player.equip(&target.id);

    tracing::info!(from = %previous, to = target_id, "tool upgraded");
    Ok(UpgradeOutcome {
        previous,
        tool: target.id.clone(),
        consumed: target.upgrade_costs.clone(),
    })
}
