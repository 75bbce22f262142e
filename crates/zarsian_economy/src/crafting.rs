//! # Recipe Processor
//!
//! **Transactional batch crafting.**
//!
//! A recipe run is atomic: either every input is consumed and every output
//! is produced for the whole batch, or the inventory is byte-for-byte
//! unchanged. The processor compensates for [`Inventory::add`]'s
//! best-effort semantics by snapshotting the slot state up front and
//! restoring it on any mid-flight failure.
//!
//! The request may name an exact batch count or ask for "as many as
//! currently possible" ([`BatchAmount::All`]), which resolves to the
//! feasibility bound: the minimum over all inputs of
//! `available / required_per_batch`.

use std::time::Duration;

use crate::catalog::{Catalog, Recipe};
use crate::error::{GameError, GameResult, Shortfall};
use crate::inventory::Inventory;
use crate::pacing::Pacing;
use crate::player::Player;

/// Requested batch size for a recipe run or a mining trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchAmount {
    /// Run exactly this many batches.
    Exact(u32),
    /// Run as many batches as the inventory currently supports.
    All,
}

/// Result of a successful recipe run.
#[derive(Clone, Debug)]
pub struct ProcessOutcome {
    /// The recipe that ran.
    pub recipe: String,
    /// Batches executed.
    pub executed: u32,
    /// Items consumed, `(item id, total units)`.
    pub consumed: Vec<(String, u32)>,
    /// Items produced, `(item id, total units)`.
    pub produced: Vec<(String, u32)>,
    /// Simulated processing time charged.
    pub duration: Duration,
}

/// Computes how many batches of `recipe` the inventory supports, along
/// with the per-unit shortfalls (inputs whose stock does not even cover
/// one batch).
#[must_use]
pub fn feasible_batches(recipe: &Recipe, inventory: &Inventory) -> (u32, Vec<Shortfall>) {
    let mut feasible = u32::MAX;
    let mut shortfalls = Vec::new();

    for input in &recipe.inputs {
        let available = inventory.total_of(&input.item);
        if available < input.quantity {
            shortfalls.push(Shortfall::new(input.item.clone(), input.quantity, available));
        }
        feasible = feasible.min(available / input.quantity);
    }

    (feasible, shortfalls)
}

/// Runs `recipe_id` against the player's inventory as an all-or-nothing
/// batch operation.
///
/// # Errors
///
/// - [`GameError::UnknownRecipe`] / [`GameError::UnknownTool`] for
///   unresolved catalog references (no mutation).
/// - [`GameError::InvalidAmount`] for a zero batch request (no mutation).
/// - [`GameError::InsufficientMaterials`] when feasibility is zero or the
///   request exceeds it; carries the feasible count (no mutation).
/// - [`GameError::InventoryFull`] when the outputs do not fit; inputs are
///   restored before returning (net: no mutation).
pub fn process(
    catalog: &Catalog,
    player: &mut Player,
    recipe_id: &str,
    amount: BatchAmount,
    pacing: Pacing,
) -> GameResult<ProcessOutcome> {
    let recipe = catalog
        .recipe(recipe_id)
        .ok_or_else(|| GameError::UnknownRecipe(recipe_id.to_string()))?;
    let instant = catalog
        .tool(player.tool_id())
        .ok_or_else(|| GameError::UnknownTool(player.tool_id().to_string()))?
        .is_instant();

    let (feasible, shortfalls) = feasible_batches(recipe, &player.inventory);

    let requested = match amount {
        BatchAmount::All => feasible,
        BatchAmount::Exact(n) => n,
    };
    if matches!(amount, BatchAmount::Exact(0)) {
        return Err(GameError::InvalidAmount(0));
    }
    if feasible == 0 || requested == 0 {
        tracing::debug!(recipe = recipe_id, "processing rejected: nothing feasible");
        return Err(GameError::InsufficientMaterials {
            shortfalls,
            feasible: 0,
        });
    }
    if requested > feasible {
        // Report the shortfall against the full request, not per batch.
        // The request is unbounded user input, so the requirement
        // saturates instead of overflowing.
        let shortfalls = recipe
            .inputs
            .iter()
            .filter_map(|input| {
                let required = input.quantity.saturating_mul(requested);
                let available = player.inventory.total_of(&input.item);
                (available < required)
                    .then(|| Shortfall::new(input.item.clone(), required, available))
            })
            .collect();
        tracing::debug!(
            recipe = recipe_id,
            requested,
            feasible,
            "processing rejected: batch too large"
        );
        return Err(GameError::InsufficientMaterials { shortfalls, feasible });
    }

    let snapshot = player.inventory.snapshot();

    // Consume inputs. Feasibility already guaranteed this succeeds; the
    // check stays because a silent partial removal would corrupt the world.
    for input in &recipe.inputs {
        if !player.inventory.remove(&input.item, input.quantity * requested) {
            player.inventory.restore(&snapshot);
            tracing::warn!(recipe = recipe_id, item = %input.item, "input removal failed, rolled back");
            return Err(GameError::TransactionRolledBack {
                reason: format!("input '{}' vanished mid-transaction", input.item),
            });
        }
    }

    let duration = if instant {
        Duration::ZERO
    } else {
        pacing.delay(recipe.processing_time * f64::from(requested))
    };

    for output in &recipe.outputs {
        if !player.inventory.add(&output.item, output.quantity.saturating_mul(requested)) {
            let needed = recipe
                .outputs
                .iter()
                .fold(0u32, |acc, o| {
                    acc.saturating_add(o.quantity.saturating_mul(requested))
                });
            player.inventory.restore(&snapshot);
            tracing::warn!(recipe = recipe_id, requested, "outputs did not fit, rolled back");
            return Err(GameError::InventoryFull {
                needed,
                free: player.inventory.free_capacity(),
            });
        }
    }

    let consumed = recipe
        .inputs
        .iter()
        .map(|i| (i.item.clone(), i.quantity * requested))
        .collect();
    let produced = recipe
        .outputs
        .iter()
        .map(|o| (o.item.clone(), o.quantity.saturating_mul(requested)))
        .collect();

    tracing::info!(recipe = recipe_id, executed = requested, "processed batch");
    Ok(ProcessOutcome {
        recipe: recipe_id.to_string(),
        executed: requested,
        consumed,
        produced,
        duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn ready_player(tool: &str) -> Player {
        Player::new("Riley", tool)
    }

    #[test]
    fn steel_ingot_feasibility_scenario() {
        // Inventory {IronIngot:5, Coal:1} -> feasibility min(5/2, 1/1) = 1.
        let catalog = Catalog::standard();
        let mut player = ready_player("test_tool");
        player.inventory.add("iron_ingot", 5);
        player.inventory.add("coal", 1);

        let outcome =
            process(&catalog, &mut player, "steel_ingot", BatchAmount::All, Pacing::Off).unwrap();
        assert_eq!(outcome.executed, 1);
        assert_eq!(player.inventory.total_of("iron_ingot"), 3);
        assert_eq!(player.inventory.total_of("coal"), 0);
        assert_eq!(player.inventory.total_of("steel_ingot"), 1);
        // The drained coal slot is pruned.
        assert!(player
            .inventory
            .slots()
            .iter()
            .all(|slot| slot.item != "coal"));
    }

    #[test]
    fn over_request_reports_feasible_count_and_leaves_inventory_alone() {
        let catalog = Catalog::standard();
        let mut player = ready_player("test_tool");
        player.inventory.add("iron_ingot", 5);
        player.inventory.add("coal", 1);
        let before = player.inventory.clone();

        let err = process(
            &catalog,
            &mut player,
            "steel_ingot",
            BatchAmount::Exact(2),
            Pacing::Off,
        )
        .unwrap_err();
        match err {
            GameError::InsufficientMaterials { feasible, shortfalls } => {
                assert_eq!(feasible, 1);
                assert_eq!(shortfalls.len(), 1);
                assert_eq!(shortfalls[0].item, "coal");
                assert_eq!(shortfalls[0].required, 2);
                assert_eq!(shortfalls[0].available, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(player.inventory, before);
    }

    #[test]
    fn enormous_over_request_reports_feasible_count_without_overflow() {
        let catalog = Catalog::standard();
        let mut player = ready_player("test_tool");
        player.inventory.add("iron_ingot", 5);
        player.inventory.add("coal", 1);
        let before = player.inventory.clone();

        let err = process(
            &catalog,
            &mut player,
            "steel_ingot",
            BatchAmount::Exact(3_000_000_000),
            Pacing::Off,
        )
        .unwrap_err();
        match err {
            GameError::InsufficientMaterials { feasible, shortfalls } => {
                assert_eq!(feasible, 1);
                let coal = shortfalls.iter().find(|s| s.item == "coal").unwrap();
                assert_eq!(coal.required, 3_000_000_000);
                assert_eq!(coal.available, 1);
                // 2 * 3_000_000_000 exceeds u32; the requirement saturates.
                let iron = shortfalls.iter().find(|s| s.item == "iron_ingot").unwrap();
                assert_eq!(iron.required, u32::MAX);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(player.inventory, before);
    }

    #[test]
    fn zero_amount_is_invalid() {
        let catalog = Catalog::standard();
        let mut player = ready_player("test_tool");
        player.inventory.add("raw_iron", 4);
        let err = process(
            &catalog,
            &mut player,
            "iron_ingot",
            BatchAmount::Exact(0),
            Pacing::Off,
        )
        .unwrap_err();
        assert_eq!(err, GameError::InvalidAmount(0));
        assert_eq!(player.inventory.total_of("raw_iron"), 4);
    }

    #[test]
    fn missing_input_reports_per_item_shortfall() {
        let catalog = Catalog::standard();
        let mut player = ready_player("test_tool");
        player.inventory.add("iron_ingot", 1); // needs 2 per batch

        let err = process(
            &catalog,
            &mut player,
            "steel_ingot",
            BatchAmount::All,
            Pacing::Off,
        )
        .unwrap_err();
        match err {
            GameError::InsufficientMaterials { feasible, shortfalls } => {
                assert_eq!(feasible, 0);
                let items: Vec<_> = shortfalls.iter().map(|s| s.item.as_str()).collect();
                assert!(items.contains(&"iron_ingot"));
                assert!(items.contains(&"coal"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rollback_restores_all_totals_when_output_space_is_missing() {
        let catalog = Catalog::standard();
        // 2 slots, stack 4: 4 raw iron + 4 coal occupy both slots. One
        // iron_ingot batch consumes 1 raw iron, freeing no slot (3 left),
        // and the ingot needs a fresh slot that does not exist.
        let mut player =
            Player::with_inventory("Riley", "test_tool", crate::inventory::Inventory::new(2, 4));
        player.inventory.add("raw_iron", 4);
        player.inventory.add("coal", 4);
        let before = player.inventory.clone();

        let err = process(
            &catalog,
            &mut player,
            "iron_ingot",
            BatchAmount::Exact(1),
            Pacing::Off,
        )
        .unwrap_err();
        assert!(matches!(err, GameError::InventoryFull { .. }));
        assert_eq!(player.inventory, before);
        assert_eq!(player.inventory.total_items(), 8);
    }

    #[test]
    fn all_with_empty_inventory_is_rejected() {
        let catalog = Catalog::standard();
        let mut player = ready_player("test_tool");
        let err = process(
            &catalog,
            &mut player,
            "iron_ingot",
            BatchAmount::All,
            Pacing::Off,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GameError::InsufficientMaterials { feasible: 0, .. }
        ));
    }

    #[test]
    fn unknown_recipe_is_reported() {
        let catalog = Catalog::standard();
        let mut player = ready_player("test_tool");
        let err = process(
            &catalog,
            &mut player,
            "philosopher_stone",
            BatchAmount::All,
            Pacing::Off,
        )
        .unwrap_err();
        assert_eq!(err, GameError::UnknownRecipe("philosopher_stone".to_string()));
    }

    #[test]
    fn multi_batch_run_consumes_proportionally() {
        let catalog = Catalog::standard();
        let mut player = ready_player("test_tool");
        player.inventory.add("iron_ingot", 10);
        player.inventory.add("coal", 10);

        let outcome = process(
            &catalog,
            &mut player,
            "steel_ingot",
            BatchAmount::Exact(3),
            Pacing::Off,
        )
        .unwrap();
        assert_eq!(outcome.executed, 3);
        assert_eq!(outcome.consumed, vec![
            ("iron_ingot".to_string(), 6),
            ("coal".to_string(), 3)
        ]);
        assert_eq!(player.inventory.total_of("steel_ingot"), 3);
        assert_eq!(player.inventory.total_of("iron_ingot"), 4);
        assert_eq!(player.inventory.total_of("coal"), 7);
    }
}
