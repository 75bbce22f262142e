//! Integration test for transactional atomicity across the engine.
//!
//! The one invariant that must never break silently: a reported failure
//! leaves every per-item total and the aggregate count untouched.

use zarsian_economy::{
    crafting, upgrade, BatchAmount, Catalog, Game, GameError, Inventory, Pacing, Player,
};

fn totals(game: &Game) -> Vec<(String, u32)> {
    game.player().inventory.sorted_contents()
}

#[test]
fn failed_process_never_mutates_anything() {
    let catalog = Catalog::standard();
    let mut game = Game::new(catalog, "Atomic").unwrap().with_seed(99);
    game.equip("test_tool").unwrap();
    game.mine("iron", BatchAmount::Exact(4)).unwrap();
    game.mine("coal", BatchAmount::Exact(2)).unwrap();
    game.process("iron_ingot", BatchAmount::All).unwrap();

    let before = totals(&game);
    let total_before = game.player().inventory.total_items();

    // Request far more steel than feasible.
    let err = game
        .process("steel_ingot", BatchAmount::Exact(50))
        .unwrap_err();
    assert!(matches!(err, GameError::InsufficientMaterials { .. }));

    assert_eq!(totals(&game), before);
    assert_eq!(game.player().inventory.total_items(), total_before);
}

#[test]
fn failed_upgrade_never_mutates_anything() {
    let catalog = Catalog::standard();
    let mut game = Game::new(catalog, "Atomic").unwrap().with_seed(7);
    game.mine("stone", BatchAmount::Exact(1)).unwrap();

    let before = totals(&game);
    let err = game.upgrade("iron_pickaxe").unwrap_err();
    assert!(matches!(err, GameError::InsufficientMaterials { .. }));
    assert_eq!(totals(&game), before);
    assert_eq!(game.player().tool_id(), "wood_pickaxe");
}

#[test]
fn process_rollback_covers_multi_item_recipes_with_cramped_storage() {
    // 3 slots, stack 4, all occupied. One steel batch consumes 2 iron
    // ingots and 1 coal - neither slot drains completely, so the steel
    // output has nowhere to go and the whole batch must roll back.
    let catalog = Catalog::standard();
    let mut player = Player::with_inventory("Atomic", "test_tool", Inventory::new(3, 4));
    assert!(player.inventory.add("iron_ingot", 4));
    assert!(player.inventory.add("coal", 4));
    assert!(player.inventory.add("cobbled_stone", 4));
    let before = player.inventory.clone();

    let err = crafting::process(
        &catalog,
        &mut player,
        "steel_ingot",
        BatchAmount::Exact(1),
        Pacing::Off,
    )
    .unwrap_err();
    assert!(matches!(err, GameError::InventoryFull { .. }));
    assert_eq!(player.inventory, before);
}

#[test]
fn interleaved_failures_leave_a_long_session_consistent() {
    let catalog = Catalog::standard();
    let mut player = Player::with_inventory("Atomic", "wood_pickaxe", Inventory::new(4, 8));
    assert!(player.inventory.add("raw_iron", 8));
    assert!(player.inventory.add("coal", 8));

    // Smelt half the iron.
    let smelted = crafting::process(
        &catalog,
        &mut player,
        "iron_ingot",
        BatchAmount::Exact(4),
        Pacing::Off,
    )
    .unwrap();
    assert_eq!(smelted.executed, 4);

    // A failing over-request in between must not disturb anything...
    let checkpoint = player.inventory.clone();
    assert!(crafting::process(
        &catalog,
        &mut player,
        "steel_ingot",
        BatchAmount::Exact(100),
        Pacing::Off,
    )
    .is_err());
    assert_eq!(player.inventory, checkpoint);

    // ...and a failing upgrade neither (needs cobbled stone).
    assert!(upgrade::upgrade(&catalog, &mut player, "iron_pickaxe").is_err());
    assert_eq!(player.inventory, checkpoint);

    // The session stays fully operational afterwards.
    let steel = crafting::process(
        &catalog,
        &mut player,
        "steel_ingot",
        BatchAmount::All,
        Pacing::Off,
    )
    .unwrap();
    assert_eq!(steel.executed, 2);
    assert_eq!(player.inventory.total_of("steel_ingot"), 2);
    assert_eq!(player.inventory.total_of("iron_ingot"), 0);
    assert_eq!(player.inventory.total_of("coal"), 6);
    assert_eq!(player.inventory.total_of("raw_iron"), 4);
}
