//! Benchmark for the recipe processor.
//!
//! Run with: cargo bench --package zarsian_economy --bench crafting_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use zarsian_economy::{crafting, BatchAmount, Catalog, Inventory, Pacing, Player};

fn stocked_player() -> Player {
    let mut player = Player::with_inventory("Bench", "test_tool", Inventory::new(64, 64));
    player.inventory.add("iron_ingot", 512);
    player.inventory.add("coal", 512);
    player
}

fn benchmark_feasibility(c: &mut Criterion) {
    let catalog = Catalog::standard();
    let player = stocked_player();
    let recipe = catalog.recipe("steel_ingot").unwrap();

    c.bench_function("feasibility_check", |b| {
        b.iter(|| black_box(crafting::feasible_batches(recipe, &player.inventory)));
    });
}

fn benchmark_process_batch(c: &mut Criterion) {
    let catalog = Catalog::standard();

    c.bench_function("process_steel_batch_of_8", |b| {
        b.iter(|| {
            let mut player = stocked_player();
            black_box(crafting::process(
                &catalog,
                &mut player,
                "steel_ingot",
                BatchAmount::Exact(8),
                Pacing::Off,
            ))
        });
    });
}

fn benchmark_rejected_batch(c: &mut Criterion) {
    let catalog = Catalog::standard();

    // Over-feasible requests exercise the shortfall reporting path.
    c.bench_function("process_rejected_over_request", |b| {
        b.iter(|| {
            let mut player = stocked_player();
            black_box(crafting::process(
                &catalog,
                &mut player,
                "steel_ingot",
                BatchAmount::Exact(100_000),
                Pacing::Off,
            ))
        });
    });
}

fn benchmark_snapshot_restore(c: &mut Criterion) {
    let player = stocked_player();
    let mut inventory = player.inventory.clone();

    c.bench_function("snapshot_restore_round_trip", |b| {
        b.iter(|| {
            let snapshot = inventory.snapshot();
            inventory.add("cobbled_stone", 1);
            inventory.restore(black_box(&snapshot));
        });
    });
}

criterion_group!(
    benches,
    benchmark_feasibility,
    benchmark_process_batch,
    benchmark_rejected_batch,
    benchmark_snapshot_restore
);
criterion_main!(benches);
