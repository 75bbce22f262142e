//! # Zarsian
//!
//! Interactive front-end for the Zars P14a mining colony. Reads commands
//! from stdin, calls into the economy engine, and renders the results as
//! plain-text tables. Every game rule lives in `zarsian_economy`; this
//! binary only parses and prints.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use zarsian_economy::{
    BatchAmount, Catalog, Game, GameConfig, GameError, GameResult, Pacing, Recipe,
};

mod render;

/// Command line options.
#[derive(Debug, Parser)]
#[command(name = "zarsian", about = "Mine, refine, and upgrade on Zars P14a")]
struct Args {
    /// Load the catalog from a TOML file instead of the built-in data.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Player name (prompted interactively when omitted).
    #[arg(long)]
    name: Option<String>,

    /// Seed for the drop-yield random source (deterministic runs).
    #[arg(long)]
    seed: Option<u64>,

    /// Simulate mining and processing delays in real time.
    #[arg(long)]
    paced: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> GameResult<()> {
    let (catalog, inventory) = match &args.catalog {
        Some(path) => {
            let config = GameConfig::from_path(path)?;
            (config.build_catalog()?, config.inventory().build())
        }
        None => (
            Catalog::standard(),
            zarsian_economy::Inventory::standard(),
        ),
    };

    let name = match &args.name {
        Some(name) => name.clone(),
        None => prompt("What's your name again? # ")?,
    };

    let mut game = Game::with_inventory(catalog, name, inventory)?;
    if let Some(seed) = args.seed {
        game = game.with_seed(seed);
    }
    if args.paced {
        game = game.with_pacing(Pacing::real_time());
    }
    tracing::debug!(
        player = %game.player().name,
        custom_catalog = args.catalog.is_some(),
        "session ready"
    );

    println!();
    println!(
        "Welcome on board of the ZarsianX, pioneer {}! We're approaching Zars P14a.",
        game.player().name
    );
    println!("Deep beneath the surface, coal, iron ore, and more await.");
    println!();
    println!("Type 'help' to see all available commands.");
    println!();

    let stdin = io::stdin();
    let mut last_command: Option<String> = None;

    loop {
        print!("What do you want to do, pioneer? # ");
        io::stdout().flush().ok();

        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = match line {
            Ok(line) => line.trim().to_lowercase(),
            Err(_) => break,
        };
        if line.is_empty() {
            continue;
        }

        let line = if line == "last" {
            match &last_command {
                Some(repeat) => {
                    println!("Repeating last command: {repeat}");
                    repeat.clone()
                }
                None => {
                    println!("No last command to repeat.");
                    continue;
                }
            }
        } else {
            line
        };

        let parts: Vec<&str> = line.split_whitespace().collect();
        let verb = parts[0];
        // Queries and meta commands are not worth repeating.
        if !matches!(verb, "last" | "inventory" | "status" | "recipe" | "help" | "exit") {
            last_command = Some(line.clone());
        }

        match verb {
            "exit" => {
                println!();
                println!("Memory encrypted! Zars P14a is waiting for you to return.");
                break;
            }
            "help" => render::help(),
            "mine" => dispatch_mine(&mut game, &parts),
            "process" => dispatch_process(&mut game, &parts),
            "upgrade" => dispatch_upgrade(&mut game, &parts),
            "inventory" => render::inventory(&game.inventory_report()),
            "status" => {
                let status = game.status();
                println!();
                println!("Name: {}", status.name);
                println!("Tool: {} ({})", status.tool, status.tool_level);
                println!("Slots: {}/{}", status.slots_used, status.slots_max);
                render::inventory(&game.inventory_report());
            }
            "blocks" => render::blocks(game.catalog()),
            "tools" => render::tools(game.catalog()),
            "recipe" => dispatch_recipe(&game, &parts),
            _ => println!("Pioneer! We don't know this one. Type 'help' to see the commands."),
        }
    }

    Ok(())
}

fn prompt(text: &str) -> GameResult<String> {
    print!("{text}");
    io::stdout().flush().ok();
    let mut name = String::new();
    io::stdin()
        .read_line(&mut name)
        .map_err(|e| GameError::InvalidConfig(format!("cannot read stdin: {e}")))?;
    let name = name.trim();
    Ok(if name.is_empty() {
        "Pioneer".to_string()
    } else {
        name.to_string()
    })
}

/// Parses a trailing amount argument: missing means 1, `all` is the
/// sentinel, anything non-numeric is rejected before touching the engine.
fn parse_amount(parts: &[&str], index: usize) -> Result<BatchAmount, String> {
    match parts.get(index) {
        None => Ok(BatchAmount::Exact(1)),
        Some(&"all") => Ok(BatchAmount::All),
        Some(raw) => raw
            .parse::<u32>()
            .map(BatchAmount::Exact)
            .map_err(|_| format!("'{raw}' is not an amount - use a number or 'all'")),
    }
}

fn dispatch_mine(game: &mut Game, parts: &[&str]) {
    let Some(material) = parts.get(1) else {
        println!("Pioneer! Provide a material, e.g. 'mine coal' or 'mine coal 5'.");
        return;
    };
    let amount = match parse_amount(parts, 2) {
        Ok(amount) => amount,
        Err(msg) => {
            println!("{msg}");
            return;
        }
    };
    match game.mine(material, amount) {
        Ok(outcome) => println!(
            "You've mined {}x {} and received {}x {} ({}s).",
            outcome.attempts,
            outcome.block,
            outcome.yield_total,
            game.catalog().item_name(&outcome.item),
            outcome.duration.as_secs_f64()
        ),
        Err(e) => render::failure(&e),
    }
}

fn dispatch_process(game: &mut Game, parts: &[&str]) {
    let Some(recipe) = parts.get(1) else {
        println!("Pioneer! Provide a recipe, e.g. 'process iron_ingot' or 'process iron_ingot 2'.");
        return;
    };
    let amount = match parse_amount(parts, 2) {
        Ok(amount) => amount,
        Err(msg) => {
            println!("{msg}");
            return;
        }
    };
    match game.process(recipe, amount) {
        Ok(outcome) => {
            println!("Processed {}x {} successfully!", outcome.executed, outcome.recipe);
            for (item, count) in &outcome.produced {
                println!("  + {}x {}", count, game.catalog().item_name(item));
            }
        }
        Err(e) => render::failure(&e),
    }
}

fn dispatch_upgrade(game: &mut Game, parts: &[&str]) {
    let Some(tool) = parts.get(1) else {
        println!("Pioneer! Provide a tool, e.g. 'upgrade iron_pickaxe'. See 'tools'.");
        return;
    };
    match game.upgrade(tool) {
        Ok(outcome) => {
            println!(
                "Upgraded {} -> {}.",
                game.catalog().tool(&outcome.previous).map_or(outcome.previous.as_str(), |t| t.name.as_str()),
                game.catalog().tool(&outcome.tool).map_or(outcome.tool.as_str(), |t| t.name.as_str()),
            );
            for (item, count) in &outcome.consumed {
                println!("  - {}x {}", count, game.catalog().item_name(item));
            }
        }
        Err(e) => render::failure(&e),
    }
}

fn dispatch_recipe(game: &Game, parts: &[&str]) {
    match parts.get(1) {
        Some(&"search") if parts.len() >= 3 => {
            let term = parts[2..].join(" ");
            let hits = game.search_recipes(&term);
            if hits.is_empty() {
                println!("No recipes found matching your search.");
            } else {
                for recipe in hits {
                    println!("  :: {}", recipe.id);
                }
            }
        }
        Some(&"get" | &"show") if parts.len() >= 3 => match game.recipe(parts[2]) {
            Ok(recipe) => render_recipe(game, recipe),
            Err(e) => render::failure(&e),
        },
        _ => println!("Usage: recipe search <term> | recipe show <name>"),
    }
}

fn render_recipe(game: &Game, recipe: &Recipe) {
    render::recipe(
        &recipe.id,
        &recipe
            .inputs
            .iter()
            .map(|i| (game.catalog().item_name(&i.item).to_string(), i.quantity))
            .collect::<Vec<_>>(),
        &recipe
            .outputs
            .iter()
            .map(|o| (game.catalog().item_name(&o.item).to_string(), o.quantity))
            .collect::<Vec<_>>(),
    );
}
