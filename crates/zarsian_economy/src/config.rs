//! # Declarative Catalog Configuration
//!
//! Balance data can live in a TOML document instead of the built-in
//! [`Catalog::standard`] set. Loading is configuration, not core logic:
//! the mirrors here deserialize with serde, then feed the same
//! `register_*` validation paths as hand-built catalogs, so a config file
//! cannot smuggle in dangling references or invalid rates.
//!
//! ```toml
//! [inventory]
//! max_slots = 16
//! stack_size = 32
//!
//! [[items]]
//! id = "coal"
//! name = "Coal"
//!
//! [[tools]]
//! id = "wood_pickaxe"
//! name = "Wooden Pickaxe"
//! mining_level = 0          # or "unlimited"
//! speed_factor = 0.5
//!
//! [[blocks]]
//! id = "coal"
//! drop_item = "coal"
//! mining_level = 0
//! mining_time = 2.0
//! drops = { min = 1, max = 3, rate = 0.2 }
//!
//! [[recipes]]
//! id = "steel_ingot"
//! processing_time = 2.0
//! inputs = [{ item = "iron_ingot", quantity = 2 }, { item = "coal", quantity = 1 }]
//! outputs = [{ item = "steel_ingot", quantity = 1 }]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::catalog::{Block, Catalog, DropRates, Ingredient, Item, MiningLevel, Recipe, Tool};
use crate::error::{GameError, GameResult};
use crate::inventory::Inventory;

/// Inventory dimensions from the `[inventory]` section.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Slot budget.
    #[serde(default = "default_max_slots")]
    pub max_slots: usize,
    /// Per-slot stack capacity.
    #[serde(default = "default_stack_size")]
    pub stack_size: u32,
}

const fn default_max_slots() -> usize {
    Inventory::STANDARD_SLOTS
}

const fn default_stack_size() -> u32 {
    Inventory::STANDARD_STACK
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            max_slots: default_max_slots(),
            stack_size: default_stack_size(),
        }
    }
}

impl InventoryConfig {
    /// Builds an empty inventory with these dimensions.
    #[must_use]
    pub fn build(self) -> Inventory {
        Inventory::new(self.max_slots, self.stack_size)
    }
}

/// A mining level in config form: a tier number or the string
/// `"unlimited"`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum LevelConfig {
    Tier(u32),
    Named(String),
}

impl LevelConfig {
    fn resolve(&self, context: &str) -> GameResult<MiningLevel> {
        match self {
            Self::Tier(tier) => Ok(MiningLevel::Tier(*tier)),
            Self::Named(name) if name == "unlimited" => Ok(MiningLevel::Unlimited),
            Self::Named(name) => Err(GameError::InvalidConfig(format!(
                "{context}: mining level '{name}' is neither a tier nor 'unlimited'"
            ))),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
struct ItemConfig {
    id: String,
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct CostConfig {
    item: String,
    quantity: u32,
}

#[derive(Clone, Debug, Deserialize)]
struct ToolConfig {
    id: String,
    name: String,
    mining_level: LevelConfig,
    speed_factor: f64,
    #[serde(default)]
    upgrade_costs: Vec<CostConfig>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
struct DropsConfig {
    min: u32,
    max: u32,
    rate: f64,
}

#[derive(Clone, Debug, Deserialize)]
struct BlockConfig {
    id: String,
    drop_item: String,
    mining_level: u32,
    mining_time: f64,
    drops: DropsConfig,
}

#[derive(Clone, Debug, Deserialize)]
struct IngredientConfig {
    item: String,
    quantity: u32,
}

#[derive(Clone, Debug, Deserialize)]
struct RecipeConfig {
    id: String,
    #[serde(default)]
    processing_time: f64,
    inputs: Vec<IngredientConfig>,
    outputs: Vec<IngredientConfig>,
}

/// The whole declarative game configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GameConfig {
    /// Inventory dimensions; defaults to the colony-issue 16x32.
    #[serde(default)]
    inventory: Option<InventoryConfig>,
    #[serde(default)]
    items: Vec<ItemConfig>,
    #[serde(default)]
    tools: Vec<ToolConfig>,
    #[serde(default)]
    blocks: Vec<BlockConfig>,
    #[serde(default)]
    recipes: Vec<RecipeConfig>,
}

impl GameConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] for malformed TOML.
    pub fn from_toml_str(text: &str) -> GameResult<Self> {
        toml::from_str(text).map_err(|e| GameError::InvalidConfig(e.to_string()))
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] for I/O or parse failures.
    pub fn from_path(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            GameError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// The configured inventory dimensions.
    #[must_use]
    pub fn inventory(&self) -> InventoryConfig {
        self.inventory.unwrap_or_default()
    }

    /// Validates all entries and builds the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] for duplicate IDs, dangling
    /// references, or out-of-range values (the same checks the `register_*`
    /// methods apply to hand-built catalogs).
    pub fn build_catalog(&self) -> GameResult<Catalog> {
        let mut catalog = Catalog::new();

        for item in &self.items {
            catalog.register_item(Item::new(item.id.clone(), item.name.clone()))?;
        }
        for tool in &self.tools {
            let level = tool
                .mining_level
                .resolve(&format!("tool '{}'", tool.id))?;
            catalog.register_tool(Tool {
                id: tool.id.clone(),
                name: tool.name.clone(),
                mining_level: level,
                speed_factor: tool.speed_factor,
                upgrade_costs: tool
                    .upgrade_costs
                    .iter()
                    .map(|c| (c.item.clone(), c.quantity))
                    .collect(),
            })?;
        }
        for block in &self.blocks {
            let rates = DropRates::new(block.drops.min, block.drops.max, block.drops.rate)?;
            catalog.register_block(Block {
                id: block.id.clone(),
                drop_item: block.drop_item.clone(),
                mining_level: block.mining_level,
                mining_time: block.mining_time,
                drop_rates: rates,
            })?;
        }
        for recipe in &self.recipes {
            catalog.register_recipe(Recipe {
                id: recipe.id.clone(),
                inputs: recipe
                    .inputs
                    .iter()
                    .map(|i| Ingredient::new(i.item.clone(), i.quantity))
                    .collect(),
                outputs: recipe
                    .outputs
                    .iter()
                    .map(|o| Ingredient::new(o.item.clone(), o.quantity))
                    .collect(),
                processing_time: recipe.processing_time,
            })?;
        }

        tracing::debug!(
            items = self.items.len(),
            tools = self.tools.len(),
            blocks = self.blocks.len(),
            recipes = self.recipes.len(),
            "catalog built from config"
        );
        Ok(catalog)
    }
}
