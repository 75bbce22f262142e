//! # Static Catalog
//!
//! The read-only registry of items, tools, blocks, and recipes.
//!
//! The catalog is an explicit value populated once at startup (either from
//! [`Catalog::standard`] or from a TOML document, see [`crate::config`]) and
//! then only queried. Registration validates cross-references eagerly so
//! every ID held by a [`Block`], [`Recipe`], or [`Tool`] is guaranteed to
//! resolve for the lifetime of the catalog.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{GameError, GameResult};

/// An immutable item definition. Identity, equality, and hashing are all
/// by `id`; the display name is presentation data.
#[derive(Clone, Debug)]
pub struct Item {
    /// Unique identifier, e.g. `"raw_iron"`.
    pub id: String,
    /// Human-readable name, e.g. `"Raw Iron"`.
    pub name: String,
}

impl Item {
    /// Creates a new item definition.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Mining capability of a tool.
///
/// Ordinary tools carry a tier; higher tiers mine everything lower ones
/// can. [`MiningLevel::Unlimited`] is the sentinel carried by the instant
/// test tool: it bypasses both the level gate and all simulated delays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MiningLevel {
    /// Regular tier; gates blocks with `mining_level <= tier`.
    Tier(u32),
    /// Sentinel: mines anything, instantly.
    Unlimited,
}

impl MiningLevel {
    /// Whether a tool at this level can break a block of the given level.
    #[inline]
    #[must_use]
    pub const fn can_mine(self, block_level: u32) -> bool {
        match self {
            Self::Tier(tier) => tier >= block_level,
            Self::Unlimited => true,
        }
    }
}

impl fmt::Display for MiningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tier(tier) => write!(f, "level {tier}"),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}

/// A mining tool definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Tool {
    /// Unique identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Which block tiers this tool can break.
    pub mining_level: MiningLevel,
    /// Mining time divisor; 2.0 mines twice as fast. Always positive.
    pub speed_factor: f64,
    /// Items consumed when upgrading *to* this tool: `(item id, quantity)`.
    pub upgrade_costs: Vec<(String, u32)>,
}

impl Tool {
    /// Whether this is the instant sentinel tool (skips level and time checks).
    #[inline]
    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.mining_level == MiningLevel::Unlimited
    }
}

/// Yield bounds for a block's drop, driven by a bounded random walk.
///
/// Each extraction starts at `min` and, while below `max`, keeps rolling:
/// a draw at or under `rate` adds one unit, anything else stops the walk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropRates {
    min: u32,
    max: u32,
    rate: f64,
}

impl DropRates {
    /// Creates validated drop rates.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] if `min > max` or `rate` is
    /// outside `[0, 1]`.
    pub fn new(min: u32, max: u32, rate: f64) -> GameResult<Self> {
        if min > max {
            return Err(GameError::InvalidConfig(format!(
                "drop rates: min {min} exceeds max {max}"
            )));
        }
        if !(0.0..=1.0).contains(&rate) {
            return Err(GameError::InvalidConfig(format!(
                "drop rates: rate {rate} outside [0, 1]"
            )));
        }
        Ok(Self { min, max, rate })
    }

    /// Minimum yield per extraction.
    #[inline]
    #[must_use]
    pub const fn min(self) -> u32 {
        self.min
    }

    /// Maximum yield per extraction.
    #[inline]
    #[must_use]
    pub const fn max(self) -> u32 {
        self.max
    }

    /// Probability of each extra unit beyond `min`.
    #[inline]
    #[must_use]
    pub const fn rate(self) -> f64 {
        self.rate
    }
}

/// A minable block definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    /// Unique identifier.
    pub id: String,
    /// Item ID this block drops when mined.
    pub drop_item: String,
    /// Minimum tool tier required to mine it.
    pub mining_level: u32,
    /// Base seconds per extraction, before the tool's speed factor.
    pub mining_time: f64,
    /// Randomized yield bounds.
    pub drop_rates: DropRates,
}

/// One `(item, quantity)` entry of a recipe's inputs or outputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ingredient {
    /// The item ID.
    pub item: String,
    /// Quantity consumed or produced per batch. Always positive.
    pub quantity: u32,
}

impl Ingredient {
    /// Creates a new ingredient entry.
    #[must_use]
    pub fn new(item: impl Into<String>, quantity: u32) -> Self {
        Self {
            item: item.into(),
            quantity,
        }
    }
}

/// A crafting recipe: ordered inputs, ordered outputs, and a processing time.
#[derive(Clone, Debug, PartialEq)]
pub struct Recipe {
    /// Unique identifier.
    pub id: String,
    /// Items consumed per batch.
    pub inputs: Vec<Ingredient>,
    /// Items produced per batch.
    pub outputs: Vec<Ingredient>,
    /// Seconds of simulated processing per batch.
    pub processing_time: f64,
}

/// The immutable registry of all catalog entries.
///
/// Populated through the `register_*` methods during construction, queried
/// by ID afterwards and never mutated again.
#[derive(Debug, Default)]
pub struct Catalog {
    items: HashMap<String, Item>,
    tools: HashMap<String, Tool>,
    blocks: HashMap<String, Block>,
    recipes: HashMap<String, Recipe>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an item.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] on a duplicate ID.
    pub fn register_item(&mut self, item: Item) -> GameResult<()> {
        if self.items.contains_key(&item.id) {
            return Err(GameError::InvalidConfig(format!(
                "item '{}' registered twice",
                item.id
            )));
        }
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    /// Registers a tool.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] on a duplicate ID, a
    /// non-positive speed factor, a zero-quantity cost, or an upgrade cost
    /// naming an unregistered item.
    pub fn register_tool(&mut self, tool: Tool) -> GameResult<()> {
        if self.tools.contains_key(&tool.id) {
            return Err(GameError::InvalidConfig(format!(
                "tool '{}' registered twice",
                tool.id
            )));
        }
        if tool.speed_factor <= 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "tool '{}': speed factor must be positive",
                tool.id
            )));
        }
        for (item, quantity) in &tool.upgrade_costs {
            if !self.items.contains_key(item) {
                return Err(GameError::InvalidConfig(format!(
                    "tool '{}': upgrade cost names unknown item '{item}'",
                    tool.id
                )));
            }
            if *quantity == 0 {
                return Err(GameError::InvalidConfig(format!(
                    "tool '{}': upgrade cost for '{item}' must be positive",
                    tool.id
                )));
            }
        }
        self.tools.insert(tool.id.clone(), tool);
        Ok(())
    }

    /// Registers a block.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] on a duplicate ID, a
    /// non-positive mining time, or an unregistered drop item.
    pub fn register_block(&mut self, block: Block) -> GameResult<()> {
        if self.blocks.contains_key(&block.id) {
            return Err(GameError::InvalidConfig(format!(
                "block '{}' registered twice",
                block.id
            )));
        }
        if block.mining_time <= 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "block '{}': mining time must be positive",
                block.id
            )));
        }
        if !self.items.contains_key(&block.drop_item) {
            return Err(GameError::InvalidConfig(format!(
                "block '{}' drops unknown item '{}'",
                block.id, block.drop_item
            )));
        }
        self.blocks.insert(block.id.clone(), block);
        Ok(())
    }

    /// Registers a recipe.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] on a duplicate ID, empty input
    /// or output lists, zero quantities, a negative processing time, or an
    /// ingredient naming an unregistered item.
    pub fn register_recipe(&mut self, recipe: Recipe) -> GameResult<()> {
        if self.recipes.contains_key(&recipe.id) {
            return Err(GameError::InvalidConfig(format!(
                "recipe '{}' registered twice",
                recipe.id
            )));
        }
        if recipe.inputs.is_empty() {
            return Err(GameError::InvalidConfig(format!(
                "recipe '{}' must have at least one input",
                recipe.id
            )));
        }
        if recipe.outputs.is_empty() {
            return Err(GameError::InvalidConfig(format!(
                "recipe '{}' must have at least one output",
                recipe.id
            )));
        }
        if recipe.processing_time < 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "recipe '{}': processing time must not be negative",
                recipe.id
            )));
        }
        for entry in recipe.inputs.iter().chain(&recipe.outputs) {
            if !self.items.contains_key(&entry.item) {
                return Err(GameError::InvalidConfig(format!(
                    "recipe '{}' references unknown item '{}'",
                    recipe.id, entry.item
                )));
            }
            if entry.quantity == 0 {
                return Err(GameError::InvalidConfig(format!(
                    "recipe '{}': quantity for '{}' must be positive",
                    recipe.id, entry.item
                )));
            }
        }
        self.recipes.insert(recipe.id.clone(), recipe);
        Ok(())
    }

    /// Looks up an item by ID.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Looks up a tool by ID.
    #[must_use]
    pub fn tool(&self, id: &str) -> Option<&Tool> {
        self.tools.get(id)
    }

    /// Looks up a block by ID.
    #[must_use]
    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.get(id)
    }

    /// Looks up a recipe by ID.
    #[must_use]
    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    /// Display name for an item ID, falling back to the raw ID for entries
    /// that are not registered.
    #[must_use]
    pub fn item_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.items.get(id).map_or(id, |item| item.name.as_str())
    }

    /// All blocks, ordered by ID.
    #[must_use]
    pub fn blocks(&self) -> Vec<&Block> {
        let mut all: Vec<_> = self.blocks.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// All tools, ordered by ID.
    #[must_use]
    pub fn tools(&self) -> Vec<&Tool> {
        let mut all: Vec<_> = self.tools.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// All recipes, ordered by ID.
    #[must_use]
    pub fn recipes(&self) -> Vec<&Recipe> {
        let mut all: Vec<_> = self.recipes.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// Recipes whose ID contains `term` (case-insensitive), ordered by ID.
    #[must_use]
    pub fn search_recipes(&self, term: &str) -> Vec<&Recipe> {
        let needle = term.to_lowercase();
        let mut found: Vec<_> = self
            .recipes
            .values()
            .filter(|r| r.id.to_lowercase().contains(&needle))
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        found
    }

    /// The block that drops the given item, if any.
    #[must_use]
    pub fn block_dropping(&self, item_id: &str) -> Option<&Block> {
        self.blocks.values().find(|b| b.drop_item == item_id)
    }

    /// Number of registered items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// The standard Zars P14a catalog: every item, tool, block, and recipe
    /// the colony ships with.
    ///
    /// # Panics
    ///
    /// Never panics; the built-in data is validated by the same
    /// registration paths as external config and is covered by tests.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn standard() -> Self {
        let mut catalog = Self::new();

        let items = [
            ("cobbled_stone", "Cobbled Stone"),
            ("coal", "Coal"),
            ("raw_iron", "Raw Iron"),
            ("raw_copper", "Raw Copper"),
            ("raw_gold", "Raw Gold"),
            ("raw_aluminium", "Raw Aluminium"),
            ("raw_veridium", "Raw Veridium"),
            ("raw_titanium", "Raw Titanium"),
            ("raw_zarsium", "Raw Zarsium"),
            ("copper_ingot", "Copper Ingot"),
            ("iron_ingot", "Iron Ingot"),
            ("gold_ingot", "Gold Ingot"),
            ("aluminium_ingot", "Aluminium Ingot"),
            ("veridium_ingot", "Veridium Ingot"),
            ("titanium_ingot", "Titanium Ingot"),
            ("zarsium_ingot", "Zarsium Ingot"),
            ("steel_ingot", "Steel Ingot"),
        ];
        for (id, name) in items {
            catalog
                .register_item(Item::new(id, name))
                .unwrap_or_else(|e| unreachable!("built-in item: {e}"));
        }

        let tools = [
            Tool {
                id: "wood_pickaxe".to_string(),
                name: "Wooden Pickaxe".to_string(),
                mining_level: MiningLevel::Tier(0),
                speed_factor: 0.5,
                upgrade_costs: Vec::new(),
            },
            Tool {
                id: "iron_pickaxe".to_string(),
                name: "Iron Pickaxe".to_string(),
                mining_level: MiningLevel::Tier(1),
                speed_factor: 1.0,
                upgrade_costs: vec![
                    ("iron_ingot".to_string(), 3),
                    ("cobbled_stone".to_string(), 2),
                ],
            },
            Tool {
                id: "test_tool".to_string(),
                name: "Test Tool".to_string(),
                mining_level: MiningLevel::Unlimited,
                speed_factor: 9999.0,
                upgrade_costs: Vec::new(),
            },
        ];
        for tool in tools {
            catalog
                .register_tool(tool)
                .unwrap_or_else(|e| unreachable!("built-in tool: {e}"));
        }

        let blocks = [
            ("coal", "coal", 0, 2.0, (1, 3, 0.2)),
            ("iron", "raw_iron", 1, 3.0, (1, 2, 0.07)),
            ("copper", "raw_copper", 1, 2.5, (1, 2, 0.07)),
            ("gold", "raw_gold", 2, 3.5, (1, 2, 0.07)),
            ("aluminium", "raw_aluminium", 2, 3.5, (1, 2, 0.07)),
            ("veridium", "raw_veridium", 3, 4.0, (1, 2, 0.07)),
            ("titanium", "raw_titanium", 4, 4.5, (1, 2, 0.07)),
            ("stone", "cobbled_stone", 0, 1.5, (1, 1, 1.0)),
        ];
        for (id, drop, level, time, (min, max, rate)) in blocks {
            let rates = DropRates::new(min, max, rate)
                .unwrap_or_else(|e| unreachable!("built-in drop rates: {e}"));
            catalog
                .register_block(Block {
                    id: id.to_string(),
                    drop_item: drop.to_string(),
                    mining_level: level,
                    mining_time: time,
                    drop_rates: rates,
                })
                .unwrap_or_else(|e| unreachable!("built-in block: {e}"));
        }

        let recipes = [
            Recipe {
                id: "iron_ingot".to_string(),
                inputs: vec![Ingredient::new("raw_iron", 1)],
                outputs: vec![Ingredient::new("iron_ingot", 1)],
                processing_time: 1.0,
            },
            Recipe {
                id: "copper_ingot".to_string(),
                inputs: vec![Ingredient::new("raw_copper", 1)],
                outputs: vec![Ingredient::new("copper_ingot", 1)],
                processing_time: 1.0,
            },
            Recipe {
                id: "steel_ingot".to_string(),
                inputs: vec![
                    Ingredient::new("iron_ingot", 2),
                    Ingredient::new("coal", 1),
                ],
                outputs: vec![Ingredient::new("steel_ingot", 1)],
                processing_time: 2.0,
            },
        ];
        for recipe in recipes {
            catalog
                .register_recipe(recipe)
                .unwrap_or_else(|e| unreachable!("built-in recipe: {e}"));
        }

        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_identity_is_by_id() {
        let a = Item::new("coal", "Coal");
        let b = Item::new("coal", "Anthracite");
        assert_eq!(a, b);
    }

    #[test]
    fn mining_level_ordering() {
        assert!(MiningLevel::Tier(1) > MiningLevel::Tier(0));
        assert!(MiningLevel::Unlimited > MiningLevel::Tier(u32::MAX));
        assert!(MiningLevel::Unlimited.can_mine(u32::MAX));
        assert!(!MiningLevel::Tier(1).can_mine(2));
    }

    #[test]
    fn drop_rates_reject_bad_bounds() {
        assert!(DropRates::new(3, 1, 0.5).is_err());
        assert!(DropRates::new(1, 3, 1.5).is_err());
        assert!(DropRates::new(1, 3, 0.2).is_ok());
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut catalog = Catalog::new();
        catalog.register_item(Item::new("coal", "Coal")).unwrap();
        let dup = catalog.register_item(Item::new("coal", "Coal"));
        assert!(matches!(dup, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn block_requires_registered_drop_item() {
        let mut catalog = Catalog::new();
        let result = catalog.register_block(Block {
            id: "mystery".to_string(),
            drop_item: "nothing".to_string(),
            mining_level: 0,
            mining_time: 1.0,
            drop_rates: DropRates::new(1, 1, 1.0).unwrap(),
        });
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn recipe_requires_inputs_and_outputs() {
        let mut catalog = Catalog::new();
        catalog.register_item(Item::new("coal", "Coal")).unwrap();
        let no_inputs = catalog.register_recipe(Recipe {
            id: "free_coal".to_string(),
            inputs: Vec::new(),
            outputs: vec![Ingredient::new("coal", 1)],
            processing_time: 0.0,
        });
        assert!(matches!(no_inputs, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn standard_catalog_is_consistent() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.item_count(), 17);
        assert_eq!(catalog.blocks().len(), 8);
        assert_eq!(catalog.tools().len(), 3);
        assert_eq!(catalog.recipes().len(), 3);
        assert!(catalog.tool("test_tool").unwrap().is_instant());
        assert_eq!(
            catalog.block_dropping("cobbled_stone").unwrap().id,
            "stone"
        );
    }

    #[test]
    fn item_name_resolves_or_falls_back_to_the_raw_id() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.item_name("coal"), "Coal");
        let unregistered = String::from("unobtainium");
        assert_eq!(catalog.item_name(&unregistered), "unobtainium");
    }

    #[test]
    fn recipe_search_is_case_insensitive() {
        let catalog = Catalog::standard();
        let hits = catalog.search_recipes("INGOT");
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].id, "copper_ingot");
    }
}
