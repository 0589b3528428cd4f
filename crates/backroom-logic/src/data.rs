//! Game data tables: recipes, ingredients, station accept lists, cutscenes.
//!
//! The default tables live in `data/*.json` at the workspace root and are
//! embedded at compile time. Replacement tables can be supplied as JSON
//! strings, which are validated before use.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cutscene::CutsceneScript;
use crate::recipes::{Recipe, RecipeBook};

const RECIPES_JSON: &str = include_str!("../../../data/recipes.json");
const INGREDIENTS_JSON: &str = include_str!("../../../data/ingredients.json");
const STATIONS_JSON: &str = include_str!("../../../data/stations.json");
const CUTSCENES_JSON: &str = include_str!("../../../data/cutscenes.json");

/// Static properties of an ingredient type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientSpec {
    pub name: String,
    pub cookable: bool,
    pub choppable: bool,
    /// Seconds on an oven or stove until cooked
    pub cook_time: f32,
    /// Seconds on a cutting board or blender until chopped
    pub chop_time: f32,
}

/// Accept list and slot count for one station kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationSpec {
    pub kind: String,
    /// `None` accepts any item
    pub accepts: Option<Vec<String>>,
    pub capacity: usize,
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to parse {table} table: {source}")]
    Parse {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate {table} entry: {name}")]
    Duplicate { table: &'static str, name: String },
    #[error("recipe {recipe} uses unknown ingredient {ingredient}")]
    UnknownIngredient { recipe: String, ingredient: String },
    #[error("station {kind} has zero capacity")]
    ZeroCapacity { kind: String },
    #[error("cutscene {name} has no scenes")]
    EmptyCutscene { name: String },
}

/// All data tables the simulation reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameData {
    pub recipes: RecipeBook,
    pub ingredients: Vec<IngredientSpec>,
    pub stations: Vec<StationSpec>,
    pub cutscenes: Vec<CutsceneScript>,
}

impl GameData {
    /// Parse the tables embedded from `data/`.
    pub fn embedded() -> Result<Self, DataError> {
        Self::from_json_str(RECIPES_JSON, INGREDIENTS_JSON, STATIONS_JSON, CUTSCENES_JSON)
    }

    /// Parse and validate tables from JSON strings.
    pub fn from_json_str(
        recipes: &str,
        ingredients: &str,
        stations: &str,
        cutscenes: &str,
    ) -> Result<Self, DataError> {
        let recipes: Vec<Recipe> = parse("recipe", recipes)?;
        let ingredients: Vec<IngredientSpec> = parse("ingredient", ingredients)?;
        let stations: Vec<StationSpec> = parse("station", stations)?;
        let cutscenes: Vec<CutsceneScript> = parse("cutscene", cutscenes)?;

        let data = Self {
            recipes: RecipeBook::new(recipes),
            ingredients,
            stations,
            cutscenes,
        };
        data.validate()?;
        log::debug!(
            "loaded game data: {} recipes, {} ingredients, {} stations, {} cutscenes",
            data.recipes.len(),
            data.ingredients.len(),
            data.stations.len(),
            data.cutscenes.len()
        );
        Ok(data)
    }

    fn validate(&self) -> Result<(), DataError> {
        let mut seen = HashSet::new();
        for ingredient in &self.ingredients {
            if !seen.insert(ingredient.name.as_str()) {
                return Err(DataError::Duplicate {
                    table: "ingredient",
                    name: ingredient.name.clone(),
                });
            }
        }

        let mut keys = HashSet::new();
        for recipe in self.recipes.iter() {
            if !keys.insert(recipe.key.as_str()) {
                return Err(DataError::Duplicate {
                    table: "recipe",
                    name: recipe.key.clone(),
                });
            }
            if let Some(missing) = recipe.ingredients.iter().find(|i| !seen.contains(i.as_str())) {
                return Err(DataError::UnknownIngredient {
                    recipe: recipe.key.clone(),
                    ingredient: missing.clone(),
                });
            }
        }

        if let Some(station) = self.stations.iter().find(|s| s.capacity == 0) {
            return Err(DataError::ZeroCapacity {
                kind: station.kind.clone(),
            });
        }

        if let Some(script) = self.cutscenes.iter().find(|c| c.scenes.is_empty()) {
            return Err(DataError::EmptyCutscene {
                name: script.name.clone(),
            });
        }

        Ok(())
    }

    pub fn ingredient(&self, name: &str) -> Option<&IngredientSpec> {
        self.ingredients.iter().find(|i| i.name == name)
    }

    pub fn station(&self, kind: &str) -> Option<&StationSpec> {
        self.stations.iter().find(|s| s.kind == kind)
    }

    pub fn cutscene(&self, name: &str) -> Option<&CutsceneScript> {
        self.cutscenes.iter().find(|c| c.name == name)
    }
}

fn parse<T: serde::de::DeserializeOwned>(table: &'static str, json: &str) -> Result<T, DataError> {
    serde_json::from_str(json).map_err(|source| DataError::Parse { table, source })
}
