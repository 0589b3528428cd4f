//! Recipes, meal names and meal prices.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Price charged for a meal with no recipe entry.
pub const DEFAULT_MEAL_PRICE: u32 = 10;

/// A meal customers can order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    /// Order key, e.g. `"steakMeal"`
    pub key: String,
    /// Name the finished meal item carries, e.g. `"steak meal"`
    pub display_name: String,
    pub ingredients: Vec<String>,
    /// Seconds the customer is willing to wait
    pub make_time: f32,
    /// Base gold paid on delivery
    pub price: u32,
}

/// Lookup table over all recipes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn get(&self, key: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.key == key)
    }

    /// Map a meal item's display name (`"acai bowl"`) to its recipe.
    pub fn by_display_name(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.display_name == name)
    }

    /// Recipe whose ingredient set equals `names`, ignoring order.
    pub fn match_ingredients<S: AsRef<str>>(&self, names: &[S]) -> Option<&Recipe> {
        let wanted: HashSet<&str> = names.iter().map(|n| n.as_ref()).collect();
        self.recipes.iter().find(|r| {
            r.ingredients.len() == names.len()
                && r.ingredients.iter().map(String::as_str).collect::<HashSet<_>>() == wanted
        })
    }

    /// Gold paid for `key`, falling back to the default price.
    pub fn price(&self, key: &str) -> u32 {
        self.get(key).map(|r| r.price).unwrap_or(DEFAULT_MEAL_PRICE)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.recipes.iter().map(|r| r.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
