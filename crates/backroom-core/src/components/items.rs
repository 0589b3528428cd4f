//! Item components: ingredients, meals and their timers.

use backroom_logic::data::IngredientSpec;
use backroom_logic::timer::{IngredientState, ItemTimer, TimerKind};
use serde::{Deserialize, Serialize};

/// Stable item identifier. Inventories and meals refer to items by id so
/// references survive save/load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// Present on every item entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Lower-case item name, e.g. `"beef"` or `"steak meal"`
    pub name: String,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into().to_lowercase(),
        }
    }
}

/// A raw food item that can be cooked or chopped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub cookable: bool,
    pub choppable: bool,
    pub state: IngredientState,
}

impl Ingredient {
    pub fn from_spec(spec: &IngredientSpec) -> Self {
        Self {
            cookable: spec.cookable,
            choppable: spec.choppable,
            state: IngredientState::Raw,
        }
    }

    pub fn cook_item(&mut self) {
        if self.state != IngredientState::Burnt {
            self.state = IngredientState::Cooked;
        }
    }

    pub fn burn_item(&mut self) {
        self.state = IngredientState::Burnt;
    }

    pub fn chop_item(&mut self) {
        self.state = IngredientState::Chopped;
    }
}

/// A finished dish made from ingredient items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Recipe key, e.g. `"salad"`
    pub recipe: String,
    pub ingredients: Vec<ItemId>,
}

/// Cooking progress, only on cookable ingredients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CookTimer(pub ItemTimer);

impl CookTimer {
    pub fn new(length: f32) -> Self {
        Self(ItemTimer::new(TimerKind::Cook, length))
    }
}

/// Chopping progress, only on choppable ingredients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChopTimer(pub ItemTimer);

impl ChopTimer {
    pub fn new(length: f32) -> Self {
        Self(ItemTimer::new(TimerKind::Chop, length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_name_lowercased() {
        assert_eq!(Item::new(ItemId(1), "Steak Meal").name, "steak meal");
    }

    #[test]
    fn test_burnt_stays_burnt() {
        let mut ingredient = Ingredient {
            cookable: true,
            choppable: false,
            state: IngredientState::Raw,
        };
        ingredient.cook_item();
        assert_eq!(ingredient.state, IngredientState::Cooked);
        ingredient.burn_item();
        ingredient.cook_item();
        assert_eq!(ingredient.state, IngredientState::Burnt);
    }
}
