//! Item system - spawning, lookup and meal assembly

use backroom_logic::data::IngredientSpec;
use backroom_logic::recipes::{Recipe, RecipeBook};
use hecs::{Entity, World};

use crate::components::{ChopTimer, CookTimer, Ingredient, Inventory, Item, ItemId, Meal};

/// Spawn an unheld ingredient with timers matching what it can become.
pub fn spawn_ingredient(world: &mut World, id: ItemId, spec: &IngredientSpec) -> Entity {
    let ingredient = Ingredient::from_spec(spec);
    let entity = world.spawn((Item::new(id, spec.name.as_str()), ingredient));
    if ingredient.cookable {
        let _ = world.insert_one(entity, CookTimer::new(spec.cook_time));
    }
    if ingredient.choppable {
        let _ = world.insert_one(entity, ChopTimer::new(spec.chop_time));
    }
    entity
}

/// Spawn a meal item named after the recipe's display name.
pub fn spawn_meal(world: &mut World, id: ItemId, recipe: &Recipe, ingredients: Vec<ItemId>) -> Entity {
    world.spawn((
        Item::new(id, recipe.display_name.as_str()),
        Meal {
            recipe: recipe.key.clone(),
            ingredients,
        },
    ))
}

pub fn find_item(world: &World, id: ItemId) -> Option<Entity> {
    world
        .query::<&Item>()
        .iter()
        .find(|(_, item)| item.id == id)
        .map(|(entity, _)| entity)
}

pub fn item_name(world: &World, id: ItemId) -> Option<String> {
    world
        .query::<&Item>()
        .iter()
        .find(|(_, item)| item.id == id)
        .map(|(_, item)| item.name.clone())
}

/// Completion percent of one ingredient: cook progress when cookable,
/// else chop progress when choppable, else fully done.
pub fn completion_percent(world: &World, entity: Entity) -> f32 {
    let Ok(ingredient) = world.get::<&Ingredient>(entity) else {
        return 100.0;
    };
    if ingredient.cookable {
        if let Ok(timer) = world.get::<&CookTimer>(entity) {
            return timer.0.completion_percent();
        }
    }
    if ingredient.choppable {
        if let Ok(timer) = world.get::<&ChopTimer>(entity) {
            return timer.0.completion_percent();
        }
    }
    100.0
}

/// Completion percents of a meal's ingredients, or of the item itself when
/// it is a lone ingredient.
pub fn meal_completion_percents(world: &World, entity: Entity) -> Vec<f32> {
    match world.get::<&Meal>(entity) {
        Ok(meal) => meal
            .ingredients
            .iter()
            .filter_map(|id| find_item(world, *id))
            .map(|e| completion_percent(world, e))
            .collect(),
        Err(_) => {
            if world.get::<&Ingredient>(entity).is_ok() {
                vec![completion_percent(world, entity)]
            } else {
                Vec::new()
            }
        }
    }
}

/// Despawn an item and, for meals, the ingredients it was made from.
pub fn despawn_item(world: &mut World, id: ItemId) {
    let Some(entity) = find_item(world, id) else {
        return;
    };
    let parts = world
        .get::<&Meal>(entity)
        .map(|meal| meal.ingredients.clone())
        .unwrap_or_default();
    for part in parts {
        if let Some(e) = find_item(world, part) {
            let _ = world.despawn(e);
        }
    }
    let _ = world.despawn(entity);
}

/// Combine the items in `inventory` into the recipe whose ingredient set
/// matches them exactly. Returns the recipe and the consumed item ids.
pub fn match_assembly<'a>(
    world: &World,
    inventory: &Inventory,
    recipes: &'a RecipeBook,
) -> Option<(&'a Recipe, Vec<ItemId>)> {
    let ids: Vec<ItemId> = inventory.items().collect();
    if ids.is_empty() {
        return None;
    }
    let mut names = Vec::with_capacity(ids.len());
    for id in &ids {
        let entity = find_item(world, *id)?;
        // Meals cannot be combined further
        if world.get::<&Ingredient>(entity).is_err() {
            return None;
        }
        names.push(item_name(world, *id)?);
    }
    recipes.match_ingredients(&names).map(|recipe| (recipe, ids))
}
