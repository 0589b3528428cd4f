//! Serving system - scores a served meal against the big ticket, pays out
//! gold and sends the customer home

use backroom_logic::geometry::Vec2;
use backroom_logic::orders::OrderBoard;
use backroom_logic::recipes::RecipeBook;
use backroom_logic::scoring::{gold_after_service, score_meal};
use hecs::{Entity, World};

use super::customers::remove_customer_by_order;
use super::interaction::InteractionOutcome;
use super::items::{despawn_item, find_item, meal_completion_percents};
use crate::components::{Inventory, Item};
use crate::error::KitchenError;
use crate::events::{EventLog, InventoryOwner, KitchenEvent};

/// Kitchen state a serving interaction reads and updates.
pub struct ServiceContext<'a> {
    pub orders: &'a mut OrderBoard,
    pub recipes: &'a RecipeBook,
    pub gold: &'a mut i32,
    /// Simulation time in seconds
    pub now: f64,
    pub price_multiplier: u32,
    /// Where served customers walk off to
    pub exit: Vec2,
    pub customer_speed: f32,
    pub events: &'a mut EventLog,
}

/// Serve the player's held meal against the big ticket.
pub fn serve_meal(
    world: &mut World,
    player: Entity,
    ctx: &mut ServiceContext,
) -> Result<InteractionOutcome, KitchenError> {
    let recipes = ctx.recipes;
    let Some(item) = world.get::<&Inventory>(player)?.get_item_first() else {
        return Ok(InteractionOutcome::Nothing);
    };
    let entity = find_item(world, item).ok_or(KitchenError::UnknownItem(item))?;
    let name = world.get::<&Item>(entity)?.name.clone();

    let Some(served) = recipes.by_display_name(&name) else {
        log::error!("No recipe found for this item: {}", name);
        return Ok(InteractionOutcome::Nothing);
    };
    let completion = meal_completion_percents(world, entity);

    world.get::<&mut Inventory>(player)?.remove_at(0)?;
    despawn_item(world, item);
    ctx.events.push(KitchenEvent::InventoryUpdated {
        owner: InventoryOwner::Player,
    });

    let Some(ticket) = ctx.orders.remove_order(None) else {
        log::info!("no ticket when submitting {}", served.key);
        ctx.events.push(KitchenEvent::MealServed {
            order_number: None,
            recipe: served.key.clone(),
            score: None,
            gold: *ctx.gold,
        });
        return Ok(InteractionOutcome::Served {
            order_number: None,
            satisfaction: None,
        });
    };

    let ordered: &[String] = recipes
        .get(&ticket.recipe)
        .map(|r| r.ingredients.as_slice())
        .unwrap_or(&[]);
    let score = score_meal(
        served.ingredients.as_slice(),
        ordered,
        ticket.elapsed(ctx.now),
        ticket.make_time,
        &completion,
    );
    // Only a waiting customer pays
    let paid = remove_customer_by_order(
        world,
        ticket.order_number,
        score.satisfaction,
        ctx.exit,
        ctx.customer_speed,
    );
    if paid {
        let price = recipes.price(&ticket.recipe) * ctx.price_multiplier;
        *ctx.gold = gold_after_service(*ctx.gold, score.satisfaction, price);
        ctx.events.push(KitchenEvent::CustomerLeft {
            satisfaction: score.satisfaction,
        });
    } else {
        log::debug!("no customer waiting on order {}", ticket.order_number);
    }

    log::info!(
        "Order {} ({}) served {}: {} (accuracy {}, time {}, completion {}), gold now {}",
        ticket.order_number,
        ticket.recipe,
        served.key,
        score.satisfaction.label(),
        score.accuracy,
        score.time,
        score.completion,
        *ctx.gold
    );
    ctx.events.push(KitchenEvent::MealServed {
        order_number: Some(ticket.order_number),
        recipe: served.key.clone(),
        score: Some(score),
        gold: *ctx.gold,
    });

    Ok(InteractionOutcome::Served {
        order_number: Some(ticket.order_number),
        satisfaction: Some(score.satisfaction),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Customer, CustomerState, ItemId, Player, Position};
    use crate::systems::items::{spawn_ingredient, spawn_meal};
    use backroom_logic::data::GameData;
    use backroom_logic::scoring::Satisfaction;

    struct Fixture {
        world: World,
        player: Entity,
        orders: OrderBoard,
        data: GameData,
        gold: i32,
        events: EventLog,
    }

    impl Fixture {
        fn new() -> Self {
            let mut world = World::new();
            let player = world.spawn((Player::default(), Position::new(15.0, 4.0), Inventory::new(1)));
            Self {
                world,
                player,
                orders: OrderBoard::new(),
                data: GameData::embedded().unwrap(),
                gold: 100,
                events: EventLog::new(),
            }
        }

        fn hold_meal(&mut self, recipe_key: &str, percent_done: f32) {
            let recipe = self.data.recipes.get(recipe_key).unwrap().clone();
            let mut parts = Vec::new();
            for (i, name) in recipe.ingredients.iter().enumerate() {
                let id = ItemId(100 + i as u32);
                let spec = self.data.ingredient(name).unwrap().clone();
                let e = spawn_ingredient(&mut self.world, id, &spec);
                if let Ok(mut t) = self.world.get::<&mut crate::components::ChopTimer>(e) {
                    t.0.elapsed = t.0.length * percent_done / 100.0;
                }
                if let Ok(mut t) = self.world.get::<&mut crate::components::CookTimer>(e) {
                    t.0.elapsed = t.0.length * percent_done / 100.0;
                }
                parts.push(id);
            }
            spawn_meal(&mut self.world, ItemId(1), &recipe, parts);
            self.world
                .get::<&mut Inventory>(self.player)
                .unwrap()
                .add_item(ItemId(1))
                .unwrap();
        }

        /// Place an order with a customer waiting on it.
        fn seat_customer(&mut self, recipe: &str, make_time: f32) -> u32 {
            let order_number = self.orders.add_order(recipe, make_time, 0.0);
            let customer = Customer {
                order_number: Some(order_number),
                state: CustomerState::Waiting,
                ..Customer::new(recipe, 0)
            };
            self.world.spawn((customer, Position::new(17.0, 1.0)));
            order_number
        }

        fn serve(&mut self, now: f64) -> InteractionOutcome {
            let mut ctx = ServiceContext {
                orders: &mut self.orders,
                recipes: &self.data.recipes,
                gold: &mut self.gold,
                now,
                price_multiplier: 1,
                exit: Vec2::new(24.0, -2.0),
                customer_speed: 2.0,
                events: &mut self.events,
            };
            serve_meal(&mut self.world, self.player, &mut ctx).unwrap()
        }
    }

    #[test]
    fn test_perfect_salad_pays_price_plus_grin() {
        let mut f = Fixture::new();
        let n = f.seat_customer("salad", 70.0);
        f.hold_meal("salad", 100.0);

        let outcome = f.serve(10.0);
        assert_eq!(
            outcome,
            InteractionOutcome::Served {
                order_number: Some(n),
                satisfaction: Some(Satisfaction::Grin)
            }
        );
        assert_eq!(f.gold, 100 + 25 + 10);
        assert!(f.orders.is_empty());
        assert!(f.world.get::<&Inventory>(f.player).unwrap().is_empty());
        // meal and its three ingredients are gone, the customer walks off
        assert_eq!(f.world.len(), 2);
        assert!(f
            .world
            .query::<&Customer>()
            .iter()
            .all(|(_, c)| c.state == CustomerState::Leaving));
    }

    #[test]
    fn test_wrong_meal_scores_low() {
        let mut f = Fixture::new();
        f.seat_customer("steakMeal", 90.0);
        f.hold_meal("acaiBowl", 0.0);

        // accuracy 0, time 0 (late), completion 0
        let outcome = f.serve(200.0);
        assert_eq!(
            outcome,
            InteractionOutcome::Served {
                order_number: Some(1),
                satisfaction: Some(Satisfaction::Angry)
            }
        );
        assert_eq!(f.gold, 100 + 40 - 10);
    }

    #[test]
    fn test_no_ticket_consumes_meal_without_gold() {
        let mut f = Fixture::new();
        f.hold_meal("fruitSalad", 100.0);
        let outcome = f.serve(0.0);
        assert_eq!(
            outcome,
            InteractionOutcome::Served {
                order_number: None,
                satisfaction: None
            }
        );
        assert_eq!(f.gold, 100);
        assert!(f.world.get::<&Inventory>(f.player).unwrap().is_empty());
    }

    #[test]
    fn test_ticket_without_customer_pays_nothing() {
        let mut f = Fixture::new();
        let n = f.orders.add_order("fruitSalad", 60.0, 0.0);
        f.hold_meal("fruitSalad", 100.0);

        let outcome = f.serve(5.0);
        assert_eq!(
            outcome,
            InteractionOutcome::Served {
                order_number: Some(n),
                satisfaction: Some(Satisfaction::Grin)
            }
        );
        assert_eq!(f.gold, 100);
        assert!(f.orders.is_empty());
        assert!(!f
            .events
            .drain()
            .iter()
            .any(|e| matches!(e, KitchenEvent::CustomerLeft { .. })));
    }

    #[test]
    fn test_unknown_item_stays_with_player() {
        let mut f = Fixture::new();
        let spec = f.data.ingredient("beef").unwrap().clone();
        spawn_ingredient(&mut f.world, ItemId(5), &spec);
        f.world
            .get::<&mut Inventory>(f.player)
            .unwrap()
            .add_item(ItemId(5))
            .unwrap();
        f.orders.add_order("salad", 70.0, 0.0);

        assert_eq!(f.serve(0.0), InteractionOutcome::Nothing);
        assert_eq!(f.orders.len(), 1);
        assert!(f.world.get::<&Inventory>(f.player).unwrap().is_full());
    }
}
