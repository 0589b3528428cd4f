//! Customer system - spawns customers, turns arrivals into orders and walks
//! served or abandoned customers out

use backroom_logic::geometry::Vec2;
use backroom_logic::orders::OrderBoard;
use backroom_logic::pathing::PathFollow;
use backroom_logic::recipes::RecipeBook;
use backroom_logic::scoring::Satisfaction;
use hecs::{Entity, World};
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::components::{Customer, CustomerFace, CustomerState, Position};
use crate::config::KitchenConfig;
use crate::events::{EventLog, KitchenEvent};

/// Spawn a customer at the entrance heading for queue slot `slot`.
pub fn spawn_customer(world: &mut World, recipe: &str, slot: usize, config: &KitchenConfig) -> Entity {
    let start = config.entrance;
    let target = config.queue_position(slot);
    log::debug!("customer for {} heading to slot {}", recipe, slot);
    world.spawn((
        Customer::new(recipe, slot),
        Position::from(start),
        PathFollow::new(start, target, config.customer_speed),
    ))
}

/// Lowest queue slot not taken by an arriving or waiting customer.
fn free_queue_slot(world: &World) -> usize {
    let taken: Vec<usize> = world
        .query::<&Customer>()
        .iter()
        .filter(|(_, c)| c.state != CustomerState::Leaving)
        .map(|(_, c)| c.queue_slot)
        .collect();
    (0..).find(|slot| !taken.contains(slot)).unwrap_or(0)
}

/// Spawn one customer with a random recipe when the queue has room.
pub fn customer_spawn_system<R: Rng>(
    world: &mut World,
    recipes: &RecipeBook,
    config: &KitchenConfig,
    rng: &mut R,
) -> Option<Entity> {
    let in_queue = world
        .query::<&Customer>()
        .iter()
        .filter(|(_, c)| c.state != CustomerState::Leaving)
        .count();
    if in_queue >= config.max_customers {
        return None;
    }
    let recipe = recipes.keys().choose(rng)?.to_string();
    let slot = free_queue_slot(world);
    Some(spawn_customer(world, &recipe, slot, config))
}

/// Handle customers that finished walking: arrivals at the counter place
/// their order, leavers reaching the exit despawn.
pub fn customer_arrival_system(
    world: &mut World,
    arrived: &[Entity],
    orders: &mut OrderBoard,
    recipes: &RecipeBook,
    now: f64,
    events: &mut EventLog,
) {
    let mut departed = Vec::new();

    for &entity in arrived {
        let Ok(mut customer) = world.get::<&mut Customer>(entity) else {
            continue;
        };
        match customer.state {
            CustomerState::Arriving => {
                let make_time = recipes
                    .get(&customer.recipe)
                    .map(|r| r.make_time)
                    .unwrap_or(60.0);
                let order_number = orders.add_order(customer.recipe.as_str(), make_time, now);
                customer.order_number = Some(order_number);
                customer.state = CustomerState::Waiting;
                log::info!("customer placed order {} for {}", order_number, customer.recipe);
                events.push(KitchenEvent::CustomerArrived {
                    order_number,
                    recipe: customer.recipe.clone(),
                });
            }
            CustomerState::Leaving => departed.push(entity),
            CustomerState::Waiting => {}
        }
    }

    for entity in departed {
        let _ = world.despawn(entity);
    }
}

pub fn customer_by_order(world: &World, order_number: u32) -> Option<Entity> {
    world
        .query::<&Customer>()
        .iter()
        .find(|(_, c)| c.order_number == Some(order_number))
        .map(|(entity, _)| entity)
}

/// Show the customer's face and send them to the exit.
/// Returns false when no customer holds the order.
pub fn remove_customer_by_order(
    world: &mut World,
    order_number: u32,
    satisfaction: Satisfaction,
    exit: Vec2,
    speed: f32,
) -> bool {
    let Some(entity) = customer_by_order(world, order_number) else {
        return false;
    };
    let current = world
        .get::<&Position>(entity)
        .map(|p| p.point)
        .unwrap_or(exit);
    if let Ok(mut customer) = world.get::<&mut Customer>(entity) {
        customer.order_number = None;
        customer.state = CustomerState::Leaving;
    }
    let _ = world.insert(
        entity,
        (CustomerFace { satisfaction }, PathFollow::new(current, exit, speed)),
    );
    true
}

/// Drop overdue tickets; their customers leave angry.
pub fn order_expiry_system(
    world: &mut World,
    orders: &mut OrderBoard,
    now: f64,
    exit: Vec2,
    speed: f32,
    events: &mut EventLog,
) {
    for ticket in orders.expire_overdue(now) {
        log::info!("order {} ({}) expired", ticket.order_number, ticket.recipe);
        remove_customer_by_order(world, ticket.order_number, Satisfaction::Angry, exit, speed);
        events.push(KitchenEvent::OrderExpired {
            order_number: ticket.order_number,
        });
    }
}
