//! Timer system - advances cook and chop timers and applies the resulting
//! ingredient states

use backroom_logic::timer::TimerEvent;
use hecs::World;

use crate::components::{ChopTimer, CookTimer, Ingredient, Item};
use crate::events::{EventLog, KitchenEvent};

/// Advance every running timer by `delta_seconds`.
pub fn item_timer_system(world: &mut World, delta_seconds: f32, events: &mut EventLog) {
    for (_, (item, ingredient, timer)) in world
        .query_mut::<(&Item, &mut Ingredient, &mut CookTimer)>()
    {
        if let Some(event) = timer.0.advance(delta_seconds) {
            apply_timer_event(item, ingredient, event, events);
        }
    }

    for (_, (item, ingredient, timer)) in world
        .query_mut::<(&Item, &mut Ingredient, &mut ChopTimer)>()
    {
        if let Some(event) = timer.0.advance(delta_seconds) {
            apply_timer_event(item, ingredient, event, events);
        }
    }
}

fn apply_timer_event(item: &Item, ingredient: &mut Ingredient, event: TimerEvent, events: &mut EventLog) {
    match event {
        TimerEvent::Cooked => {
            ingredient.cook_item();
            log::debug!("{} cooked", item.name);
            events.push(KitchenEvent::ItemCooked { item: item.id });
        }
        TimerEvent::Burnt => {
            ingredient.burn_item();
            log::debug!("{} burnt", item.name);
            events.push(KitchenEvent::ItemBurnt { item: item.id });
        }
        TimerEvent::Chopped => {
            ingredient.chop_item();
            log::debug!("{} chopped", item.name);
            events.push(KitchenEvent::ItemChopped { item: item.id });
        }
    }
}
