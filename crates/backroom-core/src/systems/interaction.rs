//! Station interaction system - routes player interactions to the closest
//! station and moves items between inventories
//!
//! Stations handle three interaction tags:
//! - `"default"`: drop the held item on the station, or pick the station's item up
//! - `"chop"`: start (or resume) chopping on a cutting board or blender
//! - `"stopChop"`: pause chopping
//!
//! Serving stations serve on `"default"` or `"chop"` and ignore `"stopChop"`;
//! see [`super::serve_meal`].

use std::fmt;
use std::str::FromStr;

use backroom_logic::geometry::Vec2;
use backroom_logic::scoring::Satisfaction;
use backroom_logic::timer::IngredientState;
use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use super::items::{completion_percent, find_item, item_name};
use super::serving::{serve_meal, ServiceContext};
use crate::components::{
    ChopTimer, CookTimer, Ingredient, Inventory, Item, ItemId, Position, Station, StationId, StationKind,
};
use crate::error::KitchenError;
use crate::events::{EventLog, InventoryOwner, KitchenEvent};

pub const TOOLTIP_TEXT: &str = "Press E to interact";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interaction {
    Default,
    Chop,
    StopChop,
}

impl Interaction {
    pub fn tag(&self) -> &'static str {
        match self {
            Interaction::Default => "default",
            Interaction::Chop => "chop",
            Interaction::StopChop => "stopChop",
        }
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Interaction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Interaction::Default),
            "chop" => Ok(Interaction::Chop),
            "stopChop" => Ok(Interaction::StopChop),
            other => Err(format!("unknown interaction: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    NotAccepted,
    StationFull,
}

/// What an interaction did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionOutcome {
    Deposited {
        station: StationId,
        item: ItemId,
    },
    Collected {
        station: StationId,
        item: ItemId,
    },
    Rejected {
        station: StationId,
        item: ItemId,
        reason: RejectReason,
    },
    ChopStarted {
        station: StationId,
        item: ItemId,
    },
    ChopStopped {
        station: StationId,
        item: ItemId,
    },
    Served {
        order_number: Option<u32>,
        satisfaction: Option<Satisfaction>,
    },
    /// Nothing to do for this station and interaction
    Nothing,
    /// Unrecognised interaction tag
    Ignored,
}

/// Closest station to `point`, with no range limit.
pub fn closest_station(world: &World, point: Vec2) -> Option<Entity> {
    world
        .query::<(&Station, &Position)>()
        .iter()
        .map(|(entity, (_, pos))| (entity, pos.point.distance_squared(&point)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity)
}

/// Interaction prompt shown over a station.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: &'static str,
    pub position: Vec2,
}

/// Tooltip for the nearest station within `range` of `point`.
pub fn interaction_tooltip(world: &World, point: Vec2, range: f32) -> Option<Tooltip> {
    let station = closest_station(world, point)?;
    let position = world.get::<&Position>(station).ok()?.point;
    if position.distance(&point) > range {
        return None;
    }
    Some(Tooltip {
        text: TOOLTIP_TEXT,
        position,
    })
}

/// Route an interaction from `player` to `station`.
pub fn dispatch_interaction(
    world: &mut World,
    player: Entity,
    station: Entity,
    interaction: Interaction,
    ctx: &mut ServiceContext,
) -> Result<InteractionOutcome, KitchenError> {
    let kind = world.get::<&Station>(station)?.kind;
    log::debug!("{} interaction at {}", interaction, kind);

    match (kind, interaction) {
        (StationKind::Serving, Interaction::StopChop) => Ok(InteractionOutcome::Nothing),
        (StationKind::Serving, _) => serve_meal(world, player, ctx),
        (_, Interaction::Default) => default_interaction(world, player, station, ctx.events),
        (_, Interaction::Chop) => set_chopping(world, station, true),
        (_, Interaction::StopChop) => set_chopping(world, station, false),
    }
}

/// Deposit the player's item when their hands are full, otherwise collect
/// the station's item.
pub fn default_interaction(
    world: &mut World,
    player: Entity,
    station: Entity,
    events: &mut EventLog,
) -> Result<InteractionOutcome, KitchenError> {
    let info = (*world.get::<&Station>(station)?).clone();
    let mut player_inv = (*world.get::<&Inventory>(player)?).clone();
    let mut station_inv = (*world.get::<&Inventory>(station)?).clone();

    if player_inv.is_full() {
        let Some(item) = player_inv.get_item_first() else {
            return Ok(InteractionOutcome::Nothing);
        };
        let name = item_name(world, item).ok_or(KitchenError::UnknownItem(item))?;

        let reason = if !info.is_item_accepted(&name) {
            Some(RejectReason::NotAccepted)
        } else if station_inv.is_full() {
            Some(RejectReason::StationFull)
        } else {
            None
        };
        if let Some(reason) = reason {
            log::debug!("{} rejected {}: {:?}", info.kind, name, reason);
            return Ok(InteractionOutcome::Rejected {
                station: info.id,
                item,
                reason,
            });
        }

        player_inv.remove_at(0)?;
        station_inv.add_item(item)?;
        *world.get::<&mut Inventory>(player)? = player_inv;
        *world.get::<&mut Inventory>(station)? = station_inv;
        on_station_receive(world, info.kind, item);

        events.push(KitchenEvent::InventoryUpdated {
            owner: InventoryOwner::Player,
        });
        events.push(KitchenEvent::InventoryUpdated {
            owner: InventoryOwner::Station(info.id),
        });
        return Ok(InteractionOutcome::Deposited {
            station: info.id,
            item,
        });
    }

    let Some(index) = station_inv.last_occupied() else {
        return Ok(InteractionOutcome::Nothing);
    };
    let Some(item) = station_inv.remove_at(index)? else {
        return Ok(InteractionOutcome::Nothing);
    };
    player_inv.add_item(item)?;
    *world.get::<&mut Inventory>(player)? = player_inv;
    *world.get::<&mut Inventory>(station)? = station_inv;
    on_station_give(world, info.kind, item);

    events.push(KitchenEvent::InventoryUpdated {
        owner: InventoryOwner::Player,
    });
    events.push(KitchenEvent::InventoryUpdated {
        owner: InventoryOwner::Station(info.id),
    });
    events.push(KitchenEvent::InteractionEnd { station: info.id });
    Ok(InteractionOutcome::Collected {
        station: info.id,
        item,
    })
}

/// Ovens and stoves start cooking whatever cookable item lands on them.
fn on_station_receive(world: &mut World, kind: StationKind, item: ItemId) {
    if !kind.is_cooking() {
        return;
    }
    let Some(entity) = find_item(world, item) else {
        return;
    };
    if let Ok(mut timer) = world.get::<&mut CookTimer>(entity) {
        timer.0.start();
    }
}

fn on_station_give(world: &mut World, kind: StationKind, item: ItemId) {
    let Some(entity) = find_item(world, item) else {
        return;
    };
    if kind.is_cooking() {
        if let Ok(mut timer) = world.get::<&mut CookTimer>(entity) {
            timer.0.stop();
        }
    } else if kind.is_chopping() {
        if let Ok(mut timer) = world.get::<&mut ChopTimer>(entity) {
            timer.0.stop();
        }
    }
}

/// Start or pause the chop timer of the item on a cutting board or blender.
pub fn set_chopping(world: &mut World, station: Entity, chopping: bool) -> Result<InteractionOutcome, KitchenError> {
    let info = (*world.get::<&Station>(station)?).clone();
    if !info.kind.is_chopping() {
        return Ok(InteractionOutcome::Nothing);
    }
    let Some(item) = world.get::<&Inventory>(station)?.get_item_last() else {
        return Ok(InteractionOutcome::Nothing);
    };
    let entity = find_item(world, item).ok_or(KitchenError::UnknownItem(item))?;
    let choppable = world
        .get::<&Ingredient>(entity)
        .map(|i| i.choppable && i.state != IngredientState::Chopped)
        .unwrap_or(false);
    if !choppable {
        return Ok(InteractionOutcome::Nothing);
    }

    let mut timer = world.get::<&mut ChopTimer>(entity)?;
    if chopping {
        timer.0.start();
        Ok(InteractionOutcome::ChopStarted { station: info.id, item })
    } else {
        timer.0.stop();
        Ok(InteractionOutcome::ChopStopped { station: info.id, item })
    }
}

/// Display view of one inventory slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotView {
    pub item: ItemId,
    pub name: String,
    /// `None` for meals
    pub state: Option<IngredientState>,
    pub completion: f32,
}

/// What a UI shows for one inventory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub slots: Vec<Option<SlotView>>,
}

/// Snapshot the inventory on `owner` for display.
pub fn inventory_snapshot(world: &World, owner: Entity) -> Result<InventorySnapshot, KitchenError> {
    let inventory = world.get::<&Inventory>(owner)?;
    let slots = inventory
        .slots()
        .iter()
        .map(|slot| {
            let id = (*slot)?;
            let entity = find_item(world, id)?;
            let name = world.get::<&Item>(entity).ok()?.name.clone();
            let state = world.get::<&Ingredient>(entity).ok().map(|i| i.state);
            Some(SlotView {
                item: id,
                name,
                state,
                completion: completion_percent(world, entity),
            })
        })
        .collect();
    Ok(InventorySnapshot { slots })
}
