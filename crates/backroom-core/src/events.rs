//! Kitchen events for the display layer.
//!
//! Systems push events as state changes; a UI drains them once per frame to
//! refresh inventories, tickets, faces and cutscenes.

use backroom_logic::scoring::{MealScore, Satisfaction};
use serde::{Deserialize, Serialize};

use crate::components::{ItemId, StationId};

/// Whose inventory changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryOwner {
    Player,
    Station(StationId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KitchenEvent {
    InventoryUpdated {
        owner: InventoryOwner,
    },
    /// The player took an item off a station
    InteractionEnd {
        station: StationId,
    },
    ItemCooked {
        item: ItemId,
    },
    ItemBurnt {
        item: ItemId,
    },
    ItemChopped {
        item: ItemId,
    },
    MealAssembled {
        item: ItemId,
        recipe: String,
    },
    CustomerArrived {
        order_number: u32,
        recipe: String,
    },
    OrderExpired {
        order_number: u32,
    },
    MealServed {
        order_number: Option<u32>,
        recipe: String,
        score: Option<MealScore>,
        gold: i32,
    },
    CustomerLeft {
        satisfaction: Satisfaction,
    },
    CutsceneStarted {
        name: String,
    },
    CutsceneEnded {
        name: String,
    },
    DayEnded {
        day: u32,
        gold: i32,
    },
    Fired {
        day: u32,
        gold: i32,
    },
    ExtortionStarted {
        cost: i32,
    },
    ExtortionExpired,
}

/// Pending events in the order they happened.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    pending: Vec<KitchenEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: KitchenEvent) {
        log::trace!("event: {:?}", event);
        self.pending.push(event);
    }

    pub fn drain(&mut self) -> Vec<KitchenEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[KitchenEvent] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
