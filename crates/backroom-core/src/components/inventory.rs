//! Fixed-capacity item slots carried by the player and by stations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ItemId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("slot {index} is out of range for capacity {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },
    #[error("slot {index} already holds item {occupant:?}")]
    SlotOccupied { index: usize, occupant: ItemId },
    #[error("inventory is full")]
    Full,
}

/// Slot list holding item references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<Option<ItemId>>,
}

impl Inventory {
    /// Create an empty inventory. Capacity is at least one slot.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity.max(1)],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn get_item_at(&self, index: usize) -> Option<ItemId> {
        self.slots.get(index).copied().flatten()
    }

    pub fn get_item_first(&self) -> Option<ItemId> {
        self.get_item_at(0)
    }

    /// Item in the highest occupied slot.
    pub fn get_item_last(&self) -> Option<ItemId> {
        self.slots.iter().rev().find_map(|s| *s)
    }

    /// Index of the highest occupied slot.
    pub fn last_occupied(&self) -> Option<usize> {
        self.slots.iter().rposition(Option::is_some)
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.slots.contains(&Some(item))
    }

    pub fn add_item_at(&mut self, item: ItemId, index: usize) -> Result<(), InventoryError> {
        let capacity = self.capacity();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(InventoryError::IndexOutOfRange { index, capacity })?;
        if let Some(occupant) = *slot {
            return Err(InventoryError::SlotOccupied { index, occupant });
        }
        *slot = Some(item);
        Ok(())
    }

    /// Put `item` in the first free slot, returning the slot index.
    pub fn add_item(&mut self, item: ItemId) -> Result<usize, InventoryError> {
        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(InventoryError::Full)?;
        self.slots[index] = Some(item);
        Ok(index)
    }

    /// Empty slot `index`, returning what it held.
    pub fn remove_at(&mut self, index: usize) -> Result<Option<ItemId>, InventoryError> {
        let capacity = self.capacity();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(InventoryError::IndexOutOfRange { index, capacity })?;
        Ok(slot.take())
    }

    /// Empty every slot, returning the items in slot order.
    pub fn drain(&mut self) -> Vec<ItemId> {
        self.slots.iter_mut().filter_map(Option::take).collect()
    }

    /// Occupied items in slot order.
    pub fn items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.slots.iter().filter_map(|s| *s)
    }

    pub fn slots(&self) -> &[Option<ItemId>] {
        &self.slots
    }
}
