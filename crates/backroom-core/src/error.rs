//! Errors raised by kitchen operations.

use backroom_logic::data::DataError;
use thiserror::Error;

use crate::components::{InventoryError, ItemId, StationId, StationKind};

#[derive(Debug, Error)]
pub enum KitchenError {
    #[error("no station to interact with")]
    NoStation,
    #[error("no player in the kitchen")]
    NoPlayer,
    #[error("unknown item {0:?}")]
    UnknownItem(ItemId),
    #[error("unknown station {0:?}")]
    UnknownStation(StationId),
    #[error("no station data for {0}")]
    MissingStationData(StationKind),
    #[error("unknown ingredient: {0}")]
    UnknownIngredient(String),
    #[error("unknown recipe: {0}")]
    UnknownRecipe(String),
    #[error("unknown cutscene: {0}")]
    UnknownCutscene(String),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Component(#[from] hecs::ComponentError),
    #[error(transparent)]
    NoSuchEntity(#[from] hecs::NoSuchEntity),
    #[error(transparent)]
    Data(#[from] DataError),
}
