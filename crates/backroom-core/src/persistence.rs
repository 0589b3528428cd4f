//! Save/Load functionality
//!
//! Two formats:
//! - the full kitchen snapshot, bincode-encoded, with every entity's
//!   components serialized individually and rebuilt on load;
//! - the player profile (`GameState`: money and day), JSON at
//!   `saves/saveFile.json` by default.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use backroom_logic::cutscene::CutscenePlayer;
use backroom_logic::day::DayClock;
use backroom_logic::morality::MoralLedger;
use backroom_logic::orders::OrderBoard;
use backroom_logic::pathing::PathFollow;
use backroom_logic::upgrades::ExtortionUpgrade;
use hecs::{EntityBuilder, World};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::*;
use crate::config::KitchenConfig;

/// Version number for the snapshot format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the kitchen
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub config: KitchenConfig,
    /// Simulation time in seconds
    pub sim_time: f64,
    pub time_scale: f32,
    pub gold: i32,
    pub lose_threshold: i32,
    pub clock: DayClock,
    pub orders: OrderBoard,
    pub morality: MoralLedger,
    pub extortion: ExtortionUpgrade,
    pub cutscene: Option<CutscenePlayer>,
    pub game_over: bool,
    pub next_item_id: u32,
    pub last_spawn: f64,
    pub entities: Vec<SerializableEntity>,
}

/// All possible components for an entity, serialized as optionals
#[derive(Serialize, Deserialize, Default)]
pub struct SerializableEntity {
    // Actors
    pub player: Option<Player>,
    pub walking: Option<Walking>,
    pub customer: Option<Customer>,
    pub customer_face: Option<CustomerFace>,
    pub path_follow: Option<PathFollow>,
    pub position: Option<Position>,
    pub inventory: Option<Inventory>,

    // Stations
    pub station: Option<Station>,

    // Items
    pub item: Option<Item>,
    pub ingredient: Option<Ingredient>,
    pub meal: Option<Meal>,
    pub cook_timer: Option<CookTimer>,
    pub chop_timer: Option<ChopTimer>,
}

/// Extract all entities from a world into serializable form
fn serialize_entities(world: &World) -> Vec<SerializableEntity> {
    world
        .iter()
        .map(|entity| SerializableEntity {
            player: entity.get::<&Player>().map(|c| *c),
            walking: entity.get::<&Walking>().map(|c| *c),
            customer: entity.get::<&Customer>().map(|c| (*c).clone()),
            customer_face: entity.get::<&CustomerFace>().map(|c| *c),
            path_follow: entity.get::<&PathFollow>().map(|c| *c),
            position: entity.get::<&Position>().map(|c| *c),
            inventory: entity.get::<&Inventory>().map(|c| (*c).clone()),
            station: entity.get::<&Station>().map(|c| (*c).clone()),
            item: entity.get::<&Item>().map(|c| (*c).clone()),
            ingredient: entity.get::<&Ingredient>().map(|c| *c),
            meal: entity.get::<&Meal>().map(|c| (*c).clone()),
            cook_timer: entity.get::<&CookTimer>().map(|c| *c),
            chop_timer: entity.get::<&ChopTimer>().map(|c| *c),
        })
        .collect()
}

/// Spawn an entity with all its components
fn spawn_entity(world: &mut World, se: SerializableEntity) {
    let mut builder = EntityBuilder::new();

    if let Some(c) = se.player {
        builder.add(c);
    }
    if let Some(c) = se.walking {
        builder.add(c);
    }
    if let Some(c) = se.customer {
        builder.add(c);
    }
    if let Some(c) = se.customer_face {
        builder.add(c);
    }
    if let Some(c) = se.path_follow {
        builder.add(c);
    }
    if let Some(c) = se.position {
        builder.add(c);
    }
    if let Some(c) = se.inventory {
        builder.add(c);
    }
    if let Some(c) = se.station {
        builder.add(c);
    }
    if let Some(c) = se.item {
        builder.add(c);
    }
    if let Some(c) = se.ingredient {
        builder.add(c);
    }
    if let Some(c) = se.meal {
        builder.add(c);
    }
    if let Some(c) = se.cook_timer {
        builder.add(c);
    }
    if let Some(c) = se.chop_timer {
        builder.add(c);
    }

    world.spawn(builder.build());
}

/// Build the snapshot for `world` and the kitchen state around it.
pub fn snapshot(world: &World, state: KitchenState) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        config: state.config,
        sim_time: state.sim_time,
        time_scale: state.time_scale,
        gold: state.gold,
        lose_threshold: state.lose_threshold,
        clock: state.clock,
        orders: state.orders,
        morality: state.morality,
        extortion: state.extortion,
        cutscene: state.cutscene,
        game_over: state.game_over,
        next_item_id: state.next_item_id,
        last_spawn: state.last_spawn,
        entities: serialize_entities(world),
    }
}

/// Kitchen state outside the ECS world.
#[derive(Debug, Clone)]
pub struct KitchenState {
    pub config: KitchenConfig,
    pub sim_time: f64,
    pub time_scale: f32,
    pub gold: i32,
    pub lose_threshold: i32,
    pub clock: DayClock,
    pub orders: OrderBoard,
    pub morality: MoralLedger,
    pub extortion: ExtortionUpgrade,
    pub cutscene: Option<CutscenePlayer>,
    pub game_over: bool,
    pub next_item_id: u32,
    pub last_spawn: f64,
}

/// Write a kitchen snapshot
pub fn save_kitchen<W: Write>(writer: W, world: &World, state: KitchenState) -> Result<(), SaveError> {
    let save_data = snapshot(world, state);
    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Result of loading a kitchen snapshot
pub struct LoadedKitchen {
    pub world: World,
    pub state: KitchenState,
}

/// Read a kitchen snapshot
pub fn load_kitchen<R: Read>(reader: R) -> Result<LoadedKitchen, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    let mut world = World::new();
    for se in save_data.entities {
        spawn_entity(&mut world, se);
    }

    Ok(LoadedKitchen {
        world,
        state: KitchenState {
            config: save_data.config,
            sim_time: save_data.sim_time,
            time_scale: save_data.time_scale,
            gold: save_data.gold,
            lose_threshold: save_data.lose_threshold,
            clock: save_data.clock,
            orders: save_data.orders,
            morality: save_data.morality,
            extortion: save_data.extortion,
            cutscene: save_data.cutscene,
            game_over: save_data.game_over,
            next_item_id: save_data.next_item_id,
            last_spawn: save_data.last_spawn,
        },
    })
}

/// Player profile persisted between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub money: i32,
    pub day: u32,
}

/// Write the profile as JSON, creating parent directories as needed.
pub fn save_profile(path: &Path, state: &GameState) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, state)?;
    log::info!("saved profile to {}: {:?}", path.display(), state);
    Ok(())
}

pub fn load_profile(path: &Path) -> Result<GameState, SaveError> {
    let reader = BufReader::new(File::open(path)?);
    let state = serde_json::from_reader(reader)?;
    log::info!("loaded profile from {}: {:?}", path.display(), state);
    Ok(state)
}

/// Errors that can occur during save/load
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error("Profile format error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}
