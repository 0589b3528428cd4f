//! Kitchen configuration.

use std::path::PathBuf;

use backroom_logic::geometry::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::StationKind;

/// Where a station stands on the kitchen floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationPlacement {
    pub kind: StationKind,
    pub position: Vec2,
}

impl StationPlacement {
    pub fn new(kind: StationKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            position: Vec2::new(x, y),
        }
    }
}

/// Configuration for a kitchen session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenConfig {
    /// Seed for customer spawns and orders
    pub seed: u64,
    /// Seconds per working day
    pub day_length: f64,
    /// Seconds between customer arrivals
    pub spawn_interval: f64,
    pub max_customers: usize,
    pub starting_gold: i32,
    /// Gold below this at the end of a day gets the player fired
    pub lose_threshold: i32,
    pub player_capacity: usize,
    /// Units per second
    pub player_speed: f32,
    pub player_start: Vec2,
    /// Walkable x range of the kitchen floor
    pub walk_min_x: f32,
    pub walk_max_x: f32,
    /// Range at which the interaction tooltip appears
    pub sensor_range: f32,
    /// Speed multiplier granted by the speed boost decision
    pub speed_boost: f32,
    pub customer_speed: f32,
    pub entrance: Vec2,
    pub exit: Vec2,
    /// First queue slot at the counter; later slots step along x
    pub queue_start: Vec2,
    pub queue_spacing: f32,
    pub stations: Vec<StationPlacement>,
    /// Seconds the extortion upgrade lasts
    pub extortion_duration: f64,
    /// Play the backstory cutscene when the session starts
    pub play_intro: bool,
    /// Write the profile save at the end of every day
    pub autosave: bool,
    pub save_path: PathBuf,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            day_length: 300.0,
            spawn_interval: 25.0,
            max_customers: 4,
            starting_gold: 100,
            lose_threshold: 50,
            player_capacity: 1,
            player_speed: 3.0,
            player_start: Vec2::new(9.0, 4.0),
            walk_min_x: 3.52,
            walk_max_x: 15.1,
            sensor_range: 1.5,
            speed_boost: 1.5,
            customer_speed: 2.0,
            entrance: Vec2::new(24.0, -2.0),
            exit: Vec2::new(24.0, -2.0),
            queue_start: Vec2::new(17.0, 1.0),
            queue_spacing: 1.5,
            stations: vec![
                StationPlacement::new(StationKind::CuttingBoard, 5.0, 5.0),
                StationPlacement::new(StationKind::Blender, 7.0, 5.0),
                StationPlacement::new(StationKind::Oven, 9.0, 5.0),
                StationPlacement::new(StationKind::Stove, 11.0, 5.0),
                StationPlacement::new(StationKind::Bench, 13.0, 5.0),
                StationPlacement::new(StationKind::Serving, 15.0, 3.0),
            ],
            extortion_duration: 60.0,
            play_intro: true,
            autosave: true,
            save_path: PathBuf::from("saves/saveFile.json"),
        }
    }
}

impl KitchenConfig {
    /// Queue position for customer slot `slot`.
    pub fn queue_position(&self, slot: usize) -> Vec2 {
        Vec2::new(
            self.queue_start.x + slot as f32 * self.queue_spacing,
            self.queue_start.y,
        )
    }
}
