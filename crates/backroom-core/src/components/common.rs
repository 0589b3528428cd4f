//! Common components used across multiple entity types.

use backroom_logic::geometry::Vec2;
use serde::{Deserialize, Serialize};

/// Where an entity stands on the kitchen floor.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub point: Vec2,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            point: Vec2::new(x, y),
        }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        self.point.distance(&other.point)
    }
}

impl From<Vec2> for Position {
    fn from(point: Vec2) -> Self {
        Self { point }
    }
}
