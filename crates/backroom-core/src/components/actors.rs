//! Player and customer components.

use backroom_logic::scoring::Satisfaction;
use serde::{Deserialize, Serialize};

/// Marker and tuning for the player character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Multiplies the base walking speed; raised by the speed boost decision
    pub speed_multiplier: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
        }
    }
}

/// Horizontal walk intent. Present only while the player is walking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Walking {
    /// -1.0 for left, 1.0 for right
    pub direction: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerState {
    /// Walking from the entrance to the queue
    Arriving,
    /// At the counter with an open ticket
    Waiting,
    /// Walking to the exit
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Recipe key the customer will order
    pub recipe: String,
    pub order_number: Option<u32>,
    pub state: CustomerState,
    pub queue_slot: usize,
}

impl Customer {
    pub fn new(recipe: impl Into<String>, queue_slot: usize) -> Self {
        Self {
            recipe: recipe.into(),
            order_number: None,
            state: CustomerState::Arriving,
            queue_slot,
        }
    }
}

/// Face shown above a served (or abandoned) customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFace {
    pub satisfaction: Satisfaction,
}

impl CustomerFace {
    pub fn image_path(&self) -> &'static str {
        self.satisfaction.face_image_path()
    }
}
