//! Backroom Core - Restaurant Simulation Engine
//!
//! An ECS-based simulation of a small restaurant kitchen: the player carries
//! ingredients between stations, chops and cooks them, assembles meals and
//! serves them against customer tickets for gold.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: The player, stations, items, customers
//! - **Components**: Pure data attached to entities (Position, Inventory, Station, etc.)
//! - **Systems**: Logic that queries and updates components
//!
//! Pure rules (scoring, recipes, timers, cutscenes) live in `backroom-logic`.
//!
//! # Example
//!
//! ```rust,no_run
//! use backroom_core::prelude::*;
//!
//! let mut kitchen = Kitchen::new(KitchenConfig::default()).unwrap();
//!
//! loop {
//!     kitchen.update(1.0 / 60.0); // 60 FPS
//!     for event in kitchen.drain_events() {
//!         println!("{:?}", event);
//!     }
//! }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod persistence;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::KitchenConfig;
    pub use crate::engine::Kitchen;
    pub use crate::error::KitchenError;
    pub use crate::events::KitchenEvent;
    pub use crate::systems::{Interaction, InteractionOutcome};
}
