//! Component definitions for the ECS simulation.
//!
//! Components are pure data structs attached to entities.
//! They have no behavior beyond small helpers - that lives in systems.

mod actors;
mod common;
mod inventory;
mod items;
mod station;

pub use actors::*;
pub use common::*;
pub use inventory::*;
pub use items::*;
pub use station::*;
