//! Systems - logic that operates on components

mod customers;
mod interaction;
mod items;
mod movement;
mod serving;
mod timers;

pub use customers::*;
pub use interaction::*;
pub use items::*;
pub use movement::*;
pub use serving::*;
pub use timers::*;
