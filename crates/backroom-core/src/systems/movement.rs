//! Movement system - walks the player along the counter and moves customers
//! along their paths

use backroom_logic::pathing::{PathFollow, PathStatus};
use hecs::{Entity, World};

use crate::components::{Player, Position, Walking};

/// Horizontal bounds and base speed for the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub speed: f32,
}

/// Move walking players, stopping them at the kitchen bounds.
pub fn player_movement_system(world: &mut World, bounds: WalkBounds, delta_seconds: f32) {
    let mut stopped: Vec<Entity> = Vec::new();

    for (entity, (player, pos, walking)) in world.query_mut::<(&Player, &mut Position, &Walking)>() {
        let step = walking.direction * bounds.speed * player.speed_multiplier * delta_seconds;
        let next = pos.point.x + step;
        if next <= bounds.min_x || next >= bounds.max_x {
            pos.point.x = next.clamp(bounds.min_x, bounds.max_x);
            stopped.push(entity);
        } else {
            pos.point.x = next;
        }
    }

    for entity in stopped {
        let _ = world.remove_one::<Walking>(entity);
    }
}

/// Step every entity with a path. Returns the entities that arrived this frame.
pub fn path_follow_system(world: &mut World, delta_seconds: f32) -> Vec<Entity> {
    let mut arrived = Vec::new();

    for (entity, (pos, path)) in world.query_mut::<(&mut Position, &mut PathFollow)>() {
        let (next, status) = path.step(pos.point, delta_seconds);
        pos.point = next;
        if status == PathStatus::Arrived {
            arrived.push(entity);
        }
    }

    for entity in &arrived {
        let _ = world.remove_one::<PathFollow>(*entity);
    }
    arrived
}
