//! Two-leg waypoint walking for NPCs: horizontal first, then vertical.

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// Distance at which a waypoint counts as reached.
pub const ARRIVE_EPSILON: f32 = 0.1;

/// Where customers go when told to move to the predefined point.
pub const PREDEFINED_TARGET: Vec2 = Vec2 { x: 15.0, y: 20.0 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathLeg {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStatus {
    Moving,
    /// Horizontal leg finished; now walking vertically
    Turned,
    Arrived,
}

/// An in-progress walk to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathFollow {
    pub target: Vec2,
    /// Waypoint for the current leg
    pub waypoint: Vec2,
    pub leg: PathLeg,
    /// Units per second
    pub speed: f32,
}

impl PathFollow {
    /// Start walking from `start`: horizontally to `(target.x, start.y)` first.
    pub fn new(start: Vec2, target: Vec2, speed: f32) -> Self {
        Self {
            target,
            waypoint: Vec2::new(target.x, start.y),
            leg: PathLeg::Horizontal,
            speed,
        }
    }

    /// Restart toward a new target from the current position.
    pub fn retarget(&mut self, current: Vec2, target: Vec2) {
        *self = Self::new(current, target, self.speed);
    }

    /// Restart toward [`PREDEFINED_TARGET`].
    pub fn move_to_predefined(&mut self, current: Vec2) {
        log::debug!("Triggering move to predefined position: {:?}", PREDEFINED_TARGET);
        self.retarget(current, PREDEFINED_TARGET);
    }

    /// Move `position` toward the current waypoint by `speed * dt`.
    pub fn step(&mut self, position: Vec2, dt: f32) -> (Vec2, PathStatus) {
        let step = self.speed * dt.max(0.0);
        let diff = self.waypoint - position;
        let distance = diff.length();

        let reached = distance <= ARRIVE_EPSILON || step >= distance;
        if !reached {
            return (position + diff.normalize() * step, PathStatus::Moving);
        }

        match self.leg {
            PathLeg::Horizontal => {
                let corner = self.waypoint;
                self.leg = PathLeg::Vertical;
                self.waypoint = self.target;
                if corner.epsilon_equals(&self.target, ARRIVE_EPSILON) {
                    return (self.target, PathStatus::Arrived);
                }
                log::debug!("Starting moving to next step");
                (corner, PathStatus::Turned)
            }
            PathLeg::Vertical => (self.target, PathStatus::Arrived),
        }
    }
}
