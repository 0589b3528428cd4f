//! Day clock and the end-of-day win/lose rule.

use serde::{Deserialize, Serialize};

/// Amount the lose threshold drops when the boss lets something slide.
pub const LOSE_THRESHOLD_STEP: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOutcome {
    /// Made the numbers; the next day starts
    Continue,
    /// Gold fell below the threshold
    Fired,
}

/// Tracks the current day and time into it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayClock {
    pub day: u32,
    /// Seconds into the current day
    pub elapsed: f64,
    /// Seconds per working day
    pub length: f64,
}

impl DayClock {
    pub fn new(day: u32, length: f64) -> Self {
        Self {
            day,
            elapsed: 0.0,
            length,
        }
    }

    /// Advance the clock. Returns true when the day just ran out.
    pub fn tick(&mut self, dt: f64) -> bool {
        let was_running = self.elapsed < self.length;
        self.elapsed += dt.max(0.0);
        was_running && self.elapsed >= self.length
    }

    pub fn is_over(&self) -> bool {
        self.elapsed >= self.length
    }

    pub fn remaining(&self) -> f64 {
        (self.length - self.elapsed).max(0.0)
    }

    pub fn start_next_day(&mut self) {
        self.day += 1;
        self.elapsed = 0.0;
    }
}

/// Fired when gold is below the threshold at the end of the day.
pub fn day_end_outcome(gold: i32, lose_threshold: i32) -> DayOutcome {
    if gold < lose_threshold {
        DayOutcome::Fired
    } else {
        DayOutcome::Continue
    }
}

pub fn lowered_threshold(lose_threshold: i32) -> i32 {
    (lose_threshold - LOSE_THRESHOLD_STEP).max(0)
}
