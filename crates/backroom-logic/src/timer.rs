//! Cook and chop timers for ingredients.
//!
//! A timer only advances while running. Stations start and stop it as items
//! are placed and removed, so progress survives moving an item around.

use serde::{Deserialize, Serialize};

/// Seconds a cooked item may stay on the heat before it burns.
pub const BURN_GRACE_SECONDS: f32 = 15.0;

/// Processing state of an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IngredientState {
    #[default]
    Raw,
    Chopped,
    Cooked,
    Burnt,
}

impl IngredientState {
    pub fn name(&self) -> &'static str {
        match self {
            IngredientState::Raw => "raw",
            IngredientState::Chopped => "chopped",
            IngredientState::Cooked => "cooked",
            IngredientState::Burnt => "burnt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    Cook,
    Chop,
}

/// State change produced by advancing a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Cooked,
    Burnt,
    Chopped,
}

impl TimerEvent {
    pub fn resulting_state(&self) -> IngredientState {
        match self {
            TimerEvent::Cooked => IngredientState::Cooked,
            TimerEvent::Burnt => IngredientState::Burnt,
            TimerEvent::Chopped => IngredientState::Chopped,
        }
    }
}

/// Progress of one cook or chop action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemTimer {
    pub kind: TimerKind,
    /// Seconds until the action completes
    pub length: f32,
    pub elapsed: f32,
    pub running: bool,
    /// Set once the completion event has fired
    completed: bool,
}

impl ItemTimer {
    pub fn new(kind: TimerKind, length: f32) -> Self {
        Self {
            kind,
            length: length.max(0.0),
            elapsed: 0.0,
            running: false,
            completed: false,
        }
    }

    /// Starting a spent timer does nothing.
    pub fn start(&mut self) {
        if !self.is_spent() {
            self.running = true;
        }
    }

    /// A chop timer is spent once chopped, a cook timer once burnt.
    pub fn is_spent(&self) -> bool {
        match self.kind {
            TimerKind::Chop => self.completed,
            TimerKind::Cook => self.elapsed >= self.length + BURN_GRACE_SECONDS,
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.length
    }

    /// Elapsed time as a percentage of the timer length.
    /// Cook timers keep counting past 100 until the item burns.
    pub fn completion_percent(&self) -> f32 {
        if self.length <= 0.0 {
            return 100.0;
        }
        self.elapsed / self.length * 100.0
    }

    /// Advance by `dt` seconds while running, returning any state change.
    pub fn advance(&mut self, dt: f32) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        self.elapsed += dt.max(0.0);

        match self.kind {
            TimerKind::Chop => {
                if self.is_finished() {
                    self.elapsed = self.length;
                    self.running = false;
                    self.completed = true;
                    return Some(TimerEvent::Chopped);
                }
                None
            }
            TimerKind::Cook => {
                if self.elapsed >= self.length + BURN_GRACE_SECONDS {
                    self.running = false;
                    self.completed = true;
                    return Some(TimerEvent::Burnt);
                }
                if self.is_finished() && !self.completed {
                    self.completed = true;
                    return Some(TimerEvent::Cooked);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_timer_does_not_advance() {
        let mut timer = ItemTimer::new(TimerKind::Cook, 10.0);
        assert_eq!(timer.advance(5.0), None);
        assert_eq!(timer.elapsed, 0.0);
    }

    #[test]
    fn test_cook_then_burn() {
        let mut timer = ItemTimer::new(TimerKind::Cook, 10.0);
        timer.start();
        assert_eq!(timer.advance(9.0), None);
        assert_eq!(timer.advance(1.0), Some(TimerEvent::Cooked));
        // Cooked fires once
        assert_eq!(timer.advance(5.0), None);
        assert!((timer.completion_percent() - 150.0).abs() < 0.01);
        assert_eq!(timer.advance(10.0), Some(TimerEvent::Burnt));
        assert!(!timer.running);
    }

    #[test]
    fn test_chop_stops_at_length() {
        let mut timer = ItemTimer::new(TimerKind::Chop, 4.0);
        timer.start();
        assert_eq!(timer.advance(2.0), None);
        timer.stop();
        assert_eq!(timer.advance(10.0), None);
        assert!((timer.completion_percent() - 50.0).abs() < 0.01);
        timer.start();
        assert_eq!(timer.advance(3.0), Some(TimerEvent::Chopped));
        assert_eq!(timer.completion_percent(), 100.0);
    }

    #[test]
    fn test_spent_timers_do_not_restart() {
        let mut cook = ItemTimer::new(TimerKind::Cook, 10.0);
        cook.start();
        assert_eq!(cook.advance(30.0), Some(TimerEvent::Burnt));
        assert!(cook.is_spent());
        cook.start();
        assert!(!cook.running);
        assert_eq!(cook.advance(5.0), None);

        let mut chop = ItemTimer::new(TimerKind::Chop, 4.0);
        chop.start();
        assert_eq!(chop.advance(4.0), Some(TimerEvent::Chopped));
        chop.start();
        assert_eq!(chop.advance(1.0), None);
    }

    #[test]
    fn test_zero_length_timer_is_complete() {
        let timer = ItemTimer::new(TimerKind::Chop, 0.0);
        assert_eq!(timer.completion_percent(), 100.0);
    }
}
