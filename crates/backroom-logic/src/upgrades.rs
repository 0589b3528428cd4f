//! Purchasable upgrades.

use serde::{Deserialize, Serialize};

/// Gold taken when extortion is switched on.
pub const EXTORTION_COST: i32 = 40;

/// Extortion doubles meal prices for a limited time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtortionUpgrade {
    active: bool,
    /// Seconds the upgrade stays active
    duration: f64,
    activated_at: f64,
}

impl ExtortionUpgrade {
    pub fn new(duration: f64) -> Self {
        Self {
            active: false,
            duration,
            activated_at: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Switch the upgrade on at `now`. Returns the gold to deduct, which is
    /// only charged when the player can afford it.
    pub fn activate(&mut self, now: f64, current_gold: i32) -> i32 {
        self.active = true;
        self.activated_at = now;
        if current_gold >= EXTORTION_COST {
            EXTORTION_COST
        } else {
            0
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Deactivate once the duration has passed. Returns true when it expired this call.
    pub fn update(&mut self, now: f64) -> bool {
        if self.active && now - self.activated_at >= self.duration {
            self.deactivate();
            return true;
        }
        false
    }

    pub fn price_multiplier(&self) -> u32 {
        if self.active {
            2
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_cost_only_when_affordable() {
        let mut upgrade = ExtortionUpgrade::new(30.0);
        assert_eq!(upgrade.activate(0.0, 100), 40);
        assert!(upgrade.is_active());

        let mut poor = ExtortionUpgrade::new(30.0);
        assert_eq!(poor.activate(0.0, 39), 0);
        assert!(poor.is_active());
    }

    #[test]
    fn test_expires_after_duration() {
        let mut upgrade = ExtortionUpgrade::new(30.0);
        upgrade.activate(10.0, 100);
        assert_eq!(upgrade.price_multiplier(), 2);
        assert!(!upgrade.update(39.0));
        assert!(upgrade.update(40.0));
        assert!(!upgrade.is_active());
        assert_eq!(upgrade.price_multiplier(), 1);
        assert!(!upgrade.update(100.0));
    }
}
