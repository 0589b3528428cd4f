//! Moral decisions offered by the boss between days.
//!
//! Answering a decision with the immoral choice (`false`) marks the player as
//! compromised and usually pays out; the caller applies the returned effect
//! to the game state.

use serde::{Deserialize, Serialize};

/// Gold for the immoral choice on decision 1.
pub const MORAL_GOLD_D1: i32 = 40;
/// Gold for the immoral choice on decision 2.
pub const MORAL_GOLD_D2: i32 = 30;
/// Gold for the moral choice on decision 4.
pub const MORAL_GOLD_D4: i32 = -20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub statement: String,
    pub is_good: bool,
    pub effect_money: i32,
    /// Player's answer once given
    pub answer: Option<bool>,
}

impl Decision {
    pub fn new(statement: impl Into<String>, is_good: bool, effect_money: i32) -> Self {
        Self {
            statement: statement.into(),
            is_good,
            effect_money,
            answer: None,
        }
    }
}

/// Consequence of answering a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionEffect {
    None,
    AddGold(i32),
    LowerLoseThreshold,
    SpeedBoost,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoralLedger {
    decisions: Vec<Decision>,
    current_morality: bool,
}

impl Default for MoralLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MoralLedger {
    pub fn new() -> Self {
        Self {
            decisions: Vec::new(),
            current_morality: true,
        }
    }

    /// Add a question assumed good and worth 10 gold.
    pub fn add_question(&mut self, question: impl Into<String>) {
        self.decisions.push(Decision::new(question, true, 10));
    }

    pub fn add_question_with(&mut self, question: impl Into<String>, is_good: bool, effect_money: i32) {
        self.decisions.push(Decision::new(question, is_good, effect_money));
    }

    pub fn add_decision(&mut self, decision: Decision) {
        self.decisions.push(decision);
    }

    /// Answer given at `index`, `false` when unanswered or missing.
    pub fn decision(&self, index: usize) -> bool {
        self.decisions
            .get(index)
            .and_then(|d| d.answer)
            .unwrap_or(false)
    }

    pub fn decision_by_statement(&self, statement: &str) -> bool {
        self.decisions
            .iter()
            .find(|d| d.statement == statement)
            .and_then(|d| d.answer)
            .unwrap_or(false)
    }

    pub fn question(&self, index: usize) -> Option<&str> {
        self.decisions.get(index).map(|d| d.statement.as_str())
    }

    pub fn current_morality(&self) -> bool {
        self.current_morality
    }

    pub fn set_current_morality(&mut self, morality: bool) {
        self.current_morality = morality;
    }

    /// Record the answer to decision `number` (1-based) and return its effect.
    pub fn set_decision(&mut self, number: usize, moral: bool) -> DecisionEffect {
        let Some(index) = number.checked_sub(1) else {
            log::error!("moral decision with unknown index: {}", number);
            return DecisionEffect::None;
        };
        log::info!("Setting decision for index: {} to {}", index, moral);
        if let Some(decision) = self.decisions.get_mut(index) {
            decision.answer = Some(moral);
        }

        if !moral {
            self.current_morality = false;
            match index {
                0 => DecisionEffect::AddGold(MORAL_GOLD_D1),
                1 => DecisionEffect::AddGold(MORAL_GOLD_D2),
                2 => DecisionEffect::LowerLoseThreshold,
                3 => DecisionEffect::SpeedBoost,
                _ => {
                    log::error!("moral decision with unknown index: {}", number);
                    DecisionEffect::None
                }
            }
        } else {
            match index {
                0 => {
                    self.current_morality = true;
                    DecisionEffect::None
                }
                3 => DecisionEffect::AddGold(MORAL_GOLD_D4),
                _ => DecisionEffect::None,
            }
        }
    }

    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    /// Remove all decisions and restore good standing.
    pub fn clear(&mut self) {
        self.decisions.clear();
        self.current_morality = true;
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Decision> {
        if index < self.decisions.len() {
            Some(self.decisions.remove(index))
        } else {
            None
        }
    }

    pub fn remove_by_statement(&mut self, statement: &str) -> Option<Decision> {
        let index = self.decisions.iter().position(|d| d.statement == statement)?;
        Some(self.decisions.remove(index))
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}
