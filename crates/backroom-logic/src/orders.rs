//! Order dockets: the line of pending tickets and the big ticket being served.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// A pending customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub order_number: u32,
    /// Recipe key, e.g. `"salad"`
    pub recipe: String,
    /// Simulation time (seconds) the order was placed
    pub placed_at: f64,
    /// Seconds the customer will wait
    pub make_time: f32,
}

impl Ticket {
    pub fn elapsed(&self, now: f64) -> f32 {
        (now - self.placed_at).max(0.0) as f32
    }

    pub fn time_remaining(&self, now: f64) -> f32 {
        (self.make_time - self.elapsed(now)).max(0.0)
    }

    pub fn is_overdue(&self, now: f64) -> bool {
        self.elapsed(now) >= self.make_time
    }
}

/// Docket line. The front ticket is the big ticket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderBoard {
    tickets: VecDeque<Ticket>,
    next_order_number: u32,
}

impl OrderBoard {
    pub fn new() -> Self {
        Self {
            tickets: VecDeque::new(),
            next_order_number: 1,
        }
    }

    /// Add a ticket to the back of the line and return its order number.
    pub fn add_order(&mut self, recipe: impl Into<String>, make_time: f32, now: f64) -> u32 {
        // A defaulted board starts at zero
        let order_number = self.next_order_number.max(1);
        self.next_order_number = order_number + 1;
        self.tickets.push_back(Ticket {
            order_number,
            recipe: recipe.into(),
            placed_at: now,
            make_time,
        });
        order_number
    }

    /// Remove the ticket at `index`, or the big ticket when `index` is `None`.
    pub fn remove_order(&mut self, index: Option<usize>) -> Option<Ticket> {
        self.tickets.remove(index.unwrap_or(0))
    }

    pub fn remove_by_number(&mut self, order_number: u32) -> Option<Ticket> {
        let index = self.tickets.iter().position(|t| t.order_number == order_number)?;
        self.tickets.remove(index)
    }

    pub fn big_ticket(&self) -> Option<&Ticket> {
        self.tickets.front()
    }

    pub fn get(&self, order_number: u32) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.order_number == order_number)
    }

    /// Rotate the dockets so the second ticket becomes the big ticket.
    pub fn shift_left(&mut self) {
        if !self.tickets.is_empty() {
            self.tickets.rotate_left(1);
        }
    }

    /// Rotate the dockets so the last ticket becomes the big ticket.
    pub fn shift_right(&mut self) {
        if !self.tickets.is_empty() {
            self.tickets.rotate_right(1);
        }
    }

    /// Remove and return every ticket whose wait has run out.
    pub fn expire_overdue(&mut self, now: f64) -> Vec<Ticket> {
        let (expired, kept): (Vec<Ticket>, Vec<Ticket>) =
            self.tickets.drain(..).partition(|t| t.is_overdue(now));
        self.tickets = kept.into();
        expired
    }

    pub fn tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn clear(&mut self) {
        self.tickets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(recipes: &[&str]) -> OrderBoard {
        let mut board = OrderBoard::new();
        for (i, r) in recipes.iter().enumerate() {
            board.add_order(*r, 60.0, i as f64);
        }
        board
    }

    #[test]
    fn test_order_numbers_increase() {
        let mut board = OrderBoard::new();
        assert_eq!(board.add_order("salad", 60.0, 0.0), 1);
        assert_eq!(board.add_order("steakMeal", 90.0, 1.0), 2);
        assert_eq!(board.big_ticket().unwrap().recipe, "salad");
    }

    #[test]
    fn test_remove_big_ticket_by_default() {
        let mut board = board_with(&["salad", "acaiBowl"]);
        let removed = board.remove_order(None).unwrap();
        assert_eq!(removed.recipe, "salad");
        assert_eq!(board.big_ticket().unwrap().recipe, "acaiBowl");
        assert!(board.remove_order(Some(5)).is_none());
    }

    #[test]
    fn test_shift_rotates_big_ticket() {
        let mut board = board_with(&["a", "b", "c"]);
        board.shift_left();
        assert_eq!(board.big_ticket().unwrap().recipe, "b");
        board.shift_right();
        board.shift_right();
        assert_eq!(board.big_ticket().unwrap().recipe, "c");

        let mut empty = OrderBoard::new();
        empty.shift_left();
        assert!(empty.big_ticket().is_none());
    }

    #[test]
    fn test_expire_overdue_keeps_order() {
        let mut board = OrderBoard::new();
        board.add_order("a", 10.0, 0.0);
        board.add_order("b", 100.0, 0.0);
        board.add_order("c", 10.0, 5.0);

        let expired = board.expire_overdue(12.0);
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].recipe, "a");
        let left: Vec<_> = board.tickets().map(|t| t.recipe.as_str()).collect();
        assert_eq!(left, vec!["b", "c"]);
    }

    #[test]
    fn test_time_remaining() {
        let mut board = OrderBoard::new();
        let n = board.add_order("salad", 70.0, 10.0);
        let ticket = board.get(n).unwrap();
        assert_eq!(ticket.time_remaining(40.0), 40.0);
        assert_eq!(ticket.time_remaining(100.0), 0.0);
        assert!(ticket.is_overdue(80.0));
    }
}
