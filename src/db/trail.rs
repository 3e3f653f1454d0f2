use crate::structures::literal::Literal;

use super::LevelIndex;

/// The literals given a value, in order, together with the current level and the head of the propagation queue.
///
/// Every literal before `q_head` has been propagated.
#[derive(Default)]
pub struct Trail {
    pub literals: Vec<Literal>,
    pub q_head: usize,
    level: LevelIndex,
}

impl Trail {
    /// Stores an assignment at the current level.
    pub fn store_assignment(&mut self, literal: Literal) {
        self.literals.push(literal);
    }

    /// The current level.
    pub fn level(&self) -> LevelIndex {
        self.level
    }

    /// Opens a fresh level.
    pub fn open_level(&mut self) {
        self.level += 1;
    }

    /// Closes the current level, if it is not level zero.
    pub fn close_level(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Forgets every assignment and level.
    pub fn clear(&mut self) {
        self.literals.clear();
        self.q_head = 0;
        self.level = 0;
    }

    /// A count of assignments.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// True if no assignment has been made.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}
