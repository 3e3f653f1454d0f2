//! Recovery from a conflict, and retreat from decisions.
//!
//! # Overview
//!
//! A backjump is a 'jump' from some (higher) decision level to some previous (lower) decision level.
//!
//! Typically, a backjump is made from level *l* to level *l - i* because a conflict was found at level *l* and analysis produced a clause which asserts some literal at level *l - i*.
//! In this case, all decisions and all consequences of those decisions from level *l* down to level *l - i* are undone.
//!
//! Values are cleared from the tail of the trail, and each variable is placed back on the score heap through the quick path.
//! The heap property is restored once, after the backjump.
//!
//! Passing a target level greater than or equal to the current level is safe, as nothing will happen.
//!
//! # Propagation
//!
//! Every literal on the trail before the head of the propagation queue has been propagated.
//! So, after a backjump the head is moved back to the end of the trail, if past it.

use crate::{context::Context, db::LevelIndex, misc::log::targets::{self}};

impl Context {
    /// Clears values from the tail of the trail above `target`, or every value without a target.
    ///
    /// Returns true if some value was cleared.
    fn unwind(&mut self, target: Option<LevelIndex>) -> bool {
        let mut unassigned = false;

        while let Some(literal) = self.trail.literals.last().copied() {
            if let Some(target) = target {
                match self.variable_db.level_of(literal.variable()) {
                    Some(level) if level <= target => break,
                    _ => {}
                }
            }

            self.trail.literals.pop();
            self.unassign(literal);
            unassigned = true;
        }

        match target {
            Some(target) => {
                while target < self.trail.level() {
                    self.trail.close_level();
                }
                self.trail.q_head = self.trail.q_head.min(self.trail.len());
            }
            None => self.trail.clear(),
        }

        if unassigned {
            self.variable_db.restore_heap();
            self.decision_stack.implied_dirty = true;
        }
        unassigned
    }

    /// Backjumps to the given target level.
    ///
    /// For documentation, see [procedures::backjump](crate::procedures::backjump).
    pub fn backjump(&mut self, target: LevelIndex) {
        if target < self.trail.level() {
            log::trace!(target: targets::BACKJUMP, "Backjump from {} to {target}", self.trail.level());
        }
        self.unwind(Some(target));
    }

    /// Clears every value, including values at level zero.
    pub fn clear_trail(&mut self) {
        log::trace!(target: targets::BACKJUMP, "Trail cleared");
        self.unwind(None);
    }
}
