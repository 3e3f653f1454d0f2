/*!
Giving and clearing the values of variables.

An assignment makes a literal true, for some [reason](crate::structures::reason::Reason), at the current level.

- If the literal is already true, nothing happens.
- If the literal is false, the assignment fails and the conflict is recorded on the context, for [analysis](crate::procedures::analysis).
- Otherwise, the value is recorded on the variable, the literal is pushed to the trail, and the reason is referenced if the reason is a clause.

Clearing a value reverses each step, and places the variable back on the score heap.
If phase saving is enabled the cleared value becomes the phase of the variable.
*/

use crate::{
    context::{Conflict, Context},
    misc::log::targets::{self},
    structures::{literal::Literal, reason::Reason},
};

impl Context {
    /// Assigns `literal` from `reason`, returning false on a conflict.
    ///
    /// For documentation, see [procedures::assignment](crate::procedures::assignment).
    pub(crate) fn assign(&mut self, literal: Literal, reason: Reason) -> bool {
        match self.variable_db.literal_value(literal) {
            Some(true) => true,

            Some(false) => {
                log::debug!(target: targets::PROPAGATION, "Conflict assigning {literal} from {reason}");
                self.conflict = Some(Conflict { literal, reason });
                false
            }

            None => {
                let level = self.trail.level();
                log::trace!(target: targets::PROPAGATION, "{literal} at level {level} from {reason}");

                self.variable_db.set_value(literal, reason, level);
                self.trail.store_assignment(literal);
                if let Reason::Clause(key) = reason {
                    self.clause_db.reference(key);
                }
                self.decision_stack.implied_dirty = true;
                true
            }
        }
    }

    /// Clears the value of the variable of `literal`.
    pub(crate) fn unassign(&mut self, literal: Literal) {
        let variable = literal.variable();
        if let Reason::Clause(key) = self.variable_db.reason_of(variable) {
            self.clause_db.dereference(key);
        }
        self.variable_db
            .clear_value(variable, self.config.phase_saving.value);
    }
}
