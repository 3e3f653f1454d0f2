/*!
Methods for choosing the value of a variable.

# Overview

The variable to decide on is the unvalued variable with the highest score, taken from the score heap of the [variable database](crate::db::variable).
The value given is the phase of the variable.

- Initially, the phase of a variable is given by the [initial phase](crate::config::InitialPhase) option.
- With phase saving, the phase of a variable is updated to the last value of the variable whenever the value is cleared.

Before a decision is made:
- The decision is counted, and if the decision budget has been exhausted the decision fails with a [Timeout](crate::types::err::ErrorKind::Timeout).
- Every `decay_rate` decisions, scores are decayed.

Each decision opens a fresh level.
*/

use crate::{
    context::Context,
    misc::log::targets::{self},
    structures::{literal::Literal, reason::Reason},
    types::err::{self},
};

impl Context {
    /// Makes a decision, returning false if every variable has a value.
    pub fn decide(&mut self) -> Result<bool, err::ErrorKind> {
        if !self.variable_db.has_unvalued() {
            return Ok(false);
        }

        self.counters.note_decision(&self.config)?;

        if self.counters.decay_due(&self.config) {
            self.variable_db
                .decay_scores(self.config.decay_factor.value);
        }

        let Some(variable) = self.variable_db.pop_highest_score() else {
            return Ok(false);
        };

        self.trail.open_level();
        self.counters.note_level(self.trail.level());

        let literal = Literal::new(variable, self.variable_db.variable(variable).phase);
        log::trace!(target: targets::DECISION, "Decision {literal} at level {}", self.trail.level());

        self.assign(literal, Reason::Decision);
        Ok(true)
    }
}
