/*!
Variables, and the details a context keeps for each variable.

A variable has a unique name and an [index](crate::structures::literal::VariableIndex).
Alongside the name, a [Variable] records:
- The value of the variable, if any.
- The [reason](crate::structures::reason::Reason) for the value, and the level the value was given at.
- A saved phase, used when deciding on a value for the variable.
- A Jeroslow-Wang accumulator, split by polarity.

The score of a variable is kept by the [variable database](crate::db::variable), as scores are stored on a heap.

# Jeroslow-Wang

Before any decision is made, each clause added to a context weighs in on the phase of its variables.
A clause of length *n* adds 2<sup>32 - n</sup> (and at least 1) to the accumulator of the polarity each variable occurs with, and the phase of a variable is positive exactly when the positive accumulator exceeds the negative accumulator.
So, short clauses weigh more than long clauses.
*/

use crate::{db::LevelIndex, structures::reason::Reason};

/// The details kept for a variable.
#[derive(Clone, Debug)]
pub struct Variable {
    /// The name of the variable.
    pub name: String,

    /// The value of the variable, if any.
    pub value: Option<bool>,

    /// The reason for the value of the variable, meaningful only if the variable has some value.
    pub reason: Reason,

    /// The level at which the variable was given a value, if it has a value.
    pub level: Option<LevelIndex>,

    /// The polarity to use when deciding on a value for the variable.
    pub phase: bool,

    jw_positive: u64,
    jw_negative: u64,
}

impl Variable {
    pub fn new(name: String, phase: bool) -> Self {
        Variable {
            name,
            value: None,
            reason: Reason::Decision,
            level: None,
            phase,
            jw_positive: 0,
            jw_negative: 0,
        }
    }

    /// Weigh in on the phase of the variable, from an occurrence with `polarity` in a clause of `clause_length` literals.
    pub fn jeroslow_wang(&mut self, polarity: bool, clause_length: usize) {
        let weight = 1_u64 << (32 - clause_length.clamp(1, 32));

        match polarity {
            true => self.jw_positive = self.jw_positive.saturating_add(weight),
            false => self.jw_negative = self.jw_negative.saturating_add(weight),
        }

        self.phase = self.jw_negative < self.jw_positive;
    }

    /// Clears the Jeroslow-Wang accumulators, without revising the phase.
    pub fn clear_jeroslow_wang(&mut self) {
        self.jw_positive = 0;
        self.jw_negative = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_clauses_weigh_more() {
        let mut variable = Variable::new("p".to_string(), false);

        variable.jeroslow_wang(false, 3);
        variable.jeroslow_wang(false, 3);
        assert!(!variable.phase);

        variable.jeroslow_wang(true, 2);
        assert!(!variable.phase);

        variable.jeroslow_wang(true, 1);
        assert!(variable.phase);
    }
}
