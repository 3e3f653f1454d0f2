/*!
A database of variables.

The database records, for each variable:
- The details of the variable, as a [Variable].
- The score of the variable, on an [IndexHeap].

And, the database maps names to indicies.

# The score heap

Scores follow VSIDS, with integer scores:
- The score of a variable is bumped by one for each learnt clause the variable occurs in.
- Periodically, every score is decayed by a right shift.

A variable is *active* on the heap exactly when the variable has no value.
So, when a decision is to be made the variable to decide on is the maximum of the heap.

Values are cleared in batches (on a backjump), and so clearing a value places the variable on the heap through the [quick path](crate::generic::index_heap) of the heap, and the heap property is restored once the backjump is complete.

# The reserved variable

Index zero is reserved for a variable with an empty name.
The variable is never active on the heap and never has a value, so literals zero and one never appear in a formula.
*/

use std::collections::HashMap;

use crate::{
    db::LevelIndex,
    generic::index_heap::IndexHeap,
    misc::log::targets::{self},
    structures::{
        literal::{Literal, VariableIndex},
        reason::Reason,
        variable::Variable,
    },
    types::err::{self},
};

/// The representation of a score.
pub type Score = u32;

/// The variable database.
pub struct VariableDB {
    variables: Vec<Variable>,
    names: HashMap<String, VariableIndex>,
    scores: IndexHeap<Score>,
}

impl Default for VariableDB {
    fn default() -> Self {
        let mut scores = IndexHeap::default();
        scores.add(0, 0);

        VariableDB {
            variables: vec![Variable::new(String::default(), false)],
            names: HashMap::default(),
            scores,
        }
    }
}

impl VariableDB {
    /// Adds a variable named `name`, with `phase` as the initial phase.
    pub fn fresh_variable(
        &mut self,
        name: String,
        phase: bool,
    ) -> Result<VariableIndex, err::VariableDBError> {
        if self.names.contains_key(&name) {
            log::warn!(target: targets::VARIABLE_DB, "Duplicate variable name: {name}");
            return Err(err::VariableDBError::DuplicateName);
        }

        let index = match VariableIndex::try_from(self.variables.len()) {
            Ok(index) if index < VariableIndex::MAX >> 1 => index,
            _ => return Err(err::VariableDBError::VariablesExhausted),
        };

        self.names.insert(name.clone(), index);
        self.variables.push(Variable::new(name, phase));
        self.scores.add(index as usize, 0);
        self.scores.activate(index as usize);

        Ok(index)
    }

    /// The index of the variable named `name`, if it exists.
    pub fn index_of(&self, name: &str) -> Option<VariableIndex> {
        self.names.get(name).copied()
    }

    /// A count of variables, excluding the reserved variable.
    pub fn count(&self) -> usize {
        self.variables.len() - 1
    }

    /// The length of the internal variable store, including the reserved variable.
    pub fn bound(&self) -> usize {
        self.variables.len()
    }

    /// True if `index` is the index of some (non-reserved) variable.
    pub fn contains(&self, index: VariableIndex) -> bool {
        index != 0 && (index as usize) < self.variables.len()
    }

    /// The details of the variable at `index`.
    pub fn variable(&self, index: VariableIndex) -> &Variable {
        &self.variables[index as usize]
    }

    /// The mutable details of the variable at `index`.
    pub fn variable_mut(&mut self, index: VariableIndex) -> &mut Variable {
        &mut self.variables[index as usize]
    }

    /// An iterator over (non-reserved) variables, paired with their index.
    pub fn variables(&self) -> impl Iterator<Item = (VariableIndex, &Variable)> {
        self.variables
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, variable)| (index as VariableIndex, variable))
    }

    /// The name of the variable at `index`.
    pub fn name_of(&self, index: VariableIndex) -> &str {
        &self.variables[index as usize].name
    }

    /// The value of the variable at `index`, if any.
    pub fn value_of(&self, index: VariableIndex) -> Option<bool> {
        self.variables[index as usize].value
    }

    /// The value of `literal`, if its variable has some value.
    pub fn literal_value(&self, literal: Literal) -> Option<bool> {
        self.value_of(literal.variable())
            .map(|value| value == literal.polarity())
    }

    /// The level at which the variable at `index` was valued, if it has a value.
    pub fn level_of(&self, index: VariableIndex) -> Option<LevelIndex> {
        self.variables[index as usize].level
    }

    /// The reason for the value of the variable at `index`.
    pub fn reason_of(&self, index: VariableIndex) -> Reason {
        self.variables[index as usize].reason
    }

    /// Values the variable of `literal` to make `literal` true, and removes the variable from the heap.
    pub(crate) fn set_value(&mut self, literal: Literal, reason: Reason, level: LevelIndex) {
        let index = literal.variable();
        let variable = &mut self.variables[index as usize];

        variable.value = Some(literal.polarity());
        variable.reason = reason;
        variable.level = Some(level);

        self.scores.remove(index as usize);
    }

    /// Clears the value of the variable at `index` and places the variable on the heap through the quick path.
    ///
    /// If `save_phase` the phase of the variable is set to the cleared value.
    pub(crate) fn clear_value(&mut self, index: VariableIndex, save_phase: bool) {
        let variable = &mut self.variables[index as usize];

        if save_phase {
            if let Some(value) = variable.value {
                variable.phase = value;
            }
        }
        variable.value = None;
        variable.reason = Reason::Decision;
        variable.level = None;

        self.scores.quick_activate(index as usize);
    }

    /// The score of the variable at `index`.
    pub fn score_of(&self, index: VariableIndex) -> Score {
        *self.scores.value_at(index as usize)
    }

    /// Sets the score of the variable at `index`.
    pub(crate) fn set_score(&mut self, index: VariableIndex, score: Score) {
        self.scores.revalue(index as usize, score);
        self.scores.heapify_if_active(index as usize);
    }

    /// Bumps the score of the variable at `index` by one.
    pub fn bump_score(&mut self, index: VariableIndex) {
        self.scores
            .apply_to_value_at_value_index(index as usize, |score| score.saturating_add(1));
        self.scores.heapify_if_active(index as usize);
    }

    /// Decays every score by a right shift of `factor`.
    pub fn decay_scores(&mut self, factor: u32) {
        self.scores
            .apply_to_all(|score| score.checked_shr(factor).unwrap_or(0));
        self.scores.heapify();
    }

    /// Restores the heap property of the score heap.
    pub(crate) fn restore_heap(&mut self) {
        self.scores.heapify();
    }

    /// Takes the unvalued variable with the highest score off the heap.
    pub(crate) fn pop_highest_score(&mut self) -> Option<VariableIndex> {
        self.scores.pop_max().map(|index| index as VariableIndex)
    }

    /// True if some variable is without a value.
    pub fn has_unvalued(&mut self) -> bool {
        self.scores.peek_max().is_some()
    }

    /// True if the variable at `index` is active on the heap.
    pub fn is_active(&self, index: VariableIndex) -> bool {
        self.scores.is_active(index as usize)
    }

    /// Removes every variable with an index at or above `bound`.
    pub(crate) fn truncate(&mut self, bound: usize) {
        let bound = bound.max(1);
        if bound >= self.variables.len() {
            return;
        }

        for variable in self.variables.drain(bound..) {
            self.names.remove(&variable.name);
        }
        self.scores.truncate(bound);

        log::info!(target: targets::VARIABLE_DB, "Variables truncated to {bound}");
    }

    /// Removes every variable, keeping only the reserved variable.
    pub(crate) fn clear(&mut self) {
        *self = VariableDB::default();
    }
}
