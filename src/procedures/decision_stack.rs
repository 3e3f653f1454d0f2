/*!
A decision stack, for knowledge compilation.

The methods here give a client control over decisions, in place of a [solve](crate::procedures::solve).
The client decides on literals, and retreats from decisions, while the context propagates and learns.

- [decide_literal](Context::decide_literal) opens a level, decides on a literal, and propagates.
  On a conflict the conflict is analysed and the learnt clause is held as pending, together with the level at which the clause is asserting.
  The clause is not stored, and no backjump is made.
- [undo_decide](Context::undo_decide) retreats to the level below the decision on a variable.
- [at_assertion_level](Context::at_assertion_level) is true when the current level is the level at which the pending clause is asserting.
- [assert_cd_literal](Context::assert_cd_literal) stores the pending clause, asserts the literal of the clause, and propagates.
  A further conflict is analysed in turn.
- [newly_implied](Context::newly_implied) gives the literals implied since the most recent decision, once for each change to the trail.

A conflict at level zero makes the formula unsatisfiable.

# Example

```rust
# use prover_sat::{config::Config, context::Context};
let mut the_context = Context::from_config(Config::default());

for clause in ["-a b", "-a -b", "-c d"] {
    let clause = the_context.clause_from_string(clause).unwrap();
    assert!(the_context.add_clause(clause).is_ok());
}

let a = the_context.literal_from_string("a").unwrap();
let c = the_context.literal_from_string("c").unwrap();
let d = the_context.literal_from_string("d").unwrap();

assert_eq!(the_context.decide_literal(c), Ok(true));
assert_eq!(the_context.newly_implied(), vec![d]);
assert_eq!(the_context.newly_implied(), vec![]);

// Deciding on a conflicts, and the clause learnt asserts -a at level zero.
assert_eq!(the_context.decide_literal(a), Ok(false));
assert!(!the_context.at_assertion_level());

assert!(the_context.undo_decide(c.variable()).is_ok());
assert!(the_context.at_assertion_level());
assert_eq!(the_context.assert_cd_literal(), Ok(true));
assert_eq!(the_context.variable_db.literal_value(a), Some(false));
```
*/

use crate::{
    context::{Context, ContextState},
    misc::log::targets::{self},
    structures::{
        literal::{Literal, VariableIndex},
        reason::Reason,
    },
    types::err::{self},
};

impl Context {
    /// Decides on `literal` at a fresh level and propagates, returning false on a conflict.
    pub fn decide_literal(&mut self, literal: Literal) -> Result<bool, err::ErrorKind> {
        if !self.variable_db.contains(literal.variable()) {
            return Err(err::ClauseDBError::UnknownVariable.into());
        }

        if self.state == ContextState::Unsatisfiable || !self.propagate_pending()? {
            return Ok(false);
        }

        if self.variable_db.literal_value(literal).is_some() {
            log::warn!(target: targets::DECISION, "Decision on assigned literal {literal}");
            return Err(err::DecisionStackError::AssignedLiteral.into());
        }

        self.trail.open_level();
        self.counters.note_level(self.trail.level());
        self.counters.total_decisions += 1;

        log::trace!(target: targets::DECISION, "Decision {literal} at level {}", self.trail.level());
        self.assign(literal, Reason::Decision);

        self.propagate_pending()
    }

    /// Propagates the trail, analysing any conflict found.
    ///
    /// Returns false on a conflict.
    fn propagate_pending(&mut self) -> Result<bool, err::ErrorKind> {
        if self.bcp()? {
            return Ok(true);
        }

        match self.trail.level() {
            0 => {
                self.state = ContextState::Unsatisfiable;
                self.derive_refutation()?;
            }

            _ => {
                let analysis = self.analyse_conflict()?;
                self.counters.note_conflict(&self.config);

                self.decision_stack.assertion_level = Some(analysis.backjump_level);
                self.decision_stack.pending = Some(analysis);
            }
        }

        Ok(false)
    }

    /// Backjumps to the level below the level of the decision on `variable`.
    pub fn undo_decide(&mut self, variable: VariableIndex) -> Result<(), err::ErrorKind> {
        if !self.variable_db.contains(variable) {
            return Err(err::ClauseDBError::UnknownVariable.into());
        }

        match (
            self.variable_db.reason_of(variable),
            self.variable_db.level_of(variable),
        ) {
            (Reason::Decision, Some(level)) if level > 0 => {
                self.backjump(level - 1);
                Ok(())
            }

            _ => Err(err::DecisionStackError::NoDecision.into()),
        }
    }

    /// True if some clause is pending, and the current level is the level at which the clause is asserting.
    pub fn at_assertion_level(&self) -> bool {
        self.decision_stack.pending.is_some()
            && self.decision_stack.assertion_level == Some(self.trail.level())
    }

    /// Stores the pending clause, asserts the literal of the clause, and propagates.
    ///
    /// Returns false on a further conflict, or if the formula is unsatisfiable.
    pub fn assert_cd_literal(&mut self) -> Result<bool, err::ErrorKind> {
        if !self.at_assertion_level() {
            return Err(err::DecisionStackError::NotAtAssertionLevel.into());
        }

        self.decision_stack.assertion_level = None;
        let Some(analysis) = self.decision_stack.pending.take() else {
            return Err(err::DecisionStackError::NotAtAssertionLevel.into());
        };

        let Some(asserted) = analysis.literals.first().copied() else {
            return Err(err::AnalysisError::NoConflict.into());
        };

        if let Some(reason) = self.store_learnt(analysis)? {
            if !self.assign(asserted, reason) {
                log::error!(target: targets::DECISION, "Pending clause asserts a false literal {asserted}");
                return Err(err::BCPError::CorruptWatch.into());
            }
        }

        if self.state == ContextState::Unsatisfiable {
            return Ok(false);
        }

        self.propagate_pending()
    }

    /// The literals implied since the most recent decision, or at level zero every literal.
    ///
    /// Literals are given once for each change to the trail, and otherwise no literals are given.
    pub fn newly_implied(&mut self) -> Vec<Literal> {
        if !self.decision_stack.implied_dirty {
            return Vec::default();
        }
        self.decision_stack.implied_dirty = false;

        let mut implied = self
            .trail
            .literals
            .iter()
            .rev()
            .take_while(|literal| self.variable_db.reason_of(literal.variable()) != Reason::Decision)
            .copied()
            .collect::<Vec<_>>();

        implied.reverse();
        implied
    }
}
