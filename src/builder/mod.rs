/*!
Tools for building a context.

# Basic methods

The library has two basic methods for building a context:
- [fresh_variable](crate::context::Context::fresh_variable), to obtain a fresh variable.
- [add_clause](crate::context::Context::add_clause), to add a clause.

A formula may be added to a context by interweaving these two methods.
Alternatively, [literal_from_string](crate::context::Context::literal_from_string) and [clause_from_string](crate::context::Context::clause_from_string) create variables by name as required, and [read_dimacs](crate::context::Context::read_dimacs) reads a formula in the DIMACS format.

# Adding a clause

A clause is deduplicated, in order, and a clause containing some literal together with its negation is a tautology, which is accepted without being stored.

- The empty clause makes the formula unsatisfiable.
- A unit clause is stored as a fact and asserted at level zero, after a backjump to level zero.
- A binary clause is watched in the binary lists of its literals.
- A long clause is stored in the clause database and watched on its first two literals.

A clause added after some values have been given may conflict with the values, or may be asserting.
So, a clause of two or more literals is first examined against the trail:
- If the clause is true, the context backjumps below the lowest level at which the clause is true.
  Unless the clause is true at level zero, in which case the clause is watched on a true literal.
- If two or more literals are unvalued, nothing further happens.
- If exactly one literal is unvalued, the context backjumps to the highest level of the other literals and asserts the unvalued literal.
- If every literal is false and a single literal has the highest level, the context backjumps to the second highest level and asserts that literal.
- If every literal is false and two literals share the highest level, the context backjumps below that level, or the formula is unsatisfiable if that level is zero.

Before any decision is made, and with the [Jeroslow-Wang](crate::config::InitialPhase::JeroslowWang) initial phase, each added clause weighs in on the phase of its variables.

# Examples

```rust
# use prover_sat::context::Context;
# use prover_sat::config::Config;
# use prover_sat::reports::Report;
# use prover_sat::structures::literal::Literal;
#
let mut the_context = Context::from_config(Config::default());
let p = the_context.fresh_variable(None).unwrap();
let q = the_context.fresh_variable(None).unwrap();

let clause_a = vec![Literal::new(p, true), Literal::new(q, false)];
let clause_b = vec![Literal::new(p, false), Literal::new(q, true)];

assert_eq!(the_context.add_clause(clause_a), Ok(true));
assert_eq!(the_context.add_clause(clause_b), Ok(true));
assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
```

A simplified build, by name.

```rust
# use prover_sat::context::Context;
# use prover_sat::config::Config;
# use prover_sat::reports::Report;
#
let mut the_context = Context::from_config(Config::default());

for clause in ["p -q", "-p q", "p q", "-p -q"] {
    let clause = the_context.clause_from_string(clause).unwrap();
    assert!(the_context.add_clause(clause).is_ok());
}

assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
```
*/

pub mod dimacs;
pub use dimacs::DimacsInfo;

use crate::{
    config::InitialPhase,
    context::{Conflict, Context, ContextState},
    db::clause::db_clause::summarise_levels,
    misc::log::targets::{self},
    procedures::analysis::Analysis,
    proof::ClauseId,
    structures::{literal::Literal, reason::Reason},
    types::err::{self},
};

impl Context {
    /// Adds `clause` to the context, returning false if the formula of the context is now known to be unsatisfiable.
    ///
    /// For documentation, see [builder](crate::builder).
    pub fn add_clause(&mut self, clause: Vec<Literal>) -> Result<bool, err::ErrorKind> {
        self.add_original(clause, None)
    }

    /// Adds `clause` to the context, as [add_clause](Context::add_clause), with `name` as a tag.
    ///
    /// The tag is kept only if proofs are traced, and is reported by [core_tags](Context::core_tags).
    pub fn add_named_clause(
        &mut self,
        clause: Vec<Literal>,
        name: &str,
    ) -> Result<bool, err::ErrorKind> {
        self.add_original(clause, Some(name.to_string()))
    }

    fn add_original(
        &mut self,
        clause: Vec<Literal>,
        name: Option<String>,
    ) -> Result<bool, err::ErrorKind> {
        if let Some(unknown) = clause
            .iter()
            .find(|literal| !self.variable_db.contains(literal.variable()))
        {
            log::error!(target: targets::CLAUSE_DB, "Clause with unknown variable {unknown}");
            return Err(err::ClauseDBError::UnknownVariable.into());
        }

        let mut literals: Vec<Literal> = Vec::with_capacity(clause.len());
        for literal in clause {
            if literals.contains(&-literal) {
                log::trace!(target: targets::CLAUSE_DB, "Tautology skipped");
                return Ok(self.state != ContextState::Unsatisfiable);
            }
            if !literals.contains(&literal) {
                literals.push(literal);
            }
        }

        let id = match &mut self.tracer {
            Some(tracer) => tracer.fresh_original_id(),
            None => 0,
        };

        match literals.len() {
            0 => {
                log::info!(target: targets::CLAUSE_DB, "Empty clause added");
                if let Some(tracer) = &mut self.tracer {
                    tracer.note_original(id, Vec::default(), name);
                    if !tracer.has_refutation() {
                        tracer.record_refutation(vec![id]);
                    }
                }
                self.state = ContextState::Unsatisfiable;
            }

            1 => self.add_original_unit(literals[0], id, name)?,

            _ => self.add_original_long(literals, id, name)?,
        }

        if self.state != ContextState::Unsatisfiable {
            self.state = ContextState::Unknown;
        }
        Ok(self.state != ContextState::Unsatisfiable)
    }

    fn add_original_unit(
        &mut self,
        literal: Literal,
        id: ClauseId,
        name: Option<String>,
    ) -> Result<(), err::ErrorKind> {
        self.backjump(0);

        if let Some(tracer) = &mut self.tracer {
            if tracer.unit_id(literal).is_some() {
                log::trace!(target: targets::CLAUSE_DB, "Duplicate unit {literal} skipped");
                return Ok(());
            }
            tracer.note_unit(literal, id);
            tracer.note_original(id, vec![literal], name);
        }

        self.clause_db.store_unit(literal);
        self.jeroslow_wang(&[literal]);

        if self.state != ContextState::Unsatisfiable && !self.assign(literal, Reason::Fact) {
            log::info!(target: targets::CLAUSE_DB, "Unit {literal} conflicts with the formula");
            self.state = ContextState::Unsatisfiable;
            self.derive_refutation()?;
        }
        Ok(())
    }

    fn add_original_long(
        &mut self,
        mut literals: Vec<Literal>,
        id: ClauseId,
        name: Option<String>,
    ) -> Result<(), err::ErrorKind> {
        let mut propagate = false;
        let mut root_conflict = false;

        if self.state != ContextState::Unsatisfiable {
            let lowest_true = literals
                .iter()
                .enumerate()
                .filter(|(_, literal)| self.variable_db.literal_value(**literal) == Some(true))
                .filter_map(|(position, literal)| {
                    self.variable_db
                        .level_of(literal.variable())
                        .map(|level| (level, position))
                })
                .min();

            match lowest_true {
                Some((0, position)) => literals.swap(0, position),

                Some((level, _)) => self.backjump(level - 1),

                None => {}
            }

            if !matches!(lowest_true, Some((0, _))) {
                let summary = summarise_levels(&mut literals, &self.variable_db);

                match (summary.unassigned, summary.highest, summary.second) {
                    (0, Some(0), Some(0)) => root_conflict = true,

                    (0, Some(highest), Some(second)) if highest == second => {
                        self.backjump(highest - 1)
                    }

                    (0, Some(_), Some(second)) => {
                        self.backjump(second);
                        propagate = true;
                    }

                    (1, Some(highest), _) => {
                        literals.swap(0, 1);
                        self.backjump(highest);
                        propagate = true;
                    }

                    _ => {}
                }
            }
        }

        let reason = match literals.len() {
            2 => {
                let duplicate = match &mut self.tracer {
                    Some(tracer) if tracer.binary_id(literals[0], literals[1]).is_some() => true,
                    Some(tracer) => {
                        tracer.note_binary(literals[0], literals[1], id);
                        tracer.note_original(id, literals.clone(), name);
                        false
                    }
                    None => false,
                };

                if duplicate {
                    log::trace!(target: targets::CLAUSE_DB, "Duplicate binary clause skipped");
                } else {
                    self.watches.watch_binary(literals[0], literals[1]);
                }
                Reason::Binary(literals[1])
            }

            _ => {
                let key = self.clause_db.store_original(literals.clone(), id)?;
                self.watches.watch_long(literals[0], key);
                self.watches.watch_long(literals[1], key);

                if let Some(tracer) = &mut self.tracer {
                    tracer.note_original(id, literals.clone(), name);
                }
                Reason::Clause(key)
            }
        };

        self.jeroslow_wang(&literals);

        if root_conflict {
            log::info!(target: targets::CLAUSE_DB, "Clause conflicts with the formula at level zero");
            self.conflict = Some(Conflict {
                literal: literals[0],
                reason,
            });
            self.state = ContextState::Unsatisfiable;
            self.derive_refutation()?;
        } else if propagate && !self.assign(literals[0], reason) {
            log::error!(target: targets::CLAUSE_DB, "Asserted literal {} is false", literals[0]);
            return Err(err::BCPError::CorruptWatch.into());
        }

        Ok(())
    }

    /// Updates the Jeroslow-Wang weights of the variables of `literals`, if no decision has been made.
    fn jeroslow_wang(&mut self, literals: &[Literal]) {
        if self.config.initial_phase.value != InitialPhase::JeroslowWang
            || self.trail.level() != 0
            || self.counters.total_decisions != 0
        {
            return;
        }

        for literal in literals {
            self.variable_db
                .variable_mut(literal.variable())
                .jeroslow_wang(literal.polarity(), literals.len());
        }
    }

    /// Stores the clause learnt from `analysis`, after a backjump to the level at which the clause is asserting.
    ///
    /// A unit clause is asserted as a fact.
    /// Otherwise, the reason to use when asserting the first literal of the clause is returned.
    pub(crate) fn store_learnt(
        &mut self,
        analysis: Analysis,
    ) -> Result<Option<Reason>, err::ErrorKind> {
        let Analysis {
            literals,
            backjump_level,
            activity,
            premises,
        } = analysis;

        let id = match &mut self.tracer {
            Some(tracer) => {
                let id = tracer.fresh_deduced_id();
                tracer.record_deduction(id, premises);
                id
            }
            None => 0,
        };

        match literals.len() {
            0 => {
                log::error!(target: targets::CLAUSE_DB, "Empty learnt clause");
                Err(err::AnalysisError::NoConflict.into())
            }

            1 => {
                let literal = literals[0];
                self.backjump(0);

                let duplicate = match &mut self.tracer {
                    Some(tracer) if tracer.unit_id(literal).is_some() => {
                        tracer.delete_deduction(id);
                        true
                    }
                    Some(tracer) => {
                        tracer.note_unit(literal, id);
                        false
                    }
                    None => false,
                };

                if !duplicate {
                    log::debug!(target: targets::CLAUSE_DB, "Learnt unit {literal}");
                    self.clause_db.store_unit(literal);
                    self.counters.learnt_unit += 1;
                }

                if !self.assign(literal, Reason::Fact) {
                    self.state = ContextState::Unsatisfiable;
                    self.derive_refutation()?;
                }
                Ok(None)
            }

            2 => {
                self.backjump(backjump_level);

                let duplicate = match &mut self.tracer {
                    Some(tracer) if tracer.binary_id(literals[0], literals[1]).is_some() => {
                        tracer.delete_deduction(id);
                        true
                    }
                    Some(tracer) => {
                        tracer.note_binary(literals[0], literals[1], id);
                        false
                    }
                    None => false,
                };

                if !duplicate {
                    self.watches.watch_binary(literals[0], literals[1]);
                    self.counters.learnt_binary += 1;
                }
                Ok(Some(Reason::Binary(literals[1])))
            }

            _ => {
                self.backjump(backjump_level);

                let (first, second) = (literals[0], literals[1]);
                let key = self.clause_db.store_learnt(literals, activity, id)?;
                self.watches.watch_long(first, key);
                self.watches.watch_long(second, key);
                self.counters.learnt_long += 1;

                Ok(Some(Reason::Clause(key)))
            }
        }
    }
}
