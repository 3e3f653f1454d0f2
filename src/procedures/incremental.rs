/*!
Marks, for incremental use of a context.

A [Mark] records the bounds of each database of a context.
Clauses and variables added after a mark are removed when the mark is popped, while those present when the mark was saved persist.

```rust
# use prover_sat::{config::Config, context::Context, reports::Report};
let mut the_context = Context::from_config(Config::default());

let clause = the_context.clause_from_string("p q").unwrap();
assert!(the_context.add_clause(clause).is_ok());

the_context.save();
for clause in ["-p", "-q"] {
    let clause = the_context.clause_from_string(clause).unwrap();
    assert!(the_context.add_clause(clause).is_ok());
}
assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));

assert!(the_context.pop().is_ok());
assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
```

# Saving

A mark records:
- The state of the context.
- Counts of original clauses, learnt clauses, unit facts and variables.
- The count of watch lists, and the length of every binary watch list.
- With [score_saving](crate::config::Config::score_saving), the score and phase of every variable.
- When proofs are traced, the next identifiers of the [tracer](crate::proof::ProofTracer).

# Popping

A pop restores the most recent mark:
- Every value is cleared, including values at level zero.
- Clauses beyond the recorded counts are unwatched and removed, and when proofs are traced the identifiers of removed clauses are forgotten.
- Variables, watch lists and binary watch lists are truncated.
- Remaining unit facts are asserted again, and a conflict between these makes the formula unsatisfiable.
- Saved scores and phases are restored.

If the context was unsatisfiable when the mark was saved, the context remains unsatisfiable.
Otherwise, the state of the context is unknown, as the trail which witnessed satisfiability has been cleared.

Counters are reset by a pop.

Bounds are checked before anything is changed, and a mark whose bounds exceed the databases is an error which leaves the context untouched.
*/

use crate::{
    context::{Context, ContextState},
    db::variable::Score,
    misc::log::targets::{self},
    proof::ClauseId,
    structures::reason::Reason,
    types::err::{self},
};

/// The bounds of a context, as saved.
#[derive(Clone, Debug)]
pub struct Mark {
    pub(crate) state: ContextState,
    pub(crate) original_count: usize,
    pub(crate) learnt_count: usize,
    pub(crate) unit_count: usize,
    pub(crate) variable_bound: usize,
    pub(crate) watch_list_count: usize,
    pub(crate) binary_lengths: Vec<usize>,

    /// The score and phase of each variable, from the first non-reserved variable.
    pub(crate) scores: Option<Vec<(Score, bool)>>,

    /// The next original and deduced identifiers.
    pub(crate) proof_ids: Option<(ClauseId, ClauseId)>,
}

impl Context {
    /// Saves a mark.
    ///
    /// For documentation, see [procedures::incremental](crate::procedures::incremental).
    pub fn save(&mut self) {
        let scores = match self.config.score_saving.value {
            true => Some(
                self.variable_db
                    .variables()
                    .map(|(index, variable)| (self.variable_db.score_of(index), variable.phase))
                    .collect(),
            ),
            false => None,
        };

        let mark = Mark {
            state: self.state,
            original_count: self.clause_db.original_count(),
            learnt_count: self.clause_db.learnt_count(),
            unit_count: self.clause_db.unit_facts().len(),
            variable_bound: self.variable_db.bound(),
            watch_list_count: self.watches.list_count(),
            binary_lengths: self.watches.binary_lengths(),
            scores,
            proof_ids: self.tracer.as_ref().map(|tracer| tracer.next_ids()),
        };

        self.marks.push(mark);
        log::info!(target: targets::INCREMENTAL, "Mark {} saved", self.marks.len());
    }

    /// A count of saved marks.
    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    /// True if every bound of `mark` is within the current databases.
    fn mark_is_consistent(&self, mark: &Mark) -> bool {
        let binary_lengths = self.watches.binary_lengths();

        mark.original_count <= self.clause_db.original_count()
            && mark.learnt_count <= self.clause_db.learnt_count()
            && mark.unit_count <= self.clause_db.unit_facts().len()
            && mark.variable_bound <= self.variable_db.bound()
            && mark.watch_list_count <= self.watches.list_count()
            && mark.binary_lengths.len() <= binary_lengths.len()
            && mark
                .binary_lengths
                .iter()
                .zip(&binary_lengths)
                .all(|(saved, current)| saved <= current)
    }

    /// Restores the most recent mark.
    ///
    /// For documentation, see [procedures::incremental](crate::procedures::incremental).
    pub fn pop(&mut self) -> Result<(), err::ErrorKind> {
        match self.marks.last() {
            None => {
                log::error!(target: targets::INCREMENTAL, "Pop without a mark");
                return Err(err::MarkError::NoMark.into());
            }

            Some(mark) if !self.mark_is_consistent(mark) => {
                log::error!(target: targets::INCREMENTAL, "Mark bounds exceed the databases");
                return Err(err::MarkError::InconsistentBounds.into());
            }

            Some(_) => {}
        }

        let Some(mark) = self.marks.pop() else {
            return Err(err::MarkError::NoMark.into());
        };

        self.counters.reset(&self.config);
        self.clear_trail();
        self.conflict = None;
        self.decision_stack = Default::default();

        self.state = match mark.state {
            ContextState::Unsatisfiable => ContextState::Unsatisfiable,
            ContextState::Unknown | ContextState::Satisfiable => {
                if let Some(tracer) = &mut self.tracer {
                    tracer.clear_refutation();
                }
                ContextState::Unknown
            }
        };

        for clause in self.clause_db.truncate_original(mark.original_count) {
            self.watches.unwatch_long(clause.literals()[0], clause.key());
            self.watches.unwatch_long(clause.literals()[1], clause.key());
        }

        for clause in self.clause_db.truncate_learnt(mark.learnt_count)? {
            self.watches.unwatch_long(clause.literals()[0], clause.key());
            self.watches.unwatch_long(clause.literals()[1], clause.key());
            if let Some(tracer) = &mut self.tracer {
                tracer.delete_deduction(clause.id());
            }
        }

        self.variable_db.truncate(mark.variable_bound);

        let removed_units = self.clause_db.truncate_units(mark.unit_count);

        if let Some(tracer) = &mut self.tracer {
            for literal in removed_units {
                tracer.forget_unit(literal);
            }
            for [a, b] in self.watches.binary_watches_beyond(&mark.binary_lengths) {
                tracer.forget_binary(a, b);
            }
        }

        self.watches
            .truncate(mark.watch_list_count, &mark.binary_lengths);

        if let (Some(tracer), Some((next_original, next_deduced))) =
            (&mut self.tracer, mark.proof_ids)
        {
            tracer.forget_originals_since(next_original);
            tracer.weed_dust_bin();

            if tracer.lingering_since(next_deduced) {
                log::error!(target: targets::INCREMENTAL, "A deduction survived the pop of its mark");
                return Err(err::MarkError::LingeringDeduction.into());
            }
            tracer.restore_ids((next_original, next_deduced));
        }

        if self.state != ContextState::Unsatisfiable {
            for literal in self.clause_db.unit_facts().to_vec() {
                if !self.assign(literal, Reason::Fact) {
                    log::info!(target: targets::INCREMENTAL, "Unit facts conflict after a pop");
                    self.state = ContextState::Unsatisfiable;
                    self.derive_refutation()?;
                    break;
                }
            }
        }

        if let Some(scores) = mark.scores {
            for (offset, (score, phase)) in scores.into_iter().enumerate() {
                let index = offset as u32 + 1;
                if self.variable_db.contains(index) {
                    self.variable_db.set_score(index, score);
                    self.variable_db.variable_mut(index).phase = phase;
                }
            }
        }
        self.variable_db.restore_heap();

        log::info!(target: targets::INCREMENTAL, "Mark {} popped", self.marks.len() + 1);
        Ok(())
    }

    /// Resets the context to an empty context, with the same configuration.
    pub fn reset(&mut self) {
        self.clause_db.clear();
        self.variable_db.clear();
        self.watches.clear();
        self.trail.clear();
        if let Some(tracer) = &mut self.tracer {
            tracer.clear();
        }

        self.counters.reset(&self.config);
        self.state = ContextState::Unknown;
        self.conflict = None;
        self.marks.clear();
        self.decision_stack = Default::default();
        self.analysis_buffer = Default::default();

        log::info!(target: targets::INCREMENTAL, "Context reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, reports::Report};

    fn context_with(config: Config, clauses: &[&str]) -> Context {
        let mut the_context = Context::from_config(config);
        for clause in clauses {
            let clause = the_context.clause_from_string(clause).expect("clause");
            assert!(the_context.add_clause(clause).is_ok());
        }
        the_context
    }

    #[test]
    fn inconsistent_mark_untouched() {
        let mut the_context = context_with(Config::default(), &["p q r", "-p q"]);
        the_context.save();
        let clause = the_context.clause_from_string("s").expect("clause");
        assert!(the_context.add_clause(clause).is_ok());

        the_context.marks[0].original_count = 5;
        assert_eq!(
            the_context.pop(),
            Err(err::ErrorKind::Mark(err::MarkError::InconsistentBounds))
        );

        assert_eq!(the_context.mark_count(), 1);
        assert_eq!(the_context.clause_db.original_count(), 1);
        assert_eq!(the_context.variable_db.count(), 4);
        assert_eq!(the_context.trail.len(), 1);
        assert_eq!(the_context.state, ContextState::Unknown);

        the_context.marks[0].original_count = 1;
        if let Some(length) = the_context.marks[0].binary_lengths.last_mut() {
            *length += 3;
        }
        assert_eq!(
            the_context.pop(),
            Err(err::ErrorKind::Mark(err::MarkError::InconsistentBounds))
        );
        assert_eq!(the_context.mark_count(), 1);
        assert_eq!(the_context.watches.binary_clauses().count(), 1);
    }

    #[test]
    fn lingering_deduction() {
        let mut config = Config::default();
        config.proof_tracing.value = true;
        let mut the_context = context_with(config, &["p q"]);
        the_context.save();

        if let Some(tracer) = &mut the_context.tracer {
            let id = tracer.fresh_deduced_id();
            tracer.record_deduction(id, vec![1]);
        }

        assert_eq!(
            the_context.pop(),
            Err(err::ErrorKind::Mark(err::MarkError::LingeringDeduction))
        );
    }

    #[test]
    fn reset_keeps_tracing() {
        let mut config = Config::default();
        config.proof_tracing.value = true;
        let mut the_context = context_with(config, &["p", "-p"]);
        assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
        assert!(the_context.core().is_ok());

        the_context.reset();
        assert_eq!(the_context.variable_db.count(), 0);
        assert!(the_context.trail.is_empty());
        assert_eq!(
            the_context.core(),
            Err(err::ErrorKind::Proof(err::ProofError::NoRefutation))
        );

        let clause = the_context.clause_from_string("q").expect("clause");
        assert!(the_context.add_clause(clause).is_ok());
        assert_eq!(the_context.proof_tracer().map(|t| t.next_ids()), Ok((2, -1)));
        assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
    }
}
