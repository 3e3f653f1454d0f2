/*!
Reduction of the learnt clause database.

A reduction deletes up to half of the long learnt clauses, chosen by [activity](crate::config::ClauseActivity):
- With MiniSAT activity, the clauses with the lowest activity are deleted first.
- With Glucose activity (literal block distance), the clauses with the highest activity are deleted first, and no clause with an activity of two or less is deleted.

A clause which is the reason for some value is *locked*, and is never deleted.

Each deleted clause is unwatched and removed from the clause database, and when proofs are traced its deduction is [deleted](crate::proof::ProofTracer::delete_deduction).

The order of learnt clauses is compacted to the survivors.
As marks record a count of learnt clauses, each mark is adjusted to the count of survivors among the clauses it recorded.
*/

use std::collections::HashSet;

use crate::{
    config::ClauseActivity,
    context::Context,
    db::keys::ClauseKey,
    misc::log::targets::{self},
    types::err::{self},
};

impl Context {
    /// Reduces the learnt clause database, returning a count of deleted clauses.
    ///
    /// For documentation, see [procedures::reduction](crate::procedures::reduction).
    pub fn reduce_learnt(&mut self) -> Result<usize, err::ErrorKind> {
        let mut candidates = self
            .clause_db
            .learnt_clauses()
            .map(|clause| (clause.activity(), clause.key()))
            .collect::<Vec<_>>();

        // Stable, so ties keep the order of addition.
        candidates.sort_by_key(|(activity, _)| *activity);

        let limit = candidates.len() / 2;
        let ordered: Box<dyn Iterator<Item = &(u32, ClauseKey)>> =
            match self.config.clause_activity.value {
                ClauseActivity::MiniSAT => Box::new(candidates.iter()),
                ClauseActivity::Glucose => {
                    Box::new(candidates.iter().rev().filter(|(activity, _)| *activity > 2))
                }
            };

        let mut deleted: HashSet<ClauseKey> = HashSet::default();

        for (_, key) in ordered {
            if deleted.len() >= limit {
                break;
            }

            let clause = self.clause_db.get(*key)?;
            if clause.is_locked() {
                continue;
            }

            let (first, second) = (clause.literals()[0], clause.literals()[1]);
            self.watches.unwatch_long(first, *key);
            self.watches.unwatch_long(second, *key);

            let removed = self.clause_db.remove_learnt(*key)?;
            if let Some(tracer) = &mut self.tracer {
                tracer.delete_deduction(removed.id());
            }

            deleted.insert(*key);
        }

        if let Some(tracer) = &mut self.tracer {
            tracer.weed_dust_bin();
        }

        for mark in &mut self.marks {
            let removed_before = self
                .clause_db
                .learnt_keys()
                .iter()
                .take(mark.learnt_count)
                .filter(|key| deleted.contains(key))
                .count();
            mark.learnt_count -= removed_before;
        }
        self.clause_db.retain_learnt_order(|key| !deleted.contains(key));

        self.counters.reductions += 1;
        self.counters.deleted_clauses += deleted.len();

        log::info!(target: targets::REDUCTION, "Reduction {} deleted {} of {} learnt clauses", self.counters.reductions, deleted.len(), candidates.len());
        Ok(deleted.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::{ClauseActivity, Config},
        context::Context,
        procedures::analysis::Analysis,
        structures::literal::Literal,
    };

    fn context_with_learnt(activity: ClauseActivity, activities: &[u32]) -> Context {
        let mut config = Config::default();
        config.clause_activity.value = activity;
        let mut the_context = Context::from_config(config);

        let variables = (0..3 * activities.len())
            .map(|_| the_context.fresh_variable(None).expect("fresh variable"))
            .collect::<Vec<_>>();

        for (offset, activity) in activities.iter().enumerate() {
            let literals = variables[3 * offset..3 * offset + 3]
                .iter()
                .map(|variable| Literal::new(*variable, true))
                .collect();

            let analysis = Analysis {
                literals,
                backjump_level: 0,
                activity: *activity,
                premises: vec![],
            };
            assert!(the_context.store_learnt(analysis).is_ok());
        }

        the_context
    }

    #[test]
    fn minisat_deletes_least_active() {
        let mut the_context = context_with_learnt(ClauseActivity::MiniSAT, &[5, 1, 4, 2]);
        assert_eq!(the_context.reduce_learnt(), Ok(2));

        let remaining = the_context
            .clause_db
            .learnt_clauses()
            .map(|clause| clause.activity())
            .collect::<Vec<_>>();
        assert_eq!(remaining, vec![5, 4]);
    }

    #[test]
    fn glucose_keeps_glue() {
        let mut the_context = context_with_learnt(ClauseActivity::Glucose, &[2, 7, 1, 3, 2, 9]);
        assert_eq!(the_context.reduce_learnt(), Ok(3));

        let remaining = the_context
            .clause_db
            .learnt_clauses()
            .map(|clause| clause.activity())
            .collect::<Vec<_>>();
        assert_eq!(remaining, vec![2, 1, 2]);
    }

    #[test]
    fn marks_follow_compaction() {
        let mut the_context = context_with_learnt(ClauseActivity::MiniSAT, &[1, 9]);
        the_context.save();
        the_context.marks[0].learnt_count = 2;

        assert_eq!(the_context.reduce_learnt(), Ok(1));
        assert_eq!(the_context.marks[0].learnt_count, 1);
        assert_eq!(the_context.clause_db.learnt_count(), 1);
    }
}
