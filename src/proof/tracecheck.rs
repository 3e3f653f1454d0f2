/*!
Writing refutations.

# TraceCheck

The [TraceCheck](https://fmv.jku.at/tracecheck/) format lists clauses, one per line, as:

```text
<id> <literal>* 0 <antecedent id>* 0
```

TraceCheck identifiers are positive, and so the identifiers of a [ProofTracer] are mapped:
- The empty clause is 1.
- The deduced clause *d* is -2*d*.
- The original clause *o* is 2*o* + 1.

Original clauses are written first, in ascending order, followed by deduced clauses in the order derived, and finally the empty clause.
Only clauses used in the refutation are written.

The literals of a deduced clause are not stored, and are rebuilt by resolving the parents of the clause in order.

# Derivations

A plainer listing of the same clauses, keeping the identifiers of the tracer:

```text
<id>: <literal>* <- <parent id>*
```
*/

use std::{
    collections::{BTreeSet, HashMap},
    io::Write,
};

use crate::{
    misc::log::targets::{self},
    types::err::{self},
};

use super::{ClauseId, ProofTracer, EMPTY_CLAUSE_ID};

type ClauseLiterals = BTreeSet<i64>;

/// The TraceCheck identifier of `id`.
pub fn tracecheck_id(id: ClauseId) -> i64 {
    match id {
        EMPTY_CLAUSE_ID => 1,
        deduced if deduced < 0 => -2 * deduced,
        original => 2 * original + 1,
    }
}

/// The resolvent of `left` and `right`, on the first literal of `left` whose negation is in `right`.
///
/// If no such literal exists, the union of the clauses.
fn resolve(left: &ClauseLiterals, right: &ClauseLiterals) -> ClauseLiterals {
    let pivot = left.iter().find(|literal| right.contains(&-**literal)).copied();

    let mut resolvent = left | right;
    if let Some(pivot) = pivot {
        resolvent.remove(&pivot);
        resolvent.remove(&-pivot);
    }
    resolvent
}

impl ProofTracer {
    /// The clauses used in the refutation, in the order to write them.
    fn writing_order(&self) -> Result<Vec<ClauseId>, err::ProofError> {
        let mut used = self.used_ids()?.into_iter().collect::<Vec<_>>();

        // Originals ascending, then deductions descending, i.e. in the order derived.
        used.sort_unstable_by_key(|id| match *id > 0 {
            true => (0, *id),
            false => (1, -*id),
        });
        Ok(used)
    }

    /// The literals of every clause in `order`, rebuilding deduced clauses by resolution.
    fn rebuild_literals(
        &self,
        order: &[ClauseId],
    ) -> Result<HashMap<ClauseId, ClauseLiterals>, err::ProofError> {
        let mut literals: HashMap<ClauseId, ClauseLiterals> = HashMap::default();

        for id in order {
            let clause = match *id > 0 {
                true => match self.originals.get(id) {
                    Some(original) => original.literals.iter().map(|l| l.as_int()).collect(),
                    None => return Err(err::ProofError::UnknownClause),
                },

                false => {
                    let Some(deduction) = self.deductions.get(id) else {
                        return Err(err::ProofError::UnknownClause);
                    };

                    let mut resolvent: Option<ClauseLiterals> = None;
                    for parent in deduction.parents() {
                        let Some(parent_literals) = literals.get(parent) else {
                            log::error!(target: targets::PROOF, "Parent {parent} of {id} written out of order");
                            return Err(err::ProofError::UnknownClause);
                        };

                        resolvent = match resolvent {
                            None => Some(parent_literals.clone()),
                            Some(clause) => Some(resolve(&clause, parent_literals)),
                        };
                    }
                    resolvent.unwrap_or_default()
                }
            };

            literals.insert(*id, clause);
        }

        Ok(literals)
    }

    fn parents_of(&self, id: ClauseId) -> &[ClauseId] {
        match id {
            EMPTY_CLAUSE_ID => self.refutation().unwrap_or_default(),
            _ => self
                .deductions
                .get(&id)
                .map(|deduction| deduction.parents())
                .unwrap_or_default(),
        }
    }

    /// Writes the refutation in the TraceCheck format.
    pub fn write_tracecheck(&self, out: &mut impl Write) -> Result<(), err::ProofError> {
        let order = self.writing_order()?;
        let literals = self.rebuild_literals(&order)?;

        let empty = ClauseLiterals::default();
        for id in order.iter().chain(std::iter::once(&EMPTY_CLAUSE_ID)) {
            let mut line = format!("{}", tracecheck_id(*id));

            for literal in literals.get(id).unwrap_or(&empty) {
                line.push_str(&format!(" {literal}"));
            }
            line.push_str(" 0");

            for parent in self.parents_of(*id) {
                line.push_str(&format!(" {}", tracecheck_id(*parent)));
            }
            line.push_str(" 0");

            writeln!(out, "{line}").map_err(|_| err::ProofError::Write)?;
        }

        Ok(())
    }

    /// Writes each clause used in the refutation, with its parents.
    pub fn write_derivation(&self, out: &mut impl Write) -> Result<(), err::ProofError> {
        let order = self.writing_order()?;
        let literals = self.rebuild_literals(&order)?;

        let empty = ClauseLiterals::default();
        for id in order.iter().chain(std::iter::once(&EMPTY_CLAUSE_ID)) {
            let clause = literals
                .get(id)
                .unwrap_or(&empty)
                .iter()
                .map(|literal| literal.to_string())
                .collect::<Vec<_>>()
                .join(" ");

            let line = match *id > 0 {
                true => format!("{id}: {clause}"),
                false => {
                    let parents = self
                        .parents_of(*id)
                        .iter()
                        .map(|parent| parent.to_string())
                        .collect::<Vec<_>>()
                        .join(" ");
                    format!("{id}: {clause} <- {parents}")
                }
            };

            writeln!(out, "{line}").map_err(|_| err::ProofError::Write)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::literal::Literal;

    #[test]
    fn identifiers() {
        assert_eq!(tracecheck_id(0), 1);
        assert_eq!(tracecheck_id(-1), 2);
        assert_eq!(tracecheck_id(-4), 8);
        assert_eq!(tracecheck_id(1), 3);
        assert_eq!(tracecheck_id(5), 11);
    }

    #[test]
    fn rebuilt_by_resolution() {
        let p = Literal::new(1, true);
        let q = Literal::new(2, true);

        let mut tracer = ProofTracer::default();
        for clause in [vec![p, q], vec![-p, q], vec![-q]] {
            let id = tracer.fresh_original_id();
            tracer.note_original(id, clause, None);
        }

        let deduced = tracer.fresh_deduced_id();
        tracer.record_deduction(deduced, vec![1, 2]);
        tracer.record_refutation(vec![3, deduced]);

        let mut out = Vec::default();
        assert!(tracer.write_tracecheck(&mut out).is_ok());
        let written = String::from_utf8(out).unwrap_or_default();

        let expected = ["3 1 2 0 0", "5 -1 2 0 0", "7 -2 0 0", "2 2 0 3 5 0", "1 0 7 2 0"];
        assert_eq!(written.lines().collect::<Vec<_>>(), expected);
    }
}
