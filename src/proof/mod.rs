/*!
Tracing of derivations, for unsatisfiable cores and refutations.

When the `proof_tracing` option of a [Config](crate::config::Config) is set, a context keeps a [ProofTracer].
The tracer gives every clause an identifier, and records the parents of every deduced clause.

# Identifiers

- Original clauses are identified by 1, 2, 3, ... in the order added.
- Deduced clauses are identified by -1, -2, -3, ... in the order derived.
- The empty clause is identified by 0.

Identifiers are not reused, with the exception of identifiers issued after a mark which has been popped.

Long clauses carry their identifier in the [clause database](crate::db::clause).
Unit and binary clauses are not stored as database clauses, and so the tracer maps their literals to identifiers.
A unit or binary clause is attached at most once while tracing, so the map is a function.

# Deductions

The parents of a deduced clause are listed in order of resolution:
The clause in conflict first, then the reason for each literal resolved on, in reverse order of the trail.
So, the literals of a deduced clause may be rebuilt by a chain of resolutions on the parents, as is done when [writing a TraceCheck proof](ProofTracer::write_tracecheck).

Each deduction counts the derivations it is a parent of.
When a deduced clause is removed from the clause database the deduction is forgotten if the count is zero.
Otherwise the deduction is marked dirty and placed in a dust bin, and forgotten once the count falls to zero.

# Example

```rust
# use prover_sat::{config::Config, context::Context, reports::Report};
let mut config = Config::default();
config.proof_tracing.value = true;
let mut the_context = Context::from_config(config);

for clause in ["p q", "-p q", "p -q", "-p -q", "r s"] {
    let clause = the_context.clause_from_string(clause).unwrap();
    assert!(the_context.add_clause(clause).is_ok());
}

assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
assert_eq!(the_context.core(), Ok(vec![1, 2, 3, 4]));
```
*/

mod deduction;
pub use deduction::Deduction;

pub mod tracecheck;

use std::{
    cmp::Reverse,
    collections::{HashMap, HashSet},
};

use crate::{
    context::Context,
    generic::index_heap::IndexHeap,
    misc::log::targets::{self},
    structures::{literal::Literal, reason::Reason},
    types::err::{self},
};

/// The identifier of a clause.
pub type ClauseId = i64;

/// The identifier of the empty clause.
pub const EMPTY_CLAUSE_ID: ClauseId = 0;

/// An original clause, as added to a context.
#[derive(Clone, Debug)]
pub struct OriginalClause {
    pub literals: Vec<Literal>,
    pub name: Option<String>,
}

/// Identifiers, derivations, and the refutation of a context.
pub struct ProofTracer {
    next_original: ClauseId,
    next_deduced: ClauseId,

    unit_ids: HashMap<Literal, ClauseId>,
    binary_ids: HashMap<(Literal, Literal), ClauseId>,

    originals: HashMap<ClauseId, OriginalClause>,
    deductions: HashMap<ClauseId, Deduction>,

    /// Dirty deductions, indexed by the negation of their identifier and valued by their reference count.
    dust_bin: IndexHeap<Reverse<u64>>,

    refutation: Option<Vec<ClauseId>>,
}

impl Default for ProofTracer {
    fn default() -> Self {
        ProofTracer {
            next_original: 1,
            next_deduced: -1,

            unit_ids: HashMap::default(),
            binary_ids: HashMap::default(),

            originals: HashMap::default(),
            deductions: HashMap::default(),

            dust_bin: IndexHeap::default(),

            refutation: None,
        }
    }
}

fn binary_pair(a: Literal, b: Literal) -> (Literal, Literal) {
    match a < b {
        true => (a, b),
        false => (b, a),
    }
}

impl ProofTracer {
    pub fn fresh_original_id(&mut self) -> ClauseId {
        let id = self.next_original;
        self.next_original += 1;
        id
    }

    pub fn fresh_deduced_id(&mut self) -> ClauseId {
        let id = self.next_deduced;
        self.next_deduced -= 1;
        id
    }

    /// The next original and deduced identifiers.
    pub fn next_ids(&self) -> (ClauseId, ClauseId) {
        (self.next_original, self.next_deduced)
    }

    pub(crate) fn restore_ids(&mut self, (next_original, next_deduced): (ClauseId, ClauseId)) {
        self.next_original = next_original;
        self.next_deduced = next_deduced;
    }

    /// Records the literals and name of the original clause identified by `id`.
    pub fn note_original(&mut self, id: ClauseId, literals: Vec<Literal>, name: Option<String>) {
        self.originals.insert(id, OriginalClause { literals, name });
    }

    pub fn forget_original(&mut self, id: ClauseId) {
        self.originals.remove(&id);
    }

    /// Forgets every original clause identified at or beyond `next_original`.
    pub fn forget_originals_since(&mut self, next_original: ClauseId) {
        self.originals.retain(|id, _| *id < next_original);
    }

    /// The original clause identified by `id`, if known.
    pub fn original(&self, id: ClauseId) -> Option<&OriginalClause> {
        self.originals.get(&id)
    }

    /// The deduction identified by `id`, if known.
    pub fn deduction(&self, id: ClauseId) -> Option<&Deduction> {
        self.deductions.get(&id)
    }

    /// The identifier of the unit clause `literal`, if attached.
    pub fn unit_id(&self, literal: Literal) -> Option<ClauseId> {
        self.unit_ids.get(&literal).copied()
    }

    pub fn note_unit(&mut self, literal: Literal, id: ClauseId) {
        self.unit_ids.insert(literal, id);
    }

    /// Forgets the unit clause `literal`, together with its original clause or deduction.
    pub fn forget_unit(&mut self, literal: Literal) {
        if let Some(id) = self.unit_ids.remove(&literal) {
            self.forget_id(id);
        }
    }

    /// The identifier of the binary clause `a` ∨ `b`, if attached.
    pub fn binary_id(&self, a: Literal, b: Literal) -> Option<ClauseId> {
        self.binary_ids.get(&binary_pair(a, b)).copied()
    }

    pub fn note_binary(&mut self, a: Literal, b: Literal, id: ClauseId) {
        self.binary_ids.insert(binary_pair(a, b), id);
    }

    /// Forgets the binary clause `a` ∨ `b`, together with its original clause or deduction.
    ///
    /// Forgetting a clause which is not attached does nothing.
    pub fn forget_binary(&mut self, a: Literal, b: Literal) {
        if let Some(id) = self.binary_ids.remove(&binary_pair(a, b)) {
            self.forget_id(id);
        }
    }

    fn forget_id(&mut self, id: ClauseId) {
        match id < 0 {
            true => self.delete_deduction(id),
            false => self.forget_original(id),
        }
    }

    /// Records the derivation of the clause identified by `id` from `parents`.
    pub fn record_deduction(&mut self, id: ClauseId, parents: Vec<ClauseId>) {
        for parent in &parents {
            if let Some(deduction) = self.deductions.get_mut(parent) {
                deduction.references += 1;
            }
        }

        log::trace!(target: targets::PROOF, "{id} <- {parents:?}");
        self.deductions.insert(id, Deduction::new(parents));
    }

    /// Deletes the deduction identified by `id`, or moves the deduction to the dust bin if some derivation depends on it.
    pub fn delete_deduction(&mut self, id: ClauseId) {
        let Some(deduction) = self.deductions.get_mut(&id) else {
            return;
        };

        if deduction.dirty {
            return;
        }

        match deduction.is_deletable() {
            true => {
                if let Some(deduction) = self.deductions.remove(&id) {
                    for parent in deduction.parents {
                        self.dereference(parent);
                    }
                }
            }

            false => {
                deduction.dirty = true;
                let references = deduction.references;
                let index = id.unsigned_abs() as usize;
                self.dust_bin.add(index, Reverse(references));
                self.dust_bin.activate(index);
            }
        }
    }

    fn dereference(&mut self, id: ClauseId) {
        if let Some(deduction) = self.deductions.get_mut(&id) {
            deduction.references = deduction.references.saturating_sub(1);

            if deduction.dirty {
                let index = id.unsigned_abs() as usize;
                self.dust_bin.revalue(index, Reverse(deduction.references));
                self.dust_bin.heapify_if_active(index);
            }
        }
    }

    /// Forgets every dirty deduction without references, returning a count of the deductions forgotten.
    pub fn weed_dust_bin(&mut self) -> usize {
        let mut weeded = 0;

        while let Some(index) = self.dust_bin.peek_max() {
            if *self.dust_bin.value_at(index) != Reverse(0) {
                break;
            }
            self.dust_bin.pop_max();

            let id = -(index as ClauseId);
            if let Some(deduction) = self.deductions.remove(&id) {
                weeded += 1;
                for parent in deduction.parents {
                    self.dereference(parent);
                }
            }
        }

        if weeded > 0 {
            log::trace!(target: targets::PROOF, "Weeded {weeded} deductions");
        }
        weeded
    }

    /// Records the derivation of the empty clause from `parents`.
    pub fn record_refutation(&mut self, parents: Vec<ClauseId>) {
        for parent in &parents {
            if let Some(deduction) = self.deductions.get_mut(parent) {
                deduction.references += 1;
            }
        }

        log::info!(target: targets::PROOF, "Refutation from {} clauses", parents.len());
        self.refutation = Some(parents);
    }

    /// Forgets the derivation of the empty clause, if one was recorded.
    pub fn clear_refutation(&mut self) {
        if let Some(parents) = self.refutation.take() {
            for parent in parents {
                self.dereference(parent);
            }
        }
    }

    pub fn has_refutation(&self) -> bool {
        self.refutation.is_some()
    }

    /// The parents of the empty clause, if derived.
    pub fn refutation(&self) -> Option<&[ClauseId]> {
        self.refutation.as_deref()
    }

    /// True if some deduction identified at or beyond `next_deduced` is known.
    pub fn lingering_since(&self, next_deduced: ClauseId) -> bool {
        self.deductions.keys().any(|id| *id <= next_deduced)
    }

    /// A count of known deductions.
    pub fn deduction_count(&self) -> usize {
        self.deductions.len()
    }

    /// Every clause used in the refutation, as identifiers.
    fn used_ids(&self) -> Result<HashSet<ClauseId>, err::ProofError> {
        let Some(refutation) = &self.refutation else {
            return Err(err::ProofError::NoRefutation);
        };

        let mut used = HashSet::default();
        let mut queue = refutation.clone();

        while let Some(id) = queue.pop() {
            if !used.insert(id) {
                continue;
            }

            if id < 0 {
                match self.deductions.get(&id) {
                    Some(deduction) => queue.extend(deduction.parents()),
                    None => {
                        log::error!(target: targets::PROOF, "Missing deduction {id}");
                        return Err(err::ProofError::UnknownClause);
                    }
                }
            } else if !self.originals.contains_key(&id) {
                log::error!(target: targets::PROOF, "Missing original clause {id}");
                return Err(err::ProofError::UnknownClause);
            }
        }

        Ok(used)
    }

    /// The identifiers of original clauses used in the refutation, in ascending order.
    pub fn core(&self) -> Result<Vec<ClauseId>, err::ProofError> {
        let mut core = self
            .used_ids()?
            .into_iter()
            .filter(|id| *id > 0)
            .collect::<Vec<_>>();
        core.sort_unstable();
        Ok(core)
    }

    /// The literals of each clause in the [core](ProofTracer::core).
    pub fn core_clauses(&self) -> Result<Vec<Vec<Literal>>, err::ProofError> {
        let mut clauses = Vec::default();
        for id in self.core()? {
            match self.originals.get(&id) {
                Some(original) => clauses.push(original.literals.clone()),
                None => return Err(err::ProofError::UnknownClause),
            }
        }
        Ok(clauses)
    }

    /// The names given to clauses in the [core](ProofTracer::core), skipping clauses without a name.
    pub fn core_tags(&self) -> Result<Vec<String>, err::ProofError> {
        let core = self.core()?;
        Ok(core
            .iter()
            .filter_map(|id| self.originals.get(id).and_then(|original| original.name.clone()))
            .collect())
    }

    /// Forgets everything.
    pub(crate) fn clear(&mut self) {
        *self = ProofTracer::default();
    }
}

impl Context {
    /// The proof tracer of the context, or an error if proofs are not traced.
    pub fn proof_tracer(&self) -> Result<&ProofTracer, err::ProofError> {
        self.tracer.as_ref().ok_or(err::ProofError::Disabled)
    }

    /// See [ProofTracer::core].
    pub fn core(&self) -> Result<Vec<ClauseId>, err::ErrorKind> {
        Ok(self.proof_tracer()?.core()?)
    }

    /// See [ProofTracer::core_clauses].
    pub fn core_clauses(&self) -> Result<Vec<Vec<Literal>>, err::ErrorKind> {
        Ok(self.proof_tracer()?.core_clauses()?)
    }

    /// See [ProofTracer::core_tags].
    pub fn core_tags(&self) -> Result<Vec<String>, err::ErrorKind> {
        Ok(self.proof_tracer()?.core_tags()?)
    }

    /// Writes a refutation in the TraceCheck format, see [tracecheck].
    pub fn write_tracecheck(&self, out: &mut impl std::io::Write) -> Result<(), err::ErrorKind> {
        Ok(self.proof_tracer()?.write_tracecheck(out)?)
    }

    /// Writes each clause used in the refutation, with its parents, see [tracecheck].
    pub fn write_derivation(&self, out: &mut impl std::io::Write) -> Result<(), err::ErrorKind> {
        Ok(self.proof_tracer()?.write_derivation(out)?)
    }

    /// The identifier of the clause given as the reason for `literal`.
    fn reason_id(
        &self,
        tracer: &ProofTracer,
        literal: Literal,
        reason: Reason,
    ) -> Result<ClauseId, err::ErrorKind> {
        let id = match reason {
            Reason::Decision => {
                log::error!(target: targets::PROOF, "A decision has no clause");
                return Err(err::ProofError::UnknownClause.into());
            }

            Reason::Fact => tracer.unit_id(literal),

            Reason::Binary(other) => tracer.binary_id(literal, other),

            Reason::Clause(key) => Some(self.clause_db.get(key)?.id()),
        };

        match id {
            Some(id) => Ok(id),
            None => {
                log::error!(target: targets::PROOF, "No clause for {literal} from {reason}");
                Err(err::ProofError::UnknownClause.into())
            }
        }
    }

    /// Derives the empty clause from the recorded conflict and the trail, if proofs are traced.
    ///
    /// The conflict must be at level zero.
    pub(crate) fn derive_refutation(&mut self) -> Result<(), err::ErrorKind> {
        let Some(tracer) = &self.tracer else {
            return Ok(());
        };

        let Some(conflict) = self.conflict else {
            log::error!(target: targets::PROOF, "Refutation without a conflict");
            return Err(err::AnalysisError::NoConflict.into());
        };

        let mut seen = vec![false; self.variable_db.bound()];
        let mut parents = vec![self.reason_id(tracer, conflict.literal, conflict.reason)?];

        seen[conflict.literal.variable() as usize] = true;
        match conflict.reason {
            Reason::Binary(other) => seen[other.variable() as usize] = true,
            Reason::Clause(key) => {
                for literal in self.clause_db.get(key)?.literals() {
                    seen[literal.variable() as usize] = true;
                }
            }
            Reason::Decision | Reason::Fact => {}
        }

        for literal in self.trail.literals.iter().rev() {
            let variable = literal.variable();
            if !seen[variable as usize] {
                continue;
            }

            let reason = self.variable_db.reason_of(variable);
            parents.push(self.reason_id(tracer, *literal, reason)?);

            match reason {
                Reason::Binary(other) => seen[other.variable() as usize] = true,
                Reason::Clause(key) => {
                    for other in &self.clause_db.get(key)?.literals()[1..] {
                        seen[other.variable() as usize] = true;
                    }
                }
                Reason::Decision | Reason::Fact => {}
            }
        }

        if let Some(tracer) = &mut self.tracer {
            tracer.record_refutation(parents);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dust_bin_release() {
        let mut tracer = ProofTracer::default();

        let a = tracer.fresh_original_id();
        let b = tracer.fresh_original_id();
        let first = tracer.fresh_deduced_id();
        let second = tracer.fresh_deduced_id();

        tracer.record_deduction(first, vec![a, b]);
        tracer.record_deduction(second, vec![first, b]);
        assert_eq!(tracer.deduction(first).map(|d| d.references()), Some(1));

        // The first deduction is a parent, so is kept as dirty.
        tracer.delete_deduction(first);
        assert!(tracer.deduction(first).is_some_and(|d| d.is_dirty()));
        assert_eq!(tracer.weed_dust_bin(), 0);

        tracer.delete_deduction(second);
        assert!(tracer.deduction(second).is_none());
        assert_eq!(tracer.weed_dust_bin(), 1);
        assert_eq!(tracer.deduction_count(), 0);
    }

    #[test]
    fn refutation_holds_references() {
        let mut tracer = ProofTracer::default();
        let a = tracer.fresh_original_id();
        tracer.note_original(a, vec![], Some("empty".to_string()));

        let deduced = tracer.fresh_deduced_id();
        tracer.record_deduction(deduced, vec![a]);
        tracer.record_refutation(vec![deduced]);

        tracer.delete_deduction(deduced);
        assert_eq!(tracer.core(), Ok(vec![a]));
        assert_eq!(tracer.core_tags(), Ok(vec!["empty".to_string()]));

        tracer.clear_refutation();
        assert_eq!(tracer.weed_dust_bin(), 1);
        assert_eq!(tracer.core(), Err(err::ProofError::NoRefutation));
    }

    #[test]
    fn lingering() {
        let mut tracer = ProofTracer::default();
        let (_, next_deduced) = tracer.next_ids();
        assert!(!tracer.lingering_since(next_deduced));

        let id = tracer.fresh_deduced_id();
        tracer.record_deduction(id, vec![]);
        assert!(tracer.lingering_since(next_deduced));

        tracer.delete_deduction(id);
        assert!(!tracer.lingering_since(next_deduced));
    }
}
