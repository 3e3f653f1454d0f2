/*!
A database of clauses.

The database stores:
- Unit facts, as a list of literals in the order they were added.
  Unit facts are never removed, except by a [pop](crate::procedures::incremental).
- Long original clauses, in a vector, indexed by [ClauseKey::Original].
- Long learnt clauses, in a vector of slots, indexed by [ClauseKey::Learnt].
  A slot freed by a reduction may be reused, and so learnt keys carry a token.

Binary clauses are stored only as [watches](crate::db::watches).

The order in which learnt clauses were added is kept alongside the slots, as marks record a count of learnt clauses and a pop removes every learnt clause added after the mark.
*/

pub mod db_clause;

use db_clause::{DbClause, LearntDetails};

use crate::{
    db::keys::{ClauseKey, FormulaIndex, FormulaToken},
    misc::log::targets::{self},
    proof::ClauseId,
    structures::literal::Literal,
    types::err::{self},
};

/// The clause database.
#[derive(Default)]
pub struct ClauseDB {
    unit_facts: Vec<Literal>,
    original: Vec<DbClause>,
    learnt: Vec<Option<DbClause>>,
    free_learnt_slots: Vec<FormulaIndex>,
    retired_tokens: Vec<FormulaToken>,
    learnt_order: Vec<ClauseKey>,
}

impl ClauseDB {
    /// The clause stored with `key`.
    pub fn get(&self, key: ClauseKey) -> Result<&DbClause, err::ClauseDBError> {
        let clause = match key {
            ClauseKey::Original(index) => self.original.get(index as usize),
            ClauseKey::Learnt(index, _) => match self.learnt.get(index as usize) {
                Some(slot) => slot.as_ref(),
                None => None,
            },
        };

        match clause {
            Some(clause) if clause.key() == key => Ok(clause),
            Some(_) => Err(err::ClauseDBError::InvalidKeyToken),
            None => Err(err::ClauseDBError::Missing),
        }
    }

    /// The mutable clause stored with `key`.
    pub fn get_mut(&mut self, key: ClauseKey) -> Result<&mut DbClause, err::ClauseDBError> {
        let clause = match key {
            ClauseKey::Original(index) => self.original.get_mut(index as usize),
            ClauseKey::Learnt(index, _) => match self.learnt.get_mut(index as usize) {
                Some(slot) => slot.as_mut(),
                None => None,
            },
        };

        match clause {
            Some(clause) if clause.key() == key => Ok(clause),
            Some(_) => Err(err::ClauseDBError::InvalidKeyToken),
            None => Err(err::ClauseDBError::Missing),
        }
    }

    /// Records `literal` as a unit fact.
    pub fn store_unit(&mut self, literal: Literal) {
        self.unit_facts.push(literal);
    }

    /// The unit facts, in the order added.
    pub fn unit_facts(&self) -> &[Literal] {
        &self.unit_facts
    }

    /// Stores a long original clause.
    pub fn store_original(
        &mut self,
        literals: Vec<Literal>,
        id: ClauseId,
    ) -> Result<ClauseKey, err::ClauseDBError> {
        let index = match FormulaIndex::try_from(self.original.len()) {
            Ok(index) => index,
            Err(_) => return Err(err::ClauseDBError::StorageExhausted),
        };

        let key = ClauseKey::Original(index);
        self.original.push(DbClause::new(key, literals, id, None));

        log::trace!(target: targets::CLAUSE_DB, "Stored original clause {key}");
        Ok(key)
    }

    /// Stores a long learnt clause with the given activity.
    ///
    /// A free slot is reused, if one exists.
    pub fn store_learnt(
        &mut self,
        literals: Vec<Literal>,
        activity: u32,
        id: ClauseId,
    ) -> Result<ClauseKey, err::ClauseDBError> {
        let details = Some(LearntDetails {
            activity,
            references: 0,
        });

        let key = match self.free_learnt_slots.pop() {
            Some(index) => {
                let key = ClauseKey::Learnt(index, self.retired_tokens[index as usize]).retoken()?;
                self.learnt[index as usize] = Some(DbClause::new(key, literals, id, details));
                key
            }

            None => {
                let index = match FormulaIndex::try_from(self.learnt.len()) {
                    Ok(index) => index,
                    Err(_) => return Err(err::ClauseDBError::StorageExhausted),
                };
                let key = ClauseKey::Learnt(index, 0);
                self.learnt.push(Some(DbClause::new(key, literals, id, details)));
                self.retired_tokens.push(0);
                key
            }
        };

        self.learnt_order.push(key);
        log::trace!(target: targets::CLAUSE_DB, "Stored learnt clause {key}");
        Ok(key)
    }

    /// Removes the learnt clause stored with `key`, freeing its slot.
    ///
    /// The order of learnt clauses is not updated, see [retain_learnt_order](ClauseDB::retain_learnt_order).
    pub fn remove_learnt(&mut self, key: ClauseKey) -> Result<DbClause, err::ClauseDBError> {
        self.get(key)?;

        let index = key.index();
        let removed = match self.learnt[index].take() {
            Some(clause) => clause,
            None => return Err(err::ClauseDBError::Missing),
        };

        if let ClauseKey::Learnt(_, token) = key {
            self.retired_tokens[index] = token;
        }
        self.free_learnt_slots.push(index as FormulaIndex);

        Ok(removed)
    }

    /// Keeps only those learnt keys in the order of learnt clauses for which `f` holds.
    pub fn retain_learnt_order(&mut self, f: impl FnMut(&ClauseKey) -> bool) {
        self.learnt_order.retain(f);
    }

    /// The keys of learnt clauses, in the order the clauses were added.
    pub fn learnt_keys(&self) -> &[ClauseKey] {
        &self.learnt_order
    }

    /// A count of long learnt clauses.
    pub fn learnt_count(&self) -> usize {
        self.learnt_order.len()
    }

    /// A count of long original clauses.
    pub fn original_count(&self) -> usize {
        self.original.len()
    }

    /// The long original clauses.
    pub fn original_clauses(&self) -> impl Iterator<Item = &DbClause> {
        self.original.iter()
    }

    /// The long learnt clauses, in the order added.
    pub fn learnt_clauses(&self) -> impl Iterator<Item = &DbClause> {
        self.learnt_order.iter().filter_map(|key| self.get(*key).ok())
    }

    /// Notes the clause stored with `key` is the reason for some value, if the clause is learnt.
    pub fn reference(&mut self, key: ClauseKey) {
        if let Ok(clause) = self.get_mut(key) {
            if let Some(details) = clause.learnt_details_mut() {
                details.references += 1;
            }
        }
    }

    /// Notes the clause stored with `key` is no longer the reason for some value, if the clause is learnt.
    pub fn dereference(&mut self, key: ClauseKey) {
        if let Ok(clause) = self.get_mut(key) {
            if let Some(details) = clause.learnt_details_mut() {
                details.references = details.references.saturating_sub(1);
            }
        }
    }

    /// Removes every original clause at or after `bound` in the order of addition, returning the removed clauses.
    pub(crate) fn truncate_original(&mut self, bound: usize) -> Vec<DbClause> {
        match bound < self.original.len() {
            true => self.original.split_off(bound),
            false => Vec::default(),
        }
    }

    /// Removes every learnt clause at or after `bound` in the order of addition, returning the removed clauses.
    pub(crate) fn truncate_learnt(&mut self, bound: usize) -> Result<Vec<DbClause>, err::ClauseDBError> {
        if bound >= self.learnt_order.len() {
            return Ok(Vec::default());
        }

        let removed_keys = self.learnt_order.split_off(bound);
        let mut removed = Vec::with_capacity(removed_keys.len());
        for key in removed_keys {
            removed.push(self.remove_learnt(key)?);
        }
        Ok(removed)
    }

    /// Removes every unit fact at or after `bound`, returning the removed facts.
    pub(crate) fn truncate_units(&mut self, bound: usize) -> Vec<Literal> {
        match bound < self.unit_facts.len() {
            true => self.unit_facts.split_off(bound),
            false => Vec::default(),
        }
    }

    /// Removes every clause.
    pub(crate) fn clear(&mut self) {
        *self = ClauseDB::default();
    }
}
