/*!
Watch lists, indexed by literal.

For each literal *l* two lists are kept:
- A binary list, of literals implied when *l* becomes true.
  That is, if *l'* is on the binary list of *l* then the formula contains the binary clause -*l* ∨ *l'*.
- A long list, of keys to clauses which watch -*l*.
  When *l* becomes true the watch must be moved, or the clause is asserting or in conflict.

Binary clauses are never watched in long lists, and long clauses never occur in binary lists.

The lists for literals zero and one belong to the reserved variable, and stay empty.
*/

use crate::{
    db::keys::ClauseKey,
    generic::stack::Stack,
    structures::literal::{Literal, VariableIndex},
};

/// The watch lists of a context.
pub struct Watches {
    binary: Vec<Vec<Literal>>,
    long: Vec<Vec<ClauseKey>>,
}

impl Default for Watches {
    fn default() -> Self {
        Watches {
            binary: vec![Vec::default(), Vec::default()],
            long: vec![Vec::default(), Vec::default()],
        }
    }
}

impl Watches {
    /// Extends the lists to cover both literals of a fresh variable.
    pub fn fresh_variable(&mut self, variable: VariableIndex) {
        let required = 2 * (variable as usize + 1);
        self.binary.resize_with(required, Vec::default);
        self.long.resize_with(required, Vec::default);
    }

    /// A count of the lists of each kind.
    pub fn list_count(&self) -> usize {
        self.long.len()
    }

    /// The literals implied by `literal`.
    pub fn binary(&self, literal: Literal) -> &[Literal] {
        &self.binary[literal.index()]
    }

    /// Watches the binary clause `a` ∨ `b`.
    pub fn watch_binary(&mut self, a: Literal, b: Literal) {
        self.binary[a.negate().index()].push(b);
        self.binary[b.negate().index()].push(a);
    }

    /// Every binary clause, once, with the smaller literal first.
    pub fn binary_clauses(&self) -> impl Iterator<Item = [Literal; 2]> + '_ {
        self.binary
            .iter()
            .enumerate()
            .flat_map(|(index, implied)| {
                let antecedent = Literal::new((index >> 1) as VariableIndex, index & 1 == 1);
                implied.iter().map(move |l| [antecedent.negate(), *l])
            })
            .filter(|[a, b]| a < b)
    }

    /// Adds `key` to the long list of the negation of `watched`.
    pub fn watch_long(&mut self, watched: Literal, key: ClauseKey) {
        self.long[watched.negate().index()].push(key);
    }

    /// Removes `key` from the long list of the negation of `watched`, if present.
    pub fn unwatch_long(&mut self, watched: Literal, key: ClauseKey) -> bool {
        self.long[watched.negate().index()].remove_item(&key)
    }

    /// Takes the long list of `literal`, leaving an empty list until the list is restored.
    /// To be used in conjunction with [restore_long](Watches::restore_long).
    pub fn take_long(&mut self, literal: Literal) -> Vec<ClauseKey> {
        std::mem::take(&mut self.long[literal.index()])
    }

    /// Restores the long list of `literal`, keeping any keys added while the list was taken.
    pub fn restore_long(&mut self, literal: Literal, mut list: Vec<ClauseKey>) {
        let added = std::mem::take(&mut self.long[literal.index()]);
        list.extend(added);
        self.long[literal.index()] = list;
    }

    /// The lengths of every binary list.
    pub fn binary_lengths(&self) -> Vec<usize> {
        self.binary.iter().map(|list| list.len()).collect()
    }

    /// The binary clauses watched past the given lengths.
    ///
    /// Lists without a length in `binary_lengths` are taken in full.
    /// As each binary clause is watched twice, a clause may be returned twice.
    pub fn binary_watches_beyond(&self, binary_lengths: &[usize]) -> Vec<[Literal; 2]> {
        let mut beyond = Vec::default();
        for (index, implied) in self.binary.iter().enumerate() {
            let bound = binary_lengths.get(index).copied().unwrap_or(0);
            let antecedent = Literal::new((index >> 1) as VariableIndex, index & 1 == 1);
            for literal in implied.iter().skip(bound) {
                beyond.push([antecedent.negate(), *literal]);
            }
        }
        beyond
    }

    /// Shrinks the lists to `list_count`, and each remaining binary list to the matching length in `binary_lengths`.
    pub fn truncate(&mut self, list_count: usize, binary_lengths: &[usize]) {
        self.binary.shrink_to_bound(list_count);
        self.long.shrink_to_bound(list_count);

        for (list, bound) in self.binary.iter_mut().zip(binary_lengths) {
            list.shrink_to_bound(*bound);
        }
    }

    /// Removes every list, keeping only the lists of the reserved variable.
    pub fn clear(&mut self) {
        *self = Watches::default();
    }
}
