use super::ClauseId;

/// The derivation of a deduced clause.
#[derive(Clone, Debug, Default)]
pub struct Deduction {
    /// The clauses resolved to derive the clause, in order of resolution.
    pub(super) parents: Vec<ClauseId>,

    /// A count of derivations in which the clause is a parent.
    pub(super) references: u64,

    /// Set when the clause has been removed while referenced.
    pub(super) dirty: bool,
}

impl Deduction {
    pub fn new(parents: Vec<ClauseId>) -> Self {
        Deduction {
            parents,
            references: 0,
            dirty: false,
        }
    }

    /// The clauses resolved to derive the clause.
    pub fn parents(&self) -> &[ClauseId] {
        &self.parents
    }

    /// A count of derivations in which the clause is a parent.
    pub fn references(&self) -> u64 {
        self.references
    }

    /// True if the clause may be forgotten, as no derivation depends on it.
    pub fn is_deletable(&self) -> bool {
        self.references == 0
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
