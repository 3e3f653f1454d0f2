use crate::{
    misc::log::targets::{self},
    types::err::{self},
};

/// The index to a formula.
pub type FormulaIndex = u32;

/// The token of a formula index, used to distinguish re-use of the same [FormulaIndex].
pub type FormulaToken = u16;

/// A key to access a long clause stored in the clause database.
///
/// Within the clause database clauses are stored in some indexed structure (e.g. a vector) and keys contain the index to the clause together with a token to distinguish reuse of the same index, where relevant.
///
/// Unit and binary clauses are not stored in the clause database, and so have no key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClauseKey {
    /// The key to an original clause.
    Original(FormulaIndex),

    /// The key to a learnt clause.
    Learnt(FormulaIndex, FormulaToken),
}

impl ClauseKey {
    /// Extracts the index from a key.
    pub fn index(&self) -> usize {
        match self {
            Self::Original(i) => *i as usize,
            Self::Learnt(i, _) => *i as usize,
        }
    }

    /// Retokens a learnt key to distnguish multiple uses of the same index.
    ///
    /// Returns an error if used on an original key, or if the token limit has been reached.
    pub fn retoken(&self) -> Result<Self, err::ClauseDBError> {
        match self {
            Self::Original(_) => {
                log::error!(target: targets::CLAUSE_DB, "Original keys have a unique token");
                Err(err::ClauseDBError::InvalidKeyToken)
            }

            Self::Learnt(index, token) => {
                if *token == FormulaToken::MAX {
                    return Err(err::ClauseDBError::StorageExhausted);
                }
                Ok(ClauseKey::Learnt(*index, token + 1))
            }
        }
    }
}

impl std::fmt::Display for ClauseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Original(index) => write!(f, "Original({index})"),
            Self::Learnt(index, token) => write!(f, "Learnt({index}, {token})"),
        }
    }
}
