/*!
Why a variable has the value it has.

Every value on the trail is either a decision, a fact of the formula, or a consequence of some clause.
Consequences of binary clauses are distinguished from consequences of long clauses, as binary clauses are stored as pairs of literals rather than in the clause database.
*/

use crate::{db::keys::ClauseKey, structures::literal::Literal};

/// The source of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reason {
    /// A free choice.
    Decision,

    /// A unit clause, asserted at level zero.
    Fact,

    /// A consequence of the binary clause made of the assigned literal and the given literal.
    ///
    /// The given literal is false on the current valuation.
    /// Equivalently, it is the opposite of the literal whose assignment triggered the consequence.
    Binary(Literal),

    /// A consequence of a long clause, with the assigned literal at position zero and all other literals false.
    Clause(ClauseKey),
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decision => write!(f, "decision"),
            Self::Fact => write!(f, "fact"),
            Self::Binary(literal) => write!(f, "binary with {literal}"),
            Self::Clause(key) => write!(f, "clause {key}"),
        }
    }
}
