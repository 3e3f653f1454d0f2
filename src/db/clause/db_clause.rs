/*!
A clause, as stored in the clause database.

Only long clauses (of three or more literals) are stored as database clauses.

# Watched literals

The literals at positions zero and one of a database clause are *watched*.
Whenever a watched literal becomes false [update_watch](DbClause::update_watch) looks for a replacement among the remaining literals.
If no replacement exists the clause is *asserting* (the other watched literal must be true), or the clause conflicts with the valuation.

# Learnt clauses

A learnt clause carries [LearntDetails]:
- An activity, used to choose which learnt clauses to delete during a reduction.
- A count of references, one for each variable the clause is currently the reason for.
  A learnt clause with some reference is *locked* and must not be deleted.
*/

use crate::{
    db::{keys::ClauseKey, variable::VariableDB, LevelIndex},
    proof::ClauseId,
    structures::literal::Literal,
    types::err::{self},
};

/// Details kept only for learnt clauses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LearntDetails {
    /// The activity of the clause.
    /// Higher is better when bumping activity, lower is better for literal block distance.
    pub activity: u32,

    /// A count of variables the clause is the reason for.
    pub references: u32,
}

/// A clause stored in the clause database.
#[derive(Clone, Debug)]
pub struct DbClause {
    key: ClauseKey,
    literals: Vec<Literal>,
    id: ClauseId,
    learnt: Option<LearntDetails>,
}

/// The result of updating a watch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchUpdate {
    /// The other watched literal is true, and the watch was left in place.
    Witness,

    /// The watch was moved to the given literal.
    Moved(Literal),

    /// No replacement was found, and the given literal (now at position zero) must be true.
    Asserting(Literal),
}

/// The two highest levels among the literals of a clause, with a count of unvalued literals.
///
/// See [level_summary](DbClause::level_summary).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelSummary {
    pub highest: Option<LevelIndex>,
    pub second: Option<LevelIndex>,
    pub unassigned: usize,
}

impl DbClause {
    pub fn new(
        key: ClauseKey,
        literals: Vec<Literal>,
        id: ClauseId,
        learnt: Option<LearntDetails>,
    ) -> Self {
        DbClause {
            key,
            literals,
            id,
            learnt,
        }
    }

    pub fn key(&self) -> ClauseKey {
        self.key
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn size(&self) -> usize {
        self.literals.len()
    }

    /// The proof identifier of the clause, or zero if proofs are not traced.
    pub fn id(&self) -> ClauseId {
        self.id
    }

    pub fn is_learnt(&self) -> bool {
        self.learnt.is_some()
    }

    pub fn learnt_details(&self) -> Option<&LearntDetails> {
        self.learnt.as_ref()
    }

    pub fn learnt_details_mut(&mut self) -> Option<&mut LearntDetails> {
        self.learnt.as_mut()
    }

    /// The activity of the clause, or zero for an original clause.
    pub fn activity(&self) -> u32 {
        self.learnt.map(|details| details.activity).unwrap_or(0)
    }

    /// True if the clause is learnt and is the reason for some value.
    pub fn is_locked(&self) -> bool {
        self.learnt.is_some_and(|details| details.references > 0)
    }

    /// True if some literal of the clause is true on the current valuation.
    pub fn is_satisfied(&self, variable_db: &VariableDB) -> bool {
        self.literals
            .iter()
            .any(|literal| variable_db.literal_value(*literal) == Some(true))
    }

    /// Updates the watch on `false_literal`, which must be watched and false on the current valuation.
    ///
    /// - If the other watched literal is true, the clause is witnessed and nothing changes.
    /// - Otherwise, the first literal (from position two) which is not false replaces `false_literal`.
    /// - If no such literal exists, the other watched literal is moved to position zero and returned as asserted.
    ///
    /// In the last case, whether the asserted literal conflicts with the valuation is left to the caller.
    pub fn update_watch(
        &mut self,
        false_literal: Literal,
        variable_db: &VariableDB,
    ) -> Result<WatchUpdate, err::BCPError> {
        let position = if self.literals[0] == false_literal {
            0
        } else if self.literals[1] == false_literal {
            1
        } else {
            return Err(err::BCPError::CorruptWatch);
        };

        let other = self.literals[1 - position];
        if variable_db.literal_value(other) == Some(true) {
            return Ok(WatchUpdate::Witness);
        }

        for index in 2..self.literals.len() {
            if variable_db.literal_value(self.literals[index]) != Some(false) {
                self.literals.swap(position, index);
                return Ok(WatchUpdate::Moved(self.literals[position]));
            }
        }

        self.literals.swap(0, 1 - position);
        Ok(WatchUpdate::Asserting(other))
    }

    /// Summarises the levels of the literals in the clause, and reorders the clause so positions zero and one are the literals to watch.
    ///
    /// See [summarise_levels].
    pub fn level_summary(&mut self, variable_db: &VariableDB) -> LevelSummary {
        summarise_levels(&mut self.literals, variable_db)
    }
}

/// Summarises the levels of `literals`, and reorders `literals` so positions zero and one are the literals to watch.
///
/// Literals are examined in order, until a second unvalued literal is found:
/// - With two unvalued literals, these are moved to positions zero and one.
/// - With one unvalued literal, the literal is moved to position one and the literal of the highest level to position zero.
/// - Otherwise, the literals of the highest and second highest levels are moved to positions zero and one.
///
/// Levels are reported only when there are no unvalued literals, the highest level is also reported with exactly one unvalued literal.
pub fn summarise_levels(literals: &mut [Literal], variable_db: &VariableDB) -> LevelSummary {
    let mut highest: Option<LevelIndex> = None;
    let mut highest_position: Option<usize> = None;
    let mut second: Option<LevelIndex> = None;
    let mut second_position: Option<usize> = None;

    let mut unassigned = 0;
    let mut first_unassigned = 0;
    let mut second_unassigned = 0;

    for (position, literal) in literals.iter().enumerate() {
        let level = variable_db.level_of(literal.variable());

        if level.is_none() {
            unassigned += 1;
            match unassigned {
                1 => first_unassigned = position,
                _ => {
                    second_unassigned = position;
                    break;
                }
            }
        }

        if level > highest {
            second = highest;
            second_position = highest_position;
            highest = level;
            highest_position = Some(position);
        } else if level > second {
            second = level;
            second_position = Some(position);
        }
    }

    if unassigned >= 2 {
        literals.swap(0, first_unassigned);
        literals.swap(1, second_unassigned);
        return LevelSummary {
            highest: None,
            second: None,
            unassigned,
        };
    }

    if unassigned == 1 {
        literals.swap(1, first_unassigned);
        if second_position == Some(1) {
            second_position = Some(first_unassigned);
        }
        if highest_position == Some(1) {
            highest_position = Some(first_unassigned);
        }
    }

    if let Some(highest_position) = highest_position {
        literals.swap(0, highest_position);
        if second_position == Some(0) {
            second_position = Some(highest_position);
        }
    }

    if unassigned == 0 {
        if let Some(second_position) = second_position {
            literals.swap(1, second_position);
        }
    }

    LevelSummary {
        highest,
        second: if unassigned == 0 { second } else { None },
        unassigned,
    }
}
