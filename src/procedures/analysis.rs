/*!
Analysis of a conflict.

Takes the conflict recorded during [propagation](crate::procedures::bcp) and returns a learnt clause, asserting at some previous level.

For the method, see: [analyse_conflict](Context::analyse_conflict).

# First UIP

The clause in conflict is resolved against the reasons for its literals, walking back through the trail from the conflict.
A count is kept of the literals *seen* at the current level which have not been resolved on.
When the count falls to one, the remaining literal at the current level is the first unique implication point (UIP) of the conflict.

The learnt clause is the negation of the UIP together with every seen literal from a previous level.

Every variable seen during the analysis has its score bumped once, and with [MiniSAT](crate::config::ClauseActivity::MiniSAT) activity every learnt clause used during the analysis has its activity bumped.

# Order

The literals of the learnt clause are ordered so that:
- The negation of the UIP is at position zero.
- A literal of the highest level among the remaining literals is at position one.

So, the level of the literal at position one is the level to backjump to, and positions zero and one are the literals to watch.

# Literal block distance

With [Glucose](crate::config::ClauseActivity::Glucose) activity the activity of the learnt clause is the count of distinct levels among its literals.
Levels are counted with a stamp per level, so no clearing is required between analyses.

# Premises

When proofs are traced the identifier of each clause resolved is recorded, with the clause in conflict first.
*/

use crate::{
    config::ClauseActivity,
    context::Context,
    db::{variable::VariableDB, LevelIndex},
    misc::log::targets::{self},
    proof::ClauseId,
    structures::{literal::Literal, reason::Reason},
    types::err::{self},
};

/// The result of analysis, a clause to learn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Analysis {
    /// The literals of the clause, with the asserted literal at position zero.
    pub literals: Vec<Literal>,

    /// The level at which the clause is asserting.
    pub backjump_level: LevelIndex,

    /// The initial activity of the clause.
    pub activity: u32,

    /// The identifiers of the clauses resolved, if proofs are traced.
    pub premises: Vec<ClauseId>,
}

/// Marks `literal` as seen, if not already seen, and bumps the score of its variable.
///
/// A literal from a previous level is added to `learnt`.
/// Returns true if the literal was freshly seen and is from level `current`.
fn mark_literal(
    literal: Literal,
    seen: &mut [bool],
    variable_db: &mut VariableDB,
    current: LevelIndex,
    learnt: &mut Vec<Literal>,
) -> bool {
    let variable = literal.variable();
    if seen[variable as usize] {
        return false;
    }

    seen[variable as usize] = true;
    variable_db.bump_score(variable);

    match variable_db.level_of(variable) {
        Some(level) if level >= current => true,
        _ => {
            learnt.push(literal);
            false
        }
    }
}

fn missing_premise(literal: Literal, reason: Reason) -> err::ErrorKind {
    log::error!(target: targets::ANALYSIS, "No identifier for {literal} from {reason}");
    err::ProofError::UnknownClause.into()
}

impl Context {
    /// For details on conflict analysis see the [analysis](crate::procedures::analysis) procedure.
    pub fn analyse_conflict(&mut self) -> Result<Analysis, err::ErrorKind> {
        let Some(conflict) = self.conflict.take() else {
            log::error!(target: targets::ANALYSIS, "Analysis without a conflict");
            return Err(err::AnalysisError::NoConflict.into());
        };

        let current = self.trail.level();
        if current == 0 {
            log::error!(target: targets::ANALYSIS, "Analysis of a conflict at level zero");
            return Err(err::AnalysisError::RootConflict.into());
        }

        log::debug!(target: targets::ANALYSIS, "Analysis of {} from {} at level {current}", conflict.literal, conflict.reason);

        let bound = self.variable_db.bound();
        let seen = &mut self.analysis_buffer.seen;
        if seen.len() < bound {
            seen.resize(bound, false);
        }

        let bump_clauses = self.config.clause_activity.value == ClauseActivity::MiniSAT;
        let tracer = self.tracer.as_ref();

        let mut learnt: Vec<Literal> = Vec::default();
        let mut premises: Vec<ClauseId> = Vec::default();
        let mut unresolved = 0;

        match conflict.reason {
            Reason::Binary(other) => {
                if let Some(tracer) = tracer {
                    match tracer.binary_id(conflict.literal, other) {
                        Some(id) => premises.push(id),
                        None => return Err(missing_premise(conflict.literal, conflict.reason)),
                    }
                }

                for literal in [conflict.literal, other] {
                    if mark_literal(literal, seen, &mut self.variable_db, current, &mut learnt) {
                        unresolved += 1;
                    }
                }
            }

            Reason::Clause(key) => {
                let clause = self.clause_db.get_mut(key)?;
                if bump_clauses {
                    if let Some(details) = clause.learnt_details_mut() {
                        details.activity = details.activity.saturating_add(1);
                    }
                }
                if tracer.is_some() {
                    premises.push(clause.id());
                }

                for literal in clause.literals() {
                    if mark_literal(*literal, seen, &mut self.variable_db, current, &mut learnt) {
                        unresolved += 1;
                    }
                }
            }

            Reason::Decision | Reason::Fact => {
                log::error!(target: targets::ANALYSIS, "No clause to analyse from {}", conflict.reason);
                return Err(err::AnalysisError::NoConflict.into());
            }
        }

        if unresolved == 0 {
            log::error!(target: targets::ANALYSIS, "Conflict without a literal at the current level");
            return Err(err::AnalysisError::NoConflict.into());
        }

        let mut trail_index = self.trail.len();
        let uip = loop {
            let literal = loop {
                if trail_index == 0 {
                    log::error!(target: targets::ANALYSIS, "Trail exhausted before a UIP");
                    return Err(err::AnalysisError::ExhaustedTrail.into());
                }
                trail_index -= 1;

                let literal = self.trail.literals[trail_index];
                if seen[literal.variable() as usize] {
                    break literal;
                }
            };

            seen[literal.variable() as usize] = false;
            unresolved -= 1;
            if unresolved == 0 {
                break literal;
            }

            let reason = self.variable_db.reason_of(literal.variable());
            match reason {
                Reason::Binary(other) => {
                    if let Some(tracer) = tracer {
                        match tracer.binary_id(literal, other) {
                            Some(id) => premises.push(id),
                            None => return Err(missing_premise(literal, reason)),
                        }
                    }

                    if mark_literal(other, seen, &mut self.variable_db, current, &mut learnt) {
                        unresolved += 1;
                    }
                }

                Reason::Clause(key) => {
                    let clause = self.clause_db.get_mut(key)?;
                    if bump_clauses {
                        if let Some(details) = clause.learnt_details_mut() {
                            details.activity = details.activity.saturating_add(1);
                        }
                    }
                    if tracer.is_some() {
                        premises.push(clause.id());
                    }

                    for other in &clause.literals()[1..] {
                        if mark_literal(*other, seen, &mut self.variable_db, current, &mut learnt) {
                            unresolved += 1;
                        }
                    }
                }

                // Fixed at level zero, so never at the current level.
                Reason::Decision | Reason::Fact => {}
            }
        };

        let mut literals = Vec::with_capacity(learnt.len() + 1);
        literals.push(-uip);
        literals.extend(learnt);

        // Stamps for literal block distance.
        let buffer = &mut self.analysis_buffer;
        buffer.stamp = buffer.stamp.wrapping_add(1);
        if buffer.stamp == 0 {
            buffer.level_stamps.fill(0);
            buffer.stamp = 1;
        }
        if buffer.level_stamps.len() <= current as usize {
            buffer.level_stamps.resize(current as usize + 1, 0);
        }
        buffer.level_stamps[current as usize] = buffer.stamp;

        let mut lbd = 1;
        let mut second: Option<(usize, LevelIndex)> = None;

        for (position, literal) in literals.iter().enumerate().skip(1) {
            let variable = literal.variable();
            buffer.seen[variable as usize] = false;

            let level = self.variable_db.level_of(variable).unwrap_or(0);
            if buffer.level_stamps[level as usize] != buffer.stamp {
                buffer.level_stamps[level as usize] = buffer.stamp;
                lbd += 1;
            }

            match second {
                Some((_, highest)) if highest >= level => {}
                _ => second = Some((position, level)),
            }
        }

        let backjump_level = match second {
            Some((position, level)) => {
                literals.swap(1, position);
                level
            }
            None => 0,
        };

        let activity = match self.config.clause_activity.value {
            ClauseActivity::Glucose => lbd,
            ClauseActivity::MiniSAT => 1,
        };

        log::debug!(target: targets::ANALYSIS, "Learnt {literals:?} asserting at {backjump_level}");

        Ok(Analysis {
            literals,
            backjump_level,
            activity,
            premises,
        })
    }
}
