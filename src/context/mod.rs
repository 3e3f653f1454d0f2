/*!
The context, to which formulas are added and within which solves take place.

A context owns every database used during a solve, together with the configuration and counters of the solve.
Procedures on a context (propagation, analysis, decisions, and so on) are found in [procedures](crate::procedures), and methods to add to a context in [builder](crate::builder).

# Example
```rust
# use prover_sat::context::Context;
# use prover_sat::config::Config;
# use prover_sat::reports::Report;
# use prover_sat::structures::literal::Literal;
let mut the_context = Context::from_config(Config::default());

let p = the_context.fresh_variable(Some("p")).unwrap();
let q = the_context.fresh_variable(Some("q")).unwrap();

let p_q_clause = vec![Literal::new(p, true), Literal::new(q, true)];
assert!(the_context.add_clause(p_q_clause).is_ok());

let not_p = vec![Literal::new(p, false)];

assert!(the_context.add_clause(not_p).is_ok());
assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
assert_eq!(the_context.report(), Report::Satisfiable);

assert_eq!(the_context.variable_db.value_of(p), Some(false));
assert_eq!(the_context.variable_db.value_of(q), Some(true));
```
*/

mod counters;
pub use counters::Counters;

use crate::{
    config::{Config, InitialPhase},
    db::{
        clause::ClauseDB, trail::Trail, variable::VariableDB, watches::Watches, LevelIndex,
    },
    misc::log::targets::{self},
    procedures::{analysis::Analysis, incremental::Mark},
    proof::ProofTracer,
    reports::Report,
    structures::{
        literal::{Literal, VariableIndex},
        reason::Reason,
    },
    types::err::{self},
};

/// The state of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// The consistency of the formula is unknown.
    Unknown,

    /// The formula is known to be consistent, with the trail as a witness.
    Satisfiable,

    /// The formula is known to be inconsistent.
    Unsatisfiable,
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
        }
    }
}

/// A failed assignment, of `literal` from `reason`.
///
/// The variable of `literal` has the opposite value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conflict {
    pub literal: Literal,
    pub reason: Reason,
}

/// Scratch space for conflict analysis.
#[derive(Default)]
pub struct AnalysisBuffer {
    /// Variables seen during the current analysis, indexed by variable.
    pub seen: Vec<bool>,

    /// The stamp of the most recent analysis to see a level, indexed by level.
    pub level_stamps: Vec<u32>,

    /// The stamp of the current analysis.
    pub stamp: u32,
}

/// The state of the [decision stack](crate::procedures::decision_stack) interface.
#[derive(Default)]
pub struct DecisionStack {
    /// The analysis of the most recent conflict, until asserted.
    pub pending: Option<Analysis>,

    /// The level at which the pending clause is asserting.
    pub assertion_level: Option<LevelIndex>,

    /// Set when the trail has changed since implied literals were last reported.
    pub implied_dirty: bool,
}

/// A context.
pub struct Context {
    /// The configuration of the context.
    pub config: Config,

    /// Counters related to the context.
    pub counters: Counters,

    /// The variable database.
    /// See [db::variable](crate::db::variable) for details.
    pub variable_db: VariableDB,

    /// The clause database.
    /// See [db::clause](crate::db::clause) for details.
    pub clause_db: ClauseDB,

    /// Watch lists, for binary and long clauses.
    pub watches: Watches,

    /// The trail of assignments.
    pub trail: Trail,

    /// The state of the context.
    pub state: ContextState,

    pub(crate) conflict: Option<Conflict>,

    pub(crate) analysis_buffer: AnalysisBuffer,

    pub(crate) marks: Vec<Mark>,

    pub(crate) tracer: Option<ProofTracer>,

    pub(crate) decision_stack: DecisionStack,
}

impl Context {
    /// Creates a context from some given configuration.
    pub fn from_config(config: Config) -> Self {
        let tracer = match config.proof_tracing.value {
            true => Some(ProofTracer::default()),
            false => None,
        };

        Context {
            counters: Counters::new(&config),
            config,

            variable_db: VariableDB::default(),
            clause_db: ClauseDB::default(),
            watches: Watches::default(),
            trail: Trail::default(),

            state: ContextState::Unknown,
            conflict: None,

            analysis_buffer: AnalysisBuffer::default(),
            marks: Vec::default(),
            tracer,
            decision_stack: DecisionStack::default(),
        }
    }

    /// A report on the state of the context.
    pub fn report(&self) -> Report {
        Report::from(self.state)
    }

    /// Adds a fresh variable to the context, named `name` if given and `__V<index>` otherwise.
    pub fn fresh_variable(&mut self, name: Option<&str>) -> Result<VariableIndex, err::ErrorKind> {
        let name = match name {
            Some(name) => name.to_string(),
            None => format!("__V{}", self.variable_db.bound()),
        };

        let phase = match self.config.initial_phase.value {
            InitialPhase::Positive => true,
            InitialPhase::Negative | InitialPhase::JeroslowWang => false,
        };

        let index = self.variable_db.fresh_variable(name, phase)?;
        self.watches.fresh_variable(index);

        if self.state == ContextState::Satisfiable {
            self.state = ContextState::Unknown;
        }

        log::trace!(target: targets::VARIABLE_DB, "Fresh variable {index}");
        Ok(index)
    }

    /// True if some variable is named `name`.
    pub fn variable_exists(&self, name: &str) -> bool {
        self.variable_db.index_of(name).is_some()
    }

    /// The index of the variable named `name`.
    pub fn variable_index(&self, name: &str) -> Result<VariableIndex, err::ErrorKind> {
        match self.variable_db.index_of(name) {
            Some(index) => Ok(index),
            None => Err(err::VariableDBError::UnknownName.into()),
        }
    }

    /// The literal written as `string`, a variable name optionally prefixed by `-`.
    ///
    /// A fresh variable is added if no variable has the name.
    pub fn literal_from_string(&mut self, string: &str) -> Result<Literal, err::ErrorKind> {
        let string = string.trim();
        let (name, polarity) = match string.strip_prefix('-') {
            Some(name) => (name, false),
            None => (string, true),
        };

        if name.is_empty() {
            return Err(err::VariableDBError::UnknownName.into());
        }

        let index = match self.variable_db.index_of(name) {
            Some(index) => index,
            None => self.fresh_variable(Some(name))?,
        };

        Ok(Literal::new(index, polarity))
    }

    /// The clause written as `string`, a whitespace separated list of literals as read by [literal_from_string](Context::literal_from_string).
    pub fn clause_from_string(&mut self, string: &str) -> Result<Vec<Literal>, err::ErrorKind> {
        string
            .split_whitespace()
            .map(|literal| self.literal_from_string(literal))
            .collect()
    }
}
