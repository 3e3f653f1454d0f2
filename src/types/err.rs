//! Error types used in the library.
//!
//! - Most of these are very unlikely to occur during use, and indicate some internal inconsistency.
//! - Some are external --- e.g. a context returns a `ModelUnavailable` error when asked for a model of a formula which has not been found satisfiable.
//! - Some highlight a limit --- e.g. `Timeout` is returned when the decision budget of a solve is exhausted.
//!   In this case nothing is known about satisfiability, and the context may be used for further queries.
//!
//! Note, conflicts found during propagation are not errors, and unsatisfiability is a report rather than an error.
//!
//! Names of the error enums --- for the most part --- overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Analysis(AnalysisError),
    BCP(BCPError),
    ClauseDB(ClauseDBError),
    DecisionStack(DecisionStackError),
    Mark(MarkError),
    Parse(ParseError),
    Proof(ProofError),
    State(StateError),
    VariableDB(VariableDBError),

    /// The decision budget of a solve was exhausted.
    Timeout,
}

/// Noted errors during conflict analysis.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnalysisError {
    /// Analysis was requested without a recorded conflict, or the conflict has no clause to resolve.
    NoConflict,

    /// Analysis was requested for a conflict at level zero, where no clause may be learnt.
    RootConflict,

    /// The trail was exhausted before a unique implication point was found.
    ExhaustedTrail,
}

impl From<AnalysisError> for ErrorKind {
    fn from(e: AnalysisError) -> Self {
        ErrorKind::Analysis(e)
    }
}

/// Noted errors during boolean constraint propagation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BCPError {
    /// Some corruption in the watched literals of a clause.
    /// This is unexpected.
    CorruptWatch,
}

impl From<BCPError> for ErrorKind {
    fn from(e: BCPError) -> Self {
        ErrorKind::BCP(e)
    }
}

/// Errors in the clause database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseDBError {
    /// A clause mentions a variable unknown to the context.
    UnknownVariable,

    /// A clause is missing.
    Missing,

    /// An invalid key token.
    InvalidKeyToken,

    /// No more tokens are available for some index.
    StorageExhausted,
}

impl From<ClauseDBError> for ErrorKind {
    fn from(e: ClauseDBError) -> Self {
        ErrorKind::ClauseDB(e)
    }
}

/// Errors when using the decision stack.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecisionStackError {
    /// A decision was requested on a literal whose variable already has a value.
    AssignedLiteral,

    /// An asserting literal was requested away from the assertion level, or without a learnt clause.
    NotAtAssertionLevel,

    /// An undo was requested for a variable which is not the decision of some level.
    NoDecision,
}

impl From<DecisionStackError> for ErrorKind {
    fn from(e: DecisionStackError) -> Self {
        ErrorKind::DecisionStack(e)
    }
}

/// Errors when restoring a mark.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MarkError {
    /// A pop was requested without a saved mark.
    NoMark,

    /// The bounds of the mark exceed the current databases.
    /// This indicates a corrupted save/pop pairing.
    InconsistentBounds,

    /// A derivation recorded after the mark survived the pop.
    LingeringDeduction,
}

impl From<MarkError> for ErrorKind {
    fn from(e: MarkError) -> Self {
        ErrorKind::Mark(e)
    }
}

/// Errors during parsing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The problem specification is malformed.
    ProblemSpecification,

    /// Reading failed at the given line.
    Io(usize),
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Errors related to proof tracing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProofError {
    /// Proof tracing is not enabled for the context.
    Disabled,

    /// No derivation of the empty clause has been recorded.
    NoRefutation,

    /// A derivation mentions a clause which is not known.
    UnknownClause,

    /// Writing the proof failed.
    Write,
}

impl From<ProofError> for ErrorKind {
    fn from(e: ProofError) -> Self {
        ErrorKind::Proof(e)
    }
}

/// Errors related to the state of a context.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StateError {
    /// A model was requested, though the formula has not been found satisfiable.
    ModelUnavailable,
}

impl From<StateError> for ErrorKind {
    fn from(e: StateError) -> Self {
        ErrorKind::State(e)
    }
}

/// Errors in the variable database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VariableDBError {
    /// A variable with the name already exists.
    DuplicateName,

    /// No variable has the name.
    UnknownName,

    /// There are no more fresh variables.
    VariablesExhausted,
}

impl From<VariableDBError> for ErrorKind {
    fn from(e: VariableDBError) -> Self {
        ErrorKind::VariableDB(e)
    }
}
