/*!
Ways to score learnt clauses, for choosing which learnt clauses to delete during a reduction.

See [Predicting learnt clauses quality in modern SAT solvers](https://www.ijcai.org/Proceedings/09/Papers/074.pdf) for the glucose heuristic.
*/

/// Supported clause activity heuristics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[allow(clippy::upper_case_acronyms)]
pub enum ClauseActivity {
    /// A variant which mimics the clause activity of [MiniSAT](https://link.springer.com/chapter/10.1007/978-3-540-24605-3_37).\
    /// Each learnt clause used when resolving a conflict has its activity bumped, and the least active clauses are deleted first.
    MiniSAT,

    /// A variant which mimics [Glucose](https://www.labri.fr/perso/lsimon/research/glucose/).\
    /// The activity of a learnt clause is the count of distinct levels among its literals when learnt (the literal block distance), and clauses with the highest count are deleted first.
    Glucose,
}

impl ClauseActivity {
    pub const MIN: ClauseActivity = ClauseActivity::MiniSAT;
    pub const MAX: ClauseActivity = ClauseActivity::Glucose;
}

impl std::fmt::Display for ClauseActivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MiniSAT => write!(f, "minisat"),
            Self::Glucose => write!(f, "glucose"),
        }
    }
}

impl std::str::FromStr for ClauseActivity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minisat" => Ok(Self::MiniSAT),
            "glucose" | "lbd" => Ok(Self::Glucose),
            _ => Err(()),
        }
    }
}
