/*!
The initial phase of a variable, used for decisions on a variable before any value of the variable has been saved.
*/

/// Supported initial phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum InitialPhase {
    /// Decide on a negative literal.
    Negative,

    /// Decide on a positive literal.
    Positive,

    /// Decide on the polarity favoured by the [Jeroslow-Wang](crate::structures::variable) weights of clauses added before any decision.
    JeroslowWang,
}

impl InitialPhase {
    pub const MIN: InitialPhase = InitialPhase::Negative;
    pub const MAX: InitialPhase = InitialPhase::JeroslowWang;
}

impl std::fmt::Display for InitialPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negative => write!(f, "negative"),
            Self::Positive => write!(f, "positive"),
            Self::JeroslowWang => write!(f, "jeroslow-wang"),
        }
    }
}

impl std::str::FromStr for InitialPhase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "negative" => Ok(Self::Negative),
            "positive" => Ok(Self::Positive),
            "jeroslow-wang" | "jw" => Ok(Self::JeroslowWang),
            _ => Err(()),
        }
    }
}
