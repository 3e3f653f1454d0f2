/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for extending the library and/or fixing issues.

Note, no log implementation is provided by the library.
The cli installs [env_logger](https://docs.rs/env_logger) when built with the `log` feature.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [BCP](crate::procedures::bcp)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to [analysis](crate::procedures::analysis)
    pub const ANALYSIS: &str = "analysis";

    /// Logs related to clause deletion
    pub const REDUCTION: &str = "reduction";

    /// Logs related to the [clause database](crate::db::clause)
    pub const CLAUSE_DB: &str = "clause_db";

    /// Logs related to the [variable database](crate::db::variable)
    pub const VARIABLE_DB: &str = "variable_db";

    /// Logs related to [backjumping](crate::procedures::backjump)
    pub const BACKJUMP: &str = "backjump";

    /// Logs related to [decisions](crate::procedures::decision)
    pub const DECISION: &str = "decision";

    /// Logs related to restarts
    pub const RESTART: &str = "restart";

    /// Logs related to [marks](crate::procedures::incremental)
    pub const INCREMENTAL: &str = "incremental";

    /// Logs related to [proof tracing](crate::proof)
    pub const PROOF: &str = "proof";

    /// Logs related to [parsing](crate::builder::dimacs)
    pub const PARSE: &str = "parse";
}
